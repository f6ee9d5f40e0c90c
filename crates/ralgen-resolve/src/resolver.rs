//! Recursive hierarchy resolution.
//!
//! Tables are classified by shape: a sheet carrying both a `peripheral`
//! and an `offset` header column nests further peripherals and resolves
//! recursively; any other sheet is a leaf register table. Every finished
//! block is handed to the [`BlockSink`] on its way out of the recursion,
//! so descendants always reach persistent storage before their parent.

use ralgen_ir::{parse_hex, AccessPolicy, Block, BlockKind, Field, Memory, Register};
use ralgen_observe::Reporter;
use ralgen_table::{Sheet, TableSource};

use crate::error::{BoxError, ResolveError};
use crate::rows::{cell, classify_name_cell, col, NameCell};

/// Header columns whose joint presence marks a composite table.
const PERIPHERAL_COLUMN: &str = "peripheral";
const OFFSET_COLUMN: &str = "offset";

/// Destination for every fully-resolved block.
pub trait BlockSink {
    fn accept(&mut self, block: &Block, reporter: &mut Reporter) -> Result<(), BoxError>;
}

/// Sink that discards blocks; used when only the resolved tree is wanted.
#[derive(Debug, Default)]
pub struct NullSink;

impl BlockSink for NullSink {
    fn accept(&mut self, _block: &Block, _reporter: &mut Reporter) -> Result<(), BoxError> {
        Ok(())
    }
}

/// Resolves the block hierarchy out of a [`TableSource`].
pub struct Resolver<'a, S: TableSource> {
    source: &'a S,
}

impl<'a, S: TableSource> Resolver<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Resolve the whole hierarchy under the `top_name` sheet.
    ///
    /// Peripherals named in `excluded` (the top sheet's own name is always
    /// excluded) are not resolved as sub-blocks. A peripheral whose sheet
    /// is missing is reported as a warning and skipped; every other
    /// failure aborts the run.
    pub fn resolve_top(
        &self,
        top_name: &str,
        excluded: &[String],
        sink: &mut dyn BlockSink,
        reporter: &mut Reporter,
    ) -> Result<Block, ResolveError> {
        let sheet = self
            .source
            .sheet(top_name)
            .ok_or_else(|| ResolveError::SheetNotFound {
                name: top_name.to_string(),
            })?;
        let peripheral_col = require_column(sheet, PERIPHERAL_COLUMN)?;
        let offset_col = require_column(sheet, OFFSET_COLUMN)?;

        let mut top = Block::new(top_name, 0, BlockKind::Composite);
        let mut visited = vec![top_name.to_string()];
        for (index, row) in sheet.rows().iter().enumerate() {
            let name = cell(row, peripheral_col);
            if name.is_empty() {
                continue;
            }
            if name == top_name || excluded.iter().any(|e| e == name) {
                reporter.info(format!("excluding peripheral `{name}` from resolution"));
                continue;
            }
            let offset = parse_hex_cell(sheet, index, cell(row, offset_col), "offset")?;
            self.attach_child(&mut top, name, offset, &mut visited, sink, reporter)?;
        }

        sink.accept(&top, reporter)
            .map_err(|source| ResolveError::Sink {
                block: top.name.clone(),
                source,
            })?;
        Ok(top)
    }

    /// Resolve one child and attach it to `parent`, absorbing a missing
    /// sheet as a warning per the partial-failure policy.
    fn attach_child(
        &self,
        parent: &mut Block,
        name: &str,
        offset: u64,
        visited: &mut Vec<String>,
        sink: &mut dyn BlockSink,
        reporter: &mut Reporter,
    ) -> Result<(), ResolveError> {
        match self.resolve_peripheral(name, offset, visited, sink, reporter) {
            Ok(child) => {
                reporter.info(format!("`{}` add sub_block `{}`", parent.name, child.name));
                parent.add_sub_block(child);
                Ok(())
            }
            Err(ResolveError::SheetNotFound { name }) => {
                reporter.warning(format!(
                    "cannot find a sheet for peripheral `{name}`; skipping it"
                ));
                Ok(())
            }
            Err(other) => Err(other),
        }
    }

    fn resolve_peripheral(
        &self,
        name: &str,
        offset: u64,
        visited: &mut Vec<String>,
        sink: &mut dyn BlockSink,
        reporter: &mut Reporter,
    ) -> Result<Block, ResolveError> {
        if visited.iter().any(|seen| seen == name) {
            let mut path = visited.clone();
            path.push(name.to_string());
            return Err(ResolveError::CyclicReference {
                path: path.join(" -> "),
            });
        }
        let sheet = self
            .source
            .sheet(name)
            .ok_or_else(|| ResolveError::SheetNotFound {
                name: name.to_string(),
            })?;

        let composite = sheet.has_column(PERIPHERAL_COLUMN) && sheet.has_column(OFFSET_COLUMN);
        let kind = if composite {
            BlockKind::Composite
        } else {
            BlockKind::Leaf
        };
        let mut block = Block::new(name, offset, kind);

        visited.push(name.to_string());
        let scanned = if composite {
            reporter.info(format!("`{name}` nests further peripherals"));
            self.resolve_composite(sheet, &mut block, visited, sink, reporter)
        } else {
            resolve_leaf_table(sheet, &mut block)
        };
        visited.pop();
        scanned?;

        sink.accept(&block, reporter)
            .map_err(|source| ResolveError::Sink {
                block: block.name.clone(),
                source,
            })?;
        Ok(block)
    }

    fn resolve_composite(
        &self,
        sheet: &Sheet,
        block: &mut Block,
        visited: &mut Vec<String>,
        sink: &mut dyn BlockSink,
        reporter: &mut Reporter,
    ) -> Result<(), ResolveError> {
        let peripheral_col = require_column(sheet, PERIPHERAL_COLUMN)?;
        let offset_col = require_column(sheet, OFFSET_COLUMN)?;
        for (index, row) in sheet.rows().iter().enumerate() {
            let child_name = cell(row, peripheral_col);
            if child_name.is_empty() {
                continue;
            }
            let child_offset = parse_hex_cell(sheet, index, cell(row, offset_col), "offset")?;
            self.attach_child(block, child_name, child_offset, visited, sink, reporter)?;
        }
        Ok(())
    }
}

/// Scan a leaf register table into `block`.
///
/// Tracks the current register by name: a non-empty name cell starts a new
/// register or re-enters one already started (tables repeat the name on
/// continuation rows); a non-empty field cell appends to the current
/// register; memory rows contribute a memory and nothing else.
fn resolve_leaf_table(sheet: &Sheet, block: &mut Block) -> Result<(), ResolveError> {
    let mut current: Option<String> = None;
    for (index, row) in sheet.rows().iter().enumerate() {
        let field_cell = cell(row, col::FIELD_NAME);
        let mut is_memory = false;
        match classify_name_cell(cell(row, col::REG_NAME)) {
            NameCell::Memory(name) => {
                is_memory = true;
                let range = cell(row, col::ADDRESS);
                let base = match range.split_once('~') {
                    Some((lo, _)) => lo,
                    None => range,
                };
                let offset = parse_hex_cell(sheet, index, base, "address")?;
                block.add_memory(Memory::new(
                    name,
                    Memory::DEFAULT_SIZE_BYTES,
                    Memory::DEFAULT_WIDTH_BITS,
                    offset,
                ));
            }
            NameCell::Register(name) => {
                let lowered = name.to_lowercase();
                if block.register(&lowered).is_none() {
                    let address = parse_hex_cell(sheet, index, cell(row, col::ADDRESS), "address")?;
                    let access = parse_access_cell(sheet, index, cell(row, col::REG_ACCESS))?;
                    block.add_register(Register::new(&lowered, address, access));
                }
                current = Some(lowered);
            }
            NameCell::Empty => {}
        }

        if is_memory || field_cell.is_empty() {
            continue;
        }
        let access = parse_access_cell(sheet, index, cell(row, col::FIELD_ACCESS))?;
        let reset = parse_hex_cell(sheet, index, cell(row, col::RESET), "reset value")?;
        let hi = parse_dec_cell(sheet, index, cell(row, col::BIT_HI), "bit-position-high")?;
        let lo = parse_dec_cell(sheet, index, cell(row, col::BIT_LO), "bit-position-low")?;
        let function = Some(cell(row, col::FUNCTION))
            .filter(|text| !text.is_empty())
            .map(str::to_string);
        let field = Field::new(field_cell, access, reset, hi, lo, function).map_err(|source| {
            ResolveError::InvalidField {
                sheet: sheet.name().to_string(),
                row: row_number(index),
                source,
            }
        })?;
        let register = current
            .as_deref()
            .and_then(|name| block.register_mut(name))
            .ok_or_else(|| ResolveError::FieldWithoutRegister {
                sheet: sheet.name().to_string(),
                row: row_number(index),
            })?;
        register.add_field(field);
    }
    Ok(())
}

/// Sheet row number for error context; data rows start after the header.
fn row_number(index: usize) -> usize {
    index + 2
}

fn require_column(sheet: &Sheet, label: &str) -> Result<usize, ResolveError> {
    sheet
        .column(label)
        .ok_or_else(|| ResolveError::MissingColumn {
            sheet: sheet.name().to_string(),
            column: label.to_string(),
        })
}

fn parse_hex_cell(
    sheet: &Sheet,
    index: usize,
    text: &str,
    what: &'static str,
) -> Result<u64, ResolveError> {
    parse_hex(text).map_err(|_| ResolveError::BadCell {
        sheet: sheet.name().to_string(),
        row: row_number(index),
        what,
        text: text.to_string(),
    })
}

fn parse_dec_cell(
    sheet: &Sheet,
    index: usize,
    text: &str,
    what: &'static str,
) -> Result<u32, ResolveError> {
    text.parse().map_err(|_| ResolveError::BadCell {
        sheet: sheet.name().to_string(),
        row: row_number(index),
        what,
        text: text.to_string(),
    })
}

fn parse_access_cell(sheet: &Sheet, index: usize, text: &str) -> Result<AccessPolicy, ResolveError> {
    AccessPolicy::parse(text).map_err(|_| ResolveError::BadCell {
        sheet: sheet.name().to_string(),
        row: row_number(index),
        what: "access policy",
        text: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ralgen_ir::IrError;
    use ralgen_table::Workbook;

    /// Sink recording the order in which blocks were handed over.
    #[derive(Default)]
    struct RecordingSink {
        names: Vec<String>,
    }

    impl BlockSink for RecordingSink {
        fn accept(&mut self, block: &Block, _reporter: &mut Reporter) -> Result<(), BoxError> {
            self.names.push(block.name.clone());
            Ok(())
        }
    }

    fn sheet(name: &str, table: &[&[&str]]) -> Sheet {
        let headers = table[0].iter().map(|s| s.to_string()).collect();
        let rows = table[1..]
            .iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect();
        Sheet::new(name, headers, rows)
    }

    const LEAF_HEADER: &[&str] = &[
        "register name",
        "address",
        "register access",
        "field name",
        "field access",
        "reset value",
        "bitpos end",
        "bitpos start",
        "function",
    ];

    fn uart_sheet() -> Sheet {
        sheet(
            "uart",
            &[
                LEAF_HEADER,
                &["CTRL", "0x10", "rw", "en", "rw", "0x0", "0", "0", "enable"],
                &["", "", "", "reserve0", "ro", "0x0", "31", "1", ""],
            ],
        )
    }

    fn workbook_with_top() -> Workbook {
        let mut wb = Workbook::new();
        wb.insert(sheet(
            "pulpino",
            &[
                &["peripheral", "offset"],
                &["uart", "0x1000"],
                &["gpio", "0x2000"],
            ],
        ));
        wb.insert(uart_sheet());
        wb.insert(sheet(
            "gpio",
            &[
                LEAF_HEADER,
                &["DIR", "0x0", "rw", "dir", "rw", "0x0", "31", "0", ""],
            ],
        ));
        wb
    }

    fn resolve(
        wb: &Workbook,
        top: &str,
        excluded: &[String],
    ) -> (Result<Block, ResolveError>, RecordingSink, Reporter) {
        let mut sink = RecordingSink::default();
        let mut reporter = Reporter::quiet();
        let result = Resolver::new(wb).resolve_top(top, excluded, &mut sink, &mut reporter);
        (result, sink, reporter)
    }

    #[test]
    fn leaf_registers_and_fields_resolve_in_row_order() {
        let (result, _, _) = resolve(&workbook_with_top(), "pulpino", &[]);
        let top = result.unwrap();
        assert_eq!(top.offset, 0);
        assert_eq!(top.kind, BlockKind::Composite);
        assert_eq!(top.sub_blocks.len(), 2);

        let uart = &top.sub_blocks[0];
        assert_eq!(uart.name, "uart");
        assert_eq!(uart.offset, 0x1000);
        assert_eq!(uart.kind, BlockKind::Leaf);
        let ctrl = uart.register("ctrl").unwrap();
        assert_eq!(ctrl.address, 0x10);
        let fields: Vec<&str> = ctrl.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(fields, ["en", "reserve0"]);
        assert_eq!(ctrl.fields[1].hi, 31);
        assert_eq!(ctrl.fields[1].lo, 1);
        assert_eq!(ctrl.fields[1].width(), 31);
    }

    #[test]
    fn children_reach_the_sink_before_the_top() {
        let (result, sink, _) = resolve(&workbook_with_top(), "pulpino", &[]);
        result.unwrap();
        assert_eq!(sink.names, ["uart", "gpio", "pulpino"]);
    }

    #[test]
    fn missing_sheet_is_skipped_with_a_warning() {
        let mut wb = workbook_with_top();
        wb.insert(sheet(
            "pulpino",
            &[
                &["peripheral", "offset"],
                &["uart", "0x1000"],
                &["dma", "0x3000"],
            ],
        ));
        let (result, sink, reporter) = resolve(&wb, "pulpino", &[]);
        let top = result.unwrap();
        let names: Vec<&str> = top.sub_blocks.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["uart"]);
        assert!(!sink.names.iter().any(|n| n == "dma"));
        assert!(reporter
            .notices()
            .iter()
            .any(|n| n.severity == ralgen_observe::Severity::Warning && n.message.contains("dma")));
    }

    #[test]
    fn invalid_field_range_aborts_before_the_block_is_emitted() {
        let mut wb = Workbook::new();
        wb.insert(sheet(
            "pulpino",
            &[&["peripheral", "offset"], &["uart", "0x1000"]],
        ));
        wb.insert(sheet(
            "uart",
            &[
                LEAF_HEADER,
                &["CTRL", "0x10", "rw", "bad", "rw", "0x0", "3", "7", ""],
            ],
        ));
        let (result, sink, _) = resolve(&wb, "pulpino", &[]);
        match result.unwrap_err() {
            ResolveError::InvalidField { sheet, row, source } => {
                assert_eq!(sheet, "uart");
                assert_eq!(row, 2);
                assert!(matches!(source, IrError::InvalidFieldRange { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(sink.names.is_empty());
    }

    #[test]
    fn composite_classification_needs_both_columns() {
        let mut wb = Workbook::new();
        wb.insert(sheet(
            "pulpino",
            &[&["peripheral", "offset"], &["soc", "0x0"]],
        ));
        wb.insert(sheet(
            "soc",
            &[&["peripheral", "offset"], &["uart", "0x100"]],
        ));
        wb.insert(uart_sheet());
        let (result, sink, _) = resolve(&wb, "pulpino", &[]);
        let top = result.unwrap();
        let soc = &top.sub_blocks[0];
        assert_eq!(soc.kind, BlockKind::Composite);
        assert_eq!(soc.sub_blocks[0].name, "uart");
        assert_eq!(soc.sub_blocks[0].offset, 0x100);
        assert_eq!(soc.sub_blocks[0].kind, BlockKind::Leaf);
        assert_eq!(sink.names, ["uart", "soc", "pulpino"]);
    }

    #[test]
    fn continuation_rows_reuse_the_register() {
        let mut wb = Workbook::new();
        wb.insert(sheet(
            "pulpino",
            &[&["peripheral", "offset"], &["uart", "0x1000"]],
        ));
        wb.insert(sheet(
            "uart",
            &[
                LEAF_HEADER,
                &["CTRL", "0x10", "rw", "en", "rw", "0x0", "0", "0", ""],
                &["ctrl", "0x10", "rw", "mode", "rw", "0x1", "2", "1", ""],
                &["", "", "", "stop", "rw", "0x0", "3", "3", ""],
            ],
        ));
        let (result, _, _) = resolve(&wb, "pulpino", &[]);
        let top = result.unwrap();
        let uart = &top.sub_blocks[0];
        assert_eq!(uart.registers.len(), 1);
        let fields: Vec<&str> = uart.registers[0]
            .fields
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(fields, ["en", "mode", "stop"]);
    }

    #[test]
    fn memory_rows_take_the_range_lower_bound() {
        let mut wb = Workbook::new();
        wb.insert(sheet(
            "pulpino",
            &[&["peripheral", "offset"], &["uart", "0x1000"]],
        ));
        wb.insert(sheet(
            "uart",
            &[
                LEAF_HEADER,
                &["rx_mem", "0x100~0x140", "rw", "", "", "", "", "", ""],
                &["CTRL", "0x10", "rw", "en", "rw", "0x0", "0", "0", ""],
            ],
        ));
        let (result, _, _) = resolve(&wb, "pulpino", &[]);
        let uart = &result.unwrap().sub_blocks[0];
        assert_eq!(uart.memories.len(), 1);
        assert_eq!(uart.memories[0].name, "rx_mem");
        assert_eq!(uart.memories[0].offset, 0x100);
        assert_eq!(uart.memories[0].size, 0x40);
        assert_eq!(uart.memories[0].width_bits, 32);
        assert_eq!(uart.registers.len(), 1);
    }

    #[test]
    fn cyclic_reference_is_detected() {
        let mut wb = Workbook::new();
        wb.insert(sheet(
            "pulpino",
            &[&["peripheral", "offset"], &["a", "0x0"]],
        ));
        wb.insert(sheet("a", &[&["peripheral", "offset"], &["b", "0x0"]]));
        wb.insert(sheet("b", &[&["peripheral", "offset"], &["a", "0x0"]]));
        let (result, _, _) = resolve(&wb, "pulpino", &[]);
        match result.unwrap_err() {
            ResolveError::CyclicReference { path } => {
                assert_eq!(path, "pulpino -> a -> b -> a");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn excluded_peripherals_are_not_resolved() {
        let (result, sink, _) =
            resolve(&workbook_with_top(), "pulpino", &["gpio".to_string()]);
        let top = result.unwrap();
        let names: Vec<&str> = top.sub_blocks.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["uart"]);
        assert_eq!(sink.names, ["uart", "pulpino"]);
    }

    #[test]
    fn top_sheet_listing_itself_is_skipped() {
        let mut wb = workbook_with_top();
        wb.insert(sheet(
            "pulpino",
            &[
                &["peripheral", "offset"],
                &["pulpino", "0x0"],
                &["uart", "0x1000"],
            ],
        ));
        let (result, _, _) = resolve(&wb, "pulpino", &[]);
        let top = result.unwrap();
        assert_eq!(top.sub_blocks.len(), 1);
        assert_eq!(top.sub_blocks[0].name, "uart");
    }

    #[test]
    fn field_row_before_any_register_fails() {
        let mut wb = Workbook::new();
        wb.insert(sheet(
            "pulpino",
            &[&["peripheral", "offset"], &["uart", "0x1000"]],
        ));
        wb.insert(sheet(
            "uart",
            &[
                LEAF_HEADER,
                &["", "", "", "orphan", "rw", "0x0", "0", "0", ""],
            ],
        ));
        let (result, _, _) = resolve(&wb, "pulpino", &[]);
        assert!(matches!(
            result.unwrap_err(),
            ResolveError::FieldWithoutRegister { row: 2, .. }
        ));
    }

    #[test]
    fn malformed_offset_cell_aborts() {
        let mut wb = workbook_with_top();
        wb.insert(sheet(
            "pulpino",
            &[&["peripheral", "offset"], &["uart", "not-hex"]],
        ));
        let (result, _, _) = resolve(&wb, "pulpino", &[]);
        assert!(matches!(
            result.unwrap_err(),
            ResolveError::BadCell { what: "offset", .. }
        ));
    }

    #[test]
    fn top_sheet_without_offset_column_fails() {
        let mut wb = Workbook::new();
        wb.insert(sheet("pulpino", &[&["peripheral"], &["uart"]]));
        let (result, _, _) = resolve(&wb, "pulpino", &[]);
        assert!(matches!(
            result.unwrap_err(),
            ResolveError::MissingColumn { .. }
        ));
    }

    #[test]
    fn missing_top_sheet_is_fatal() {
        let wb = Workbook::new();
        let (result, _, _) = resolve(&wb, "pulpino", &[]);
        assert!(matches!(
            result.unwrap_err(),
            ResolveError::SheetNotFound { .. }
        ));
    }
}
