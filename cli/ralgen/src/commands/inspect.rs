//! `ralgen inspect` — resolve the hierarchy without writing artifacts.

use std::path::Path;

use anyhow::{bail, Context, Result};
use ralgen_ir::{sv_hex, Block};
use ralgen_observe::Reporter;
use ralgen_resolve::{NullSink, Resolver};

use crate::commands::resolve_source;
use crate::manifest::RalgenManifest;

/// Resolve and print the block tree (text by default, JSON on request).
#[allow(clippy::too_many_arguments)]
pub fn run(
    cwd: &Path,
    manifest: Option<&RalgenManifest>,
    manifest_dir: Option<&Path>,
    workbook: Option<&Path>,
    top: Option<&str>,
    excluded: &[String],
    export: Option<&str>,
    verbose: bool,
) -> Result<()> {
    let source = resolve_source(manifest, manifest_dir, cwd, workbook, top, excluded)?;
    let workbook = ralgen_table::load_dir(&source.workbook_dir)
        .with_context(|| format!("loading workbook from {}", source.workbook_dir.display()))?;

    let mut reporter = Reporter::new(verbose);
    let mut sink = NullSink;
    let top_block = Resolver::new(&workbook).resolve_top(
        &source.top,
        &source.excluded,
        &mut sink,
        &mut reporter,
    )?;

    match export.unwrap_or("text") {
        "text" => print_tree(&top_block, 0),
        "json" => println!("{}", serde_json::to_string_pretty(&top_block)?),
        other => bail!("unknown export format: '{other}'. Choose: text, json"),
    }
    Ok(())
}

fn print_tree(block: &Block, depth: usize) {
    let indent = "  ".repeat(depth);
    println!("{indent}{} @ {}", block.name, sv_hex(block.offset));
    for register in &block.registers {
        println!(
            "{indent}  reg {} @ {} ({})",
            register.name,
            sv_hex(register.address),
            register.access
        );
        for field in &register.fields {
            println!(
                "{indent}    {} [{}:{}] {} reset {}",
                field.name,
                field.hi,
                field.lo,
                field.access,
                sv_hex(field.reset)
            );
        }
    }
    for memory in &block.memories {
        println!(
            "{indent}  mem {} @ {} ({} bytes, {}-bit)",
            memory.name,
            sv_hex(memory.offset),
            sv_hex(memory.size),
            memory.width_bits
        );
    }
    for sub in &block.sub_blocks {
        print_tree(sub, depth + 1);
    }
}
