//! Loading a workbook from a directory of CSV sheets.
//!
//! Each `<name>.csv` file becomes the sheet `name`; the first record is the
//! header row. Fields are trimmed on read, and ragged records are tolerated
//! (short rows pad out to the header width).

use std::path::Path;

use crate::error::TableError;
use crate::sheet::{Sheet, Workbook};

/// Load every `*.csv` file under `dir` as a sheet of one workbook.
pub fn load_dir(dir: &Path) -> Result<Workbook, TableError> {
    let entries = std::fs::read_dir(dir).map_err(|source| TableError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| TableError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            paths.push(path);
        }
    }
    paths.sort();

    let mut workbook = Workbook::new();
    for path in paths {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        workbook.insert(load_sheet(&path, &name)?);
    }

    if workbook.is_empty() {
        return Err(TableError::NoSheets {
            path: dir.to_path_buf(),
        });
    }
    Ok(workbook)
}

fn load_sheet(path: &Path, name: &str) -> Result<Sheet, TableError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| TableError::Csv {
            sheet: name.to_string(),
            source,
        })?;

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| TableError::Csv {
            sheet: name.to_string(),
            source,
        })?;
        records.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    if records.is_empty() {
        return Err(TableError::EmptySheet {
            sheet: name.to_string(),
        });
    }
    let headers = records.remove(0);
    Ok(Sheet::new(name, headers, records))
}
