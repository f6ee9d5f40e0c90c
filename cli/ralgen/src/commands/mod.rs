//! CLI subcommand implementations.

pub mod build;
pub mod inspect;

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::manifest::RalgenManifest;

/// Fully-resolved compilation inputs: workbook directory, top block name
/// and the exclusion list. Flags win over manifest values; manifest paths
/// are relative to the manifest's directory.
pub(crate) struct SourceOptions {
    pub workbook_dir: PathBuf,
    pub top: String,
    pub excluded: Vec<String>,
}

pub(crate) fn resolve_source(
    manifest: Option<&RalgenManifest>,
    manifest_dir: Option<&Path>,
    cwd: &Path,
    workbook: Option<&Path>,
    top: Option<&str>,
    excluded: &[String],
) -> Result<SourceOptions> {
    let base = manifest_dir.unwrap_or(cwd);

    let workbook_dir = match workbook {
        Some(path) => path.to_path_buf(),
        None => match manifest.and_then(|m| m.workbook_path()) {
            Some(configured) => base.join(configured),
            None => bail!(
                "no workbook directory given (pass --workbook or set [workbook] path in ralgen.toml)"
            ),
        },
    };

    let top = match top {
        Some(name) => name.to_string(),
        None => match manifest {
            Some(m) => m.project.top.clone(),
            None => bail!("no top block name given (pass --top or set [project] top in ralgen.toml)"),
        },
    };

    let mut all_excluded = excluded.to_vec();
    if let Some(m) = manifest {
        all_excluded.extend(m.excluded().iter().cloned());
    }

    Ok(SourceOptions {
        workbook_dir,
        top,
        excluded: all_excluded,
    })
}
