//! `ralgen build` — load the workbook, resolve the hierarchy, emit artifacts.

use std::path::Path;

use anyhow::{Context, Result};
use ralgen_emit::{manifest_name, DirStore, Emitter};
use ralgen_observe::Reporter;
use ralgen_resolve::Resolver;

use crate::commands::resolve_source;
use crate::manifest::RalgenManifest;

/// Run the build pipeline.
#[allow(clippy::too_many_arguments)]
pub fn run(
    cwd: &Path,
    manifest: Option<&RalgenManifest>,
    manifest_dir: Option<&Path>,
    workbook: Option<&Path>,
    top: Option<&str>,
    excluded: &[String],
    out_dir: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let source = resolve_source(manifest, manifest_dir, cwd, workbook, top, excluded)?;
    let out = match out_dir {
        Some(path) => path.to_path_buf(),
        None => match manifest.and_then(|m| m.output_dir()) {
            Some(configured) => manifest_dir.unwrap_or(cwd).join(configured),
            None => cwd.to_path_buf(),
        },
    };

    let workbook = ralgen_table::load_dir(&source.workbook_dir)
        .with_context(|| format!("loading workbook from {}", source.workbook_dir.display()))?;
    let store = DirStore::create(&out)
        .with_context(|| format!("creating output directory {}", out.display()))?;

    let mut reporter = Reporter::new(verbose);
    let mut emitter = Emitter::new(store);
    let top_block = Resolver::new(&workbook).resolve_top(
        &source.top,
        &source.excluded,
        &mut emitter,
        &mut reporter,
    )?;
    let listed = emitter.emit_manifest(&top_block, &mut reporter)?;

    println!(
        "Resolved {} blocks under `{}`",
        top_block.block_count(),
        top_block.name
    );
    println!(
        "Wrote {} artifacts and `{}` to {}",
        listed.len(),
        manifest_name(&top_block),
        out.display()
    );
    if reporter.has_warnings() {
        println!(
            "{} peripheral(s) skipped; see warnings above",
            reporter.warning_count()
        );
    }
    Ok(())
}
