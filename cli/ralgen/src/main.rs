//! ralgen CLI — compile tabular register specifications into UVM register
//! models.

mod commands;
mod manifest;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use manifest::RalgenManifest;

#[derive(Parser)]
#[command(
    name = "ralgen",
    version,
    about = "Tabular register specification to UVM register model compiler"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a workbook into register model packages and a filelist
    Build {
        /// Workbook directory (one CSV file per sheet)
        #[arg(long)]
        workbook: Option<PathBuf>,
        /// Top block name (also the name of the index sheet)
        #[arg(long)]
        top: Option<String>,
        /// Peripheral sheet to exclude from resolution (repeatable)
        #[arg(long = "exclude")]
        excluded: Vec<String>,
        /// Output directory for generated artifacts
        #[arg(long)]
        out_dir: Option<PathBuf>,
        /// Narrate progress to stderr
        #[arg(long)]
        verbose: bool,
    },
    /// Resolve the hierarchy without writing artifacts and print it
    Inspect {
        /// Workbook directory (one CSV file per sheet)
        #[arg(long)]
        workbook: Option<PathBuf>,
        /// Top block name (also the name of the index sheet)
        #[arg(long)]
        top: Option<String>,
        /// Peripheral sheet to exclude from resolution (repeatable)
        #[arg(long = "exclude")]
        excluded: Vec<String>,
        /// Output format (text, json)
        #[arg(long)]
        export: Option<String>,
        /// Narrate progress to stderr
        #[arg(long)]
        verbose: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Build {
            workbook,
            top,
            excluded,
            out_dir,
            verbose,
        } => {
            let (manifest, manifest_dir) = load_manifest_optional(&cwd)?;
            commands::build::run(
                &cwd,
                manifest.as_ref(),
                manifest_dir.as_deref(),
                workbook.as_deref(),
                top.as_deref(),
                &excluded,
                out_dir.as_deref(),
                verbose,
            )
        }

        Commands::Inspect {
            workbook,
            top,
            excluded,
            export,
            verbose,
        } => {
            let (manifest, manifest_dir) = load_manifest_optional(&cwd)?;
            commands::inspect::run(
                &cwd,
                manifest.as_ref(),
                manifest_dir.as_deref(),
                workbook.as_deref(),
                top.as_deref(),
                &excluded,
                export.as_deref(),
                verbose,
            )
        }
    }
}

/// Try to load a manifest from the current directory upward.
fn load_manifest_optional(cwd: &Path) -> anyhow::Result<(Option<RalgenManifest>, Option<PathBuf>)> {
    match RalgenManifest::find_and_load(cwd)? {
        Some((manifest, dir)) => Ok((Some(manifest), Some(dir))),
        None => Ok((None, None)),
    }
}
