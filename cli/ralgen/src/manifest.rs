//! `ralgen.toml` manifest parsing and project configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// The top-level manifest structure for a ralgen project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RalgenManifest {
    /// Project metadata (required).
    pub project: ProjectConfig,
    /// Workbook location and exclusions.
    #[serde(default)]
    pub workbook: Option<WorkbookConfig>,
    /// Output configuration.
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

/// Project metadata section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Name of the top block and of its index sheet (required).
    pub top: String,
}

/// Workbook configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkbookConfig {
    /// Workbook directory, relative to the manifest.
    #[serde(default)]
    pub path: Option<String>,
    /// Peripheral sheets excluded from automatic sub-block resolution.
    #[serde(default)]
    pub excluded: Vec<String>,
}

/// Output configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Artifact directory, relative to the manifest.
    #[serde(default)]
    pub dir: Option<String>,
}

impl RalgenManifest {
    /// Search upward from `start_dir` for a `ralgen.toml` file, parse and
    /// return it along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join("ralgen.toml");
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: RalgenManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing ralgen.toml")
    }

    pub fn workbook_path(&self) -> Option<&str> {
        self.workbook.as_ref().and_then(|w| w.path.as_deref())
    }

    pub fn excluded(&self) -> &[String] {
        self.workbook
            .as_ref()
            .map(|w| w.excluded.as_slice())
            .unwrap_or(&[])
    }

    pub fn output_dir(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.dir.as_deref())
    }
}
