//! The emitter: one artifact per block, plus the filelist manifest.

use ralgen_ir::Block;
use ralgen_observe::Reporter;
use ralgen_resolve::{BlockSink, BoxError};

use crate::error::EmitError;
use crate::render;
use crate::store::ArtifactStore;

/// Deterministic artifact name for a block.
pub fn artifact_name(block: &Block) -> String {
    format!("{}_rgm_pkg.sv", block.name)
}

/// Deterministic manifest name for a top block.
pub fn manifest_name(top: &Block) -> String {
    format!("{}_rgm_filelist.f", top.name)
}

/// Emits SystemVerilog register model packages into an [`ArtifactStore`].
///
/// Used as the resolver's [`BlockSink`], it receives blocks children-first,
/// so every `import {sub}_rgm_pkg::*` in a parent artifact refers to a
/// package already on storage.
pub struct Emitter<S: ArtifactStore> {
    store: S,
}

impl<S: ArtifactStore> Emitter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Render and write the artifact for one block, returning its name.
    pub fn emit_block(
        &mut self,
        block: &Block,
        reporter: &mut Reporter,
    ) -> Result<String, EmitError> {
        let name = artifact_name(block);
        let text = render::render_package(block);
        self.store
            .write(&name, &text)
            .map_err(|source| EmitError::Write {
                artifact: name.clone(),
                source,
            })?;
        reporter.info(format!("wrote `{}` model to `{name}`", block.name));
        Ok(name)
    }

    /// Write the filelist manifest for the tree under `top` and return the
    /// listed names: post-order (every descendant before its parent), each
    /// name exactly once.
    pub fn emit_manifest(
        &mut self,
        top: &Block,
        reporter: &mut Reporter,
    ) -> Result<Vec<String>, EmitError> {
        let mut names = Vec::new();
        collect_post_order(top, &mut names);

        let manifest = manifest_name(top);
        let mut text = names.join("\n");
        text.push('\n');
        self.store
            .write(&manifest, &text)
            .map_err(|source| EmitError::Write {
                artifact: manifest.clone(),
                source,
            })?;
        reporter.info(format!(
            "wrote filelist `{manifest}` ({} entries)",
            names.len()
        ));
        Ok(names)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S: ArtifactStore> BlockSink for Emitter<S> {
    fn accept(&mut self, block: &Block, reporter: &mut Reporter) -> Result<(), BoxError> {
        self.emit_block(block, reporter)?;
        Ok(())
    }
}

fn collect_post_order(block: &Block, names: &mut Vec<String>) {
    for sub in &block.sub_blocks {
        collect_post_order(sub, names);
    }
    let name = artifact_name(block);
    if !names.contains(&name) {
        names.push(name);
    }
}
