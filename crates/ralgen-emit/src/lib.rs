//! Emitter for the ralgen register model compiler.
//!
//! Walks resolved [`ralgen_ir::Block`]s and deterministically renders one
//! SystemVerilog UVM package per block, plus a dependency-ordered filelist
//! manifest. Implements the resolver's `BlockSink`, so artifacts are
//! written children-first while resolution is still unwinding.

pub mod emitter;
pub mod error;
mod render;
pub mod store;

pub use emitter::{artifact_name, manifest_name, Emitter};
pub use error::EmitError;
pub use store::{ArtifactStore, DirStore, MemStore};
