//! Progress reporting for resolution and emission.
//!
//! The reporter is an explicit capability handed into the resolver and the
//! emitter, so silencing narration is a configuration decision of the
//! caller rather than a process-wide stream redirection.

pub mod reporter;

pub use reporter::{Notice, Reporter, Severity};
