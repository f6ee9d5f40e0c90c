//! IR entities for the ralgen register model compiler.
//!
//! Pure data plus local invariants: bit [`Field`]s, 32-bit [`Register`]s,
//! [`Memory`] regions and composite [`Block`]s, together with the access
//! policy vocabulary and hexadecimal cell normalization shared by the
//! resolver and the emitter.

pub mod access;
pub mod block;
pub mod error;
pub mod field;
pub mod hex;
pub mod memory;
pub mod register;

pub use access::AccessPolicy;
pub use block::{Block, BlockKind};
pub use error::IrError;
pub use field::{Field, RESERVED_MARKER};
pub use hex::{parse_hex, sv_hex};
pub use memory::{Memory, MEMORY_MARKER};
pub use register::Register;
