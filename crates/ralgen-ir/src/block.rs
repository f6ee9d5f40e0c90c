//! Blocks: the composite nodes of the register model tree.

use serde::Serialize;

use crate::memory::Memory;
use crate::register::Register;

/// Structural classification of a block, decided once at resolution time
/// from the shape of its source table and never re-derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BlockKind {
    /// Owns registers and memories directly.
    Leaf,
    /// Owns sub-blocks.
    Composite,
}

/// A node of the register model hierarchy.
///
/// Offsets are relative to the immediate parent, not absolute. All member
/// sequences are append-only and insertion-ordered; emission derives its
/// output from the final sequences.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub name: String,
    pub offset: u64,
    pub kind: BlockKind,
    pub registers: Vec<Register>,
    pub memories: Vec<Memory>,
    pub sub_blocks: Vec<Block>,
}

impl Block {
    pub fn new(name: impl Into<String>, offset: u64, kind: BlockKind) -> Self {
        Self {
            name: name.into(),
            offset,
            kind,
            registers: Vec::new(),
            memories: Vec::new(),
            sub_blocks: Vec::new(),
        }
    }

    pub fn add_register(&mut self, register: Register) {
        self.registers.push(register);
    }

    pub fn add_memory(&mut self, memory: Memory) {
        self.memories.push(memory);
    }

    pub fn add_sub_block(&mut self, sub_block: Block) {
        self.sub_blocks.push(sub_block);
    }

    /// Look up an owned register by (lower-cased) name.
    pub fn register(&self, name: &str) -> Option<&Register> {
        self.registers.iter().find(|r| r.name == name)
    }

    /// Mutable lookup used while continuation rows append fields.
    pub fn register_mut(&mut self, name: &str) -> Option<&mut Register> {
        self.registers.iter_mut().find(|r| r.name == name)
    }

    /// Total number of blocks in this subtree, this block included.
    pub fn block_count(&self) -> usize {
        1 + self
            .sub_blocks
            .iter()
            .map(Block::block_count)
            .sum::<usize>()
    }
}
