//! In-memory editor for an ordered block sequence.
//!
//! All operations are best-effort: indices are caller-supplied from the
//! editing UI, and out-of-range targets are silently ignored rather than
//! reported. Nothing here persists; the caller saves the resulting
//! sequence as part of the whole post document.

use std::collections::HashSet;

use super::block::{Block, BlockKind};

/// Ordered, mutable collection of blocks plus ephemeral per-block collapse
/// state. The collapse flags are editing UI state only and are never part
/// of the persisted document.
#[derive(Debug, Default)]
pub struct BlockEditor {
    blocks: Vec<Block>,
    collapsed: HashSet<String>,
}

impl BlockEditor {
    /// Wrap an existing sequence, e.g. one loaded from a post document.
    pub fn new(blocks: Vec<Block>) -> Self {
        BlockEditor {
            blocks,
            collapsed: HashSet::new(),
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<Block> {
        self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Construct a new block of `kind` and splice it in at `at` (clamped to
    /// the sequence length; `None` appends). Existing block identities are
    /// never touched. Returns a reference to the inserted block.
    pub fn insert(&mut self, kind: BlockKind, at: Option<usize>) -> &Block {
        let index = at.unwrap_or(self.blocks.len()).min(self.blocks.len());
        self.blocks.insert(index, Block::new(kind));
        &self.blocks[index]
    }

    /// Replace the block at `index` wholesale with a same-variant value.
    ///
    /// The existing block's id is preserved, so per-type field edits can
    /// never change a block's identity, and a replacement of a different
    /// variant is ignored (no type-tag drift at an index). Returns whether
    /// the replacement was applied.
    pub fn update(&mut self, index: usize, block: Block) -> bool {
        let Some(existing) = self.blocks.get_mut(index) else {
            return false;
        };
        if existing.kind() != block.kind() {
            return false;
        }
        existing.body = block.body;
        true
    }

    /// Remove and return the block at `index`; everything after it shifts
    /// down by one.
    pub fn delete(&mut self, index: usize) -> Option<Block> {
        if index >= self.blocks.len() {
            return None;
        }
        let removed = self.blocks.remove(index);
        self.collapsed.remove(&removed.id);
        Some(removed)
    }

    /// Clone the block at `index` under a fresh id and insert the copy
    /// immediately after the source. The source is untouched.
    pub fn duplicate(&mut self, index: usize) -> Option<&Block> {
        let copy = self.blocks.get(index)?.duplicated();
        self.blocks.insert(index + 1, copy);
        Some(&self.blocks[index + 1])
    }

    /// Relocate the block at `from` to `to`. Out-of-range indices are
    /// silently ignored. Returns whether the move was applied.
    pub fn move_block(&mut self, from: usize, to: usize) -> bool {
        if from >= self.blocks.len() || to >= self.blocks.len() {
            return false;
        }
        let block = self.blocks.remove(from);
        self.blocks.insert(to, block);
        true
    }

    /// Bulk-replace the sequence, used by direct drag-and-drop reordering.
    /// The caller guarantees the new sequence is a permutation of the same
    /// block identities; this is not enforced here.
    pub fn reorder(&mut self, new_order: Vec<Block>) {
        self.blocks = new_order;
    }

    /// Toggle the collapsed flag for the block with the given id.
    pub fn toggle_collapsed(&mut self, id: &str) {
        if !self.collapsed.remove(id) {
            self.collapsed.insert(id.to_string());
        }
    }

    pub fn is_collapsed(&self, id: &str) -> bool {
        self.collapsed.contains(id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
