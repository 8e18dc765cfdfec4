//! The block-based content model: schema, factory, editor, and renderer.
//!
//! A blog post's body is an ordered sequence of [`block::Block`] values.
//! The editor mutates that sequence in memory, the owning post document is
//! persisted as a whole, and the renderer later turns the same sequence
//! into a display tree without touching it.

pub mod block;
pub mod editor;
pub mod render;
pub mod sanitize;
pub mod video;
