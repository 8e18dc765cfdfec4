//! Domain logic for the Verdia storefront backend.
//!
//! This crate has zero internal dependencies so it can be used by the
//! API/repository layer and any future CLI or worker tooling. It owns the
//! block-based content model (schema, factory, editor, renderer) plus the
//! validation helpers shared by the blog and catalog features.

pub mod blog;
pub mod catalog;
pub mod content;
pub mod error;
pub mod types;
