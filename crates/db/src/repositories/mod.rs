//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod post_repo;
pub mod product_repo;

pub use post_repo::PostRepo;
pub use product_repo::ProductRepo;
