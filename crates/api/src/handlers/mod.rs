//! Request handlers, grouped by feature.

pub mod posts;
pub mod products;
