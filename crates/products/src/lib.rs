//! Products domain module.
//!
//! This crate contains the product record, its validated field types and the
//! ordered in-memory catalog, implemented purely as deterministic domain logic
//! (no IO, no terminal, no storage).

pub mod catalog;
pub mod product;
pub mod value;

pub use catalog::Catalog;
pub use product::{Product, ProductDraft};
pub use value::{Price, ProductName, Quantity};
