//! `linguafin-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! typed identifiers, the shared error taxonomy, and pagination primitives.

pub mod error;
pub mod id;
pub mod pagination;

pub use error::{DocumentKind, DomainError, DomainResult};
pub use id::ObjectId;
pub use pagination::{Page, PageParams, SortOrder};
