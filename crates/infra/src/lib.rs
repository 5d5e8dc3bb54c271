//! `linguafin-infra` — storage seams for the document services.
//!
//! The services are written against two small traits: a keyed record store
//! and the job directory used for enrichment. Production would back these
//! with the relational store; the in-memory implementations here serve tests
//! and development.

pub mod jobs;
pub mod store;

pub use jobs::{InMemoryJobDirectory, JobDirectory, JobRef};
pub use store::{DocumentStore, InMemoryDocumentStore};
