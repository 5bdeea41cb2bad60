//! # fieldbox-query
//!
//! The pure document query engine: given a catalog snapshot, a category
//! filter, and free-text search input, produce the ordered visible subset
//! of documents. No mutation, no caching; callers recompute whenever an
//! input changes.

pub mod engine;

pub use engine::visible_documents;
