//! Catalog Records Module
//!
//! Typed representation of the book and author records exchanged with the
//! catalog service.
//!
//! ## Submodules
//! - **`types`**: The validated `Record` mapping and value formatting helpers.
//! - **`pending`**: The session-scoped batch of records awaiting bulk creation.

pub mod pending;
pub mod types;
