//! Catalog Client Library
//!
//! Client-side logic for a catalog service that stores books and authors.
//! It serves as the foundation for the `catalog-client` CLI (`main.rs`) and
//! the `catalog-ui` web front end.
//!
//! ## Architecture Modules
//! - **`query`**: Closed attribute vocabularies and the compiler that turns
//!   single and compound clauses into the service's wire query string.
//! - **`records`**: Validated attribute bags and the pending-create batch.
//! - **`gateway`**: The HTTP client for search, CRUD, bulk create and scrape
//!   calls, plus request sequencing for views that refresh repeatedly.
//! - **`ranking`**: Top-K selection over a numeric attribute using a two-way
//!   partition sort with a fixed tie rule.
//! - **`chart`**: Projection of a ranked dataset onto bar chart geometry and an
//!   SVG rendering of it.
//! - **`cli`**: Argument parsing and command execution for the binary.
//! - **`config`** / **`error`**: Environment configuration and the error type.

pub mod chart;
pub mod cli;
pub mod config;
pub mod error;
pub mod gateway;
pub mod query;
pub mod ranking;
pub mod records;
