//! Search Gateway Module
//!
//! The client side of the catalog service's HTTP API.
//!
//! ## Responsibilities
//! - **Search**: Sends compiled queries and normalizes single-object and array answers.
//! - **Records**: Lookup, delete, update, create and bulk create by object kind.
//! - **Scrape**: Triggers server-side ingestion of an external page.
//! - **Sequencing**: Lets a view drop responses that were overtaken by newer requests.
//!
//! ## Submodules
//! - **`client`**: `CatalogClient`, one method per service call.
//! - **`protocol`**: Endpoints, reply DTOs and response normalization.
//! - **`sequence`**: Monotonic request tickets.

pub mod client;
pub mod protocol;
pub mod sequence;

#[cfg(test)]
mod tests;
