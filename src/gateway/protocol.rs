//! Catalog Service Protocol
//!
//! Endpoints of the catalog service and the shapes of its responses.

use crate::error::{CatalogError, Result};
use crate::query::types::ObjectKind;
use crate::records::types::{Record, value_text};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// --- API Endpoints ---

/// Query search: `GET /api/search?q=<compiled query>`.
pub const ENDPOINT_SEARCH: &str = "/api/search";
/// Ingestion of a record scraped from an external page: `POST /api/scrape?attr=<url>`.
pub const ENDPOINT_SCRAPE: &str = "/api/scrape";

/// Single-record endpoint, `/api/book` or `/api/author`.
pub fn record_endpoint(kind: ObjectKind) -> String {
    format!("/api/{}", kind.as_str())
}

/// Bulk-create endpoint, `/api/books` or `/api/authors`.
pub fn collection_endpoint(kind: ObjectKind) -> String {
    format!("/api/{}s", kind.as_str())
}

// --- Data Transfer Objects ---

/// Status and body of a mutating call, kept for display.
///
/// The service answers mutations with small status objects such as
/// `{"PUT success": "Book with id 1 is updated"}` or `{"POST input error": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceReply {
    pub status: u16,
    pub body: Value,
}

impl ServiceReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn message(&self) -> String {
        describe_body(&self.body)
    }
}

/// Flattens a status object into `key: value` pairs.
pub fn describe_body(body: &Value) -> String {
    match body {
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| format!("{}: {}", key, value_text(value)))
            .collect::<Vec<_>>()
            .join("; "),
        other => value_text(other),
    }
}

pub fn service_error(status: u16, body: &Value) -> CatalogError {
    CatalogError::Service {
        status,
        message: describe_body(body),
    }
}

/// A search answer is either one object or an array of them; both become a
/// sequence in response order.
pub fn normalize_records(kind: ObjectKind, body: Value) -> Result<Vec<Record>> {
    match body {
        Value::Array(items) => items
            .into_iter()
            .map(|item| Record::from_value(kind, item))
            .collect(),
        single => Ok(vec![Record::from_value(kind, single)?]),
    }
}
