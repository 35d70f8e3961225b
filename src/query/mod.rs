//! Query Compiler Module
//!
//! Turns a user's field/value selection (optionally a second one joined by a
//! boolean operator) into the single query string the catalog's search
//! endpoint understands.
//!
//! ## Grammar
//! - `clause := object "." field ":" value`
//! - `compound := clause ("AND" | "OR") clause`, with no delimiter around the operator.
//!
//! ## Submodules
//! - **`types`**: Object kinds, closed field vocabularies and clause structures.
//! - **`compiler`**: Rendering of clauses into the wire format.

pub mod compiler;
pub mod types;
