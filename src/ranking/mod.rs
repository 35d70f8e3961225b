//! Top-K Ranking Module
//!
//! Reduces a fetched record set to the K highest-scoring entries.
//!
//! ## Pipeline
//! 1. **Filter**: Records without the score attribute are dropped.
//! 2. **Coerce**: The score is converted to a number (unparseable values become NaN).
//! 3. **Sort**: A two-way partition sort, reversed to get descending order.
//! 4. **Truncate**: The result is cut to `min(k, eligible)` entries.

pub mod ranker;
pub mod types;
