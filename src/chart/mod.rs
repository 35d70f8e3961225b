//! Chart Projection Module
//!
//! Maps a ranked dataset onto the fixed bar-chart shape of the ranking view.
//!
//! ## Submodules
//! - **`types`**: Layout parameters and the emitted geometry (`ChartModel`).
//! - **`projector`**: Pure dataset → geometry projection.
//! - **`svg`**: Serializes a `ChartModel` into an SVG document.

pub mod projector;
pub mod svg;
pub mod types;
