//! Chart Data Types
//!
//! Geometry produced by the projector. All coordinates are absolute, in the
//! same units as `ChartLayout::width`/`height`, with the origin at the top-left
//! corner and `y` growing downwards.

use serde::{Deserialize, Serialize};

/// Fixed shape of the ranking chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    /// Horizontal position of the vertical axis; bars start to its right.
    pub y_axis_x: f64,
    /// Extra gap between the vertical axis and the first bar.
    pub axis_gap: f64,
    /// Top of the score domain. The bottom is always 0.
    pub score_max: f64,
    /// Share of the total height that the score domain spans.
    pub plot_fraction: f64,
    /// Share of each bar slot left empty.
    pub bar_padding_fraction: f64,
    pub tick_step: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 500.0,
            y_axis_x: 30.0,
            axis_gap: 5.0,
            score_max: 5.0,
            plot_fraction: 0.8,
            bar_padding_fraction: 0.2,
            tick_step: 0.5,
        }
    }
}

impl ChartLayout {
    pub fn plot_height(&self) -> f64 {
        self.height * self.plot_fraction
    }

    /// Distance between the bottom edge and the horizontal axis.
    pub fn baseline_gap(&self) -> f64 {
        self.height * (1.0 - self.plot_fraction) / 2.0
    }

    /// Linear map of `[0, score_max]` onto `[0, plot_height]`. Not clamped.
    pub fn scale(&self, score: f64) -> f64 {
        score / self.score_max * self.plot_height()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub identifier: String,
    pub score: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub label: String,
    /// `y` for the vertical axis, `x` for the horizontal one.
    pub position: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub origin_x: f64,
    pub origin_y: f64,
    pub ticks: Vec<AxisTick>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartModel {
    pub width: f64,
    pub height: f64,
    pub bars: Vec<Bar>,
    pub labels: Vec<ValueLabel>,
    pub y_axis: Axis,
    pub x_axis: Axis,
}
