use super::types::{Axis, AxisTick, Bar, ChartLayout, ChartModel, ValueLabel};
use crate::ranking::types::RankedEntry;

pub fn project(dataset: &[RankedEntry]) -> ChartModel {
    project_with(dataset, &ChartLayout::default())
}

/// Lays out one bar per entry, left to right in dataset order.
///
/// Bars share the width right of the vertical axis equally and are inset by
/// `bar_padding_fraction` of their slot. Scores outside `[0, score_max]` are
/// not clamped and end up outside the plot area.
pub fn project_with(dataset: &[RankedEntry], layout: &ChartLayout) -> ChartModel {
    let count = dataset.len();
    let baseline = layout.height - layout.baseline_gap();

    let mut bars = Vec::with_capacity(count);
    let mut labels = Vec::with_capacity(count);

    if count > 0 {
        let slot = slot_width(layout, count);
        let padding = slot * layout.bar_padding_fraction;

        for (i, entry) in dataset.iter().enumerate() {
            let bar_height = layout.scale(entry.score);
            let slot_start = slot * i as f64;

            bars.push(Bar {
                identifier: entry.identifier.clone(),
                score: entry.score,
                x: slot_start + layout.y_axis_x + layout.axis_gap,
                y: baseline - bar_height,
                width: slot - padding,
                height: bar_height,
            });
            labels.push(ValueLabel {
                text: entry.score.to_string(),
                x: slot_start + padding + layout.y_axis_x,
                y: baseline - bar_height - 2.0,
            });
        }
    }

    ChartModel {
        width: layout.width,
        height: layout.height,
        bars,
        labels,
        y_axis: vertical_axis(layout),
        x_axis: horizontal_axis(dataset, layout),
    }
}

fn slot_width(layout: &ChartLayout, count: usize) -> f64 {
    (layout.width - layout.y_axis_x - layout.axis_gap) / count as f64
}

fn vertical_axis(layout: &ChartLayout) -> Axis {
    let top = layout.baseline_gap();
    let steps = (layout.score_max / layout.tick_step).round() as usize;

    let ticks = (0..=steps)
        .map(|step| {
            let value = step as f64 * layout.tick_step;
            AxisTick {
                label: format!("{:.1}", value),
                position: top + layout.plot_height() - layout.scale(value),
            }
        })
        .collect();

    Axis {
        origin_x: layout.y_axis_x,
        origin_y: top,
        ticks,
    }
}

/// Point scale over the identifiers; a lone point sits mid-range.
fn horizontal_axis(dataset: &[RankedEntry], layout: &ChartLayout) -> Axis {
    let origin_x = layout.y_axis_x;
    let origin_y = layout.height - layout.baseline_gap();
    let count = dataset.len();

    let ticks = if count == 0 {
        Vec::new()
    } else {
        let start = layout.y_axis_x;
        let stop = layout.width - layout.y_axis_x - slot_width(layout, count) * 0.5;
        let span = stop - start;

        dataset
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let offset = if count == 1 {
                    span / 2.0
                } else {
                    span / (count - 1) as f64 * i as f64
                };
                AxisTick {
                    label: entry.identifier.clone(),
                    position: origin_x + start + offset,
                }
            })
            .collect()
    };

    Axis {
        origin_x,
        origin_y,
        ticks,
    }
}
