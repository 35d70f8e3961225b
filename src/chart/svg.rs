use super::types::{Bar, ChartModel};
use crate::query::types::ObjectKind;
use std::fmt::Write;

const BAR_FILL: &str = "#4C7AA6";
const LABEL_FILL: &str = "#A64C38";
const TICK_LENGTH: f64 = 6.0;

/// Chart title naming how many entries are actually drawn.
pub fn caption(kind: ObjectKind, shown: usize) -> String {
    format!("Top {} {}s by rating", shown, kind)
}

/// Draws a chart model as a standalone SVG document.
pub fn render(model: &ChartModel, caption: &str) -> String {
    let mut svg = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" font-family="sans-serif" font-size="10">"#,
        model.width, model.height
    );
    let _ = writeln!(svg, "<title>{}</title>", escape(caption));

    for bar in &model.bars {
        let Some((y, height)) = drawable_extent(bar) else {
            continue;
        };
        let _ = writeln!(
            svg,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"><title>{}</title></rect>"#,
            bar.x,
            y,
            bar.width,
            height,
            BAR_FILL,
            escape(&bar.identifier)
        );
    }

    for label in &model.labels {
        if !label.x.is_finite() || !label.y.is_finite() {
            continue;
        }
        let _ = writeln!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" fill="{}">{}</text>"#,
            label.x,
            label.y,
            LABEL_FILL,
            escape(&label.text)
        );
    }

    let y_axis = &model.y_axis;
    if let (Some(first), Some(last)) = (y_axis.ticks.first(), y_axis.ticks.last()) {
        let _ = writeln!(
            svg,
            r#"<line x1="{0:.2}" y1="{1:.2}" x2="{0:.2}" y2="{2:.2}" stroke="black"/>"#,
            y_axis.origin_x, first.position, last.position
        );
    }
    for tick in &y_axis.ticks {
        let _ = writeln!(
            svg,
            r#"<line x1="{0:.2}" y1="{2:.2}" x2="{1:.2}" y2="{2:.2}" stroke="black"/><text x="{3:.2}" y="{4:.2}" text-anchor="end">{5}</text>"#,
            y_axis.origin_x - TICK_LENGTH,
            y_axis.origin_x,
            tick.position,
            y_axis.origin_x - TICK_LENGTH - 3.0,
            tick.position + 3.0,
            escape(&tick.label)
        );
    }

    let x_axis = &model.x_axis;
    let _ = writeln!(
        svg,
        r#"<line x1="{0:.2}" y1="{2:.2}" x2="{1:.2}" y2="{2:.2}" stroke="black"/>"#,
        x_axis.origin_x,
        model.width - x_axis.origin_x,
        x_axis.origin_y
    );
    for tick in &x_axis.ticks {
        let _ = writeln!(
            svg,
            r#"<line x1="{0:.2}" y1="{1:.2}" x2="{0:.2}" y2="{2:.2}" stroke="black"/><text transform="translate({0:.2},{3:.2}) rotate(-20)" text-anchor="end">{4}</text>"#,
            tick.position,
            x_axis.origin_y,
            x_axis.origin_y + TICK_LENGTH,
            x_axis.origin_y + TICK_LENGTH + 10.0,
            escape(&tick.label)
        );
    }

    svg.push_str("</svg>\n");
    svg
}

/// Vertical extent of a bar as SVG accepts it. A negative height (score
/// below zero) hangs below the baseline; a NaN height cannot be drawn.
fn drawable_extent(bar: &Bar) -> Option<(f64, f64)> {
    if !bar.y.is_finite() || !bar.height.is_finite() {
        return None;
    }
    if bar.height < 0.0 {
        Some((bar.y + bar.height, -bar.height))
    } else {
        Some((bar.y, bar.height))
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
