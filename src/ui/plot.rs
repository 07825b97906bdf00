//! Equation chart.

use super::formatters::format_axis_label;
use super::ThemeColors;
use crate::app::{App, ChartGeometry};
use crate::graph::PointSeries;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    symbols::Marker,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

/// Y axis bounds covering every series, padded by `padding` of the span and
/// clamped to `[-limit, limit]`. Series lying wholly outside the limits keep
/// their own bounds.
pub fn y_bounds(series: &[PointSeries], padding: f64, limit: f64) -> (f64, f64) {
    let (lo, hi) = series
        .iter()
        .filter_map(PointSeries::y_bounds)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (a, b)| {
            (lo.min(a), hi.max(b))
        });

    if !lo.is_finite() || !hi.is_finite() {
        return (-1.0, 1.0);
    }

    let (lo, hi) = if hi - lo < f64::EPSILON * lo.abs().max(1.0) {
        (lo - 1.0, hi + 1.0)
    } else {
        let pad = (hi - lo) * padding;
        (lo - pad, hi + pad)
    };
    let (clamped_lo, clamped_hi) = (lo.max(-limit), hi.min(limit));
    if clamped_lo < clamped_hi {
        (clamped_lo, clamped_hi)
    } else {
        (lo, hi)
    }
}

/// Split points into runs with no gap wider than `max_gap`, so a curve is not
/// joined across a skipped singularity.
pub fn segments(points: &[(f64, f64)], max_gap: f64) -> Vec<&[(f64, f64)]> {
    let mut runs = Vec::new();
    let mut start = 0;
    for i in 1..points.len() {
        if points[i].0 - points[i - 1].0 > max_gap {
            runs.push(&points[start..i]);
            start = i;
        }
    }
    if start < points.len() {
        runs.push(&points[start..]);
    }
    runs
}

/// Plotting cells inside the chart block, approximately where ratatui puts
/// them: y labels and the axis line on the left, x labels and the axis
/// line at the bottom.
fn graph_area(inner: Rect, y_labels: &[String]) -> Rect {
    let label_width = y_labels.iter().map(|l| l.len()).max().unwrap_or(0) as u16;
    let left = label_width.saturating_add(1).min(inner.width);
    Rect {
        x: inner.x + left,
        y: inner.y,
        width: inner.width - left,
        height: inner.height.saturating_sub(2),
    }
}

/// Draw every series, the probe line and the selected point.
pub(super) fn draw_plot(f: &mut Frame<'_>, app: &mut App, area: Rect, colors: &ThemeColors) {
    let range = app.model.current_range();
    let title = app
        .file_path
        .as_ref()
        .and_then(|p| p.file_name())
        .map(|n| format!(" {} ", n.to_string_lossy()))
        .unwrap_or_else(|| " eqplot ".to_string());
    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(colors.heading))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border))
        .style(Style::default().bg(colors.bg));

    if app.model.equations().is_empty() {
        app.chart = None;
        let welcome = Paragraph::new("No equations loaded. Press o to open a file.")
            .style(Style::default().fg(colors.text))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(welcome, area);
        return;
    }

    let view = app.config.view;
    let (y_min, y_max) = y_bounds(app.model.series(), view.y_padding_factor, view.max_extent);
    let x_bounds = (range.left(), range.right());

    let x_labels = vec![
        format_axis_label(range.left()),
        format_axis_label(range.center()),
        format_axis_label(range.right()),
    ];
    let y_labels = vec![
        format_axis_label(y_min),
        format_axis_label((y_min + y_max) / 2.0),
        format_axis_label(y_max),
    ];

    let geometry = ChartGeometry {
        area: graph_area(block.inner(area), &y_labels),
        x_bounds,
        y_bounds: (y_min, y_max),
    };

    let sampling = app.model.synchronizer().sampling();
    let step = range.width() / sampling.intervals(sampling.step_multiplier) as f64;
    let probe_line = [(app.probe_x, y_min), (app.probe_x, y_max)];
    let selected: Vec<(f64, f64)> = app.selection.iter().map(|s| (s.x, s.y)).collect();

    let mut datasets = Vec::new();
    for series in app.model.series() {
        for run in segments(&series.points, step * 1.5) {
            datasets.push(
                Dataset::default()
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(series.color))
                    .data(run),
            );
        }
    }
    datasets.push(
        Dataset::default()
            .graph_type(GraphType::Line)
            .style(Style::default().fg(colors.probe))
            .data(&probe_line),
    );
    if !selected.is_empty() {
        datasets.push(
            Dataset::default()
                .marker(Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(colors.probe))
                .data(&selected),
        );
    }

    let x_axis = Axis::default()
        .style(Style::default().fg(colors.axis))
        .bounds([x_bounds.0, x_bounds.1])
        .labels(x_labels);
    let y_axis = Axis::default()
        .style(Style::default().fg(colors.axis))
        .bounds([y_min, y_max])
        .labels(y_labels);

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(x_axis)
        .y_axis(y_axis);
    f.render_widget(chart, area);

    app.chart = Some(geometry);
}
