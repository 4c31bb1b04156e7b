//! SVG charts of the summary reports
//!
//! Bar chart of the monthly cash flow and pie chart of the section totals.

use std::f64::consts::PI;
use std::path::Path;

use serde::{Deserialize, Serialize};
use svg::node::element::{Circle, Line, Path as SvgPath, Rectangle, Text};
use svg::Document;
use tracing::debug;

use crate::error::{TrackerError, TrackerResult};
use crate::reports::{MonthlyCashFlowReport, SectionTotalsReport};
use crate::storage::file_io::ensure_parent_dir;

/// Kind of chart to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Monthly cash flow bars
    #[default]
    Bar,
    /// Share of each section
    Pie,
}

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 500.0;
const MARGIN: f64 = 60.0;
const TITLE_Y: f64 = 30.0;

const POSITIVE_COLOR: &str = "seagreen";
const NEGATIVE_COLOR: &str = "firebrick";
const COLORS: &[&str] = &["steelblue", "darkorange", "seagreen", "firebrick"];

fn text(x: f64, y: f64, content: impl Into<String>) -> Text {
    Text::new(content.into())
        .set("x", x)
        .set("y", y)
        .set("font-family", "sans-serif")
}

fn document_with_title(title: &str) -> Document {
    Document::new()
        .set("viewBox", (0.0, 0.0, WIDTH, HEIGHT))
        .set("width", WIDTH)
        .set("height", HEIGHT)
        .add(
            text(WIDTH / 2.0, TITLE_Y, title)
                .set("text-anchor", "middle")
                .set("font-size", 20),
        )
}

fn save(path: &Path, document: &Document) -> TrackerResult<()> {
    ensure_parent_dir(path)?;
    svg::save(path, document).map_err(|e| {
        TrackerError::Export(format!("Failed to write chart {}: {}", path.display(), e))
    })?;
    debug!(path = %path.display(), "chart written");
    Ok(())
}

/// Build the bar chart of the monthly cash flow
///
/// Bars of negative months hang below the zero axis.
pub fn bar_chart(report: &MonthlyCashFlowReport) -> Document {
    let mut document = document_with_title("Monthly Cash Flow");
    if report.months.is_empty() {
        return document;
    }

    let values: Vec<f64> = report.months.iter().map(|m| m.net.as_f64()).collect();
    let max = values.iter().cloned().fold(0.0_f64, f64::max);
    let min = values.iter().cloned().fold(0.0_f64, f64::min);
    let span = if max - min > 0.0 { max - min } else { 1.0 };

    let plot_top = TITLE_Y + MARGIN / 2.0;
    let plot_height = HEIGHT - plot_top - MARGIN;
    let plot_width = WIDTH - 2.0 * MARGIN;
    let to_y = |value: f64| plot_top + (max - value) / span * plot_height;
    let zero_y = to_y(0.0);

    let slot = plot_width / values.len() as f64;
    let bar_width = slot * 0.7;

    for (i, (flow, value)) in report.months.iter().zip(&values).enumerate() {
        let x = MARGIN + i as f64 * slot + (slot - bar_width) / 2.0;
        let y = to_y(*value);
        let (top, height) = if *value >= 0.0 {
            (y, zero_y - y)
        } else {
            (zero_y, y - zero_y)
        };
        let color = if *value >= 0.0 {
            POSITIVE_COLOR
        } else {
            NEGATIVE_COLOR
        };

        document = document
            .add(
                Rectangle::new()
                    .set("x", x)
                    .set("y", top)
                    .set("width", bar_width)
                    .set("height", height)
                    .set("fill", color),
            )
            .add(
                text(x + bar_width / 2.0, HEIGHT - MARGIN / 2.0, flow.month.to_string())
                    .set("text-anchor", "middle")
                    .set("font-size", 12),
            );
    }

    let axis = Line::new()
        .set("x1", MARGIN)
        .set("x2", WIDTH - MARGIN)
        .set("y1", zero_y)
        .set("y2", zero_y)
        .set("stroke", "black")
        .set("stroke-width", 1.5);
    document.add(axis)
}

/// Build the pie chart of the section totals
///
/// Slices are proportional to the absolute section totals; sections with a
/// zero total are left out.
pub fn pie_chart(report: &SectionTotalsReport) -> Document {
    let mut document = document_with_title("Totals by Section");

    let slices: Vec<(&str, f64)> = report
        .rows
        .iter()
        .filter(|row| !row.total.is_zero())
        .map(|row| (row.section.name(), row.total.abs().as_f64()))
        .collect();
    let sum: f64 = slices.iter().map(|(_, value)| value).sum();
    if slices.is_empty() || sum <= 0.0 {
        return document;
    }

    let radius = (HEIGHT - TITLE_Y - 2.0 * MARGIN) / 2.0;
    let (cx, cy) = (MARGIN + radius, TITLE_Y + MARGIN + radius);
    let legend_x = cx + radius + MARGIN;

    let point = |angle: f64| (cx + radius * angle.cos(), cy + radius * angle.sin());
    let mut angle = -PI / 2.0;

    for (i, (name, value)) in slices.iter().enumerate() {
        let share = value / sum;
        let color = COLORS[i % COLORS.len()];

        if slices.len() == 1 {
            document = document.add(
                Circle::new()
                    .set("cx", cx)
                    .set("cy", cy)
                    .set("r", radius)
                    .set("fill", color),
            );
        } else {
            let end = angle + share * 2.0 * PI;
            let (x1, y1) = point(angle);
            let (x2, y2) = point(end);
            let large_arc = if share > 0.5 { 1 } else { 0 };
            let d = format!(
                "M {cx} {cy} L {x1} {y1} A {radius} {radius} 0 {large_arc} 1 {x2} {y2} Z"
            );
            document = document.add(
                SvgPath::new()
                    .set("d", d)
                    .set("fill", color)
                    .set("stroke", "white"),
            );
            angle = end;
        }

        let legend_y = TITLE_Y + MARGIN + i as f64 * 28.0;
        document = document
            .add(
                Rectangle::new()
                    .set("x", legend_x)
                    .set("y", legend_y)
                    .set("width", 16)
                    .set("height", 16)
                    .set("fill", color),
            )
            .add(
                text(
                    legend_x + 24.0,
                    legend_y + 13.0,
                    format!("{} ({:.1}%)", name, share * 100.0),
                )
                .set("font-size", 14),
            );
    }

    document
}

/// Render a bar chart of the monthly cash flow to an SVG file
pub fn render_bar_chart(report: &MonthlyCashFlowReport, path: &Path) -> TrackerResult<()> {
    save(path, &bar_chart(report))
}

/// Render a pie chart of the section totals to an SVG file
pub fn render_pie_chart(report: &SectionTotalsReport, path: &Path) -> TrackerResult<()> {
    save(path, &pie_chart(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryDraft, Section};
    use crate::reports::{monthly_cash_flow, totals_by_category};
    use crate::storage::RecordStore;
    use tempfile::TempDir;

    fn sample_store() -> RecordStore {
        RecordStore::from_drafts([
            EntryDraft::parse(Section::Savings, "A", "100", "2024-01-15").unwrap(),
            EntryDraft::parse(Section::Loans, "Car", "-300", "2024-02-01").unwrap(),
        ])
    }

    #[test]
    fn test_bar_chart_has_one_bar_per_month() {
        let svg = bar_chart(&monthly_cash_flow(&sample_store())).to_string();

        assert!(svg.contains("Monthly Cash Flow"));
        assert_eq!(svg.matches("<rect").count(), 2);
        assert!(svg.contains("2024-01"));
        assert!(svg.contains(NEGATIVE_COLOR));
    }

    #[test]
    fn test_pie_chart_skips_empty_sections() {
        let svg = pie_chart(&totals_by_category(&sample_store())).to_string();

        assert!(svg.contains("Totals by Section"));
        assert_eq!(svg.matches("<path").count(), 2);
        assert!(svg.contains("Loans (75.0%)"));
        assert!(!svg.contains("Income Pending"));
    }

    #[test]
    fn test_single_slice_is_a_circle() {
        let store = RecordStore::from_drafts([
            EntryDraft::parse(Section::Savings, "A", "100", "2024-01-15").unwrap(),
        ]);
        let svg = pie_chart(&totals_by_category(&store)).to_string();
        assert!(svg.contains("<circle"));
        assert!(svg.contains("Savings (100.0%)"));
    }

    #[test]
    fn test_empty_store_renders_title_only() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("charts").join("empty.svg");
        let store = RecordStore::new();

        render_bar_chart(&monthly_cash_flow(&store), &path).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("Monthly Cash Flow"));
        assert!(!svg.contains("<rect"));

        render_pie_chart(&totals_by_category(&store), &path).unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("Totals by Section"));
        assert!(!svg.contains("<path"));
    }
}
