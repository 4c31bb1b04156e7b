//! Reports module for the finance tracker
//!
//! Summaries over the record store: totals by section and monthly cash
//! flow, printable, exportable to CSV, and renderable as SVG charts.

pub mod cash_flow;
pub mod chart;
pub mod totals;

pub use cash_flow::{monthly_cash_flow, MonthFlow, MonthlyCashFlowReport};
pub use chart::{render_bar_chart, render_pie_chart, ChartKind};
pub use totals::{totals_by_category, SectionTotal, SectionTotalsReport};
