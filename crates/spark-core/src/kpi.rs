// File: crates/spark-core/src/kpi.rs
// Summary: Monthly KPI entries, ROI formulas and the chart data derived from them.
// Notes:
// - Entries are kept newest first, the order the dashboard table shows them in.
//   Charts plot oldest to newest.

use chrono::{Datelike, NaiveDate};

use crate::format::MISSING;
use crate::series::Series;

/// Months shown in the snapshot and the chart.
pub const RECENT_MONTHS: usize = 12;
/// Margin display is clamped to +/- this many percent.
pub const MARGIN_CLAMP: f64 = 999.0;

/// Non-finite inputs count as zero.
#[inline]
fn n(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

#[derive(Clone, Debug, PartialEq)]
pub struct KpiEntry {
    /// First day of the month the entry covers.
    pub month: NaiveDate,
    pub revenue: f64,
    pub cost: f64,
    pub notes: Option<String>,
}

impl KpiEntry {
    pub fn new(month: NaiveDate, revenue: f64, cost: f64) -> Self {
        Self { month, revenue, cost, notes: None }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn net(&self) -> f64 {
        n(self.revenue) - n(self.cost)
    }

    /// Chart axis label, `YYYY-MM`.
    pub fn month_label(&self) -> String {
        self.month.format("%Y-%m").to_string()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoiInputs {
    pub total_investment: f64,
    pub value_delivered: f64,
    pub term_months: f64,
    pub upfront_payment: f64,
    pub outcome_based_payment: f64,
}

impl RoiInputs {
    pub fn new(total_investment: f64, value_delivered: f64) -> Self {
        Self {
            total_investment,
            value_delivered,
            term_months: 12.0,
            upfront_payment: 0.0,
            outcome_based_payment: 0.0,
        }
    }

    pub fn roi_percent(&self) -> f64 {
        roi_percent(self.total_investment, self.value_delivered)
    }

    pub fn net_savings(&self) -> f64 {
        net_savings(self.total_investment, self.value_delivered)
    }
}

impl Default for RoiInputs {
    fn default() -> Self {
        Self::new(5_000.0, 15_000.0)
    }
}

/// Return on investment in percent; 0 when nothing was invested.
pub fn roi_percent(total_investment: f64, value_delivered: f64) -> f64 {
    let invested = n(total_investment);
    if invested <= 0.0 {
        return 0.0;
    }
    (n(value_delivered) - invested) / invested * 100.0
}

pub fn net_savings(total_investment: f64, value_delivered: f64) -> f64 {
    n(value_delivered) - n(total_investment)
}

/// Growth from `previous` to `current` in percent. None when `previous` is
/// zero or either value is non-finite.
pub fn month_over_month_growth(previous: f64, current: f64) -> Option<f64> {
    if !previous.is_finite() || !current.is_finite() || previous == 0.0 {
        return None;
    }
    Some((current - previous) / previous.abs() * 100.0)
}

/// Totals over the most recent `RECENT_MONTHS` entries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Snapshot {
    pub revenue: f64,
    pub cost: f64,
    pub net: f64,
    /// Net margin in percent, clamped to +/- `MARGIN_CLAMP`.
    pub margin_percent: f64,
}

impl Snapshot {
    /// `entries` newest first.
    pub fn from_recent(entries: &[KpiEntry]) -> Self {
        let recent = &entries[..entries.len().min(RECENT_MONTHS)];
        let revenue: f64 = recent.iter().map(|e| n(e.revenue)).sum();
        let cost: f64 = recent.iter().map(|e| n(e.cost)).sum();
        let net = revenue - cost;
        let margin = if revenue > 0.0 { net / revenue * 100.0 } else { 0.0 };
        Self { revenue, cost, net, margin_percent: margin.clamp(-MARGIN_CLAMP, MARGIN_CLAMP) }
    }
}

/// X labels and the Revenue/Cost/Net series for a chart.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartData {
    pub x_labels: Vec<String>,
    pub series: Vec<Series>,
}

/// Chart data for the most recent `RECENT_MONTHS` of `entries` (newest first),
/// plotted oldest to newest. With no entries, a flat placeholder is returned
/// so the chart still has a line to draw.
pub fn chart_data(entries: &[KpiEntry]) -> ChartData {
    let recent: Vec<&KpiEntry> = entries.iter().take(RECENT_MONTHS).rev().collect();
    if recent.is_empty() {
        let placeholder = vec![0.0, 0.0];
        return ChartData {
            x_labels: vec![MISSING.to_string(), MISSING.to_string()],
            series: vec![
                Series::new("Revenue", placeholder.clone()),
                Series::new("Cost", placeholder.clone()),
                Series::new("Net", placeholder),
            ],
        };
    }

    ChartData {
        x_labels: recent.iter().map(|e| e.month_label()).collect(),
        series: vec![
            Series::new("Revenue", recent.iter().map(|e| n(e.revenue)).collect()),
            Series::new("Cost", recent.iter().map(|e| n(e.cost)).collect()),
            Series::new("Net", recent.iter().map(|e| e.net()).collect()),
        ],
    }
}

/// First day of the month `back` months before `today`'s month.
pub fn month_start(today: NaiveDate, back: u32) -> Option<NaiveDate> {
    let total = today.year() * 12 + today.month0() as i32 - back as i32;
    NaiveDate::from_ymd_opt(total.div_euclid(12), total.rem_euclid(12) as u32 + 1, 1)
}

/// Twelve seeded months ending at `today`'s month, newest first.
pub fn demo_rows(today: NaiveDate) -> Vec<KpiEntry> {
    const BASE_REVENUE: f64 = 18_000.0;
    const BASE_COST: f64 = 9_500.0;

    let mut rows: Vec<KpiEntry> = (0..RECENT_MONTHS as u32)
        .rev()
        .filter_map(|back| month_start(today, back))
        .enumerate()
        .map(|(i, month)| {
            let wiggle = (i % 4) as f64 * 1_200.0;
            let revenue = BASE_REVENUE + wiggle + i as f64 * 450.0;
            let cost = BASE_COST + (i % 3) as f64 * 650.0 + i as f64 * 200.0;
            let entry = KpiEntry::new(month, revenue, cost);
            if i % 3 == 0 { entry.with_notes("Demo seeded entry") } else { entry }
        })
        .collect();
    rows.reverse();
    rows
}
