// File: crates/spark-core/src/format.rs
// Summary: Display formatting for chart values (USD currency, percentages).

use num_format::{Locale, ToFormattedString};

/// Placeholder shown for absent or non-finite values.
pub const MISSING: &str = "\u{2014}";

/// USD with no fraction digits and en-US grouping, e.g. `$21,000` / `-$1,200`.
/// Non-finite input formats as `$0`.
pub fn money(v: f64) -> String {
    let v = if v.is_finite() { v } else { 0.0 };
    let rounded = v.round() as i64;
    let digits = rounded.unsigned_abs().to_formatted_string(&Locale::en);
    if rounded < 0 { format!("-${digits}") } else { format!("${digits}") }
}

/// Fixed-point percentage, e.g. `percent(200.0, 1)` is `200.0%`.
pub fn percent(v: f64, digits: usize) -> String {
    format!("{:.*}%", digits, v)
}
