// File: crates/demo/src/main.rs
// Summary: Demo loads monthly KPI rows (CSV or seeded), drives the sparkline through a
// synchronous host and writes PNGs for the default, resized and hovered states.

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use spark_core::format::{money, percent};
use spark_core::kpi::{chart_data, demo_rows, month_over_month_growth, KpiEntry, RoiInputs, Snapshot};
use spark_core::theme;
use spark_core::{
    ChartHost, FrameOutcome, ManualHost, RasterSurface, SparklineChart, SparklineOptions, SparklineProps, PAD,
};
use std::path::{Path, PathBuf};

const CSS_WIDTH: f64 = 320.0;
const CSS_HEIGHT: f64 = 160.0;
const DPR: f64 = 2.0;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    // Args: [kpi.csv | -] [out_dir] [theme]
    let mut args = std::env::args().skip(1);
    let input = args.next().filter(|a| a != "-");
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "target/out".to_string()));
    let theme = theme::find(&args.next().unwrap_or_else(|| "light".to_string()));

    let entries = match &input {
        Some(raw) => {
            let path = Path::new(raw);
            println!("Using input file: {}", path.display());
            load_kpi_csv(path).with_context(|| format!("failed to load CSV '{}'", path.display()))?
        }
        None => {
            println!("No input file; seeding demo months");
            demo_rows(Local::now().date_naive())
        }
    };
    println!("Loaded {} months", entries.len());
    print_summary(&entries);

    std::fs::create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let data = chart_data(&entries);
    let props = SparklineProps::new(data.x_labels, data.series).with_title("Revenue, cost and net, last 12 months");
    let options = SparklineOptions { theme, ..SparklineOptions::default() };
    let mut host = ManualHost::new(CSS_WIDTH, CSS_HEIGHT).with_dpr(DPR);
    let mut chart = SparklineChart::new(props, RasterSurface::new()).with_options(options);
    println!("Chart: {}", chart.accessible_label());

    // 1) First paint after mount
    chart.mount(&mut host);
    pump(&mut host, &mut chart)?;
    write_png(&mut chart, &out_dir.join("sparkline.png"))?;

    // 2) A burst of container resizes settles into one frame
    for step in 1..=8 {
        host.resize(CSS_WIDTH + step as f64 * 40.0, CSS_HEIGHT);
        chart.on_resize(&mut host);
    }
    pump(&mut host, &mut chart)?;
    println!("Resize burst: {} frames cancelled", host.cancelled_frames());
    write_png(&mut chart, &out_dir.join("sparkline_wide.png"))?;

    // 3) Hover the most recent month
    let bounds = host.container_bounds();
    let hover_x = bounds.left + bounds.width - PAD;
    if chart.pointer_move(hover_x, bounds.top + bounds.height / 2.0, &mut host).is_some() {
        if let Some(text) = chart.tooltip_text() {
            println!("Tooltip {}:", text.label);
            for line in &text.lines {
                println!("  {line}");
            }
        }
    }
    pump(&mut host, &mut chart)?;
    write_png(&mut chart, &out_dir.join("sparkline_hover.png"))?;

    chart.pointer_leave(&mut host);
    pump(&mut host, &mut chart)?;
    chart.unmount(&mut host);
    println!("Drew {} frames", chart.draw_count());
    Ok(())
}

/// Deliver queued frames; a give-up means the container never had a size.
fn pump(host: &mut ManualHost, chart: &mut SparklineChart<RasterSurface>) -> Result<()> {
    let outcomes = host.run_until_idle(chart);
    tracing::debug!(?outcomes, "frames delivered");
    if outcomes.last() == Some(&FrameOutcome::GaveUp) {
        anyhow::bail!("chart gave up drawing after {} frames", outcomes.len());
    }
    Ok(())
}

fn write_png(chart: &mut SparklineChart<RasterSurface>, path: &Path) -> Result<()> {
    let bytes = chart.surface_mut().to_png_bytes().context("encoding PNG")?;
    std::fs::write(path, &bytes).with_context(|| format!("writing {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn print_summary(entries: &[KpiEntry]) {
    let snap = Snapshot::from_recent(entries);
    println!("Last 12 months");
    println!("  Revenue: {}", money(snap.revenue));
    println!("  Cost:    {}", money(snap.cost));
    println!("  Net:     {}", money(snap.net));
    println!("  Margin:  {}", percent(snap.margin_percent, 1));

    if let [latest, previous, ..] = entries {
        match month_over_month_growth(previous.revenue, latest.revenue) {
            Some(g) => println!("  Revenue MoM ({}): {}", latest.month_label(), percent(g, 1)),
            None => println!("  Revenue MoM ({}): {}", latest.month_label(), spark_core::format::MISSING),
        }
    }

    let roi = RoiInputs::default();
    println!(
        "ROI: invest {} -> value {} = {} ({} net)",
        money(roi.total_investment),
        money(roi.value_delivered),
        percent(roi.roi_percent(), 0),
        money(roi.net_savings()),
    );
}

/// Load monthly KPI rows; returned newest first.
fn load_kpi_csv(path: &Path) -> Result<Vec<KpiEntry>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect::<Vec<_>>();
    tracing::debug!(?headers, "csv headers");

    let idx = |names: &[&str]| -> Option<usize> {
        headers.iter().position(|h| names.iter().any(|want| h == want))
    };

    let i_month = idx(&["month", "date", "period"]).context("missing month column")?;
    let i_revenue = idx(&["revenue", "rev", "income"]);
    let i_cost = idx(&["cost", "costs", "expense", "expenses"]);
    let i_notes = idx(&["notes", "note", "comment"]);

    let mut out = Vec::new();
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let Some(month) = rec.get(i_month).and_then(parse_month) else {
            tracing::warn!(row, "skipping row with unreadable month");
            continue;
        };
        // Blank or unparsable amounts stay NaN here; `KpiEntry` totals and `chart_data` read them as zero.
        let parse = |i: Option<usize>| -> f64 {
            i.and_then(|ix| rec.get(ix))
                .and_then(|s| s.trim().replace(['$', ','], "").parse::<f64>().ok())
                .unwrap_or(f64::NAN)
        };
        let mut entry = KpiEntry::new(month, parse(i_revenue), parse(i_cost));
        if let Some(notes) = i_notes.and_then(|ix| rec.get(ix)).map(str::trim).filter(|s| !s.is_empty()) {
            entry = entry.with_notes(notes);
        }
        out.push(entry);
    }
    out.sort_by(|a, b| b.month.cmp(&a.month));
    Ok(out)
}

/// Accepts `YYYY-MM` or a full `YYYY-MM-DD` date.
fn parse_month(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .ok()
        .and_then(|d| d.with_day(1))
}
