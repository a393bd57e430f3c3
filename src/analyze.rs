use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::time::Instant;
use tracing::{info, warn};

use crate::aggregate::aggregate_queries;
use crate::safelist::{self, Safelist};
use crate::stats::AnalysisResult;
use crate::zeek::{self, Line};
use crate::Args;

/// Run the full hunt over one dns.log file.
pub fn analyze_dns_log(args: &Args) -> Result<AnalysisResult> {
    let total_start_time = Instant::now();
    info!(
        action = "start",
        component = "analysis",
        "Starting DNS log analysis"
    );

    let log_path = args
        .log
        .as_deref()
        .context("No log file given")?;
    if !log_path.exists() {
        anyhow::bail!("Log file not found at {:?}", log_path);
    }

    let text = fs::read_to_string(log_path)
        .with_context(|| format!("Failed to read log file {:?}", log_path))?;
    info!(action = "read", component = "analysis", file_path = ?log_path, bytes = text.len(), "Log file loaded");

    let safelist = if args.no_safelist {
        Safelist::empty()
    } else {
        safelist::load_safelist(args.safelist.as_deref())?
    };

    let time_range = query_time_range(&text);
    let stats = aggregate_queries(&text, &safelist);

    if stats.domains.is_empty() {
        warn!(
            action = "complete",
            component = "analysis",
            "No parseable DNS queries survived filtering"
        );
    }

    let total_time = total_start_time.elapsed();
    info!(
        action = "complete",
        component = "analysis",
        duration_ms = total_time.as_millis(),
        "Analysis completed successfully"
    );

    Ok(AnalysisResult { time_range, stats })
}

/// Earliest and latest query timestamps seen in the log.
///
/// Records with an unparsable ts field still aggregate; they just don't
/// contribute here.
pub fn query_time_range(text: &str) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start_time = Instant::now();

    let mut earliest: Option<f64> = None;
    let mut latest: Option<f64> = None;

    for line in text.lines() {
        if let Line::Record(record) = zeek::parse_line(line) {
            if let Some(ts) = record.ts {
                earliest = Some(earliest.map_or(ts, |e: f64| e.min(ts)));
                latest = Some(latest.map_or(ts, |l: f64| l.max(ts)));
            }
        }
    }

    let range = match (earliest, latest) {
        (Some(e), Some(l)) => Some((epoch_to_datetime(e)?, epoch_to_datetime(l)?)),
        _ => None,
    };

    let duration = start_time.elapsed();
    match &range {
        Some((earliest, latest)) => info!(
            action = "complete",
            component = "time_range",
            earliest = earliest.format("%B %-d, %Y").to_string(),
            latest = latest.format("%B %-d, %Y").to_string(),
            duration_ms = duration.as_millis(),
            "Time range scan completed"
        ),
        None => warn!(
            action = "complete",
            component = "time_range",
            duration_ms = duration.as_millis(),
            "No timestamped records found"
        ),
    }

    range
}

fn epoch_to_datetime(ts: f64) -> Option<DateTime<Utc>> {
    // Zeek writes epoch seconds with microsecond precision
    let secs = ts.trunc() as i64;
    let nanos = (ts.fract() * 1e9) as u32;
    DateTime::from_timestamp(secs, nanos)
}
