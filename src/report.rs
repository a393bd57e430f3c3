use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::stats::{AnalysisResult, DnsStats};
use crate::utils::format_number;
use crate::Args;

/// One row of the domain overview table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainRow {
    pub domain: String,
    pub subdomain_count: usize,
    pub query_count: u32,
}

/// One row of the entropy-ranked subdomain table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubdomainRow {
    pub domain: String,
    pub subdomain: String,
    pub query_count: u32,
    pub entropy: f64,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub earliest: Option<DateTime<Utc>>,
    pub latest: Option<DateTime<Utc>>,
    pub total_queries: u32,
    pub comment_lines: u32,
    pub malformed_lines: u32,
    pub safelisted_queries: u32,
    pub domains: Vec<DomainRow>,
    pub subdomains: Vec<SubdomainRow>,
}

/// Domains ranked by distinct-subdomain count, then total queries,
/// descending. Many distinct subdomains under one domain is the shape of
/// a DNS tunnel.
pub fn domain_rows(stats: &DnsStats) -> Vec<DomainRow> {
    let mut rows: Vec<DomainRow> = stats
        .domains
        .iter()
        .map(|(domain, agg)| DomainRow {
            domain: domain.clone(),
            subdomain_count: agg.subdomains.len(),
            query_count: agg.count,
        })
        .collect();

    rows.sort_by(|a, b| {
        b.subdomain_count
            .cmp(&a.subdomain_count)
            .then(b.query_count.cmp(&a.query_count))
            .then(a.domain.cmp(&b.domain))
    });
    rows
}

/// Subdomains ranked by entropy descending. `min_entropy` drops rows
/// below the threshold before ranking.
pub fn subdomain_rows(stats: &DnsStats, min_entropy: Option<f64>) -> Vec<SubdomainRow> {
    let mut rows: Vec<SubdomainRow> = stats
        .domains
        .iter()
        .flat_map(|(domain, agg)| {
            agg.subdomains.iter().map(|(subdomain, sub)| SubdomainRow {
                domain: domain.clone(),
                subdomain: subdomain.clone(),
                query_count: sub.count,
                entropy: sub.entropy,
            })
        })
        .filter(|row| min_entropy.map_or(true, |min| row.entropy >= min))
        .collect();

    rows.sort_by(|a, b| {
        b.entropy
            .total_cmp(&a.entropy)
            .then(b.query_count.cmp(&a.query_count))
            .then(a.domain.cmp(&b.domain))
            .then(a.subdomain.cmp(&b.subdomain))
    });
    rows
}

pub fn build_report(result: &AnalysisResult, args: &Args) -> Report {
    let mut domains = domain_rows(&result.stats);
    let mut subdomains = subdomain_rows(&result.stats, args.min_entropy);

    // --top caps both tables, in text and JSON output alike
    if let Some(top) = args.top {
        domains.truncate(top);
        subdomains.truncate(top);
    }

    Report {
        earliest: result.time_range.map(|(e, _)| e),
        latest: result.time_range.map(|(_, l)| l),
        total_queries: result.stats.total_queries(),
        comment_lines: result.stats.comment_lines,
        malformed_lines: result.stats.malformed_lines,
        safelisted_queries: result.stats.safelisted_queries,
        domains,
        subdomains,
    }
}

pub fn print_report(result: &AnalysisResult, args: &Args) -> Result<()> {
    let report = build_report(result, args);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("\n--- DNS Log Analysis ---");

    if let Some((earliest, latest)) = result.time_range {
        let days_between = (latest - earliest).num_days();
        println!(
            "Time range: {} to {} ({} days)",
            earliest.format("%B %-d, %Y %H:%M:%S"),
            latest.format("%B %-d, %Y %H:%M:%S"),
            format_number(days_between as u32)
        );
    } else {
        println!("Time range: no timestamped records");
    }

    println!(
        "Total queries analyzed: {}",
        format_number(report.total_queries)
    );
    println!(
        "Queries safelisted: {}",
        format_number(report.safelisted_queries)
    );
    println!(
        "Lines skipped (comments/malformed): {}/{}",
        format_number(report.comment_lines),
        format_number(report.malformed_lines)
    );

    println!("\nDomains by distinct subdomains:");
    println!("{:<40} {:>12} {:>12}", "DOMAIN", "SUBDOMAINS", "QUERIES");
    for row in report.domains.iter() {
        println!(
            "{:<40} {:>12} {:>12}",
            row.domain,
            format_number(row.subdomain_count as u32),
            format_number(row.query_count)
        );
    }

    println!("\nSubdomains by entropy:");
    println!(
        "{:<24} {:<40} {:>8} {:>8}",
        "DOMAIN", "SUBDOMAIN", "QUERIES", "ENTROPY"
    );
    for row in report.subdomains.iter() {
        println!(
            "{:<24} {:<40} {:>8} {:>8.3}",
            row.domain,
            row.subdomain,
            format_number(row.query_count),
            row.entropy
        );
    }

    Ok(())
}
