use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Per-subdomain counters within a single domain.
///
/// `entropy` is a pure function of the subdomain string and is computed
/// exactly once, when the subdomain is first seen. The string never
/// changes afterwards, so the score is never recomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct SubdomainAggregate {
    pub count: u32,
    pub entropy: f64,
}

/// Per-domain counters. `count` covers every query under this domain,
/// across all of its subdomains.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryAggregate {
    pub count: u32,
    pub subdomains: HashMap<String, SubdomainAggregate>,
}

/// Output of one aggregation pass over a log.
#[derive(Debug, Default, PartialEq)]
pub struct DnsStats {
    pub domains: HashMap<String, QueryAggregate>,
    pub comment_lines: u32,
    pub malformed_lines: u32,
    pub safelisted_queries: u32,
}

impl DnsStats {
    pub fn total_queries(&self) -> u32 {
        self.domains.values().map(|d| d.count).sum()
    }
}

#[derive(Debug)]
pub struct AnalysisResult {
    pub time_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    pub stats: DnsStats,
}
