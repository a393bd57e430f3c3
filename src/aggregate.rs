use std::time::Instant;
use tracing::info;

use crate::domain::{registrable_domain, subdomain_of};
use crate::entropy::shannon_entropy;
use crate::safelist::Safelist;
use crate::stats::{DnsStats, SubdomainAggregate};
use crate::zeek::{self, Line};

/// Single pass over the full log text: filter, aggregate, score.
///
/// Builds the Domain → QueryAggregate mapping. Malformed lines are
/// dropped silently; the function is total over any text input. Safelist
/// hits (derived domain or raw query, exact match) are excluded before
/// any counter is touched, so they never appear as keys.
pub fn aggregate_queries(text: &str, safelist: &Safelist) -> DnsStats {
    let start_time = Instant::now();
    info!(
        action = "start",
        component = "aggregation",
        "Starting query aggregation"
    );

    let mut stats = DnsStats::default();

    for line in text.lines() {
        let record = match zeek::parse_line(line) {
            Line::Comment => {
                stats.comment_lines += 1;
                continue;
            }
            Line::Malformed => {
                stats.malformed_lines += 1;
                continue;
            }
            Line::Record(record) => record,
        };

        let query = record.query;
        let domain = registrable_domain(query);

        if safelist.contains(&domain) || safelist.contains(query) {
            stats.safelisted_queries += 1;
            continue;
        }

        let subdomain = subdomain_of(query, &domain);

        let domain_agg = stats.domains.entry(domain).or_default();
        let sub_agg = domain_agg
            .subdomains
            .entry(subdomain.to_string())
            .or_insert_with(|| SubdomainAggregate {
                count: 0,
                // scored once; the key never changes afterwards
                entropy: shannon_entropy(subdomain),
            });

        domain_agg.count += 1;
        sub_agg.count += 1;
    }

    let duration = start_time.elapsed();
    info!(
        action = "complete",
        component = "aggregation",
        domain_count = stats.domains.len(),
        query_count = stats.total_queries(),
        comment_lines = stats.comment_lines,
        malformed_lines = stats.malformed_lines,
        safelisted_queries = stats.safelisted_queries,
        duration_ms = duration.as_millis(),
        "Query aggregation completed"
    );

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zeek::{MIN_FIELDS, QUERY_FIELD, TS_FIELD};

    fn log_line(query: &str) -> String {
        let mut fields = vec!["-"; MIN_FIELDS];
        fields[TS_FIELD] = "1660000000.000000";
        fields[QUERY_FIELD] = query;
        fields.join("\t")
    }

    fn log_text(queries: &[&str]) -> String {
        let mut text = String::from("#separator \\x09\n#fields\tts\tuid\n");
        for q in queries {
            text.push_str(&log_line(q));
            text.push('\n');
        }
        text
    }

    #[test]
    fn aggregates_one_query() {
        let stats = aggregate_queries(&log_text(&["mail.example.com"]), &Safelist::empty());

        let agg = &stats.domains["example.com"];
        assert_eq!(agg.count, 1);
        assert_eq!(agg.subdomains.len(), 1);

        let sub = &agg.subdomains["mail"];
        assert_eq!(sub.count, 1);
        assert!((sub.entropy - shannon_entropy("mail")).abs() < 1e-10);
    }

    #[test]
    fn safelisted_domain_excludes_all_its_queries() {
        let safelist = Safelist::from_text("example.com\n");
        let stats = aggregate_queries(&log_text(&["mail.example.com"]), &safelist);
        assert!(stats.domains.is_empty());
        assert_eq!(stats.safelisted_queries, 1);
    }

    #[test]
    fn safelisted_raw_query_is_excluded() {
        let safelist = Safelist::from_text("telemetry.vendor.net\n");
        let stats = aggregate_queries(
            &log_text(&["telemetry.vendor.net", "beacon.vendor.net"]),
            &safelist,
        );
        // exact query match removes one, sibling subdomain survives
        let agg = &stats.domains["vendor.net"];
        assert_eq!(agg.count, 1);
        assert!(agg.subdomains.contains_key("beacon"));
        assert!(!agg.subdomains.contains_key("telemetry"));
    }

    #[test]
    fn distinct_subdomains_get_independent_entropy() {
        let stats = aggregate_queries(&log_text(&["x1.evil.io", "x2.evil.io"]), &Safelist::empty());

        let agg = &stats.domains["evil.io"];
        assert_eq!(agg.count, 2);
        assert_eq!(agg.subdomains.len(), 2);
        assert_eq!(agg.subdomains["x1"].count, 1);
        assert_eq!(agg.subdomains["x2"].count, 1);
        assert!((agg.subdomains["x1"].entropy - shannon_entropy("x1")).abs() < 1e-10);
        assert!((agg.subdomains["x2"].entropy - shannon_entropy("x2")).abs() < 1e-10);
    }

    #[test]
    fn domain_count_is_sum_of_subdomain_counts() {
        let stats = aggregate_queries(
            &log_text(&[
                "a.example.net",
                "b.example.net",
                "a.example.net",
                "example.net",
            ]),
            &Safelist::empty(),
        );

        let agg = &stats.domains["example.net"];
        let subdomain_sum: u32 = agg.subdomains.values().map(|s| s.count).sum();
        assert_eq!(agg.count, subdomain_sum);
        assert_eq!(agg.count, 4);
        // query equal to its domain lands on the empty subdomain
        assert_eq!(agg.subdomains[""].count, 1);
        assert_eq!(agg.subdomains[""].entropy, 0.0);
    }

    #[test]
    fn comments_and_short_lines_contribute_nothing() {
        let text = format!(
            "#fields\tts\tuid\ntruncated\trecord\n{}\n",
            log_line("x.example.org")
        );
        let stats = aggregate_queries(&text, &Safelist::empty());
        assert_eq!(stats.comment_lines, 1);
        assert_eq!(stats.malformed_lines, 1);
        assert_eq!(stats.total_queries(), 1);
    }

    #[test]
    fn rerunning_yields_identical_mapping() {
        let text = log_text(&["x1.evil.io", "mail.example.com", "x2.evil.io"]);
        let safelist = Safelist::from_text("google.com\n");
        let first = aggregate_queries(&text, &safelist);
        let second = aggregate_queries(&text, &safelist);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_input_yields_empty_result() {
        let stats = aggregate_queries("", &Safelist::empty());
        assert!(stats.domains.is_empty());
        assert_eq!(stats.total_queries(), 0);
    }
}
