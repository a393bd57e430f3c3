/// Minimum tab-separated field count for a well-formed dns.log record.
pub const MIN_FIELDS: usize = 24;

/// 0-indexed position of the query FQDN in a dns.log record.
pub const QUERY_FIELD: usize = 9;

/// 0-indexed position of the epoch timestamp in a dns.log record.
pub const TS_FIELD: usize = 0;

/// One parseable data row of a Zeek dns.log.
#[derive(Debug, PartialEq)]
pub struct DnsRecord<'a> {
    /// Epoch seconds; None when the ts field doesn't parse as a float.
    pub ts: Option<f64>,
    pub query: &'a str,
}

/// The outcome of looking at one raw line.
#[derive(Debug, PartialEq)]
pub enum Line<'a> {
    Record(DnsRecord<'a>),
    Comment,
    Malformed,
}

/// Classify a single line of dns.log text.
///
/// Zeek writes `#`-prefixed header/metadata lines; those and any line
/// with fewer than MIN_FIELDS tab-separated fields are filtered out
/// rather than treated as errors.
pub fn parse_line(line: &str) -> Line<'_> {
    if line.starts_with('#') {
        return Line::Comment;
    }

    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < MIN_FIELDS {
        return Line::Malformed;
    }

    Line::Record(DnsRecord {
        ts: fields[TS_FIELD].parse::<f64>().ok(),
        query: fields[QUERY_FIELD],
    })
}
