pub mod aggregate;
pub mod analyze;
pub mod args;
pub mod domain;
pub mod entropy;
pub mod report;
pub mod safelist;
pub mod stats;
pub mod utils;
pub mod zeek;

pub use aggregate::aggregate_queries;
pub use analyze::analyze_dns_log;
pub use args::Args;
pub use safelist::{init_default_safelist, Safelist};
pub use stats::{AnalysisResult, DnsStats, QueryAggregate, SubdomainAggregate};
