use anyhow::Result;
use clap::Parser;
use tracing::error;

use dnshound::{analyze_dns_log, init_default_safelist, report, utils, Args};

fn main() -> Result<()> {
    let args = Args::parse();
    utils::setup_logging(args.verbose);

    if args.init {
        return init_default_safelist();
    }

    utils::validate_args(&args)?;

    match analyze_dns_log(&args) {
        Ok(result) => report::print_report(&result, &args),
        Err(e) => {
            error!(action = "abort", component = "main", error = %e, "Analysis failed");
            std::process::exit(1);
        }
    }
}
