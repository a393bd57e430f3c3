use tracing_subscriber::EnvFilter;

pub fn setup_logging(verbose: bool) {
    // RUST_LOG overrides the --verbose flag when set
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub fn format_number(num: u32) -> String {
    num.to_string()
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap())
        .collect::<Vec<_>>()
        .join(",")
}

pub fn validate_args(args: &crate::args::Args) -> anyhow::Result<()> {
    if args.log.is_none() && !args.init {
        anyhow::bail!("A dns.log path is required (or pass --init)");
    }

    if let Some(top) = args.top {
        if top == 0 {
            anyhow::bail!("--top must be greater than 0");
        }
    }

    if let Some(min_entropy) = args.min_entropy {
        if !(0.0..=8.0).contains(&min_entropy) {
            anyhow::bail!("--min-entropy must be between 0 and 8 bits/char");
        }
    }

    Ok(())
}
