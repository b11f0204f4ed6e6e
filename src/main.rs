use clap::Parser;
use gadgetry::{run, Config, Mode};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEMO_QUERY: &str = "SELECT Name FROM Customers";

#[derive(Parser, Debug)]
#[command(name = "gadgetry")]
#[command(about = "Gadgetry - compile SELECT projections over a sample data context", long_about = None)]
struct Args {
    /// Statement to run
    #[arg(default_value = DEMO_QUERY)]
    query: String,

    /// Directory containing gadgetry.toml
    #[arg(long, default_value = ".")]
    config: PathBuf,

    /// Match SELECT and FROM in upper case only
    #[arg(long)]
    case_sensitive: bool,

    /// JSON file replacing the sample data
    #[arg(long)]
    data: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Print the token stream instead of executing
    #[arg(long, conflicts_with = "parse_only")]
    tokens: bool,

    /// Print the parsed query instead of executing
    #[arg(long)]
    parse_only: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load(&args.config)?;
    if args.case_sensitive {
        config.lexer.case_sensitive = true;
    }
    if args.pretty {
        config.output.pretty = true;
    }
    if let Some(data) = args.data {
        config.data = Some(data);
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    tracing::debug!("Configuration loaded from {}", args.config.display());

    let mode = if args.tokens {
        Mode::Tokens
    } else if args.parse_only {
        Mode::ParseOnly
    } else {
        Mode::Execute
    };

    tracing::debug!("SQL: {}", args.query);
    let output = run(&args.query, &config, mode)?;
    println!("{}", output);

    Ok(())
}
