use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use early_buyers::{AnalysisRequest, AnalyzerConfig, EarlyBuyerAnalyzer};

#[derive(Parser)]
#[command(about = "Finds the first wallets to receive a token and reports what they still hold", long_about = None)]
struct Cli {
    /// Token mint address
    #[arg(short, long)]
    mint: String,

    /// Number of early wallets to report (1-100, default 50)
    #[arg(short, long)]
    limit: Option<usize>,

    /// TOML config file; defaults to HELIUS_* environment variables
    #[arg(short, long)]
    config: Option<String>,

    /// Single-line JSON output
    #[arg(long)]
    compact: bool,
}

fn init_tracing() -> Result<tracing_appender::non_blocking::WorkerGuard> {
    std::fs::create_dir_all("logs").context("Failed to create logs directory")?;

    let file_appender = tracing_appender::rolling::daily("logs", "early-buyers.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    // stdout carries the JSON result, so the console layer goes to stderr
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .compact();

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .json()
        .with_current_span(false)
        .with_span_list(true);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    Ok(guard)
}

async fn run(cli: &Cli) -> Result<String> {
    let config = match &cli.config {
        Some(path) => AnalyzerConfig::load_from_file(path)?,
        None => AnalyzerConfig::from_env()?,
    };

    let analyzer = EarlyBuyerAnalyzer::from_config(config).context("Failed to build Helius client")?;
    let result = analyzer.analyze(&AnalysisRequest::new(cli.mint.clone(), cli.limit)).await?;

    let encoded = if cli.compact {
        serde_json::to_string(&result)?
    } else {
        serde_json::to_string_pretty(&result)?
    };
    Ok(encoded)
}

/// Body printed on stdout when a run fails; keeps the whole context chain.
fn error_body(e: &anyhow::Error) -> serde_json::Value {
    serde_json::json!({ "error": format!("{:#}", e) })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let guard = init_tracing()?;

    info!("🦡 Early buyers analyzer");

    match run(&cli).await {
        Ok(encoded) => {
            println!("{}", encoded);
            Ok(())
        }
        Err(e) => {
            error!("Analysis failed: {:#}", e);
            println!("{}", error_body(&e));
            drop(guard);
            std::process::exit(1);
        }
    }
}
