use anyhow::Context;
use clap::Parser;
use probe_core::{ApiClient, Runner};

mod cli;
mod config;
mod report;

#[tokio::main]
async fn main() {
    match run().await {
        Ok(code) => std::process::exit(code),
        Err(error) => {
            eprintln!("cmsprobe error: {error:#}");
            std::process::exit(1);
        }
    }
}

async fn run() -> anyhow::Result<i32> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = config::ProbeConfig::load_with_dotenv()
        .context("failed to load configuration")?
        .with_overrides(&cli);

    let client = ApiClient::new(&config.base_url)
        .with_context(|| format!("cannot probe '{}'", config.base_url))?;

    let report = Runner::new(client, config.email, config.password)
        .run()
        .await;
    report::print_summary(&report);

    // Only the two fatal aborts (health, login) flip the exit code; step
    // failures stay visible in the summary with a zero exit.
    Ok(i32::from(report.is_fatal()))
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("CMSPROBE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
