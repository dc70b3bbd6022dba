use clap::Parser;

/// Top-level CLI parser for the `cmsprobe` binary.
#[derive(Debug, Parser)]
#[command(
    name = "cmsprobe",
    version,
    about = "cmsprobe - CMS REST API integration-test harness"
)]
pub struct Cli {
    /// Base address of the server under test (overrides config)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Admin login email (overrides config)
    #[arg(long)]
    pub email: Option<String>,

    /// Admin login password (overrides config)
    #[arg(long)]
    pub password: Option<String>,

    /// Quiet mode (suppress non-essential logging)
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}
