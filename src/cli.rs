use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "browserselect")]
#[command(about = "Pick the application that should open a URL or file", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to $BROWSERSELECT_CONFIG or config/browserselect.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show how an input is classified
    Classify(ClassifyArgs),
    /// Resolve an input to a launchable string and candidate handlers
    Resolve(ResolveArgs),
    /// Print the effective configuration as TOML
    ShowConfig,
}

#[derive(clap::Args, Debug)]
pub struct ClassifyArgs {
    /// URL or path
    pub input: String,
}

#[derive(clap::Args, Debug)]
pub struct ResolveArgs {
    /// URL or path
    pub input: String,

    /// Expand shortened http/https links
    #[arg(long)]
    pub unshorten: bool,

    /// Append text to bare host names
    #[arg(long)]
    pub canonicalize: bool,

    /// Text appended when canonicalizing
    #[arg(long)]
    pub append_text: Option<String>,

    /// User agent sent while expanding
    #[arg(long)]
    pub user_agent: Option<String>,
}
