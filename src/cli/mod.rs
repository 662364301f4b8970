//! Command-line interface for rapid-resolver.
//!
//! Available commands:
//!
//! - **serve**: Run the redirect server
//! - **resolve**: Resolve a single species URL name and print the target URL
//!
//! ## Usage
//!
//! ```text
//! # Serve redirects on port 8080
//! rapid-resolver serve --port 8080
//!
//! # Point redirects at a different browser
//! ENSEMBL_URL=https://staging.ensembl.org rapid-resolver serve
//!
//! # Check where a legacy URL would go
//! rapid-resolver resolve Homo_sapiens_GCA_009914755.4 --format json
//! ```

use clap::{Parser, Subcommand};

use crate::config::ResolverConfig;

pub mod resolve;

#[derive(Parser)]
#[command(name = "rapid-resolver")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Redirect legacy rapid species URLs to current genome pages")]
#[command(
    long_about = "rapid-resolver maps legacy rapid-release species URLs such as /Homo_sapiens_GCA_009914755.4/Info/Index to the genome's current species page.\n\nThe assembly accession embedded in the URL is looked up in the genome metadata service (RefSeq 'rs' accessions are first paired through NCBI Datasets) and the client is redirected to {ENSEMBL_URL}/species/{genome}."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the redirect server
    Serve(ServeArgs),

    /// Resolve one species URL name
    Resolve(resolve::ResolveArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    #[command(flatten)]
    pub config: ResolverConfig,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
