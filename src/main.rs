use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod core;
mod lookup;
mod resolver;
mod web;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Logging is configured once, here, for the whole process
    let filter = if cli.verbose {
        EnvFilter::new("rapid_resolver=debug,info")
    } else {
        EnvFilter::new("rapid_resolver=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Serve(args) => {
            web::server::run(args)?;
        }
        cli::Commands::Resolve(args) => {
            cli::resolve::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
