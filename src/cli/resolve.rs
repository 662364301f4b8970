use clap::Args;

use crate::cli::OutputFormat;
use crate::config::ResolverConfig;
use crate::resolver::Resolution;

#[derive(Args)]
pub struct ResolveArgs {
    /// Species URL name (e.g., `Homo_sapiens_GCA_009914755.4`)
    #[arg(required = true)]
    pub species_url_name: String,

    #[command(flatten)]
    pub config: ResolverConfig,
}

pub fn run(args: ResolveArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let resolver = args.config.build_resolver()?;

    let rt = tokio::runtime::Runtime::new()?;
    let resolution = rt.block_on(resolver.resolve_species(&args.species_url_name))?;

    if verbose {
        eprintln!(
            "Accession: {} (looked up as {})",
            resolution.requested, resolution.accession
        );
        eprintln!("Genome: {}", resolution.genome.genome_id);
    }

    match format {
        OutputFormat::Text => println!("{}", resolution.url),
        OutputFormat::Json => print_json(&args.species_url_name, &resolution)?,
    }

    Ok(())
}

fn print_json(species_url_name: &str, resolution: &Resolution) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "species_url_name": species_url_name,
        "accession": resolution.accession,
        "requested_accession": resolution.requested,
        "genome_id": resolution.genome.genome_id,
        "genome_tag": resolution.genome.genome_tag,
        "url": resolution.url,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
