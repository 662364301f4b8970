//! # rapid-resolver
//!
//! Redirects legacy rapid-release genome browser URLs to current species pages.
//!
//! Rapid-release URLs name a genome by species and assembly accession in a
//! single path segment, e.g. `/Homo_sapiens_GCA_009914755.4/Info/Index`. The
//! current browser addresses genomes by UUID or tag instead. `rapid-resolver`
//! extracts the accession, looks it up in the genome metadata service (pairing
//! RefSeq accessions through NCBI Datasets first) and redirects.
//!
//! ## Example
//!
//! ```rust,no_run
//! use rapid_resolver::ResolverConfig;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let resolver = ResolverConfig::default().build_resolver()?;
//! let resolution = resolver.resolve_species("Homo_sapiens_GCA_009914755.4").await?;
//! println!("{}", resolution.url);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Accession parsing and genome metadata types
//! - [`lookup`]: Metadata and NCBI lookup clients
//! - [`resolver`]: Species URL resolution
//! - [`config`]: Resolver configuration
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: Redirect server

pub mod cli;
pub mod config;
pub mod core;
pub mod lookup;
pub mod resolver;
pub mod web;

pub use config::ResolverConfig;
pub use core::accession::AssemblyAccession;
pub use core::genome::{DatasetReport, GenomeRecord};
pub use resolver::{Resolution, ResolveError, SpeciesResolver};
