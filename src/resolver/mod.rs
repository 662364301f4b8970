//! Species URL resolution.
//!
//! Turns a legacy species URL segment into the URL of the genome's current
//! species page:
//!
//! 1. Extract the assembly accession after the `_GCA_`/`_GCF_` marker
//! 2. If the accession ends in `rs`, swap it for its NCBI paired accession
//! 3. Look the accession up in the metadata service
//! 4. Build `{base_url}/species/{genome_tag or genome_id}`

use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::core::accession::AssemblyAccession;
use crate::core::genome::{normalize_base_url, GenomeRecord};
use crate::lookup::{AccessionLookup, GenomeLookup, LookupError};

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Genome url name missing GCA assembly accession id")]
    MissingAccession,

    #[error("Genome not found for accession {accession}")]
    AccessionNotFound { accession: AssemblyAccession },

    #[error("Genome not found")]
    GenomeNotFound,

    #[error("Lookup failed: {0}")]
    Lookup(#[from] LookupError),
}

/// A successful resolution
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Accession extracted from the URL name
    pub requested: AssemblyAccession,
    /// Accession actually used for the genome lookup
    pub accession: AssemblyAccession,
    pub genome: GenomeRecord,
    /// Redirect target
    pub url: String,
}

/// Resolves species URL names to genome page URLs
#[derive(Clone)]
pub struct SpeciesResolver {
    base_url: String,
    genomes: Arc<dyn GenomeLookup>,
    accessions: Arc<dyn AccessionLookup>,
}

impl SpeciesResolver {
    pub fn new(
        base_url: &str,
        genomes: Arc<dyn GenomeLookup>,
        accessions: Arc<dyn AccessionLookup>,
    ) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            genomes,
            accessions,
        }
    }

    /// Base URL all redirects point under (no trailing slash)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Target for the bare root path
    pub fn resolve_home(&self) -> &str {
        &self.base_url
    }

    /// Resolve a species URL name to the genome page URL.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::MissingAccession`] if the name has no accession marker
    /// - [`ResolveError::AccessionNotFound`] if an `rs` accession has no NCBI pairing
    /// - [`ResolveError::GenomeNotFound`] if the metadata service has no genome
    /// - [`ResolveError::Lookup`] if either service fails
    pub async fn resolve_species(&self, species_url_name: &str) -> Result<Resolution, ResolveError> {
        let Some(requested) = AssemblyAccession::from_species_url_name(species_url_name) else {
            error!("No assembly accession in species url name '{species_url_name}'");
            return Err(ResolveError::MissingAccession);
        };

        let accession = self.pair_refseq(&requested).await?;

        let genome = self
            .genomes
            .genome_by_assembly_accession(&accession)
            .await?
            .ok_or_else(|| {
                warn!("No genome found for accession {accession}");
                ResolveError::GenomeNotFound
            })?;

        let url = genome.species_url(&self.base_url);
        info!("Resolved {species_url_name} ({accession}) to {url}");

        Ok(Resolution {
            requested,
            accession,
            genome,
            url,
        })
    }

    /// Replace an `rs`-suffixed accession with its NCBI paired accession.
    /// Other accessions pass through untouched.
    async fn pair_refseq(
        &self,
        accession: &AssemblyAccession,
    ) -> Result<AssemblyAccession, ResolveError> {
        let Some(trimmed) = accession.without_refseq_suffix() else {
            return Ok(accession.clone());
        };

        let paired = self
            .accessions
            .dataset_report(trimmed)
            .await?
            .and_then(|report| report.paired().map(AssemblyAccession::new));

        paired.ok_or_else(|| {
            warn!("No NCBI paired accession for {accession}");
            ResolveError::AccessionNotFound {
                accession: accession.clone(),
            }
        })
    }
}
