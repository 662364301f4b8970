//! Resolver configuration.
//!
//! Every setting comes from a CLI flag with an environment-variable fallback,
//! so the server can be configured either way in deployment.

use clap::Args;
use std::sync::Arc;
use std::time::Duration;

use crate::lookup::metadata::MetadataClient;
use crate::lookup::ncbi::NcbiClient;
use crate::lookup::{build_http_client, LookupError};
use crate::resolver::SpeciesResolver;

pub const DEFAULT_ENSEMBL_URL: &str = "https://beta.ensembl.org";
pub const DEFAULT_METADATA_URL: &str = "https://beta.ensembl.org/data/graphql";
pub const DEFAULT_NCBI_URL: &str = "https://api.ncbi.nlm.nih.gov/datasets/v2";
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 10;

#[derive(Args, Debug, Clone)]
pub struct ResolverConfig {
    /// Base URL of the genome browser redirects point to
    #[arg(long, env = "ENSEMBL_URL", default_value = DEFAULT_ENSEMBL_URL)]
    pub ensembl_url: String,

    /// GraphQL endpoint of the genome metadata service
    #[arg(long, env = "METADATA_API_URL", default_value = DEFAULT_METADATA_URL)]
    pub metadata_url: String,

    /// Base URL of the NCBI Datasets v2 API
    #[arg(long, env = "NCBI_DATASETS_URL", default_value = DEFAULT_NCBI_URL)]
    pub ncbi_url: String,

    /// Timeout in seconds for each outbound lookup
    #[arg(long, env = "LOOKUP_TIMEOUT_SECS", default_value_t = DEFAULT_LOOKUP_TIMEOUT_SECS)]
    pub lookup_timeout: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            ensembl_url: DEFAULT_ENSEMBL_URL.to_string(),
            metadata_url: DEFAULT_METADATA_URL.to_string(),
            ncbi_url: DEFAULT_NCBI_URL.to_string(),
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT_SECS,
        }
    }
}

impl ResolverConfig {
    /// Build a resolver backed by the HTTP lookup clients.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn build_resolver(&self) -> Result<SpeciesResolver, LookupError> {
        let http = build_http_client(Duration::from_secs(self.lookup_timeout))?;
        let genomes = Arc::new(MetadataClient::new(http.clone(), &self.metadata_url));
        let accessions = Arc::new(NcbiClient::new(http, &self.ncbi_url));
        Ok(SpeciesResolver::new(&self.ensembl_url, genomes, accessions))
    }
}
