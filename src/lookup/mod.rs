//! Outbound lookups against the genome-metadata and NCBI Datasets services.
//!
//! The resolver only sees the [`GenomeLookup`] and [`AccessionLookup`] traits.
//! [`metadata::MetadataClient`] and [`ncbi::NcbiClient`] implement them over
//! HTTP; tests substitute the in-memory implementation in `memory`, which is
//! only built for tests or with the `test-util` feature.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::core::accession::AssemblyAccession;
use crate::core::genome::{DatasetReport, GenomeRecord};

#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod metadata;
pub mod ncbi;

/// Errors from talking to a lookup service.
///
/// A lookup that completes but finds nothing is `Ok(None)`, not an error.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid lookup URL: {0}")]
    InvalidUrl(String),

    #[error("{service} returned status {status}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("Failed to decode {service} response: {message}")]
    Decode {
        service: &'static str,
        message: String,
    },
}

/// Maps assembly accessions to genomes
#[async_trait]
pub trait GenomeLookup: Send + Sync {
    async fn genome_by_assembly_accession(
        &self,
        accession: &AssemblyAccession,
    ) -> Result<Option<GenomeRecord>, LookupError>;
}

/// Fetches NCBI dataset reports for an accession
#[async_trait]
pub trait AccessionLookup: Send + Sync {
    async fn dataset_report(&self, accession: &str) -> Result<Option<DatasetReport>, LookupError>;
}

/// Build the shared HTTP client used by both lookup services.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialised.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, LookupError> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("rapid-resolver/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}
