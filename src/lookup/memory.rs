//! In-memory lookups backed by fixed tables.
//!
//! Used to drive the resolver and router without network access. Every query
//! is recorded so callers can assert which accessions were looked up.
//! [`StaticLookup::failing`] builds one whose every call errors like an
//! unavailable service.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::{AccessionLookup, GenomeLookup, LookupError};
use reqwest::StatusCode;
use crate::core::accession::AssemblyAccession;
use crate::core::genome::{DatasetReport, GenomeRecord};

#[derive(Default)]
pub struct StaticLookup {
    genomes: HashMap<String, GenomeRecord>,
    reports: HashMap<String, DatasetReport>,
    unavailable: bool,
    genome_queries: Mutex<Vec<String>>,
    report_queries: Mutex<Vec<String>>,
}

impl StaticLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// A lookup that fails every call with a 503 status error
    pub fn failing() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    fn check_available(&self) -> Result<(), LookupError> {
        if self.unavailable {
            return Err(LookupError::Status {
                service: "static lookup",
                status: StatusCode::SERVICE_UNAVAILABLE,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn with_genome(mut self, accession: impl Into<String>, genome: GenomeRecord) -> Self {
        self.genomes.insert(accession.into(), genome);
        self
    }

    /// Register a dataset report for `accession` pairing it with `paired`
    #[must_use]
    pub fn with_paired_accession(
        mut self,
        accession: impl Into<String>,
        paired: impl Into<String>,
    ) -> Self {
        let accession = accession.into();
        self.reports.insert(
            accession.clone(),
            DatasetReport {
                accession,
                paired_accession: Some(paired.into()),
            },
        );
        self
    }

    /// Accessions passed to the genome lookup, in call order
    pub fn genome_queries(&self) -> Vec<String> {
        self.genome_queries
            .lock()
            .map(|q| q.clone())
            .unwrap_or_default()
    }

    /// Accessions passed to the dataset-report lookup, in call order
    pub fn report_queries(&self) -> Vec<String> {
        self.report_queries
            .lock()
            .map(|q| q.clone())
            .unwrap_or_default()
    }
}

fn record(log: &Mutex<Vec<String>>, accession: &str) {
    if let Ok(mut log) = log.lock() {
        log.push(accession.to_string());
    }
}

#[async_trait]
impl GenomeLookup for StaticLookup {
    async fn genome_by_assembly_accession(
        &self,
        accession: &AssemblyAccession,
    ) -> Result<Option<GenomeRecord>, LookupError> {
        record(&self.genome_queries, accession.as_str());
        self.check_available()?;
        Ok(self.genomes.get(accession.as_str()).cloned())
    }
}

#[async_trait]
impl AccessionLookup for StaticLookup {
    async fn dataset_report(&self, accession: &str) -> Result<Option<DatasetReport>, LookupError> {
        record(&self.report_queries, accession);
        self.check_available()?;
        Ok(self.reports.get(accession).cloned())
    }
}
