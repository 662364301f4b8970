//! Genome metadata records and redirect target construction.

use serde::{Deserialize, Serialize};

/// A genome returned by the metadata service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenomeRecord {
    /// Stable genome identifier (a UUID)
    #[serde(alias = "genome_uuid", alias = "genomeUuid")]
    pub genome_id: String,
    /// Human-friendly alias (e.g., "grch38"), preferred in URLs when present
    #[serde(default, alias = "genomeTag")]
    pub genome_tag: Option<String>,
}

impl GenomeRecord {
    pub fn new(genome_id: impl Into<String>) -> Self {
        Self {
            genome_id: genome_id.into(),
            genome_tag: None,
        }
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.genome_tag = Some(tag.into());
        self
    }

    /// The identifier to use in outward-facing URLs: the tag if non-empty,
    /// otherwise the genome id.
    #[must_use]
    pub fn url_identifier(&self) -> &str {
        match self.genome_tag.as_deref() {
            Some(tag) if !tag.is_empty() => tag,
            _ => &self.genome_id,
        }
    }

    /// Build the species page URL for this genome under `base_url`
    #[must_use]
    pub fn species_url(&self, base_url: &str) -> String {
        format!("{base_url}/species/{}", self.url_identifier())
    }
}

/// A single NCBI Datasets assembly report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetReport {
    /// Accession the report describes
    #[serde(default)]
    pub accession: String,
    /// The GenBank/RefSeq counterpart of `accession`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paired_accession: Option<String>,
}

impl DatasetReport {
    /// The paired accession, ignoring empty values
    #[must_use]
    pub fn paired(&self) -> Option<&str> {
        self.paired_accession
            .as_deref()
            .filter(|paired| !paired.is_empty())
    }
}

/// Normalize a base URL so joining `/species/...` never produces `//`.
#[must_use]
pub fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_prefers_tag() {
        let record = GenomeRecord::new("abc").with_tag("human");
        assert_eq!(
            record.species_url("https://beta.ensembl.org"),
            "https://beta.ensembl.org/species/human"
        );
    }

    #[test]
    fn test_url_falls_back_to_id() {
        let record = GenomeRecord::new("abc");
        assert_eq!(record.species_url("https://e.org"), "https://e.org/species/abc");

        let empty_tag = GenomeRecord::new("abc").with_tag("");
        assert_eq!(empty_tag.url_identifier(), "abc");
    }

    #[test]
    fn test_record_wire_names() {
        let snake: GenomeRecord =
            serde_json::from_str(r#"{"genome_uuid": "abc", "genome_tag": null}"#).unwrap();
        assert_eq!(snake, GenomeRecord::new("abc"));

        let camel: GenomeRecord =
            serde_json::from_str(r#"{"genomeUuid": "abc", "genomeTag": "human"}"#).unwrap();
        assert_eq!(camel.url_identifier(), "human");

        let graphql: GenomeRecord =
            serde_json::from_str(r#"{"genome_id": "abc", "genome_tag": "human"}"#).unwrap();
        assert_eq!(graphql.genome_tag.as_deref(), Some("human"));
    }

    #[test]
    fn test_dataset_report_paired() {
        let report: DatasetReport = serde_json::from_str(
            r#"{"accession": "GCF_000001405.40", "paired_accession": "GCA_000001405.29"}"#,
        )
        .unwrap();
        assert_eq!(report.paired(), Some("GCA_000001405.29"));

        let unpaired: DatasetReport =
            serde_json::from_str(r#"{"accession": "GCA_1", "paired_accession": ""}"#).unwrap();
        assert_eq!(unpaired.paired(), None);
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("https://e.org/"), "https://e.org");
        assert_eq!(normalize_base_url("https://e.org"), "https://e.org");
    }
}
