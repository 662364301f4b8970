//! Client for the genome-metadata GraphQL service.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{GenomeLookup, LookupError};
use crate::core::accession::AssemblyAccession;
use crate::core::genome::GenomeRecord;

const SERVICE: &str = "metadata service";

const GENOMES_BY_ACCESSION_QUERY: &str = "query GenomesByAccession($accession: String!) { \
     genomes(by_keyword: {assembly_accession_id: $accession}) { genome_id genome_tag } }";

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'static str,
    variables: AccessionVariables<'a>,
}

#[derive(Serialize)]
struct AccessionVariables<'a> {
    accession: &'a str,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<GenomesData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GenomesData {
    #[serde(default)]
    genomes: Vec<GenomeRecord>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// HTTP client for the metadata service
pub struct MetadataClient {
    http: Client,
    endpoint: String,
}

impl MetadataClient {
    pub fn new(http: Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl GenomeLookup for MetadataClient {
    async fn genome_by_assembly_accession(
        &self,
        accession: &AssemblyAccession,
    ) -> Result<Option<GenomeRecord>, LookupError> {
        debug!("Querying {} for {}", self.endpoint, accession);

        let request = GraphQlRequest {
            query: GENOMES_BY_ACCESSION_QUERY,
            variables: AccessionVariables {
                accession: accession.as_str(),
            },
        };

        let response = self.http.post(&self.endpoint).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                service: SERVICE,
                status,
            });
        }

        let body = response.text().await?;
        parse_genomes_response(&body)
    }
}

/// Extract the first genome from a GraphQL response body.
///
/// A response with neither data nor errors, or with an empty genome list, is a
/// miss. A response carrying only errors is a decode failure.
fn parse_genomes_response(body: &str) -> Result<Option<GenomeRecord>, LookupError> {
    let parsed: GraphQlResponse = serde_json::from_str(body).map_err(|e| LookupError::Decode {
        service: SERVICE,
        message: e.to_string(),
    })?;

    match parsed.data {
        Some(data) => Ok(data.genomes.into_iter().next()),
        None if parsed.errors.is_empty() => Ok(None),
        None => Err(LookupError::Decode {
            service: SERVICE,
            message: parsed
                .errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; "),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_first_genome() {
        let body = r#"{"data": {"genomes": [
            {"genome_id": "a7335667-93e7-11ec-a39d-005056b38ce3", "genome_tag": "grch38"},
            {"genome_id": "other", "genome_tag": null}
        ]}}"#;
        let genome = parse_genomes_response(body).unwrap().unwrap();
        assert_eq!(genome.genome_id, "a7335667-93e7-11ec-a39d-005056b38ce3");
        assert_eq!(genome.url_identifier(), "grch38");
    }

    #[test]
    fn test_parse_empty_is_miss() {
        assert!(parse_genomes_response(r#"{"data": {"genomes": []}}"#)
            .unwrap()
            .is_none());
        assert!(parse_genomes_response(r#"{"data": null}"#).unwrap().is_none());
    }

    #[test]
    fn test_parse_errors_only() {
        let body = r#"{"data": null, "errors": [{"message": "boom"}]}"#;
        match parse_genomes_response(body) {
            Err(LookupError::Decode { message, .. }) => assert_eq!(message, "boom"),
            other => panic!("Expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_malformed_body() {
        assert!(matches!(
            parse_genomes_response("<html>"),
            Err(LookupError::Decode { .. })
        ));
    }

    #[test]
    fn test_request_shape() {
        let request = GraphQlRequest {
            query: GENOMES_BY_ACCESSION_QUERY,
            variables: AccessionVariables {
                accession: "GCA_009914755.4",
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["variables"]["accession"], "GCA_009914755.4");
        assert!(json["query"]
            .as_str()
            .unwrap()
            .contains("assembly_accession_id"));
    }
}
