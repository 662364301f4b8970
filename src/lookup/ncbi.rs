//! Client for the NCBI Datasets v2 genome dataset-report endpoint.
//!
//! `GET {base}/genome/accession/{accession}/dataset_report` returns
//! `{"reports": [{"accession": ..., "paired_accession": ...}, ...]}`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::debug;

use super::{AccessionLookup, LookupError};
use crate::core::genome::DatasetReport;

const SERVICE: &str = "NCBI Datasets";

#[derive(Debug, Deserialize)]
struct DatasetReportPage {
    #[serde(default)]
    reports: Vec<DatasetReport>,
}

/// HTTP client for NCBI Datasets
pub struct NcbiClient {
    http: Client,
    base_url: String,
}

impl NcbiClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build the report URL with the accession as a single encoded path
    /// segment, so `/`, `?` and `#` in it cannot leave the report endpoint.
    fn report_url(&self, accession: &str) -> Result<Url, LookupError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| LookupError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| LookupError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["genome", "accession"])
            .push(accession)
            .push("dataset_report");
        Ok(url)
    }
}

#[async_trait]
impl AccessionLookup for NcbiClient {
    async fn dataset_report(&self, accession: &str) -> Result<Option<DatasetReport>, LookupError> {
        let url = self.report_url(accession)?;
        debug!("Fetching NCBI dataset report from {url}");

        let response = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(LookupError::Status {
                service: SERVICE,
                status,
            });
        }

        let body = response.text().await?;
        parse_report_page(&body)
    }
}

fn parse_report_page(body: &str) -> Result<Option<DatasetReport>, LookupError> {
    let page: DatasetReportPage = serde_json::from_str(body).map_err(|e| LookupError::Decode {
        service: SERVICE,
        message: e.to_string(),
    })?;
    Ok(page.reports.into_iter().next())
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{extract::Path, http::StatusCode as AxumStatus, response::IntoResponse, Json};

    #[test]
    fn test_report_url() {
        let client = NcbiClient::new(Client::new(), "https://api.ncbi.nlm.nih.gov/datasets/v2/");
        assert_eq!(
            client.report_url("GCA_000001405").unwrap().as_str(),
            "https://api.ncbi.nlm.nih.gov/datasets/v2/genome/accession/GCA_000001405/dataset_report"
        );
    }

    #[test]
    fn test_report_url_keeps_accession_in_one_segment() {
        let client = NcbiClient::new(Client::new(), "https://api.ncbi.nlm.nih.gov/datasets/v2");
        let url = client
            .report_url("GCA_1/../../../../gene/id/672?x=")
            .unwrap();

        assert_eq!(url.host_str(), Some("api.ncbi.nlm.nih.gov"));
        assert_eq!(url.query(), None);
        assert!(url
            .path()
            .starts_with("/datasets/v2/genome/accession/GCA_1%2F..%2F"));
        assert!(url.path().ends_with("%3Fx=/dataset_report"));
        assert_eq!(url.path_segments().unwrap().count(), 6);
    }

    #[test]
    fn test_report_url_rejects_bad_base() {
        let client = NcbiClient::new(Client::new(), "not a url");
        assert!(matches!(
            client.report_url("GCA_1"),
            Err(LookupError::InvalidUrl(_))
        ));
    }

    /// Serve a fake dataset-report endpoint on a local port
    async fn fake_ncbi() -> String {
        async fn report(Path(accession): Path<String>) -> axum::response::Response {
            match accession.as_str() {
                "GCA_missing" => AxumStatus::NOT_FOUND.into_response(),
                "GCA_broken" => AxumStatus::SERVICE_UNAVAILABLE.into_response(),
                _ => Json(serde_json::json!({
                    "reports": [{"accession": accession, "paired_accession": "GCA_000002"}]
                }))
                .into_response(),
            }
        }

        let router = axum::Router::new().route(
            "/datasets/v2/genome/accession/{accession}/dataset_report",
            axum::routing::get(report),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        format!("http://{addr}/datasets/v2")
    }

    #[tokio::test]
    async fn test_dataset_report_found() {
        let client = NcbiClient::new(Client::new(), fake_ncbi().await);
        let report = client.dataset_report("GCA_000001").await.unwrap().unwrap();
        assert_eq!(report.accession, "GCA_000001");
        assert_eq!(report.paired(), Some("GCA_000002"));
    }

    #[tokio::test]
    async fn test_dataset_report_not_found_is_miss() {
        let client = NcbiClient::new(Client::new(), fake_ncbi().await);
        assert!(client.dataset_report("GCA_missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_dataset_report_server_error() {
        let client = NcbiClient::new(Client::new(), fake_ncbi().await);
        match client.dataset_report("GCA_broken").await {
            Err(LookupError::Status { status, .. }) => {
                assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
            }
            other => panic!("Expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_dataset_report_sends_hostile_accession_as_one_segment() {
        let client = NcbiClient::new(Client::new(), fake_ncbi().await);
        let report = client
            .dataset_report("GCA_1/../../gene/id/672?x=")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(report.accession, "GCA_1/../../gene/id/672?x=");
    }

    #[test]
    fn test_parse_report_page() {
        let body = r#"{"reports": [{
            "accession": "GCF_000001405.40",
            "current_accession": "GCF_000001405.40",
            "paired_accession": "GCA_000001405.29",
            "source_database": "SOURCE_DATABASE_REFSEQ"
        }], "total_count": 1}"#;
        let report = parse_report_page(body).unwrap().unwrap();
        assert_eq!(report.accession, "GCF_000001405.40");
        assert_eq!(report.paired(), Some("GCA_000001405.29"));
    }

    #[test]
    fn test_parse_empty_page() {
        assert!(parse_report_page("{}").unwrap().is_none());
        assert!(parse_report_page(r#"{"reports": []}"#).unwrap().is_none());
    }

    #[test]
    fn test_parse_malformed_page() {
        assert!(matches!(
            parse_report_page("not json"),
            Err(LookupError::Decode { .. })
        ));
    }
}
