//! Data API client

use super::funnel::{RunFunnelReportRequest, RunFunnelReportResponse};
use super::types::{RunReportRequest, RunReportResponse};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::pagination::ReportExecutor;
use async_trait::async_trait;
use tracing::debug;

/// Production endpoint of the Data API
pub const DEFAULT_DATA_URL: &str = "https://analyticsdata.googleapis.com";

/// Client for `analyticsdata.googleapis.com`
#[derive(Debug)]
pub struct DataClient {
    http: HttpClient,
}

impl DataClient {
    /// Wrap an HTTP client whose base URL points at the Data API
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Run a standard report (`v1beta`)
    pub async fn run_report(&self, request: &RunReportRequest) -> Result<RunReportResponse> {
        check_property(&request.property)?;
        debug!(
            property = %request.property,
            offset = request.offset,
            limit = ?request.limit,
            "runReport"
        );
        let url = format!("/v1beta/{}:runReport", request.property);
        self.http.post_json(&url, request).await
    }

    /// Run a funnel report (`v1alpha`)
    pub async fn run_funnel_report(
        &self,
        request: &RunFunnelReportRequest,
    ) -> Result<RunFunnelReportResponse> {
        check_property(&request.property)?;
        if request.funnel.steps.is_empty() {
            return Err(Error::config("A funnel report needs at least one step"));
        }
        debug!(
            property = %request.property,
            steps = request.funnel.steps.len(),
            "runFunnelReport"
        );
        let url = format!("/v1alpha/{}:runFunnelReport", request.property);
        self.http.post_json(&url, request).await
    }
}

#[async_trait]
impl ReportExecutor for DataClient {
    async fn run_report(&self, request: &RunReportRequest) -> Result<RunReportResponse> {
        DataClient::run_report(self, request).await
    }
}

fn check_property(property: &str) -> Result<()> {
    match property.strip_prefix("properties/") {
        Some(id) if !id.is_empty() => Ok(()),
        _ => Err(Error::config(format!(
            "Invalid property resource name '{property}', expected properties/{{id}}"
        ))),
    }
}
