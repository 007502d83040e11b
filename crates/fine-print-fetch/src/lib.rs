#![warn(missing_docs)]
//! # fine-print-fetch
//!
//! ## Purpose
//! Client boundary to the remote analysis service.
//!
//! ## Responsibilities
//! - Define the [`ContentFetcher`] trait used by the orchestrator.
//! - Implement it over HTTP with `reqwest` ([`HttpContentFetcher`]).
//! - Validate the configured service base URL.
//! - Classify failures into status, transport, timeout, and decode errors.
//!
//! ## Data flow
//! Orchestrator -> [`ContentFetcher::parse_file`] (`POST /parse-pdf`, multipart)
//! -> [`ContentFetcher::analyze`] (`POST /analyze`, JSON) -> mode-tagged result.
//!
//! ## Ownership and lifetimes
//! Request bodies are borrowed for the duration of one call; responses are
//! returned as owned contract types.
//!
//! ## Error model
//! Every call returns [`FetchError`]. Non-2xx statuses keep the optional
//! `detail` string from the error body so callers can surface it verbatim.
//!
//! ## Security and privacy notes
//! Submitted text and file bytes are never logged; only sizes and statuses.

use std::time::Duration;

use async_trait::async_trait;
use fine_print_analysis_contract::{
    AnalysisContractError, FixSuggestion, ParsedDocument, RawAnalysisResult,
    analysis_result_from_value, error_detail,
};
use fine_print_core::{AnalysisRequest, AttachedFile};
use reqwest::multipart::{Form, Part};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

/// File parsing endpoint path.
pub const PARSE_PATH: &str = "/parse-pdf";
/// Analysis endpoint path.
pub const ANALYZE_PATH: &str = "/analyze";
/// Clause rewrite endpoint path.
pub const SUGGEST_FIX_PATH: &str = "/suggest-fix";
/// Multipart field name expected by the parse endpoint.
pub const FILE_FIELD: &str = "file";

/// Abstract client for the analysis service.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Extracts text from one uploaded file.
    async fn parse_file(&self, file: &AttachedFile) -> Result<ParsedDocument, FetchError>;

    /// Runs a scam/document analysis over the request text.
    async fn analyze(&self, request: &AnalysisRequest) -> Result<RawAnalysisResult, FetchError>;

    /// Asks the service to rewrite an unfair clause.
    async fn suggest_fix(&self, request: &AnalysisRequest) -> Result<FixSuggestion, FetchError>;
}

/// HTTP implementation of [`ContentFetcher`].
#[derive(Debug, Clone)]
pub struct HttpContentFetcher {
    base_url: String,
    client: reqwest::Client,
}

impl HttpContentFetcher {
    /// Creates a fetcher with a bounded per-request timeout.
    ///
    /// # Errors
    /// Returns [`FetchError::InvalidEndpoint`] when the base URL is not an
    /// absolute `http`/`https` URL, and [`FetchError::Network`] when the HTTP
    /// client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let base_url = base_url.into();
        validate_base_url(&base_url)?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| FetchError::Network(format!("failed to build HTTP client: {error}")))?;

        Ok(Self::with_client(base_url, client))
    }

    /// Wraps an existing `reqwest` client. The base URL is not re-validated.
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Returns the normalized base URL (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(&self, path: &str, request: reqwest::RequestBuilder) -> Result<String, FetchError> {
        let response = request.send().await.map_err(classify_transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(classify_transport_error)?;

        if !status.is_success() {
            let detail = error_detail(&body);
            warn!(path, status = status.as_u16(), has_detail = detail.is_some(), "service returned error status");
            return Err(FetchError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        debug!(path, status = status.as_u16(), body_len = body.len(), "service call succeeded");
        Ok(body)
    }
}

#[async_trait]
impl ContentFetcher for HttpContentFetcher {
    async fn parse_file(&self, file: &AttachedFile) -> Result<ParsedDocument, FetchError> {
        debug!(file_name = %file.name, file_len = file.bytes.len(), "uploading file for parsing");
        let part = Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        let form = Form::new().part(FILE_FIELD, part);

        let body = self
            .send(
                PARSE_PATH,
                self.client.post(self.endpoint(PARSE_PATH)).multipart(form),
            )
            .await?;
        serde_json::from_str(&body).map_err(|error| FetchError::Decode(error.to_string()))
    }

    async fn analyze(&self, request: &AnalysisRequest) -> Result<RawAnalysisResult, FetchError> {
        debug!(text_len = request.text.len(), has_url = !request.url.is_empty(), "requesting analysis");
        let body = self
            .send(
                ANALYZE_PATH,
                self.client.post(self.endpoint(ANALYZE_PATH)).json(request),
            )
            .await?;

        let value = serde_json::from_str(&body).map_err(|error| FetchError::Decode(error.to_string()))?;
        analysis_result_from_value(value).map_err(FetchError::from)
    }

    async fn suggest_fix(&self, request: &AnalysisRequest) -> Result<FixSuggestion, FetchError> {
        let body = self
            .send(
                SUGGEST_FIX_PATH,
                self.client.post(self.endpoint(SUGGEST_FIX_PATH)).json(request),
            )
            .await?;
        serde_json::from_str(&body).map_err(|error| FetchError::Decode(error.to_string()))
    }
}

/// Validates the service base URL.
///
/// # Errors
/// Returns [`FetchError::InvalidEndpoint`] for unparsable URLs, non-HTTP
/// schemes, or URLs carrying a query or fragment.
pub fn validate_base_url(base_url: &str) -> Result<(), FetchError> {
    let parsed = Url::parse(base_url)
        .map_err(|error| FetchError::InvalidEndpoint(format!("invalid service url: {error}")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(FetchError::InvalidEndpoint(format!(
            "unsupported scheme '{}'",
            parsed.scheme()
        )));
    }

    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(FetchError::InvalidEndpoint(
            "service url must not carry a query or fragment".to_string(),
        ));
    }

    Ok(())
}

/// Returns `true` when endpoint URL is HTTPS.
pub fn is_https_endpoint(endpoint: &str) -> bool {
    Url::parse(endpoint)
        .map(|url| url.scheme() == "https")
        .unwrap_or(false)
}

fn classify_transport_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout
    } else if error.is_decode() {
        FetchError::Decode(error.to_string())
    } else {
        FetchError::Network(error.to_string())
    }
}

/// Service client errors.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Base URL violates endpoint requirements.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    /// Service answered with a non-success status.
    #[error("service returned status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// `detail` message from the error body, when present.
        detail: Option<String>,
    },
    /// Connection could not be established or was interrupted.
    #[error("network failure: {0}")]
    Network(String),
    /// Request exceeded the configured timeout.
    #[error("request timed out")]
    Timeout,
    /// Success body was not valid JSON for the expected shape.
    #[error("response decode failure: {0}")]
    Decode(String),
    /// Analysis body violated the mode-tagged contract.
    #[error(transparent)]
    Contract(#[from] AnalysisContractError),
}
