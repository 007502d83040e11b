#![warn(missing_docs)]
//! # fine-print-analysis-contract
//!
//! ## Purpose
//! Defines the analysis service response schema and the client-side
//! normalization into one presentation record.
//!
//! ## Responsibilities
//! - Parse mode-tagged analysis responses (`SCAM_WARNING`,
//!   `DOCUMENT_EXPLANATION`) into [`RawAnalysisResult`].
//! - Reject unknown analysis modes instead of rendering an empty report.
//! - Map either mode into a mode-independent [`PresentationRecord`].
//! - Extract the `detail` message from service error bodies.
//!
//! ## Data flow
//! Raw JSON response -> [`parse_analysis_result`] -> [`normalize`] ->
//! presentation controller.
//!
//! ## Ownership and lifetimes
//! Parsed values are owned structs to avoid borrowing from transient network
//! buffers.
//!
//! ## Error model
//! Invalid JSON or mismatched variant fields return
//! [`AnalysisContractError::Decode`]; an unrecognized or missing tag returns
//! [`AnalysisContractError::UnknownMode`].
//!
//! ## Security and privacy notes
//! This crate processes only model outputs; it does not see uploaded files.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Tag field carried by every analysis response.
pub const ANALYSIS_MODE_FIELD: &str = "analysis_mode";
/// Tag value for scam/risk assessments.
pub const MODE_SCAM_WARNING: &str = "SCAM_WARNING";
/// Tag value for document explanations.
pub const MODE_DOCUMENT_EXPLANATION: &str = "DOCUMENT_EXPLANATION";

/// Risk score shown for documents with reported concerns.
pub const DOCUMENT_CONCERNS_SCORE: f64 = 50.0;
/// Risk score shown for documents without reported concerns.
pub const DOCUMENT_CLEAR_SCORE: f64 = 10.0;

/// Risk level reported by the service and shown by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    /// Low risk.
    #[serde(alias = "low", alias = "Low")]
    Low,
    /// Medium risk.
    #[serde(alias = "medium", alias = "Medium")]
    Medium,
    /// High risk.
    #[serde(alias = "high", alias = "High")]
    High,
    /// Critical risk.
    #[serde(alias = "critical", alias = "Critical")]
    Critical,
}

impl RiskLevel {
    /// Lowercase label used by the presentation layer.
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Capitalized label for display (`"High"`).
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

/// Attention level attached to one explained clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AttentionLevel {
    /// Informational clause.
    Low,
    /// Clause worth reading twice.
    Medium,
    /// Clause the user should act on.
    High,
}

/// Scam/risk assessment report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScamWarning {
    /// Overall risk level.
    pub risk_level: RiskLevel,
    /// Risk score, nominally in [0, 100]. Never clamped by the client.
    pub risk_score: f64,
    /// Short headline for the alert.
    #[serde(default)]
    pub alert_title: String,
    /// One-paragraph assessment shown as the summary.
    #[serde(default)]
    pub immediate_assessment: String,
    /// Observed scam indicators.
    #[serde(default)]
    pub red_flags: Vec<String>,
    /// Ordered actions the user should take now.
    #[serde(default)]
    pub immediate_actions: Vec<String>,
    /// Plain-language narration text for voice output.
    #[serde(default)]
    pub explanation_for_voice: String,
}

/// One clause highlighted by a document explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyClause {
    /// Clause subject.
    pub clause_topic: String,
    /// Plain-language explanation.
    pub explanation: String,
    /// How much attention the clause deserves.
    pub user_attention: AttentionLevel,
}

/// Document explanation report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentExplanation {
    /// Detected document type (lease, privacy policy, ...).
    #[serde(default)]
    pub document_type: String,
    /// Plain-language summary.
    #[serde(default)]
    pub summary: String,
    /// Clauses worth highlighting.
    #[serde(default)]
    pub key_clauses: Vec<KeyClause>,
    /// Rights the document grants the user.
    #[serde(default)]
    pub user_rights: Vec<String>,
    /// Concerns found in the document; non-empty raises the risk label.
    #[serde(default)]
    pub potential_concerns: Vec<String>,
    /// Ordered follow-up steps.
    #[serde(default)]
    pub next_recommended_steps: Vec<String>,
}

/// Mode-tagged analysis response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "analysis_mode")]
pub enum RawAnalysisResult {
    /// `SCAM_WARNING` response.
    #[serde(rename = "SCAM_WARNING")]
    ScamWarning(ScamWarning),
    /// `DOCUMENT_EXPLANATION` response.
    #[serde(rename = "DOCUMENT_EXPLANATION")]
    DocumentExplanation(DocumentExplanation),
}

impl RawAnalysisResult {
    /// Returns the wire tag of this result.
    pub fn mode(&self) -> &'static str {
        match self {
            Self::ScamWarning(_) => MODE_SCAM_WARNING,
            Self::DocumentExplanation(_) => MODE_DOCUMENT_EXPLANATION,
        }
    }
}

/// Severity class of the status banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    /// Nothing submitted yet.
    Ready,
    /// Submission in flight.
    Loading,
    /// Analysis finished without notable risk.
    Success,
    /// Analysis finished with moderate risk.
    Warning,
    /// High risk or a failed submission.
    Error,
}

/// Mode-independent UI state derived from one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationRecord {
    /// Banner severity.
    pub status_kind: StatusKind,
    /// Banner message.
    pub status_text: String,
    /// Risk label shown next to the bar.
    pub risk_label: RiskLevel,
    /// Risk bar fill, nominally in [0, 100].
    pub risk_score: f64,
    /// Summary paragraph; may be empty.
    pub summary: String,
    /// Ordered recommended actions; may be empty.
    pub actions: Vec<String>,
}

/// Parses raw JSON into a mode-tagged analysis result.
///
/// # Errors
/// Returns [`AnalysisContractError::Decode`] for invalid JSON or variant
/// fields, and [`AnalysisContractError::UnknownMode`] when `analysis_mode` is
/// missing or not recognized.
pub fn parse_analysis_result(raw: &str) -> Result<RawAnalysisResult, AnalysisContractError> {
    let value: Value = serde_json::from_str(raw).map_err(AnalysisContractError::Decode)?;
    analysis_result_from_value(value)
}

/// Converts an already-decoded JSON value into a mode-tagged result.
///
/// # Errors
/// Same as [`parse_analysis_result`].
pub fn analysis_result_from_value(value: Value) -> Result<RawAnalysisResult, AnalysisContractError> {
    let mode = value
        .get(ANALYSIS_MODE_FIELD)
        .and_then(Value::as_str)
        .map(str::to_string);

    match mode.as_deref() {
        Some(MODE_SCAM_WARNING) => serde_json::from_value(value)
            .map(RawAnalysisResult::ScamWarning)
            .map_err(AnalysisContractError::Decode),
        Some(MODE_DOCUMENT_EXPLANATION) => serde_json::from_value(value)
            .map(RawAnalysisResult::DocumentExplanation)
            .map_err(AnalysisContractError::Decode),
        Some(other) => Err(AnalysisContractError::UnknownMode(other.to_string())),
        None => Err(AnalysisContractError::UnknownMode(
            "<missing analysis_mode>".to_string(),
        )),
    }
}

/// Maps an analysis result into the single presentation shape.
pub fn normalize(raw: &RawAnalysisResult) -> PresentationRecord {
    match raw {
        RawAnalysisResult::ScamWarning(report) => normalize_scam_warning(report),
        RawAnalysisResult::DocumentExplanation(report) => normalize_document(report),
    }
}

fn normalize_scam_warning(report: &ScamWarning) -> PresentationRecord {
    let (status_kind, status_text) = match report.risk_level {
        RiskLevel::High | RiskLevel::Critical => (
            StatusKind::Error,
            format!(
                "Analysis complete - {} risk detected!",
                report.risk_level.label().to_uppercase()
            ),
        ),
        RiskLevel::Medium => (
            StatusKind::Warning,
            "Analysis complete - Medium risk detected".to_string(),
        ),
        RiskLevel::Low => (
            StatusKind::Success,
            "Analysis complete - Low risk detected".to_string(),
        ),
    };

    PresentationRecord {
        status_kind,
        status_text,
        risk_label: report.risk_level,
        risk_score: report.risk_score,
        summary: report.immediate_assessment.clone(),
        actions: report.immediate_actions.clone(),
    }
}

fn normalize_document(report: &DocumentExplanation) -> PresentationRecord {
    let (status_kind, status_text, risk_label, risk_score) = if report.potential_concerns.is_empty() {
        (
            StatusKind::Success,
            "Document analyzed - No major concerns",
            RiskLevel::Low,
            DOCUMENT_CLEAR_SCORE,
        )
    } else {
        (
            StatusKind::Warning,
            "Document analyzed - Potential concerns found",
            RiskLevel::Medium,
            DOCUMENT_CONCERNS_SCORE,
        )
    };

    PresentationRecord {
        status_kind,
        status_text: status_text.to_string(),
        risk_label,
        risk_score,
        summary: report.summary.clone(),
        actions: report.next_recommended_steps.clone(),
    }
}

/// Response body of the file parsing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDocument {
    /// Extracted text; may be empty.
    #[serde(default)]
    pub text: String,
}

/// Response body of the suggest-fix endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixSuggestion {
    /// Rewritten, fairer wording of the submitted clause.
    pub suggestion: String,
}

/// Error body returned by the service on non-2xx statuses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    /// Human-readable failure detail.
    #[serde(default)]
    pub detail: Option<Value>,
}

/// Extracts the `detail` message from an error response body.
///
/// Returns `None` when the body is not JSON, has no `detail`, or the detail is
/// not a non-empty string.
pub fn error_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        Value::String(detail) if !detail.is_empty() => Some(detail),
        _ => None,
    }
}

/// Analysis contract errors.
#[derive(Debug, Error)]
pub enum AnalysisContractError {
    /// JSON decode failure.
    #[error("analysis decode failure: {0}")]
    Decode(#[from] serde_json::Error),
    /// `analysis_mode` is missing or not one of the known tags.
    #[error("unknown analysis mode: {0}")]
    UnknownMode(String),
}
