//! Shared fixtures for app integration tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fine_print_analysis_contract::{
    AnalysisContractError, FixSuggestion, ParsedDocument, RawAnalysisResult,
    analysis_result_from_value,
};
use fine_print_core::{AnalysisRequest, AttachedFile};
use fine_print_fetch::{ContentFetcher, FetchError};

/// Canned reply for one endpoint.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub enum Reply {
    /// Success with a JSON body.
    Json(serde_json::Value),
    /// Non-2xx status with optional detail.
    Status(u16, Option<&'static str>),
    /// Connection refused.
    Network,
    /// Timeout elapsed.
    Timeout,
}

impl Reply {
    fn into_result(self) -> Result<serde_json::Value, FetchError> {
        match self {
            Reply::Json(value) => Ok(value),
            Reply::Status(status, detail) => Err(FetchError::Status {
                status,
                detail: detail.map(str::to_string),
            }),
            Reply::Network => Err(FetchError::Network("connection refused".to_string())),
            Reply::Timeout => Err(FetchError::Timeout),
        }
    }
}

/// Fetcher answering from fixed replies and recording every call.
#[allow(dead_code)]
#[derive(Debug)]
pub struct ScriptedFetcher {
    parse: Reply,
    analyze: Reply,
    calls: Mutex<Vec<String>>,
    analyzed: Mutex<Vec<AnalysisRequest>>,
}

#[allow(dead_code)]
impl ScriptedFetcher {
    /// Creates a fetcher with replies for the parse and analyze endpoints.
    pub fn new(parse: Reply, analyze: Reply) -> Arc<Self> {
        Arc::new(Self {
            parse,
            analyze,
            calls: Mutex::new(Vec::new()),
            analyzed: Mutex::new(Vec::new()),
        })
    }

    /// Creates a fetcher whose analysis succeeds with `body`.
    pub fn analyzing(body: serde_json::Value) -> Arc<Self> {
        Self::new(Reply::Json(serde_json::json!({"text": ""})), Reply::Json(body))
    }

    /// Endpoint calls in order (`parse:<file>` / `analyze` / `suggest_fix`).
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("call log lock").clone()
    }

    /// Requests received by the analysis endpoint.
    pub fn analyzed(&self) -> Vec<AnalysisRequest> {
        self.analyzed.lock().expect("request log lock").clone()
    }
}

#[async_trait]
impl ContentFetcher for ScriptedFetcher {
    async fn parse_file(&self, file: &AttachedFile) -> Result<ParsedDocument, FetchError> {
        self.calls
            .lock()
            .expect("call log lock")
            .push(format!("parse:{}", file.name));
        let value = self.parse.clone().into_result()?;
        serde_json::from_value(value).map_err(|error| FetchError::Decode(error.to_string()))
    }

    async fn analyze(&self, request: &AnalysisRequest) -> Result<RawAnalysisResult, FetchError> {
        self.calls
            .lock()
            .expect("call log lock")
            .push("analyze".to_string());
        self.analyzed
            .lock()
            .expect("request log lock")
            .push(request.clone());
        let value = self.analyze.clone().into_result()?;
        analysis_result_from_value(value).map_err(|error: AnalysisContractError| error.into())
    }

    async fn suggest_fix(&self, _request: &AnalysisRequest) -> Result<FixSuggestion, FetchError> {
        self.calls
            .lock()
            .expect("call log lock")
            .push("suggest_fix".to_string());
        Ok(FixSuggestion {
            suggestion: "Either party may end the contract with 30 days notice.".to_string(),
        })
    }
}

/// High-risk scam warning body.
#[allow(dead_code)]
pub fn high_risk_body() -> serde_json::Value {
    serde_json::json!({
        "analysis_mode": "SCAM_WARNING",
        "risk_level": "HIGH",
        "risk_score": 88,
        "alert_title": "Fake bank alert",
        "immediate_assessment": "The sender impersonates your bank.",
        "red_flags": ["Spoofed sender"],
        "immediate_actions": ["Do not reply", "Call the number on your card"],
        "explanation_for_voice": "This is likely a phishing attempt."
    })
}

/// Document explanation body without concerns.
#[allow(dead_code)]
pub fn clean_document_body() -> serde_json::Value {
    serde_json::json!({
        "analysis_mode": "DOCUMENT_EXPLANATION",
        "document_type": "Lease",
        "summary": "A standard twelve month lease.",
        "key_clauses": [],
        "user_rights": ["Quiet enjoyment"],
        "potential_concerns": [],
        "next_recommended_steps": ["Keep a signed copy"]
    })
}
