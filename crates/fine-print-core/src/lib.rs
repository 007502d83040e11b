#![warn(missing_docs)]
//! # fine-print-core
//!
//! ## Purpose
//! Defines the pure input model used across the `fine-print` workspace.
//!
//! ## Responsibilities
//! - Represent one submission's form state (text, attached file, link).
//! - Decide whether a submission carries any content at all.
//! - Build the analysis request body from raw and parsed text.
//!
//! ## Data flow
//! A front end implements [`InputCollector`] and emits an [`InputPayload`].
//! [`ensure_content`] gates submission, then the orchestrator merges parsed
//! file text through [`build_analysis_request`] into an [`AnalysisRequest`].
//!
//! ## Ownership and lifetimes
//! Payloads own their text and file buffers (`String`, `Vec<u8>`) so a
//! submission can be moved across await points without borrowing form state.
//!
//! ## Error model
//! An empty submission returns [`CoreError::InputMissing`] before any network
//! call is attempted.
//!
//! ## Security and privacy notes
//! This crate never logs submitted text or file bytes.
//!
//! ## Example
//! ```rust
//! use fine_print_core::{FormInput, InputCollector, has_content};
//!
//! let form = FormInput::new("  ", None, "https://shop.example.test/terms");
//! assert!(has_content(&form.collect()));
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Analysis language used when the caller does not configure one.
pub const DEFAULT_LANGUAGE: &str = "English";

/// One file selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachedFile {
    /// File name forwarded as the multipart file name.
    pub name: String,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

impl AttachedFile {
    /// Creates an attached file from a name and its contents.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Normalized content of one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputPayload {
    /// Free text typed or pasted by the user.
    pub text: String,
    /// Selected files; only the first one is ever parsed.
    pub files: Vec<AttachedFile>,
    /// Link to the page being analyzed.
    pub link: String,
}

/// Source of submission payloads.
///
/// The desktop form and the browser-extension page probe both implement this
/// trait, so the orchestrator never depends on where content came from.
pub trait InputCollector {
    /// Reads the current input state into a fresh payload.
    fn collect(&self) -> InputPayload;
}

/// Snapshot of the analysis form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    /// Raw text area contents.
    pub text: String,
    /// Selected file, if any.
    pub file: Option<AttachedFile>,
    /// Raw link field contents.
    pub link: String,
}

impl FormInput {
    /// Creates a form snapshot.
    pub fn new(text: impl Into<String>, file: Option<AttachedFile>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            file,
            link: link.into(),
        }
    }
}

impl InputCollector for FormInput {
    fn collect(&self) -> InputPayload {
        InputPayload {
            text: self.text.trim().to_string(),
            files: self.file.iter().cloned().collect(),
            link: self.link.trim().to_string(),
        }
    }
}

/// Returns `true` when the payload carries text, a file, or a link.
pub fn has_content(payload: &InputPayload) -> bool {
    !payload.text.trim().is_empty()
        || !payload.files.is_empty()
        || !payload.link.trim().is_empty()
}

/// Rejects payloads without any content.
///
/// # Errors
/// Returns [`CoreError::InputMissing`] when [`has_content`] is `false`.
pub fn ensure_content(payload: &InputPayload) -> Result<(), CoreError> {
    if has_content(payload) {
        Ok(())
    } else {
        Err(CoreError::InputMissing)
    }
}

/// JSON body sent to the analysis endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Text to analyze, including any parsed file text.
    pub text: String,
    /// Link field passed through verbatim; may be empty.
    #[serde(default)]
    pub url: String,
    /// Language the analysis should be written in.
    #[serde(default = "default_language")]
    pub language: String,
}

impl AnalysisRequest {
    /// Serializes the request to compact JSON bytes.
    ///
    /// # Errors
    /// Returns [`CoreError::Codec`] when JSON serialization fails.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, CoreError> {
        serde_json::to_vec(self).map_err(CoreError::Codec)
    }
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// Appends parsed file text to the typed text.
///
/// Parsed text is joined with a single newline and skipped entirely when empty.
pub fn merge_parsed_text(text: &str, parsed_text: Option<&str>) -> String {
    match parsed_text {
        Some(parsed) if !parsed.is_empty() => format!("{text}\n{parsed}"),
        _ => text.to_string(),
    }
}

/// Builds the analysis request for one submission.
pub fn build_analysis_request(
    payload: &InputPayload,
    parsed_text: Option<&str>,
    language: impl Into<String>,
) -> AnalysisRequest {
    AnalysisRequest {
        text: merge_parsed_text(&payload.text, parsed_text),
        url: payload.link.clone(),
        language: language.into(),
    }
}

/// Error type for input validation and codec failures.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No text, file, or link was supplied.
    #[error("no content supplied")]
    InputMissing,
    /// JSON encoding failure.
    #[error("request codec failure: {0}")]
    Codec(#[from] serde_json::Error),
}
