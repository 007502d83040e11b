#![warn(missing_docs)]
//! # fine-print-page
//!
//! ## Purpose
//! Browser-extension side channel: answers `getText` requests with the text of
//! the current page and a terms-page verdict.
//!
//! ## Responsibilities
//! - Define a backend-agnostic page snapshot trait.
//! - Detect terms/policy pages from the page title.
//! - Answer the extension's request/response message contract.
//! - Act as an alternate input collector for the analysis pipeline.
//!
//! ## Data flow
//! Popup sends [`PageTextRequest`] -> [`ContentScript`] snapshots the page via
//! [`PageSource`] -> [`PageTextResponse`] -> [`InputCollector::collect`] ->
//! orchestrator.
//!
//! ## Ownership and lifetimes
//! Snapshots own their strings; nothing borrowed from the page escapes the
//! source boundary.
//!
//! ## Error model
//! Snapshot failures are reported as [`PageError`]. Requests for unknown
//! actions are not answered (`Ok(None)`), matching the message-passing
//! contract where only `getText` has a listener.
//!
//! ## Security and privacy notes
//! Non-terms pages never leave the content script: their text is replaced by a
//! fixed marker and the collected payload is empty.

use std::sync::LazyLock;

use async_trait::async_trait;
use fine_print_core::{InputCollector, InputPayload};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Only action the content script answers.
pub const GET_TEXT_ACTION: &str = "getText";
/// Text returned in place of the body for non-terms pages.
pub const NOT_A_TERMS_PAGE: &str = "Not a terms page";
/// Maximum number of characters forwarded for analysis.
pub const MAX_ANALYSIS_CHARS: usize = 10_000;

static TERMS_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)terms|conditions|privacy|policy|agreement").expect("terms title pattern is valid")
});

/// Point-in-time view of the active page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSnapshot {
    /// Document title.
    pub title: String,
    /// Rendered body text.
    pub body_text: String,
    /// Page location.
    pub url: String,
}

/// Message sent by the popup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageTextRequest {
    /// Requested action; only [`GET_TEXT_ACTION`] is answered.
    pub action: String,
}

impl PageTextRequest {
    /// Builds the standard `getText` request.
    pub fn get_text() -> Self {
        Self {
            action: GET_TEXT_ACTION.to_string(),
        }
    }
}

/// Content script reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageTextResponse {
    /// Page body text, or [`NOT_A_TERMS_PAGE`].
    pub text: String,
    /// Page location.
    pub url: String,
    /// Title heuristic verdict.
    pub is_terms_page: bool,
}

/// Returns `true` when the title looks like a terms, privacy, or policy page.
pub fn is_terms_page(title: &str) -> bool {
    TERMS_TITLE.is_match(title)
}

/// Builds the reply for one snapshot.
pub fn describe_page(snapshot: &PageSnapshot) -> PageTextResponse {
    let is_terms_page = is_terms_page(&snapshot.title);
    PageTextResponse {
        text: if is_terms_page {
            snapshot.body_text.clone()
        } else {
            NOT_A_TERMS_PAGE.to_string()
        },
        url: snapshot.url.clone(),
        is_terms_page,
    }
}

/// Truncates text to at most `max_chars` characters on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

impl InputCollector for PageTextResponse {
    fn collect(&self) -> InputPayload {
        if !self.is_terms_page {
            return InputPayload::default();
        }

        InputPayload {
            text: truncate_chars(self.text.trim(), MAX_ANALYSIS_CHARS).to_string(),
            files: Vec::new(),
            link: self.url.trim().to_string(),
        }
    }
}

/// Provider of page snapshots.
pub trait PageSource: Send + Sync {
    /// Captures the current page.
    ///
    /// # Errors
    /// Returns [`PageError::Unavailable`] when no page can be read.
    fn snapshot(&self) -> Result<PageSnapshot, PageError>;
}

/// Page source backed by a fixed snapshot, for CLI and test usage.
#[derive(Debug, Clone, Default)]
pub struct StaticPage {
    snapshot: PageSnapshot,
}

impl StaticPage {
    /// Creates a source that always returns `snapshot`.
    pub fn new(snapshot: PageSnapshot) -> Self {
        Self { snapshot }
    }
}

impl PageSource for StaticPage {
    fn snapshot(&self) -> Result<PageSnapshot, PageError> {
        Ok(self.snapshot.clone())
    }
}

/// Asynchronous request/response contract between popup and content script.
#[async_trait]
pub trait PageTextResponder: Send + Sync {
    /// Answers one request; `Ok(None)` when the action is not handled.
    async fn respond(&self, request: &PageTextRequest) -> Result<Option<PageTextResponse>, PageError>;
}

/// Content script answering `getText` from a [`PageSource`].
#[derive(Debug, Clone)]
pub struct ContentScript<S> {
    source: S,
}

impl<S: PageSource> ContentScript<S> {
    /// Wraps a page source.
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

#[async_trait]
impl<S: PageSource> PageTextResponder for ContentScript<S> {
    async fn respond(&self, request: &PageTextRequest) -> Result<Option<PageTextResponse>, PageError> {
        if request.action != GET_TEXT_ACTION {
            return Ok(None);
        }

        let snapshot = self.source.snapshot()?;
        Ok(Some(describe_page(&snapshot)))
    }
}

/// Page layer error type.
#[derive(Debug, Error)]
pub enum PageError {
    /// The page could not be read.
    #[error("page unavailable: {0}")]
    Unavailable(String),
}
