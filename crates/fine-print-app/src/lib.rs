#![warn(missing_docs)]
//! # fine-print-app
//!
//! ## Purpose
//! Orchestrates input collection, service calls, normalization, and UI state
//! for `fine-print`.
//!
//! ## Responsibilities
//! - Enforce the content gate before any network call.
//! - Sequence the optional file parse before the analysis call.
//! - Classify every failure into one user-visible message.
//! - Guarantee the submit trigger returns to idle on every exit path.
//! - Load runtime configuration and initialize logging.
//!
//! ## Data flow
//! [`InputCollector`] -> [`AnalysisOrchestrator::run`] (parse -> analyze) ->
//! [`normalize`] -> [`PresentationController::complete`].
//!
//! ## Ownership and lifetimes
//! The orchestrator shares its fetcher through `Arc` and borrows each payload
//! only for the duration of one submission.
//!
//! ## Error model
//! Subsystem failures are wrapped in [`AppError`] and mapped to display text by
//! [`user_message`]. Nothing propagates past [`submit`] unhandled.
//!
//! ## Security and privacy notes
//! Logs carry lengths, statuses, and error kinds only; submitted text and file
//! contents are never written to the log.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use fine_print_analysis_contract::{
    AnalysisContractError, FixSuggestion, PresentationRecord, RawAnalysisResult, normalize,
};
use fine_print_core::{
    AnalysisRequest, CoreError, DEFAULT_LANGUAGE, InputCollector, InputPayload,
    build_analysis_request, ensure_content,
};
use fine_print_fetch::{ContentFetcher, FetchError, HttpContentFetcher, is_https_endpoint};
use fine_print_ui::{PresentationController, SubmissionOutcome, UiSurfaces};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Build-time application version loaded from root `VERSION` file.
pub const APP_VERSION: &str = env!("FINE_PRINT_VERSION");

/// Env var overriding the service base URL.
pub const API_URL_ENV: &str = "FINE_PRINT_API_URL";
/// Env var overriding the per-request timeout in seconds.
pub const TIMEOUT_ENV: &str = "FINE_PRINT_TIMEOUT_SECS";
/// Env var overriding the analysis language.
pub const LANGUAGE_ENV: &str = "FINE_PRINT_LANGUAGE";
/// Env var holding the `tracing` filter directives.
pub const LOG_ENV: &str = "FINE_PRINT_LOG";

/// Service base URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";
/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Shown for transport failures.
pub const NETWORK_ERROR_MESSAGE: &str = "Unable to connect to server. Please check your connection.";
/// Shown when a request exceeds the timeout.
pub const TIMEOUT_ERROR_MESSAGE: &str = "The server took too long to respond. Please try again.";
/// Shown when a failure carries no usable detail.
pub const GENERIC_ERROR_MESSAGE: &str = "Analysis failed. Please try again.";
/// Shown when a submission has no content.
pub const MISSING_INPUT_MESSAGE: &str = fine_print_ui::MISSING_INPUT_TEXT;

/// Returns the app version sourced from root `VERSION`.
pub fn app_version() -> &'static str {
    APP_VERSION
}

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Analysis service base URL.
    pub api_base_url: String,
    /// Timeout applied to each service call.
    pub timeout: Duration,
    /// Language requested for analysis output.
    pub language: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from process environment.
    ///
    /// # Errors
    /// See [`AppConfig::from_lookup`].
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through a variable lookup function.
    ///
    /// Unset or blank variables fall back to defaults.
    ///
    /// # Errors
    /// Returns [`AppError::Config`] when the timeout is not a positive integer.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(url) = read(API_URL_ENV) {
            config.api_base_url = url;
        }
        if let Some(raw) = read(TIMEOUT_ENV) {
            config.timeout = parse_timeout_secs(&raw)?;
        }
        if let Some(language) = read(LANGUAGE_ENV) {
            config.language = language;
        }

        Ok(config)
    }
}

/// Parses a positive number of seconds.
///
/// # Errors
/// Returns [`AppError::Config`] for zero or non-numeric values.
pub fn parse_timeout_secs(raw: &str) -> Result<Duration, AppError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(AppError::Config(format!(
            "timeout must be a positive number of seconds, got '{raw}'"
        ))),
    }
}

/// Builds the HTTP fetcher for a configuration.
///
/// # Errors
/// Returns [`AppError::Config`] when the base URL is invalid.
pub fn build_fetcher(config: &AppConfig) -> Result<HttpContentFetcher, AppError> {
    if !is_https_endpoint(&config.api_base_url) {
        warn!(api_url = %config.api_base_url, "analysis service is not using https");
    }

    HttpContentFetcher::new(config.api_base_url.clone(), config.timeout)
        .map_err(|error| AppError::Config(error.to_string()))
}

/// Initializes the global `tracing` subscriber, writing to stderr.
///
/// Filter directives come from [`LOG_ENV`], falling back to `default_filter`.
/// Calling this more than once is a no-op.
pub fn init_tracing(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    // A subscriber installed earlier (tests, embedding hosts) stays in place.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

/// Sequences parse and analysis calls for one submission.
pub struct AnalysisOrchestrator<F: ?Sized> {
    fetcher: Arc<F>,
    language: String,
    in_flight: AtomicBool,
}

impl<F: ContentFetcher + ?Sized> AnalysisOrchestrator<F> {
    /// Creates an orchestrator requesting analyses in `language`.
    pub fn new(fetcher: Arc<F>, language: impl Into<String>) -> Self {
        Self {
            fetcher,
            language: language.into(),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Returns `true` while a submission is running.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Runs one submission: optional file parse, then analysis.
    ///
    /// Only the first attached file is parsed. The analysis call starts only
    /// after the parse call has fully completed.
    ///
    /// # Errors
    /// - [`AppError::InputMissing`] when the payload is empty.
    /// - [`AppError::SubmissionInFlight`] when another run holds the gate.
    /// - [`AppError::Parse`] / [`AppError::Analysis`] for service failures.
    /// - [`AppError::Network`] / [`AppError::Timeout`] for transport failures.
    /// - [`AppError::UnknownMode`] when the result tag is not recognized.
    #[instrument(skip_all, fields(text_len = payload.text.len(), files = payload.files.len()))]
    pub async fn run(&self, payload: &InputPayload) -> Result<RawAnalysisResult, AppError> {
        ensure_content(payload)?;
        let _gate = InFlightGuard::acquire(&self.in_flight).ok_or(AppError::SubmissionInFlight)?;

        let parsed_text = match payload.files.first() {
            Some(file) => {
                let parsed = self
                    .fetcher
                    .parse_file(file)
                    .await
                    .map_err(parse_failure)?;
                info!(parsed_len = parsed.text.len(), "file parsed");
                Some(parsed.text)
            }
            None => None,
        };

        let request = build_analysis_request(payload, parsed_text.as_deref(), self.language.clone());
        let result = self
            .fetcher
            .analyze(&request)
            .await
            .map_err(analysis_failure)?;

        info!(mode = result.mode(), "analysis received");
        Ok(result)
    }

    /// Requests a fairer rewrite of one clause.
    ///
    /// # Errors
    /// Returns [`AppError::InputMissing`] for blank text, otherwise the same
    /// service and transport errors as [`AnalysisOrchestrator::run`].
    pub async fn suggest_fix(&self, clause: &str) -> Result<FixSuggestion, AppError> {
        if clause.trim().is_empty() {
            return Err(AppError::InputMissing);
        }

        let request = AnalysisRequest {
            text: clause.to_string(),
            url: String::new(),
            language: self.language.clone(),
        };
        self.fetcher
            .suggest_fix(&request)
            .await
            .map_err(analysis_failure)
    }
}

struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Handles one submit trigger end to end.
///
/// Empty input is rejected before the controller leaves `idle`. A trigger
/// arriving while the controller or the orchestrator is busy is ignored: the
/// banner is left as it was. Once the controller is `busy`, it is returned to
/// `idle` whatever the outcome.
///
/// # Errors
/// Returns the classified [`AppError`] after it has already been shown.
pub async fn submit<S, F, C>(
    controller: &mut PresentationController<S>,
    orchestrator: &AnalysisOrchestrator<F>,
    collector: &C,
) -> Result<PresentationRecord, AppError>
where
    S: UiSurfaces,
    F: ContentFetcher + ?Sized,
    C: InputCollector + ?Sized,
{
    let payload = collector.collect();
    if let Err(error) = ensure_content(&payload) {
        controller.reject_missing_input();
        return Err(error.into());
    }

    if orchestrator.is_busy() || !controller.begin_submission() {
        debug!("submission ignored while another is in flight");
        return Err(AppError::SubmissionInFlight);
    }

    let result = orchestrator.run(&payload).await.map(|raw| normalize(&raw));
    if matches!(result, Err(AppError::SubmissionInFlight)) {
        controller.abandon_submission();
        return result;
    }

    let outcome = match &result {
        Ok(record) => SubmissionOutcome::Rendered(record.clone()),
        Err(error) => {
            warn!(kind = error.kind(), "submission failed");
            SubmissionOutcome::Failed(user_message(error))
        }
    };
    controller.complete(outcome);

    result
}

/// Maps an error to the text shown in the status banner.
pub fn user_message(error: &AppError) -> String {
    match error {
        AppError::InputMissing => MISSING_INPUT_MESSAGE.to_string(),
        AppError::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
        AppError::Timeout => TIMEOUT_ERROR_MESSAGE.to_string(),
        AppError::Parse { detail } | AppError::Analysis { detail } => non_empty_or_generic(detail),
        AppError::UnknownMode(mode) => format!("Unsupported analysis mode: {mode}"),
        AppError::SubmissionInFlight | AppError::Config(_) => GENERIC_ERROR_MESSAGE.to_string(),
    }
}

fn non_empty_or_generic(detail: &str) -> String {
    if detail.trim().is_empty() {
        GENERIC_ERROR_MESSAGE.to_string()
    } else {
        detail.to_string()
    }
}

fn parse_failure(error: FetchError) -> AppError {
    classify_fetch_error(error, |status| format!("File parsing error: {status}"), |detail| {
        AppError::Parse { detail }
    })
}

fn analysis_failure(error: FetchError) -> AppError {
    classify_fetch_error(error, |status| format!("Server error: {status}"), |detail| {
        AppError::Analysis { detail }
    })
}

fn classify_fetch_error(
    error: FetchError,
    status_fallback: impl Fn(u16) -> String,
    service_error: impl Fn(String) -> AppError,
) -> AppError {
    match error {
        FetchError::Status { status, detail } => {
            service_error(detail.unwrap_or_else(|| status_fallback(status)))
        }
        FetchError::Network(reason) => AppError::Network(reason),
        FetchError::Timeout => AppError::Timeout,
        FetchError::Contract(AnalysisContractError::UnknownMode(mode)) => AppError::UnknownMode(mode),
        FetchError::Contract(AnalysisContractError::Decode(decode)) => {
            service_error(format!("Invalid response from server: {decode}"))
        }
        FetchError::Decode(decode) => service_error(format!("Invalid response from server: {decode}")),
        FetchError::InvalidEndpoint(reason) => AppError::Config(reason),
    }
}

/// App integration error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// No text, file, or link was supplied.
    #[error("no content supplied")]
    InputMissing,
    /// File parsing endpoint failed.
    #[error("file parsing failed: {detail}")]
    Parse {
        /// Service detail or status fallback.
        detail: String,
    },
    /// Analysis endpoint failed.
    #[error("analysis failed: {detail}")]
    Analysis {
        /// Service detail or status fallback.
        detail: String,
    },
    /// Transport-level failure.
    #[error("network failure: {0}")]
    Network(String),
    /// A service call exceeded the configured timeout.
    #[error("service call timed out")]
    Timeout,
    /// Analysis result tag is not recognized.
    #[error("unknown analysis mode: {0}")]
    UnknownMode(String),
    /// Another submission is still running.
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    /// Invalid runtime configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Short stable name of the error kind, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InputMissing => "input_missing",
            Self::Parse { .. } => "parse_error",
            Self::Analysis { .. } => "analysis_error",
            Self::Network(_) => "network_error",
            Self::Timeout => "timeout_error",
            Self::UnknownMode(_) => "unknown_mode_error",
            Self::SubmissionInFlight => "submission_in_flight",
            Self::Config(_) => "config_error",
        }
    }
}

impl From<CoreError> for AppError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::InputMissing => Self::InputMissing,
            CoreError::Codec(codec) => Self::Analysis {
                detail: codec.to_string(),
            },
        }
    }
}
