//! Integration tests for the single-submission gate.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use fine_print_analysis_contract::{
    FixSuggestion, ParsedDocument, RawAnalysisResult, StatusKind, analysis_result_from_value,
};
use fine_print_app::{AnalysisOrchestrator, AppError, submit};
use fine_print_core::{AnalysisRequest, AttachedFile, FormInput, InputPayload};
use fine_print_fetch::{ContentFetcher, FetchError};
use fine_print_ui::{HeadlessSurfaces, OperationState, PresentationController};
use tokio::sync::Notify;

/// Fetcher whose analysis call parks until released.
struct ParkedFetcher {
    entered: Notify,
    release: Notify,
}

#[async_trait]
impl ContentFetcher for ParkedFetcher {
    async fn parse_file(&self, _file: &AttachedFile) -> Result<ParsedDocument, FetchError> {
        Ok(ParsedDocument {
            text: String::new(),
        })
    }

    async fn analyze(&self, _request: &AnalysisRequest) -> Result<RawAnalysisResult, FetchError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(analysis_result_from_value(common::high_risk_body())?)
    }

    async fn suggest_fix(&self, _request: &AnalysisRequest) -> Result<FixSuggestion, FetchError> {
        Err(FetchError::Timeout)
    }
}

fn text_payload(text: &str) -> InputPayload {
    InputPayload {
        text: text.to_string(),
        ..InputPayload::default()
    }
}

#[tokio::test]
async fn submission_gate_tests_second_run_is_refused_while_first_is_pending() {
    let fetcher = Arc::new(ParkedFetcher {
        entered: Notify::new(),
        release: Notify::new(),
    });
    let orchestrator = AnalysisOrchestrator::new(fetcher.clone(), "English");

    let first_payload = text_payload("first");
    let first = orchestrator.run(&first_payload);
    let second = async {
        fetcher.entered.notified().await;
        assert!(orchestrator.is_busy());
        let refused = orchestrator.run(&text_payload("second")).await;
        fetcher.release.notify_one();
        refused
    };

    let (first, second) = tokio::join!(first, second);

    assert!(first.is_ok());
    assert!(matches!(second, Err(AppError::SubmissionInFlight)));
    assert!(!orchestrator.is_busy());
}

#[tokio::test]
async fn submission_gate_tests_gate_reopens_after_failure() {
    let fetcher = common::ScriptedFetcher::new(
        common::Reply::Status(500, Some("corrupt file")),
        common::Reply::Json(common::high_risk_body()),
    );
    let orchestrator = AnalysisOrchestrator::new(fetcher.clone(), "English");
    let payload = InputPayload {
        files: vec![AttachedFile::new("bad.pdf", vec![0])],
        ..InputPayload::default()
    };

    assert!(orchestrator.run(&payload).await.is_err());
    assert!(!orchestrator.is_busy());
    assert!(orchestrator.run(&text_payload("retry")).await.is_ok());
}

#[tokio::test]
async fn submission_gate_tests_busy_controller_refuses_without_calling_service() {
    let fetcher = common::ScriptedFetcher::analyzing(common::high_risk_body());
    let orchestrator = AnalysisOrchestrator::new(fetcher.clone(), "English");
    let mut controller = PresentationController::new(HeadlessSurfaces::new());
    assert!(controller.begin_submission());

    let result = submit(&mut controller, &orchestrator, &FormInput::new("hello", None, "")).await;

    assert!(matches!(result, Err(AppError::SubmissionInFlight)));
    assert!(fetcher.calls().is_empty());
}

#[tokio::test]
async fn submission_gate_tests_trigger_on_second_controller_is_ignored_while_busy() {
    let fetcher = Arc::new(ParkedFetcher {
        entered: Notify::new(),
        release: Notify::new(),
    });
    let orchestrator = AnalysisOrchestrator::new(fetcher.clone(), "English");
    let mut popup = PresentationController::new(HeadlessSurfaces::new());
    let mut side_panel = PresentationController::new(HeadlessSurfaces::new());
    let form = FormInput::new("Your parcel is held, pay the fee", None, "");

    let first = submit(&mut popup, &orchestrator, &form);
    let second = async {
        fetcher.entered.notified().await;
        let ignored = submit(&mut side_panel, &orchestrator, &form).await;
        fetcher.release.notify_one();
        ignored
    };

    let (first, second) = tokio::join!(first, second);

    assert!(first.is_ok());
    assert!(matches!(second, Err(AppError::SubmissionInFlight)));
    assert_eq!(popup.surfaces().status_kind, StatusKind::Error);

    let surfaces = side_panel.surfaces();
    assert_eq!(side_panel.state(), OperationState::Idle);
    assert_eq!(surfaces.status_kind, StatusKind::Ready);
    assert!(surfaces.trigger_enabled);
    assert!(!surfaces.risk_dimmed);
    assert_eq!(surfaces.status_history.len(), 1);
    assert_eq!(side_panel.record(), &fine_print_ui::default_record());
}
