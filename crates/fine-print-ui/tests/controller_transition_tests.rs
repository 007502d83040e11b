//! Integration tests for controller state transitions.

use fine_print_analysis_contract::{PresentationRecord, RiskLevel, StatusKind};
use fine_print_ui::{
    HeadlessSurfaces, NO_SUMMARY_TEXT, OperationState, PresentationController, SubmissionOutcome,
};

fn medium_record() -> PresentationRecord {
    PresentationRecord {
        status_kind: StatusKind::Warning,
        status_text: "Document analyzed - Potential concerns found".to_string(),
        risk_label: RiskLevel::Medium,
        risk_score: 50.0,
        summary: String::new(),
        actions: vec![],
    }
}

#[test]
fn controller_transition_tests_loading_then_rendered() {
    let mut controller = PresentationController::new(HeadlessSurfaces::new());

    assert!(controller.begin_submission());
    assert_eq!(controller.surfaces().status_kind, StatusKind::Loading);
    assert_eq!(controller.surfaces().status_text, "Analyzing your content...");
    assert!(!controller.surfaces().trigger_enabled);
    assert!(controller.surfaces().risk_dimmed);

    controller.complete(SubmissionOutcome::Rendered(medium_record()));

    let surfaces = controller.surfaces();
    assert_eq!(controller.state(), OperationState::Idle);
    assert!(surfaces.trigger_enabled);
    assert!(!surfaces.risk_dimmed);
    assert_eq!(surfaces.status_kind, StatusKind::Warning);
    assert_eq!(surfaces.risk_level, RiskLevel::Medium);
    assert_eq!(surfaces.risk_score, 50.0);
    assert_eq!(surfaces.summary, NO_SUMMARY_TEXT);
    assert_eq!(surfaces.steps.len(), 1);
    assert_eq!(controller.record(), &medium_record());
}

#[test]
fn controller_transition_tests_failure_keeps_previous_report() {
    let mut controller = PresentationController::new(HeadlessSurfaces::new());
    assert!(controller.begin_submission());
    controller.complete(SubmissionOutcome::Rendered(medium_record()));

    assert!(controller.begin_submission());
    controller.complete(SubmissionOutcome::Failed("corrupt file".to_string()));

    let surfaces = controller.surfaces();
    assert_eq!(surfaces.status_kind, StatusKind::Error);
    assert_eq!(surfaces.status_text, "corrupt file");
    assert_eq!(surfaces.risk_level, RiskLevel::Medium);
    assert_eq!(surfaces.risk_score, 50.0);
    assert_eq!(controller.record().risk_score, 50.0);
    assert_eq!(controller.record().status_text, "corrupt file");
    assert_eq!(controller.state(), OperationState::Idle);
    assert!(surfaces.trigger_enabled);
    assert!(!surfaces.risk_dimmed);
}

#[test]
fn controller_transition_tests_risk_indicator_dims_only_while_busy() {
    let mut controller = PresentationController::new(HeadlessSurfaces::new());
    assert!(!controller.surfaces().risk_dimmed);

    assert!(controller.begin_submission());
    assert!(controller.surfaces().risk_dimmed);
    assert!(!controller.begin_submission());
    assert!(controller.surfaces().risk_dimmed);

    controller.complete(SubmissionOutcome::Failed("Server error: 502".to_string()));
    assert!(!controller.surfaces().risk_dimmed);
}

#[test]
fn controller_transition_tests_abandoned_submission_leaves_report_untouched() {
    let mut controller = PresentationController::new(HeadlessSurfaces::new());
    assert!(controller.begin_submission());
    controller.complete(SubmissionOutcome::Rendered(medium_record()));

    assert!(controller.begin_submission());
    controller.abandon_submission();

    let surfaces = controller.surfaces();
    assert_eq!(controller.state(), OperationState::Idle);
    assert!(surfaces.trigger_enabled);
    assert!(!surfaces.risk_dimmed);
    assert_eq!(surfaces.status_kind, StatusKind::Warning);
    assert_eq!(surfaces.status_text, "Document analyzed - Potential concerns found");
    assert_eq!(controller.record(), &medium_record());
}

#[test]
fn controller_transition_tests_missing_input_does_not_enter_busy() {
    let mut controller = PresentationController::new(HeadlessSurfaces::new());
    controller.reject_missing_input();

    assert_eq!(controller.state(), OperationState::Idle);
    assert_eq!(controller.surfaces().status_kind, StatusKind::Error);
    assert_eq!(
        controller.surfaces().status_text,
        "Please provide content to analyze"
    );
    assert!(controller.surfaces().trigger_enabled);
}
