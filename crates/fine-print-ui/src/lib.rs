#![warn(missing_docs)]
//! # fine-print-ui
//!
//! ## Purpose
//! Defines the UI-facing presentation state and the controller that applies it.
//!
//! ## Responsibilities
//! - Hold the retained [`PresentationRecord`] and the idle/busy gate.
//! - Apply normalized records or failure messages to the UI surfaces.
//! - Provide render-time substitutions for empty summaries and action lists.
//!
//! ## Data flow
//! Submit trigger -> [`PresentationController::begin_submission`] ->
//! orchestration -> [`PresentationController::complete`] -> [`UiSurfaces`].
//!
//! ## Ownership and lifetimes
//! The controller owns its surfaces and the retained record. Surfaces are
//! handed to it once at construction instead of being looked up globally.
//!
//! ## Error model
//! This crate favors explicit state over recoverable errors. Failures arrive
//! as display-ready messages; a second submission while busy is refused by
//! [`PresentationController::begin_submission`].
//!
//! ## Security and privacy notes
//! UI state holds only analysis output, never the submitted content.

use fine_print_analysis_contract::{PresentationRecord, RiskLevel, StatusKind};

/// Status shown before anything has been submitted.
pub const READY_STATUS_TEXT: &str = "Ready to analyze your content";
/// Status shown while a submission is in flight.
pub const LOADING_STATUS_TEXT: &str = "Analyzing your content...";
/// Status shown when a submission carries no content.
pub const MISSING_INPUT_TEXT: &str = "Please provide content to analyze";
/// Summary placeholder before the first analysis.
pub const PLACEHOLDER_SUMMARY: &str =
    "Analysis results will appear here after you submit content for review.";
/// Summary shown when an analysis has none.
pub const NO_SUMMARY_TEXT: &str = "No summary available.";
/// Single step shown when an analysis has no actions.
pub const NO_ACTIONS_TEXT: &str = "No specific actions required";
/// Risk score shown before the first analysis.
pub const DEFAULT_RISK_SCORE: f64 = 20.0;

const DEFAULT_ACTIONS: [&str; 3] = [
    "Submit content using the input panel",
    "Review the analysis results",
    "Follow recommended actions",
];

/// Returns the fixed record shown before any submission.
pub fn default_record() -> PresentationRecord {
    PresentationRecord {
        status_kind: StatusKind::Ready,
        status_text: READY_STATUS_TEXT.to_string(),
        risk_label: RiskLevel::Low,
        risk_score: DEFAULT_RISK_SCORE,
        summary: PLACEHOLDER_SUMMARY.to_string(),
        actions: DEFAULT_ACTIONS.iter().map(|action| action.to_string()).collect(),
    }
}

/// One numbered entry of the rendered action list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionStep {
    /// 1-based position.
    pub number: usize,
    /// Step text.
    pub text: String,
}

/// Numbers actions from 1, substituting a single placeholder step when empty.
pub fn render_actions(actions: &[String]) -> Vec<ActionStep> {
    if actions.is_empty() {
        return vec![ActionStep {
            number: 1,
            text: NO_ACTIONS_TEXT.to_string(),
        }];
    }

    actions
        .iter()
        .enumerate()
        .map(|(index, action)| ActionStep {
            number: index + 1,
            text: action.clone(),
        })
        .collect()
}

/// Returns the summary, or a placeholder when it is empty.
pub fn render_summary(summary: &str) -> &str {
    if summary.is_empty() {
        NO_SUMMARY_TEXT
    } else {
        summary
    }
}

/// Idle/busy gate for the submit trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationState {
    /// Trigger accepts submissions.
    Idle,
    /// A submission is in flight.
    Busy,
}

/// Result of one submission as seen by the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// Analysis succeeded and normalized into a record.
    Rendered(PresentationRecord),
    /// Submission failed with a display-ready message.
    Failed(String),
}

/// Handles to the UI elements the controller writes to.
pub trait UiSurfaces {
    /// Updates the status banner.
    fn show_status(&mut self, kind: StatusKind, text: &str);
    /// Updates the risk bar and its label.
    fn show_risk(&mut self, level: RiskLevel, score: f64);
    /// Updates the summary paragraph.
    fn show_summary(&mut self, text: &str);
    /// Replaces the action list.
    fn show_actions(&mut self, steps: &[ActionStep]);
    /// Enables or disables the submit trigger.
    fn set_trigger_enabled(&mut self, enabled: bool);
    /// Dims the risk indicator while a submission is in flight.
    fn set_risk_dimmed(&mut self, dimmed: bool);
}

/// Applies presentation state to UI surfaces and owns the submission gate.
#[derive(Debug)]
pub struct PresentationController<S> {
    surfaces: S,
    record: PresentationRecord,
    state: OperationState,
    status_before_submission: Option<(StatusKind, String)>,
}

impl<S: UiSurfaces> PresentationController<S> {
    /// Creates the controller and paints the default record.
    pub fn new(surfaces: S) -> Self {
        let mut controller = Self {
            surfaces,
            record: default_record(),
            state: OperationState::Idle,
            status_before_submission: None,
        };
        let initial = controller.record.clone();
        controller.apply_record(initial);
        controller.surfaces.set_trigger_enabled(true);
        controller
    }

    /// Returns the current gate state.
    pub fn state(&self) -> OperationState {
        self.state
    }

    /// Returns the retained presentation record.
    pub fn record(&self) -> &PresentationRecord {
        &self.record
    }

    /// Returns the surfaces.
    pub fn surfaces(&self) -> &S {
        &self.surfaces
    }

    /// Consumes the controller, returning its surfaces.
    pub fn into_surfaces(self) -> S {
        self.surfaces
    }

    /// Shows the missing-content error without touching the gate.
    pub fn reject_missing_input(&mut self) {
        self.set_status(StatusKind::Error, MISSING_INPUT_TEXT);
    }

    /// Moves `idle -> busy`, disabling the trigger, dimming the risk
    /// indicator, and showing the loading banner.
    ///
    /// Returns `false` and changes nothing when a submission is already in
    /// flight.
    pub fn begin_submission(&mut self) -> bool {
        if self.state == OperationState::Busy {
            return false;
        }

        self.state = OperationState::Busy;
        self.status_before_submission =
            Some((self.record.status_kind, self.record.status_text.clone()));
        self.surfaces.set_trigger_enabled(false);
        self.surfaces.set_risk_dimmed(true);
        self.set_status(StatusKind::Loading, LOADING_STATUS_TEXT);
        true
    }

    /// Moves `busy -> idle` without an outcome, restoring the banner shown
    /// before [`PresentationController::begin_submission`].
    ///
    /// Used when the submission was refused before reaching the service.
    pub fn abandon_submission(&mut self) {
        if let Some((kind, text)) = self.status_before_submission.take() {
            self.set_status(kind, &text);
        }
        self.return_to_idle();
    }

    /// Applies the outcome and moves back to `idle`.
    ///
    /// On failure only the status banner changes; risk, summary, and actions
    /// keep their previous values.
    pub fn complete(&mut self, outcome: SubmissionOutcome) {
        match outcome {
            SubmissionOutcome::Rendered(record) => self.apply_record(record),
            SubmissionOutcome::Failed(message) => self.set_status(StatusKind::Error, &message),
        }

        self.status_before_submission = None;
        self.return_to_idle();
    }

    fn return_to_idle(&mut self) {
        self.state = OperationState::Idle;
        self.surfaces.set_risk_dimmed(false);
        self.surfaces.set_trigger_enabled(true);
    }

    fn apply_record(&mut self, record: PresentationRecord) {
        self.surfaces.show_status(record.status_kind, &record.status_text);
        self.surfaces.show_risk(record.risk_label, record.risk_score);
        self.surfaces.show_summary(render_summary(&record.summary));
        self.surfaces.show_actions(&render_actions(&record.actions));
        self.record = record;
    }

    fn set_status(&mut self, kind: StatusKind, text: &str) {
        self.surfaces.show_status(kind, text);
        self.record.status_kind = kind;
        self.record.status_text = text.to_string();
    }
}

/// Surfaces that keep the latest value of every element in memory.
///
/// Used for machine-readable output and by tests.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessSurfaces {
    /// Banner severity.
    pub status_kind: StatusKind,
    /// Banner text.
    pub status_text: String,
    /// Displayed risk level.
    pub risk_level: RiskLevel,
    /// Displayed risk score.
    pub risk_score: f64,
    /// Displayed summary.
    pub summary: String,
    /// Displayed action steps.
    pub steps: Vec<ActionStep>,
    /// Whether the trigger accepts input.
    pub trigger_enabled: bool,
    /// Whether the risk indicator is dimmed.
    pub risk_dimmed: bool,
    /// Every banner shown, in order.
    pub status_history: Vec<(StatusKind, String)>,
}

impl HeadlessSurfaces {
    /// Creates blank surfaces.
    pub fn new() -> Self {
        Self {
            status_kind: StatusKind::Ready,
            status_text: String::new(),
            risk_level: RiskLevel::Low,
            risk_score: 0.0,
            summary: String::new(),
            steps: Vec::new(),
            trigger_enabled: false,
            risk_dimmed: false,
            status_history: Vec::new(),
        }
    }
}

impl Default for HeadlessSurfaces {
    fn default() -> Self {
        Self::new()
    }
}

impl UiSurfaces for HeadlessSurfaces {
    fn show_status(&mut self, kind: StatusKind, text: &str) {
        self.status_kind = kind;
        self.status_text = text.to_string();
        self.status_history.push((kind, text.to_string()));
    }

    fn show_risk(&mut self, level: RiskLevel, score: f64) {
        self.risk_level = level;
        self.risk_score = score;
    }

    fn show_summary(&mut self, text: &str) {
        self.summary = text.to_string();
    }

    fn show_actions(&mut self, steps: &[ActionStep]) {
        self.steps = steps.to_vec();
    }

    fn set_trigger_enabled(&mut self, enabled: bool) {
        self.trigger_enabled = enabled;
    }

    fn set_risk_dimmed(&mut self, dimmed: bool) {
        self.risk_dimmed = dimmed;
    }
}
