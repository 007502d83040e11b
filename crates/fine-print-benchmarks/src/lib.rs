#![warn(missing_docs)]
//! # fine-print-benchmarks
//!
//! Canned service bodies shared by the smoke benchmarks.

/// Critical scam warning as returned by the analysis service.
pub const SCAM_BODY: &str = r#"{
    "analysis_mode": "SCAM_WARNING",
    "risk_level": "CRITICAL",
    "risk_score": 97,
    "immediate_assessment": "Impersonation of a delivery company.",
    "immediate_actions": ["Do not pay the fee", "Delete the message"]
}"#;

/// Document explanation with one concern.
pub const DOCUMENT_BODY: &str = r#"{
    "analysis_mode": "DOCUMENT_EXPLANATION",
    "summary": "Standard phone contract.",
    "potential_concerns": ["Early termination fee"],
    "next_recommended_steps": ["Compare the fee with other providers"]
}"#;
