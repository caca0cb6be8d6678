//! Output rendering for assessments and artifact checks.

use heartcare_core::{Assessment, ModelArtifacts, RiskLabel};
use serde_json::json;
use std::fmt::Write;

/// Headline and advice, with a note on any dropped features.
pub fn text(assessment: &Assessment) -> String {
    let marker = match assessment.label {
        RiskLabel::High => "⚠️ ",
        RiskLabel::Low => "✅ ",
    };
    let mut out = format!(
        "{marker}{}\n{}",
        assessment.label.headline(),
        assessment.label.advice()
    );
    if !assessment.dropped_features.is_empty() {
        let _ = write!(
            out,
            "\n\nNote: inputs not recognized by the model were ignored: {}",
            assessment.dropped_features.join(", ")
        );
    }
    out
}

pub fn json(assessment: &Assessment) -> serde_json::Value {
    json!({
        "label": assessment.label,
        "headline": assessment.label.headline(),
        "dropped_features": assessment.dropped_features,
    })
}

/// Summary printed by `heartcare check`.
pub fn check_report(artifacts: &ModelArtifacts) -> String {
    let coverage = artifacts.coverage();
    let mut out = String::new();
    let _ = writeln!(out, "Schema columns: {}", artifacts.schema().len());
    let _ = writeln!(out, "Scaler:         {}", artifacts.scaler().kind());
    let _ = writeln!(out, "Classifier:     {}", artifacts.classifier().kind());

    if coverage.is_complete() {
        out.push_str("Feature catalog: complete");
        return out;
    }
    out.push_str("Feature catalog: incomplete");
    if !coverage.missing_from_schema.is_empty() {
        let _ = write!(
            out,
            "\n  missing from schema (input dropped): {}",
            coverage.missing_from_schema.join(", ")
        );
    }
    if !coverage.unknown_to_catalog.is_empty() {
        let _ = write!(
            out,
            "\n  never produced by encoder (always 0): {}",
            coverage.unknown_to_catalog.join(", ")
        );
    }
    out
}
