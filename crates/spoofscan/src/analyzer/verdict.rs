use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::AnalyzerError;

/// A prose claim that contradicts structured data in the same document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub text_claim: String,
    pub structural_reference: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub is_safe: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<Issue>,
}

impl Verdict {
    pub fn safe(summary: impl Into<String>) -> Self {
        Self {
            is_safe: true,
            summary: Some(summary.into()),
            issues: Vec::new(),
        }
    }

    /// An unsafe verdict with no localized mismatch; the summary says why.
    pub fn unsafe_without_issues(summary: impl Into<String>) -> Self {
        Self {
            is_safe: false,
            summary: Some(summary.into()),
            issues: Vec::new(),
        }
    }

    pub fn with_issues(issues: Vec<Issue>) -> Self {
        Self {
            is_safe: false,
            summary: None,
            issues,
        }
    }
}

/// Wire shape of the analyzer's answer. `issues` may be `null` or absent.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawVerdict {
    is_safe: bool,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    issues: Option<Vec<Issue>>,
}

/// Decodes the analyzer's JSON text into a [`Verdict`], failing closed on any
/// structural mismatch.
pub fn parse_verdict(json_text: &str) -> Result<Verdict, AnalyzerError> {
    let value: Value = serde_json::from_str(json_text.trim()).map_err(|e| {
        AnalyzerError::invalid_response(format!("response is not valid JSON: {}", e))
    })?;

    match value.get("isSafe") {
        Some(Value::Bool(_)) => {}
        Some(_) => {
            return Err(AnalyzerError::invalid_response(
                "isSafe is not a boolean".to_string(),
            ))
        }
        None => {
            return Err(AnalyzerError::invalid_response(
                "isSafe is missing".to_string(),
            ))
        }
    }

    let raw: RawVerdict = serde_json::from_value(value)
        .map_err(|e| AnalyzerError::invalid_response(e.to_string()))?;

    let issues = raw.issues.unwrap_or_default();
    if raw.is_safe && !issues.is_empty() {
        return Err(AnalyzerError::invalid_response(format!(
            "document marked safe but {} issue(s) reported",
            issues.len()
        )));
    }

    let has_summary = raw.summary.as_deref().is_some_and(|s| !s.trim().is_empty());
    if !raw.is_safe && issues.is_empty() && !has_summary {
        return Err(AnalyzerError::invalid_response(
            "document marked unsafe without issues or summary",
        ));
    }

    Ok(Verdict {
        is_safe: raw.is_safe,
        summary: raw.summary,
        issues,
    })
}
