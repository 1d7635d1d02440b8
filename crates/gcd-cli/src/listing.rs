//! Client for the `gcd modules` process boundary.
//!
//! Runs a listing command and parses its stdout. Failure is all or
//! nothing: a non-zero exit, empty output, or output that is not a JSON
//! array of module records yields [`ListingError::Unavailable`] and never
//! partial data.

use std::process::Command;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// The module listing could not be obtained.
#[derive(Error, Debug)]
pub enum ListingError {
    #[error("module listing unavailable: {reason}")]
    Unavailable { reason: String },
}

impl ListingError {
    fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }
}

/// One record of the listing, as emitted by `gcd modules`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSummary {
    pub id: String,
    pub path: String,
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub validated_schema: Option<Value>,
    #[serde(default)]
    pub validation_errors: Vec<Value>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Run `command` and parse its stdout as a module listing.
pub fn fetch_module_listing(command: &mut Command) -> Result<Vec<ModuleSummary>, ListingError> {
    let output = command
        .output()
        .map_err(|e| ListingError::unavailable(format!("failed to start listing process: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        let mut reason = format!("listing process failed: {}", output.status);
        if !stderr.is_empty() {
            reason.push_str(&format!(" | stderr: {stderr}"));
        }
        return Err(ListingError::unavailable(reason));
    }

    parse_module_listing(&String::from_utf8_lossy(&output.stdout))
}

/// Parse listing text. Exposed for callers that obtain the text another way.
pub fn parse_module_listing(stdout: &str) -> Result<Vec<ModuleSummary>, ListingError> {
    let text = stdout.trim();
    if text.is_empty() {
        return Err(ListingError::unavailable(
            "listing process produced empty output; expected JSON",
        ));
    }

    let value: Value = serde_json::from_str(text)
        .map_err(|e| ListingError::unavailable(format!("failed to parse listing JSON: {e}")))?;
    if !value.is_array() {
        return Err(ListingError::unavailable("listing output is not a JSON array"));
    }

    serde_json::from_value(value)
        .map_err(|e| ListingError::unavailable(format!("malformed module record: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_records() {
        let listing = parse_module_listing(
            r#"[
                {"id": "mockmod", "path": "/m/mockmod", "status": "valid", "version": "1.0.0",
                 "rawSchema": {}, "validatedSchema": {"fields": []}, "validationErrors": [], "warnings": []},
                {"id": "docs", "path": "/m/docs", "status": "missing-schema", "version": null,
                 "rawSchema": null, "validatedSchema": null, "validationErrors": [],
                 "warnings": ["schema.json not found in module: docs"]}
            ]"#,
        )
        .unwrap();
        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].version.as_deref(), Some("1.0.0"));
        assert_eq!(listing[1].status, "missing-schema");
        assert!(listing[1].validated_schema.is_none());
    }

    #[test]
    fn empty_array_is_fine() {
        assert!(parse_module_listing("[]\n").unwrap().is_empty());
    }

    #[test]
    fn rejects_empty_output() {
        assert!(matches!(
            parse_module_listing("  \n"),
            Err(ListingError::Unavailable { .. })
        ));
    }

    #[test]
    fn rejects_non_array() {
        let err = parse_module_listing(r#"{"modules": []}"#).unwrap_err();
        assert!(err.to_string().contains("not a JSON array"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_module_listing("Loading modules...").is_err());
    }

    #[test]
    fn rejects_partially_malformed_records() {
        let err = parse_module_listing(r#"[{"id": "ok", "path": "/x", "status": "valid"}, {"id": 5}]"#)
            .unwrap_err();
        assert!(err.to_string().contains("malformed module record"));
    }

    #[test]
    fn missing_program_is_unavailable() {
        let err = fetch_module_listing(&mut Command::new("/nonexistent/gcd-listing")).unwrap_err();
        assert!(err.to_string().contains("failed to start listing process"));
    }
}
