//! Structural checks on a target against its chip set.

use std::collections::HashSet;
use std::fmt;

use crate::chip::{ChipSet, Target};

/// How serious a validation issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A validation issue found in a target definition.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
}

impl ValidationIssue {
    fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

/// Validate that `target` can be generated against `chips`.
///
/// Returns `Ok(())` if there is nothing to report, or `Err(issues)` with every
/// problem found. Callers decide whether warnings alone are fatal.
pub fn validate_target(chips: &ChipSet, target: &Target) -> Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    if chips.is_empty() {
        issues.push(ValidationIssue::error("chip set is empty"));
    } else if !chips.contains(&target.chip) {
        issues.push(ValidationIssue::error(format!(
            "chip '{}' is not in the known chip set",
            target.chip
        )));
    }

    if target.chip.trim().is_empty() {
        issues.push(ValidationIssue::error("chip identifier is empty"));
    }

    if target.board.trim().is_empty() {
        issues.push(ValidationIssue::warning("board identifier is empty"));
    }

    let mut seen = HashSet::new();
    for chip in chips.iter() {
        if !seen.insert(chip) {
            issues.push(ValidationIssue::warning(format!(
                "chip '{chip}' is listed more than once"
            )));
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}
