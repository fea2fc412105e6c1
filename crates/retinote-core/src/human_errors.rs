// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Clinician-readable error messages for the form layer.
//
// Every technical error maps to a plain-language summary and a suggestion.
// The severity only drives presentation (banner colour, blocking vs. toast);
// propagation policy is decided where the error is raised, not here.

use crate::error::RetinoteError;

/// Severity of an error from the clinic staff's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Input data needs attention but the system recovered.
    DataQuality,
    /// The installed clinical tables are inconsistent — stop and fix.
    Configuration,
    /// A document export failed; the report itself is intact.
    Export,
}

/// A plain-language error with an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// One-line summary (shown as a heading).
    pub message: String,
    /// What the clinician or administrator should do (shown as body text).
    pub suggestion: String,
    /// Severity level (drives banner style in the form layer).
    pub severity: Severity,
}

/// Convert a `RetinoteError` into something the front desk can act on.
pub fn humanize_error(err: &RetinoteError) -> HumanError {
    match err {
        RetinoteError::MissingNarrativeEntry { family, stage } => HumanError {
            message: "The report text tables are out of date.".into(),
            suggestion: format!(
                "The {family} narrative table has no entry for stage '{stage}'. \
                 Contact your administrator — reports for this family cannot be \
                 generated until the tables are updated."
            ),
            severity: Severity::Configuration,
        },

        RetinoteError::InvalidStageScale { family, reason } => HumanError {
            message: "The installed stage scale is invalid.".into(),
            suggestion: format!(
                "The {family} stage scale failed validation ({reason}). \
                 Contact your administrator."
            ),
            severity: Severity::Configuration,
        },

        RetinoteError::SessionAlreadySelected { current } => HumanError {
            message: "Another exam form is still open.".into(),
            suggestion: format!(
                "Close the {current} form with the back button before opening \
                 a different exam type."
            ),
            severity: Severity::DataQuality,
        },

        RetinoteError::InvalidLayoutConfiguration { rows, cols } => HumanError {
            message: "The page grid settings are invalid.".into(),
            suggestion: format!(
                "A {rows}x{cols} grid has no cells. Set rows and columns to at \
                 least 1 in the document settings."
            ),
            severity: Severity::Configuration,
        },

        RetinoteError::MissingItemSource(id) => HumanError {
            message: "An image in this document could not be found.".into(),
            suggestion: format!(
                "Item {id} has no image data. Re-add the missing image and \
                 export again."
            ),
            severity: Severity::Export,
        },

        RetinoteError::PdfError(detail) => HumanError {
            message: "The PDF could not be created.".into(),
            suggestion: format!("Try exporting again. ({detail})"),
            severity: Severity::Export,
        },

        RetinoteError::ImageError(detail) => HumanError {
            message: "An image could not be read.".into(),
            suggestion: format!(
                "The file may be corrupted or in an unsupported format. \
                 Re-save it as PNG or JPEG and try again. ({detail})"
            ),
            severity: Severity::Export,
        },

        RetinoteError::Io(detail) => HumanError {
            message: "A file could not be read or written.".into(),
            suggestion: format!("Check disk space and permissions. ({detail})"),
            severity: Severity::Export,
        },

        RetinoteError::Serialization(detail) => HumanError {
            message: "Report data could not be packaged for saving.".into(),
            suggestion: format!("Try again; if it persists, contact support. ({detail})"),
            severity: Severity::Export,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_faults_are_marked_configuration() {
        let err = RetinoteError::MissingNarrativeEntry {
            family: "diabetic".into(),
            stage: "정상".into(),
        };
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::Configuration);
        assert!(human.suggestion.contains("정상"));
    }

    #[test]
    fn export_faults_are_marked_export() {
        let err = RetinoteError::PdfError("page 3".into());
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::Export);
        assert!(human.suggestion.contains("page 3"));
    }

    #[test]
    fn invalid_grid_names_both_dimensions() {
        let err = RetinoteError::InvalidLayoutConfiguration { rows: 0, cols: 3 };
        let human = humanize_error(&err);
        assert!(human.suggestion.contains("0x3"));
    }
}
