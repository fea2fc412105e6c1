// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Exam-type session — the four-state selector that controls which report
// form/preview is active.
//
// Legal transitions: `Unselected -> type` via `select`, `any -> Unselected`
// via `back`. Switching directly between types is rejected; the UI only ever
// offers back-then-reselect.

use serde::{Deserialize, Serialize};
use tracing::debug;

use retinote_core::error::{Result, RetinoteError};
use retinote_core::types::ExamType;

/// Which form the session is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Unselected,
    Diabetic,
    Hypertension,
    Comprehensive,
}

impl From<ExamType> for SessionState {
    fn from(exam: ExamType) -> Self {
        match exam {
            ExamType::Diabetic => Self::Diabetic,
            ExamType::Hypertension => Self::Hypertension,
            ExamType::Comprehensive => Self::Comprehensive,
        }
    }
}

/// Long-lived per-page exam-type selector.
///
/// Single writer by construction — one session per page view, mutated only
/// by direct user action. No terminal state; it cycles for the life of the
/// page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamSession {
    state: SessionState,
}

impl ExamSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Unselected,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The active exam type, if one is selected.
    pub fn active_exam(&self) -> Option<ExamType> {
        match self.state {
            SessionState::Unselected => None,
            SessionState::Diabetic => Some(ExamType::Diabetic),
            SessionState::Hypertension => Some(ExamType::Hypertension),
            SessionState::Comprehensive => Some(ExamType::Comprehensive),
        }
    }

    /// Open the form for an exam type. Only legal from `Unselected`.
    pub fn select(&mut self, exam: ExamType) -> Result<()> {
        if let Some(current) = self.active_exam() {
            return Err(RetinoteError::SessionAlreadySelected {
                current: current.to_string(),
            });
        }
        self.state = exam.into();
        debug!(exam = %exam, "exam type selected");
        Ok(())
    }

    /// Return to the selector. Idempotent from `Unselected`.
    pub fn back(&mut self) {
        if self.state != SessionState::Unselected {
            debug!(state = ?self.state, "returning to exam-type selector");
        }
        self.state = SessionState::Unselected;
    }
}

impl Default for ExamSession {
    fn default() -> Self {
        Self::new()
    }
}
