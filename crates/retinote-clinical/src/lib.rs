// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// retinote-clinical — Severity resolution and narrative generation.
//
// Provides the stage ontology (ordered severity scales per exam family),
// bilateral worst-eye resolution, the static narrative tables, the exam-type
// session state machine, and the comprehensive-exam risk strategy.

pub mod narrative;
pub mod risk;
pub mod session;
pub mod severity;
pub mod staging;

pub use narrative::{ClinicalCatalog, Interpretation, NarrativeRecord, NarrativeTable, interpret};
pub use risk::{RiskClassifier, RiskLevel, ScreeningRiskClassifier};
pub use session::{ExamSession, SessionState};
pub use severity::{ResolvedSeverity, resolve, resolve_finding};
pub use staging::{ExamFamily, StageScale};
