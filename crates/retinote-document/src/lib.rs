// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// retinote-document — Fixed-page layout and document output for Retinote.
//
// Provides the pagination engine (single-per-page and N-up grid placement),
// the print-visibility rule emitter, and PDF export of finalized plans.

pub mod layout;
pub mod pdf;
pub mod visibility;

// Re-export the primary structs so callers can use `retinote_document::LayoutEngine` etc.
pub use layout::{LayoutEngine, LayoutMode, LayoutPlan, Page, Placement, Rect};
pub use pdf::PdfExporter;
pub use visibility::{PrintRuleSet, PrintVisibility, TaggedRegion};
