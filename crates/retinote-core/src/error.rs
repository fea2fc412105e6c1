// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Retinote.
//
// Unknown stage labels are deliberately NOT represented here: they are a
// recoverable input-shape issue handled by the severity resolver's fallback
// rule and logged as a data-quality warning, never propagated as an error.

use thiserror::Error;

/// Top-level error type for all Retinote operations.
#[derive(Debug, Error)]
pub enum RetinoteError {
    // -- Clinical configuration errors --
    #[error("narrative table for {family} has no entry for stage '{stage}'")]
    MissingNarrativeEntry { family: String, stage: String },

    #[error("invalid stage scale for {family}: {reason}")]
    InvalidStageScale { family: String, reason: String },

    // -- Session errors --
    #[error("cannot select an exam type while '{current}' is active")]
    SessionAlreadySelected { current: String },

    // -- Layout errors --
    #[error("grid layout needs at least one cell, got {rows}x{cols}")]
    InvalidLayoutConfiguration { rows: u32, cols: u32 },

    // -- Export errors --
    #[error("no image source registered for document item {0}")]
    MissingItemSource(uuid::Uuid),

    #[error("PDF generation failed: {0}")]
    PdfError(String),

    #[error("image processing failed: {0}")]
    ImageError(String),

    // -- Handoff / persistence glue --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, RetinoteError>;
