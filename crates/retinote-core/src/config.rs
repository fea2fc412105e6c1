// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use serde::{Deserialize, Serialize};

use crate::types::{Margins, PageSize};

/// Persistent application settings.
///
/// Owned and persisted by the host shell; the engine only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Page size assumed by layout and by the print rule set.
    pub default_page_size: PageSize,
    /// Page margins for layout and `@page` rules.
    pub margins: Margins,
    /// Default grid shape for patient-education image documents.
    pub default_grid_rows: u32,
    pub default_grid_cols: u32,
    /// Show the follow-up interval reminder banner on report previews.
    pub show_followup_reminder: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_page_size: PageSize::A4,
            margins: Margins::default(),
            default_grid_rows: 2,
            default_grid_cols: 2,
            show_followup_reminder: true,
        }
    }
}
