// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bilateral severity resolution — pick the clinically worse of two staged
// eyes.
//
// Fallback rule for labels that are not in the scale: an unknown label ranks
// strictly below every defined stage, so the other eye's valid stage wins.
// If both labels are unknown the result is the scale's baseline (ordinal 0)
// stage. Every unknown label is logged as a data-quality warning; resolution
// itself never fails.

use serde::{Deserialize, Serialize};
use tracing::warn;

use retinote_core::types::BilateralFinding;

use crate::staging::StageScale;

/// The worst-case severity across both eyes. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSeverity {
    pub stage: String,
    pub ordinal: usize,
}

/// Rank of one eye's label within a scale.
///
/// Ordering is derived: `Unknown` is less than any `Known`, and `Known`
/// ranks by ordinal. This keeps the fallback rule in the type system rather
/// than in sentinel arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Rank {
    Unknown,
    Known(usize),
}

fn rank(scale: &StageScale, label: &str) -> Rank {
    match scale.ordinal(label) {
        Some(ordinal) => Rank::Known(ordinal),
        None => {
            warn!(
                family = %scale.family(),
                label,
                "stage label not in scale — treating as below every defined stage"
            );
            Rank::Unknown
        }
    }
}

/// Resolve the clinically worse of two per-eye stage labels.
pub fn resolve(scale: &StageScale, od_stage: &str, os_stage: &str) -> ResolvedSeverity {
    let worst = rank(scale, od_stage).max(rank(scale, os_stage));

    let ordinal = match worst {
        Rank::Known(ordinal) => ordinal,
        // Both labels unknown — fall back to the baseline stage.
        Rank::Unknown => 0,
    };

    ResolvedSeverity {
        // Ordinal came from the scale (or is 0, and scales are non-empty),
        // so the stage name is always present.
        stage: scale
            .stage_at(ordinal)
            .unwrap_or(scale.baseline())
            .to_string(),
        ordinal,
    }
}

/// Resolve from a bilateral finding, taking each eye's stage label.
pub fn resolve_finding(scale: &StageScale, finding: &BilateralFinding) -> ResolvedSeverity {
    resolve(scale, &finding.od.stage, &finding.os.stage)
}
