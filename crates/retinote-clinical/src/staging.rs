// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stage ontology — ordered severity scales for each exam family.
//
// A scale is an ordered list of stage names. The ordinal of a stage is its
// position in the list; position 0 is always the normal/no-finding stage.
// Lookups return `Option<usize>` rather than a sentinel integer so an
// unknown label can never leak into severity arithmetic.

use serde::{Deserialize, Serialize};

use retinote_core::error::{Result, RetinoteError};

/// Disease family a stage scale belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExamFamily {
    Diabetic,
    Hypertensive,
}

impl std::fmt::Display for ExamFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Diabetic => "diabetic",
            Self::Hypertensive => "hypertensive",
        };
        write!(f, "{name}")
    }
}

/// Ordered severity scale for one disease family.
///
/// Invariants, enforced at construction: at least one stage, all names
/// unique. Ordinal 0 is the normal stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageScale {
    family: ExamFamily,
    stages: Vec<String>,
}

impl StageScale {
    /// Build a scale from an ordered list of stage names.
    ///
    /// Fails fast on an empty list or duplicate names — a malformed scale is
    /// a configuration defect, not a runtime input.
    pub fn new<I, S>(family: ExamFamily, stages: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let stages: Vec<String> = stages.into_iter().map(Into::into).collect();

        if stages.is_empty() {
            return Err(RetinoteError::InvalidStageScale {
                family: family.to_string(),
                reason: "scale has no stages".into(),
            });
        }

        for (i, name) in stages.iter().enumerate() {
            if stages[..i].contains(name) {
                return Err(RetinoteError::InvalidStageScale {
                    family: family.to_string(),
                    reason: format!("duplicate stage name '{name}'"),
                });
            }
        }

        Ok(Self { family, stages })
    }

    /// The diabetic retinopathy scale used on Korean screening reports
    /// (international clinical classification).
    pub fn diabetic() -> Self {
        Self {
            family: ExamFamily::Diabetic,
            stages: vec![
                "정상".into(),
                "경증 비증식 당뇨망막병증".into(),
                "중등도 비증식 당뇨망막병증".into(),
                "중증 비증식 당뇨망막병증".into(),
                "증식 당뇨망막병증".into(),
            ],
        }
    }

    /// The hypertensive retinopathy scale (Keith-Wagener-Barker grades).
    pub fn hypertensive() -> Self {
        Self {
            family: ExamFamily::Hypertensive,
            stages: vec![
                "정상".into(),
                "1기 고혈압망막병증".into(),
                "2기 고혈압망막병증".into(),
                "3기 고혈압망막병증".into(),
                "4기 고혈압망막병증".into(),
            ],
        }
    }

    pub fn family(&self) -> ExamFamily {
        self.family
    }

    /// Position of a stage label in the scale, or `None` if the label is not
    /// part of this scale.
    pub fn ordinal(&self, label: &str) -> Option<usize> {
        self.stages.iter().position(|s| s == label)
    }

    /// Stage name at a given ordinal.
    pub fn stage_at(&self, ordinal: usize) -> Option<&str> {
        self.stages.get(ordinal).map(String::as_str)
    }

    /// The normal/no-finding stage (ordinal 0).
    pub fn baseline(&self) -> &str {
        // Non-empty is a construction invariant.
        &self.stages[0]
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Iterate stage names in severity order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.stages.iter().map(String::as_str)
    }
}
