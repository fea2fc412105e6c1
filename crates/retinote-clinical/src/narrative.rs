// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Narrative generation — fixed per-stage records of patient-facing text and
// follow-up guidance.
//
// Tables are immutable configuration: built once, validated against their
// stage scale, then only read. A stage without a table entry is a
// configuration-integrity fault and fails fast — it is never papered over
// with a default.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use retinote_core::error::{Result, RetinoteError};
use retinote_core::types::BilateralFinding;

use crate::severity::{ResolvedSeverity, resolve_finding};
use crate::staging::{ExamFamily, StageScale};

/// Fixed narrative for one stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeRecord {
    /// Stage name this record belongs to.
    pub stage: String,
    /// One-paragraph summary printed in the result box.
    pub message: String,
    /// Recommended follow-up interval ("6개월", "담당의사 권고에 따라", …).
    pub follow_up: String,
    /// Blood-pressure goal, hypertensive family only.
    pub blood_pressure_target: Option<String>,
    /// Long-form prose for the comprehensive-interpretation section.
    pub plan: String,
}

/// Immutable per-stage narrative table for one exam family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeTable {
    family: ExamFamily,
    records: HashMap<String, NarrativeRecord>,
}

impl NarrativeTable {
    /// Build a table from a list of records. Coverage against a scale is
    /// checked separately with [`NarrativeTable::validate`].
    pub fn new(family: ExamFamily, records: impl IntoIterator<Item = NarrativeRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|r| (r.stage.clone(), r))
            .collect();
        Self { family, records }
    }

    pub fn family(&self) -> ExamFamily {
        self.family
    }

    /// Check that every stage of `scale` has a record.
    ///
    /// Run this at initialization: a gap means the static tables are out of
    /// sync with the stage scale and report generation must not start.
    pub fn validate(&self, scale: &StageScale) -> Result<()> {
        for stage in scale.iter() {
            if !self.records.contains_key(stage) {
                return Err(RetinoteError::MissingNarrativeEntry {
                    family: self.family.to_string(),
                    stage: stage.to_string(),
                });
            }
        }
        debug!(family = %self.family, stages = scale.len(), "narrative table validated");
        Ok(())
    }

    /// Narrative record for a resolved stage.
    ///
    /// On a validated table this cannot miss; a miss surfaces the same
    /// configuration fault as `validate` rather than a silent default.
    pub fn narrate(&self, stage: &str) -> Result<&NarrativeRecord> {
        self.records
            .get(stage)
            .ok_or_else(|| RetinoteError::MissingNarrativeEntry {
                family: self.family.to_string(),
                stage: stage.to_string(),
            })
    }

    /// Built-in Korean table for the diabetic retinopathy scale.
    pub fn diabetic() -> Self {
        let records = [
            NarrativeRecord {
                stage: "정상".into(),
                message: "이번 검진에서 당뇨망막병증 소견은 관찰되지 않았습니다.".into(),
                follow_up: "12개월".into(),
                blood_pressure_target: None,
                plan: "양안 안저검사에서 미세혈관류, 망막출혈 등 당뇨망막병증을 시사하는 \
                       소견은 관찰되지 않았습니다. 당뇨망막병증은 초기에 자각 증상이 없으므로 \
                       혈당 조절을 유지하시면서 12개월 간격의 정기 안저검사를 계속 받으시기 \
                       바랍니다."
                    .into(),
            },
            NarrativeRecord {
                stage: "경증 비증식 당뇨망막병증".into(),
                message: "경증 비증식 당뇨망막병증이 관찰됩니다.".into(),
                follow_up: "6개월".into(),
                blood_pressure_target: None,
                plan: "안저검사에서 소수의 미세혈관류가 관찰되는 경증 비증식 단계입니다. \
                       시력에 영향을 주는 단계는 아니며, 혈당과 혈압을 철저히 조절하면 \
                       진행을 늦출 수 있습니다. 6개월 후 안저검사를 다시 받으시기 바랍니다."
                    .into(),
            },
            NarrativeRecord {
                stage: "중등도 비증식 당뇨망막병증".into(),
                message: "중등도 비증식 당뇨망막병증이 관찰됩니다.".into(),
                follow_up: "3~4개월".into(),
                blood_pressure_target: None,
                plan: "미세혈관류와 함께 망막출혈, 경성삼출물이 관찰되는 중등도 비증식 \
                       단계입니다. 황반부종 동반 여부를 지켜보아야 하므로 3~4개월 간격으로 \
                       경과관찰이 필요합니다. 혈당, 혈압, 혈중 지질의 조절이 중요합니다."
                    .into(),
            },
            NarrativeRecord {
                stage: "중증 비증식 당뇨망막병증".into(),
                message: "중증 비증식 당뇨망막병증이 관찰됩니다.".into(),
                follow_up: "담당의사 권고에 따라".into(),
                blood_pressure_target: None,
                plan: "광범위한 망막출혈과 정맥염주 소견이 있어 증식 당뇨망막병증으로 \
                       진행할 위험이 높은 단계입니다. 레이저 광응고술 등 치료가 필요할 수 \
                       있으므로 담당의사 권고에 따라 경과관찰 및 치료 일정을 정하시기 \
                       바랍니다."
                    .into(),
            },
            NarrativeRecord {
                stage: "증식 당뇨망막병증".into(),
                message: "증식 당뇨망막병증이 관찰됩니다.".into(),
                follow_up: "담당의사 권고에 따라".into(),
                blood_pressure_target: None,
                plan: "망막 신생혈관이 관찰되는 증식 단계로, 유리체출혈이나 견인망막박리로 \
                       시력을 잃을 수 있는 상태입니다. 범망막광응고술 또는 유리체강내 주사 \
                       등 적극적인 치료가 필요하므로 지체 없이 망막 전문의 진료를 받으시기 \
                       바랍니다."
                    .into(),
            },
        ];
        Self::new(ExamFamily::Diabetic, records)
    }

    /// Built-in Korean table for the hypertensive retinopathy scale.
    pub fn hypertensive() -> Self {
        let records = [
            NarrativeRecord {
                stage: "정상".into(),
                message: "이번 검진에서 고혈압망막병증 소견은 관찰되지 않았습니다.".into(),
                follow_up: "12개월".into(),
                blood_pressure_target: Some("140/90".into()),
                plan: "안저검사에서 고혈압에 의한 망막혈관 변화는 관찰되지 않았습니다. \
                       혈압을 140/90 mmHg 미만으로 유지하시고 12개월 후 정기 안저검사를 \
                       받으시기 바랍니다."
                    .into(),
            },
            NarrativeRecord {
                stage: "1기 고혈압망막병증".into(),
                message: "1기 고혈압망막병증(경도의 세동맥 협착)이 관찰됩니다.".into(),
                follow_up: "6개월".into(),
                blood_pressure_target: Some("130/80".into()),
                plan: "망막 세동맥의 경미한 협착이 관찰되는 초기 단계입니다. 혈압을 \
                       130/80 mmHg 미만으로 조절하면 진행을 막을 수 있습니다. 6개월 후 \
                       안저검사를 다시 받으시기 바랍니다."
                    .into(),
            },
            NarrativeRecord {
                stage: "2기 고혈압망막병증".into(),
                message: "2기 고혈압망막병증(동정맥 교차 현상)이 관찰됩니다.".into(),
                follow_up: "3개월".into(),
                blood_pressure_target: Some("130/80".into()),
                plan: "세동맥 협착과 함께 동정맥 교차 현상이 관찰됩니다. 혈압 조절이 \
                       충분하지 않다는 신호일 수 있으므로 내과 주치의와 상의하여 혈압을 \
                       130/80 mmHg 미만으로 조절하시고 3개월 후 경과관찰이 필요합니다."
                    .into(),
            },
            NarrativeRecord {
                stage: "3기 고혈압망막병증".into(),
                message: "3기 고혈압망막병증(망막출혈 및 면화반)이 관찰됩니다.".into(),
                follow_up: "1~2개월".into(),
                blood_pressure_target: Some("120/70".into()),
                plan: "망막출혈, 면화반 등 혈압에 의한 망막 손상이 진행된 단계입니다. \
                       심혈관계 합병증 위험도 높아진 상태이므로 내과 진료를 병행하여 혈압을 \
                       120/70 mmHg 수준까지 조절하는 것이 권장되며, 1~2개월 간격의 \
                       경과관찰이 필요합니다."
                    .into(),
            },
            NarrativeRecord {
                stage: "4기 고혈압망막병증".into(),
                message: "4기 고혈압망막병증(유두부종)이 관찰됩니다.".into(),
                follow_up: "1개월 이내".into(),
                blood_pressure_target: Some("120/70".into()),
                plan: "시신경유두부종이 동반된 악성 고혈압 단계로, 응급에 준하는 혈압 \
                       조절이 필요합니다. 즉시 내과 진료를 받아 혈압을 120/70 mmHg \
                       수준으로 조절하시고, 1개월 이내에 안과 경과관찰을 받으시기 바랍니다."
                    .into(),
            },
        ];
        Self::new(ExamFamily::Hypertensive, records)
    }
}

/// Severity resolution plus narrative lookup in one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interpretation {
    pub severity: ResolvedSeverity,
    pub record: NarrativeRecord,
}

/// Resolve a bilateral finding against a scale and fetch its narrative.
pub fn interpret(
    scale: &StageScale,
    table: &NarrativeTable,
    finding: &BilateralFinding,
) -> Result<Interpretation> {
    let severity = resolve_finding(scale, finding);
    let record = table.narrate(&severity.stage)?.clone();
    Ok(Interpretation { severity, record })
}

/// The full clinical configuration: one (scale, table) pair per family.
///
/// Loaded once at process start and injected where needed — tests can swap
/// in their own catalog without touching global state.
#[derive(Debug, Clone)]
pub struct ClinicalCatalog {
    diabetic_scale: StageScale,
    diabetic_table: NarrativeTable,
    hypertensive_scale: StageScale,
    hypertensive_table: NarrativeTable,
}

impl ClinicalCatalog {
    /// Assemble a catalog, validating every table against its scale.
    pub fn new(
        diabetic_scale: StageScale,
        diabetic_table: NarrativeTable,
        hypertensive_scale: StageScale,
        hypertensive_table: NarrativeTable,
    ) -> Result<Self> {
        diabetic_table.validate(&diabetic_scale)?;
        hypertensive_table.validate(&hypertensive_scale)?;
        Ok(Self {
            diabetic_scale,
            diabetic_table,
            hypertensive_scale,
            hypertensive_table,
        })
    }

    /// The built-in Korean configuration.
    pub fn korean() -> Result<Self> {
        Self::new(
            StageScale::diabetic(),
            NarrativeTable::diabetic(),
            StageScale::hypertensive(),
            NarrativeTable::hypertensive(),
        )
    }

    pub fn scale(&self, family: ExamFamily) -> &StageScale {
        match family {
            ExamFamily::Diabetic => &self.diabetic_scale,
            ExamFamily::Hypertensive => &self.hypertensive_scale,
        }
    }

    pub fn table(&self, family: ExamFamily) -> &NarrativeTable {
        match family {
            ExamFamily::Diabetic => &self.diabetic_table,
            ExamFamily::Hypertensive => &self.hypertensive_table,
        }
    }

    /// Resolve and narrate a bilateral finding for one family.
    pub fn interpret(&self, family: ExamFamily, finding: &BilateralFinding) -> Result<Interpretation> {
        interpret(self.scale(family), self.table(family), finding)
    }
}
