// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Comprehensive-exam risk classification.
//
// The real clinical grading rule belongs to the clinic, not this crate, so
// classification is a swappable strategy. The shipped default is a
// screening-grade heuristic over the report's sections — transparent flags
// and published cutoffs only, no invented thresholds.

use serde::{Deserialize, Serialize};
use tracing::debug;

use retinote_core::types::ComprehensiveReport;

/// Overall risk level shown on the comprehensive report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Label printed on the report.
    pub fn report_label(&self) -> &'static str {
        match self {
            Self::Low => "낮음",
            Self::Moderate => "중간",
            Self::High => "높음",
        }
    }
}

/// Strategy seam for the comprehensive risk rule.
///
/// Hosts with a validated clinical algorithm implement this and inject it;
/// everything else in report generation is unaware of which rule runs.
pub trait RiskClassifier {
    fn classify(&self, report: &ComprehensiveReport) -> RiskLevel;
}

/// Default screening heuristic: count abnormal sections, map the count to a
/// level.
///
/// Flags raised, one per section at most:
/// - best corrected acuity in either eye below `acuity_floor` (decimal
///   notation only; non-decimal entries such as "FC 50cm" always flag);
/// - IOP in either eye above `iop_ceiling_mmhg` (21 mmHg screening cutoff);
/// - fundus text in either eye that is neither empty nor "정상";
/// - any detailed-exam entry that is neither empty nor "정상".
///
/// 0 flags → Low, 1 → Moderate, 2+ → High. This is a screening aid, not a
/// diagnosis, and is expected to be replaced per deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningRiskClassifier {
    pub acuity_floor: f32,
    pub iop_ceiling_mmhg: f32,
}

impl Default for ScreeningRiskClassifier {
    fn default() -> Self {
        Self {
            acuity_floor: 0.5,
            iop_ceiling_mmhg: 21.0,
        }
    }
}

impl ScreeningRiskClassifier {
    fn acuity_flag(&self, report: &ComprehensiveReport) -> bool {
        [&report.vision.od.corrected, &report.vision.os.corrected]
            .iter()
            .any(|value| match value.trim() {
                "" => false,
                trimmed => match trimmed.parse::<f32>() {
                    Ok(decimal) => decimal < self.acuity_floor,
                    // "FC 50cm", "HM" and friends are all below any decimal
                    // floor a screening would use.
                    Err(_) => true,
                },
            })
    }

    fn iop_flag(&self, report: &ComprehensiveReport) -> bool {
        report.iop.od_mmhg > self.iop_ceiling_mmhg || report.iop.os_mmhg > self.iop_ceiling_mmhg
    }

    fn fundus_flag(&self, report: &ComprehensiveReport) -> bool {
        [&report.fundus.od, &report.fundus.os]
            .iter()
            .any(|text| is_abnormal(text))
    }

    fn detailed_flag(&self, report: &ComprehensiveReport) -> bool {
        [
            &report.detailed_exam.visual_field,
            &report.detailed_exam.oct,
            &report.detailed_exam.additional,
        ]
        .iter()
        .any(|text| is_abnormal(text))
    }
}

/// Free-text section counts as abnormal when filled in with anything other
/// than the normal keyword.
fn is_abnormal(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty() && trimmed != "정상"
}

impl RiskClassifier for ScreeningRiskClassifier {
    fn classify(&self, report: &ComprehensiveReport) -> RiskLevel {
        let flags = [
            self.acuity_flag(report),
            self.iop_flag(report),
            self.fundus_flag(report),
            self.detailed_flag(report),
        ]
        .iter()
        .filter(|&&f| f)
        .count();

        let level = match flags {
            0 => RiskLevel::Low,
            1 => RiskLevel::Moderate,
            _ => RiskLevel::High,
        };

        debug!(report = %report.id, flags, level = ?level, "comprehensive risk classified");
        level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use retinote_core::types::{
        AcuityPair, BasicExamSection, DetailedExamSection, FundusSection, IopSection, PatientInfo,
        ReportId, VisionSection,
    };

    fn normal_report() -> ComprehensiveReport {
        ComprehensiveReport {
            id: ReportId::new(),
            patient: PatientInfo {
                name: "박민수".into(),
                birth_date: NaiveDate::from_ymd_opt(1970, 6, 2).unwrap(),
                exam_date: NaiveDate::from_ymd_opt(2026, 2, 3).unwrap(),
                doctor_name: "이정민".into(),
            },
            vision: VisionSection {
                od: AcuityPair {
                    naked: "0.6".into(),
                    corrected: "1.0".into(),
                },
                os: AcuityPair {
                    naked: "0.7".into(),
                    corrected: "1.0".into(),
                },
            },
            iop: IopSection {
                od_mmhg: 15.0,
                os_mmhg: 16.0,
            },
            fundus: FundusSection {
                od: "정상".into(),
                os: "정상".into(),
            },
            basic_exam: BasicExamSection::default(),
            detailed_exam: DetailedExamSection {
                visual_field: "정상".into(),
                oct: "정상".into(),
                additional: String::new(),
            },
        }
    }

    #[test]
    fn normal_report_is_low_risk() {
        let classifier = ScreeningRiskClassifier::default();
        assert_eq!(classifier.classify(&normal_report()), RiskLevel::Low);
    }

    #[test]
    fn single_flag_is_moderate() {
        let classifier = ScreeningRiskClassifier::default();

        let mut report = normal_report();
        report.iop.od_mmhg = 24.0;
        assert_eq!(classifier.classify(&report), RiskLevel::Moderate);
    }

    #[test]
    fn two_flags_are_high() {
        let classifier = ScreeningRiskClassifier::default();

        let mut report = normal_report();
        report.iop.os_mmhg = 26.0;
        report.fundus.od = "유두함몰비 증가".into();
        assert_eq!(classifier.classify(&report), RiskLevel::High);
    }

    #[test]
    fn low_corrected_acuity_flags() {
        let classifier = ScreeningRiskClassifier::default();

        let mut report = normal_report();
        report.vision.os.corrected = "0.3".into();
        assert_eq!(classifier.classify(&report), RiskLevel::Moderate);
    }

    #[test]
    fn non_decimal_acuity_flags() {
        let classifier = ScreeningRiskClassifier::default();

        let mut report = normal_report();
        report.vision.od.corrected = "FC 50cm".into();
        assert_eq!(classifier.classify(&report), RiskLevel::Moderate);
    }

    #[test]
    fn empty_acuity_does_not_flag() {
        let classifier = ScreeningRiskClassifier::default();

        let mut report = normal_report();
        report.vision.od.corrected = String::new();
        assert_eq!(classifier.classify(&report), RiskLevel::Low);
    }

    #[test]
    fn abnormal_detailed_exam_flags() {
        let classifier = ScreeningRiskClassifier::default();

        let mut report = normal_report();
        report.detailed_exam.visual_field = "하측 시야결손".into();
        assert_eq!(classifier.classify(&report), RiskLevel::Moderate);
    }

    #[test]
    fn classifier_is_replaceable() {
        struct AlwaysHigh;
        impl RiskClassifier for AlwaysHigh {
            fn classify(&self, _report: &ComprehensiveReport) -> RiskLevel {
                RiskLevel::High
            }
        }

        let classifier: &dyn RiskClassifier = &AlwaysHigh;
        assert_eq!(classifier.classify(&normal_report()), RiskLevel::High);
    }
}
