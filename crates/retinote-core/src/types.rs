// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Retinote report engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a report instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportId(pub Uuid);

impl ReportId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ReportId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ReportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The exam families a clinician can run a report for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExamType {
    Diabetic,
    Hypertension,
    Comprehensive,
}

impl ExamType {
    /// Report heading as it appears on the printed document.
    pub fn report_title(&self) -> &'static str {
        match self {
            Self::Diabetic => "당뇨망막병증 검진 결과지",
            Self::Hypertension => "고혈압망막병증 검진 결과지",
            Self::Comprehensive => "눈 정밀검진 결과지",
        }
    }
}

impl std::fmt::Display for ExamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Diabetic => "diabetic",
            Self::Hypertension => "hypertension",
            Self::Comprehensive => "comprehensive",
        };
        write!(f, "{name}")
    }
}

/// Which eye a finding belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EyeSide {
    /// Oculus dexter — right eye.
    Od,
    /// Oculus sinister — left eye.
    Os,
}

impl EyeSide {
    /// Label printed next to the measurement on the report.
    pub fn report_label(&self) -> &'static str {
        match self {
            Self::Od => "우안(OD)",
            Self::Os => "좌안(OS)",
        }
    }
}

// ---------------------------------------------------------------------------
// Patient & exam sections
// ---------------------------------------------------------------------------

/// Identity and context for one report instance.
///
/// Supplied per report by the form layer; the engine holds no patient
/// registry of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientInfo {
    pub name: String,
    pub birth_date: NaiveDate,
    pub exam_date: NaiveDate,
    pub doctor_name: String,
}

/// Naked and corrected visual acuity for one eye.
///
/// Values are kept as the form strings ("0.8", "FC 50cm", …) — acuity is not
/// always a decimal and the engine never does arithmetic on it directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AcuityPair {
    pub naked: String,
    pub corrected: String,
}

/// Visual acuity section, both eyes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisionSection {
    pub od: AcuityPair,
    pub os: AcuityPair,
}

/// Intraocular pressure in mmHg, both eyes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IopSection {
    pub od_mmhg: f32,
    pub os_mmhg: f32,
}

/// Free-text fundus findings, both eyes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundusSection {
    pub od: String,
    pub os: String,
}

/// Staging input for one eye: the stage label plus any free-text notes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EyeFinding {
    pub stage: String,
    pub additional_notes: String,
}

/// Per-eye staging inputs for one disease family.
///
/// This is the input to bilateral severity resolution — the resolved
/// worst-case severity is derived from it and never stored back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BilateralFinding {
    pub od: EyeFinding,
    pub os: EyeFinding,
}

impl BilateralFinding {
    pub fn new(od_stage: impl Into<String>, os_stage: impl Into<String>) -> Self {
        Self {
            od: EyeFinding {
                stage: od_stage.into(),
                additional_notes: String::new(),
            },
            os: EyeFinding {
                stage: os_stage.into(),
                additional_notes: String::new(),
            },
        }
    }
}

/// Anterior-segment slit-lamp findings for the comprehensive basic exam.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicExamSection {
    pub conjunctiva: String,
    pub cornea: String,
    pub anterior_chamber: String,
    pub lens: String,
}

/// Specialty sub-exams for the comprehensive detailed exam.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailedExamSection {
    pub visual_field: String,
    pub oct: String,
    pub additional: String,
}

// ---------------------------------------------------------------------------
// Report instances
// ---------------------------------------------------------------------------

/// Diabetic retinopathy screening report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiabeticReport {
    pub id: ReportId,
    pub patient: PatientInfo,
    pub vision: VisionSection,
    pub iop: IopSection,
    pub fundus: FundusSection,
    /// Per-eye diabetic retinopathy staging.
    pub staging: BilateralFinding,
}

/// Hypertensive retinopathy screening report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HypertensionReport {
    pub id: ReportId,
    pub patient: PatientInfo,
    pub vision: VisionSection,
    pub iop: IopSection,
    pub fundus: FundusSection,
    /// Per-eye hypertensive retinopathy staging.
    pub staging: BilateralFinding,
}

/// Comprehensive eye exam report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComprehensiveReport {
    pub id: ReportId,
    pub patient: PatientInfo,
    pub vision: VisionSection,
    pub iop: IopSection,
    pub fundus: FundusSection,
    pub basic_exam: BasicExamSection,
    pub detailed_exam: DetailedExamSection,
}

/// One in-flight report of any exam family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReportInstance {
    Diabetic(DiabeticReport),
    Hypertension(HypertensionReport),
    Comprehensive(ComprehensiveReport),
}

impl ReportInstance {
    pub fn exam_type(&self) -> ExamType {
        match self {
            Self::Diabetic(_) => ExamType::Diabetic,
            Self::Hypertension(_) => ExamType::Hypertension,
            Self::Comprehensive(_) => ExamType::Comprehensive,
        }
    }

    pub fn patient(&self) -> &PatientInfo {
        match self {
            Self::Diabetic(r) => &r.patient,
            Self::Hypertension(r) => &r.patient,
            Self::Comprehensive(r) => &r.patient,
        }
    }
}

// ---------------------------------------------------------------------------
// Document items & page geometry
// ---------------------------------------------------------------------------

/// Intrinsic pixel dimensions of a raster source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    /// Width-over-height aspect ratio.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// One visual unit (an image) to be placed by the layout engine.
///
/// Ordering is significant: the engine packs items in ascending `order` and
/// every item appears exactly once in the resulting plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentItem {
    pub id: Uuid,
    pub source_url: String,
    pub order: u32,
    /// Intrinsic pixel size, when the host has decoded the source. Used for
    /// aspect-preserving single-page placement; without it the placement
    /// rect is the full printable area and the renderer letterboxes.
    pub pixel_size: Option<PixelSize>,
}

impl DocumentItem {
    pub fn new(source_url: impl Into<String>, order: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_url: source_url.into(),
            order,
            pixel_size: None,
        }
    }

    pub fn with_pixel_size(mut self, width: u32, height: u32) -> Self {
        self.pixel_size = Some(PixelSize { width, height });
        self
    }
}

/// Physical page sizes the clinic prints on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSize {
    A4,
    Letter,
}

impl PageSize {
    /// Dimensions in millimetres (width, height), portrait orientation.
    pub fn dimensions_mm(&self) -> (f32, f32) {
        match self {
            Self::A4 => (210.0, 297.0),
            Self::Letter => (215.9, 279.4),
        }
    }

    /// CSS `@page size` keyword for this page size.
    pub fn css_size_keyword(&self) -> &'static str {
        match self {
            Self::A4 => "A4",
            Self::Letter => "letter",
        }
    }
}

/// Page margins in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    pub fn uniform(mm: f32) -> Self {
        Self {
            top: mm,
            right: mm,
            bottom: mm,
            left: mm,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        // Half an inch all round — what the browser print dialog assumes.
        Self::uniform(12.7)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_size_dimensions_are_portrait() {
        for size in [PageSize::A4, PageSize::Letter] {
            let (w, h) = size.dimensions_mm();
            assert!(h > w, "{size:?} should be taller than wide");
        }
    }

    #[test]
    fn pixel_size_aspect_handles_zero_height() {
        let px = PixelSize {
            width: 100,
            height: 0,
        };
        assert!(px.aspect().is_finite());
    }

    #[test]
    fn report_instance_exposes_exam_type() {
        let report = ReportInstance::Diabetic(DiabeticReport {
            id: ReportId::new(),
            patient: PatientInfo {
                name: "김영희".into(),
                birth_date: NaiveDate::from_ymd_opt(1958, 3, 12).unwrap(),
                exam_date: NaiveDate::from_ymd_opt(2026, 1, 20).unwrap(),
                doctor_name: "이정민".into(),
            },
            vision: VisionSection::default(),
            iop: IopSection::default(),
            fundus: FundusSection::default(),
            staging: BilateralFinding::new("정상", "정상"),
        });
        assert_eq!(report.exam_type(), ExamType::Diabetic);
        assert_eq!(report.patient().name, "김영희");
    }
}
