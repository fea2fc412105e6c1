// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF export — render a finalized layout plan to a PDF document using
// `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised
// via `PdfDocument::save()`. The exporter is the binary-export collaborator:
// its failures are export failures reported to the caller, never layout
// errors.

use std::collections::HashMap;
use std::path::Path;

use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use retinote_core::error::{Result, RetinoteError};

use crate::layout::{LayoutPlan, Rect};

/// Assumed raster resolution when sizing images on the page.
const EXPORT_DPI: f32 = 150.0;

/// Renders layout plans to PDF bytes.
pub struct PdfExporter {
    /// Title metadata embedded in the PDF /Info dictionary.
    title: Option<String>,
}

impl PdfExporter {
    pub fn new() -> Self {
        Self { title: None }
    }

    /// Set a title for the PDF metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Render `plan` to PDF bytes.
    ///
    /// `sources` maps each document item's id to its encoded image bytes
    /// (PNG/JPEG). Every placed item must have a source; a gap aborts the
    /// export before any page is emitted.
    #[instrument(skip(self, plan, sources), fields(pages = plan.page_count()))]
    pub fn export(&self, plan: &LayoutPlan, sources: &HashMap<Uuid, Vec<u8>>) -> Result<Vec<u8>> {
        let (page_w_mm, page_h_mm) = plan.page_size.dimensions_mm();
        let (page_w, page_h) = (Mm(page_w_mm), Mm(page_h_mm));
        let title = self.title.as_deref().unwrap_or("Retinote Document");

        info!(paper = ?plan.page_size, title, "exporting layout plan to PDF");

        // Check sources up front so a missing image cannot leave a
        // half-written document.
        for placement in plan.pages.iter().flat_map(|p| &p.placements) {
            if !sources.contains_key(&placement.item.id) {
                return Err(RetinoteError::MissingItemSource(placement.item.id));
            }
        }

        let mut doc = PdfDocument::new(title);
        let mut pages: Vec<PdfPage> = Vec::new();

        for plan_page in &plan.pages {
            let mut ops: Vec<Op> = Vec::new();

            for placement in &plan_page.placements {
                // Checked above.
                let bytes = &sources[&placement.item.id];

                let dynamic_image = ::image::load_from_memory(bytes).map_err(|err| {
                    RetinoteError::ImageError(format!(
                        "failed to decode '{}': {err}",
                        placement.item.source_url
                    ))
                })?;

                let img_width = dynamic_image.width() as usize;
                let img_height = dynamic_image.height() as usize;

                let rgb_image = dynamic_image.to_rgb8();
                let raw = RawImage {
                    pixels: RawImageData::U8(rgb_image.into_raw()),
                    width: img_width,
                    height: img_height,
                    data_format: RawImageFormat::RGB8,
                    tag: Vec::new(),
                };
                let xobject_id = doc.add_image(&raw);

                ops.push(Op::UseXobject {
                    id: xobject_id,
                    transform: place_in_rect(
                        &placement.rect,
                        img_width,
                        img_height,
                        page_h.into_pt().0,
                    ),
                });
            }

            pages.push(PdfPage::new(page_w, page_h, ops));
        }

        // A zero-page PDF is not viewable — an empty plan exports as a
        // single blank page.
        if pages.is_empty() {
            pages.push(PdfPage::new(page_w, page_h, Vec::new()));
        }

        doc.with_pages(pages);

        debug!(pages = doc.pages.len(), "PDF assembly complete");

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);

        Ok(output)
    }

    /// Render `plan` and write the PDF directly to a file.
    pub fn export_to_file(
        &self,
        plan: &LayoutPlan,
        sources: &HashMap<Uuid, Vec<u8>>,
        path: impl AsRef<Path>,
    ) -> Result<()> {
        let bytes = self.export(plan, sources)?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!("wrote layout plan PDF to {}", path.as_ref().display());
        Ok(())
    }
}

impl Default for PdfExporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Transform placing an image inside its placement rect.
///
/// The rect is in millimetres from the page's top-left corner; PDF user
/// space has its origin bottom-left, so the vertical coordinate is flipped.
/// The image is scaled to fit the rect preserving aspect ratio (never
/// upscaled past its native size at `EXPORT_DPI`) and centred.
fn place_in_rect(rect: &Rect, img_width: usize, img_height: usize, page_h_pt: f32) -> XObjectTransform {
    let rect_x_pt = Mm(rect.x).into_pt().0;
    let rect_y_pt = Mm(rect.y).into_pt().0;
    let rect_w_pt = Mm(rect.width).into_pt().0;
    let rect_h_pt = Mm(rect.height).into_pt().0;

    let img_w_pt = img_width as f32 / EXPORT_DPI * 72.0;
    let img_h_pt = img_height as f32 / EXPORT_DPI * 72.0;

    let scale_x = rect_w_pt / img_w_pt;
    let scale_y = rect_h_pt / img_h_pt;
    let scale = scale_x.min(scale_y).min(1.0);

    let rendered_w_pt = img_w_pt * scale;
    let rendered_h_pt = img_h_pt * scale;

    // Centre within the rect, then flip to bottom-left origin.
    let x_offset = rect_x_pt + (rect_w_pt - rendered_w_pt) / 2.0;
    let y_from_top = rect_y_pt + (rect_h_pt - rendered_h_pt) / 2.0;
    let y_offset = page_h_pt - y_from_top - rendered_h_pt;

    XObjectTransform {
        translate_x: Some(Pt(x_offset)),
        translate_y: Some(Pt(y_offset)),
        scale_x: Some(scale),
        scale_y: Some(scale),
        dpi: Some(EXPORT_DPI),
        rotate: None,
    }
}
