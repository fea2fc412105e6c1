// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fixed-page layout engine — arranges an ordered image collection into
// page-bounded placements for print or export.
//
// All geometry is in millimetres with the origin at the page's top-left
// corner. Grid cells are fixed fractions of the printable area; they never
// scale to content. Rendering (letterboxing an image inside its rect) is the
// consumer's job.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use retinote_core::config::AppConfig;
use retinote_core::error::{Result, RetinoteError};
use retinote_core::types::{DocumentItem, Margins, PageSize};

/// How items are arranged on each page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutMode {
    /// One item per page, aspect-fit inside the printable area.
    Single,
    /// Row-major R×C grid of fixed-size cells.
    Grid { rows: u32, cols: u32 },
}

impl LayoutMode {
    /// Items per page. Fails on a grid with zero capacity — that is a
    /// configuration error, caught before any placement is computed.
    pub fn capacity(&self) -> Result<usize> {
        match *self {
            Self::Single => Ok(1),
            Self::Grid { rows, cols } => {
                if rows == 0 || cols == 0 {
                    return Err(RetinoteError::InvalidLayoutConfiguration { rows, cols });
                }
                Ok(rows as usize * cols as usize)
            }
        }
    }
}

/// Axis-aligned rectangle in millimetres, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Largest rect of the given width-over-height aspect ratio that fits
    /// inside `self`, centred. Never exceeds the bounds.
    pub fn fit_within(&self, aspect: f32) -> Rect {
        let aspect = if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            1.0
        };

        let (width, height) = if self.width / self.height > aspect {
            // Bounds are wider than the content — height-limited.
            (self.height * aspect, self.height)
        } else {
            (self.width, self.width / aspect)
        };

        Rect {
            x: self.x + (self.width - width) / 2.0,
            y: self.y + (self.height - height) / 2.0,
            width,
            height,
        }
    }

    /// Whether two rects share any interior area. Touching edges do not
    /// count as overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// One item placed at a rect on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub item: DocumentItem,
    pub rect: Rect,
}

/// One laid-out page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based page number.
    pub number: usize,
    pub placements: Vec<Placement>,
}

/// The computed page-by-page placement of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutPlan {
    pub page_size: PageSize,
    pub mode: LayoutMode,
    pub pages: Vec<Page>,
}

impl LayoutPlan {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Total items placed across all pages.
    pub fn item_count(&self) -> usize {
        self.pages.iter().map(|p| p.placements.len()).sum()
    }
}

/// Computes layout plans for a fixed page size and margin set.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    page_size: PageSize,
    margins: Margins,
}

impl LayoutEngine {
    pub fn new(page_size: PageSize, margins: Margins) -> Self {
        Self { page_size, margins }
    }

    /// A4 with default margins.
    pub fn a4() -> Self {
        Self::new(PageSize::A4, Margins::default())
    }

    /// Engine matching the host's configured page geometry.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.default_page_size, config.margins)
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// The page area inside the margins.
    pub fn printable_area(&self) -> Rect {
        let (page_w, page_h) = self.page_size.dimensions_mm();
        Rect {
            x: self.margins.left,
            y: self.margins.top,
            width: page_w - self.margins.left - self.margins.right,
            height: page_h - self.margins.top - self.margins.bottom,
        }
    }

    /// Compute page breaks and per-item placement rects.
    ///
    /// Items are placed in ascending `order` (stable for ties). An empty
    /// collection yields a zero-page plan; an invalid grid is rejected
    /// before any placement is computed.
    #[instrument(skip(self, items), fields(item_count = items.len()))]
    pub fn layout(&self, items: &[DocumentItem], mode: LayoutMode) -> Result<LayoutPlan> {
        let capacity = mode.capacity()?;

        if items.is_empty() {
            return Ok(LayoutPlan {
                page_size: self.page_size,
                mode,
                pages: Vec::new(),
            });
        }

        let mut ordered: Vec<&DocumentItem> = items.iter().collect();
        ordered.sort_by_key(|item| item.order);

        let printable = self.printable_area();

        let pages: Vec<Page> = ordered
            .chunks(capacity)
            .enumerate()
            .map(|(page_idx, chunk)| {
                let placements = chunk
                    .iter()
                    .enumerate()
                    .map(|(slot, item)| Placement {
                        item: (*item).clone(),
                        rect: self.slot_rect(&printable, mode, slot, item),
                    })
                    .collect();
                Page {
                    number: page_idx + 1,
                    placements,
                }
            })
            .collect();

        info!(
            items = items.len(),
            pages = pages.len(),
            "layout plan computed"
        );

        Ok(LayoutPlan {
            page_size: self.page_size,
            mode,
            pages,
        })
    }

    /// Rect for the `slot`-th item of a page.
    fn slot_rect(
        &self,
        printable: &Rect,
        mode: LayoutMode,
        slot: usize,
        item: &DocumentItem,
    ) -> Rect {
        match mode {
            LayoutMode::Single => match item.pixel_size {
                Some(px) => printable.fit_within(px.aspect()),
                // Without intrinsic dimensions the rect is the bounding box;
                // the renderer letterboxes inside it.
                None => *printable,
            },
            LayoutMode::Grid { rows, cols } => {
                let cell_w = printable.width / cols as f32;
                let cell_h = printable.height / rows as f32;
                let row = slot / cols as usize;
                let col = slot % cols as usize;
                Rect {
                    x: printable.x + col as f32 * cell_w,
                    y: printable.y + row as f32 * cell_h,
                    width: cell_w,
                    height: cell_h,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: u32) -> Vec<DocumentItem> {
        (0..n)
            .map(|i| DocumentItem::new(format!("cartoon-{i}.png"), i))
            .collect()
    }

    #[test]
    fn empty_collection_yields_zero_pages() {
        let engine = LayoutEngine::a4();
        for mode in [LayoutMode::Single, LayoutMode::Grid { rows: 2, cols: 2 }] {
            let plan = engine.layout(&[], mode).unwrap();
            assert!(plan.pages.is_empty());
        }
    }

    #[test]
    fn zero_capacity_grid_rejected_before_layout() {
        let engine = LayoutEngine::a4();
        let result = engine.layout(&items(3), LayoutMode::Grid { rows: 0, cols: 2 });
        assert!(matches!(
            result,
            Err(RetinoteError::InvalidLayoutConfiguration { rows: 0, cols: 2 })
        ));

        let result = engine.layout(&items(3), LayoutMode::Grid { rows: 3, cols: 0 });
        assert!(result.is_err());
    }

    #[test]
    fn single_mode_one_item_per_page() {
        let engine = LayoutEngine::a4();
        let plan = engine.layout(&items(7), LayoutMode::Single).unwrap();
        assert_eq!(plan.page_count(), 7);
        assert!(plan.pages.iter().all(|p| p.placements.len() == 1));
    }

    #[test]
    fn five_items_in_two_by_two_grid_make_two_pages() {
        let engine = LayoutEngine::a4();
        let plan = engine
            .layout(&items(5), LayoutMode::Grid { rows: 2, cols: 2 })
            .unwrap();

        assert_eq!(plan.page_count(), 2);
        assert_eq!(plan.pages[0].placements.len(), 4);
        assert_eq!(plan.pages[1].placements.len(), 1);

        // Original order preserved across the page break.
        let placed: Vec<u32> = plan
            .pages
            .iter()
            .flat_map(|p| p.placements.iter().map(|pl| pl.item.order))
            .collect();
        assert_eq!(placed, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn every_item_placed_exactly_once() {
        let engine = LayoutEngine::a4();
        let input = items(11);
        let plan = engine
            .layout(&input, LayoutMode::Grid { rows: 3, cols: 2 })
            .unwrap();
        assert_eq!(plan.item_count(), input.len());

        let mut ids: Vec<_> = plan
            .pages
            .iter()
            .flat_map(|p| p.placements.iter().map(|pl| pl.item.id))
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), input.len());
    }

    #[test]
    fn items_are_packed_by_order_field() {
        let engine = LayoutEngine::a4();
        // Supplied out of order — the plan follows `order`, not input index.
        let mut input = items(4);
        input.reverse();

        let plan = engine
            .layout(&input, LayoutMode::Grid { rows: 2, cols: 2 })
            .unwrap();
        let placed: Vec<u32> = plan.pages[0].placements.iter().map(|p| p.item.order).collect();
        assert_eq!(placed, vec![0, 1, 2, 3]);
    }

    #[test]
    fn grid_placements_never_overlap() {
        let engine = LayoutEngine::a4();
        let plan = engine
            .layout(&items(6), LayoutMode::Grid { rows: 2, cols: 3 })
            .unwrap();

        let rects: Vec<Rect> = plan.pages[0].placements.iter().map(|p| p.rect).collect();
        for (i, a) in rects.iter().enumerate() {
            for b in &rects[i + 1..] {
                assert!(!a.overlaps(b), "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn grid_cells_stay_inside_printable_area() {
        let engine = LayoutEngine::new(PageSize::Letter, Margins::uniform(10.0));
        let printable = engine.printable_area();
        let plan = engine
            .layout(&items(8), LayoutMode::Grid { rows: 4, cols: 2 })
            .unwrap();

        for placement in plan.pages.iter().flat_map(|p| &p.placements) {
            let r = placement.rect;
            assert!(r.x >= printable.x - 1e-3);
            assert!(r.y >= printable.y - 1e-3);
            assert!(r.x + r.width <= printable.x + printable.width + 1e-3);
            assert!(r.y + r.height <= printable.y + printable.height + 1e-3);
        }
    }

    #[test]
    fn grid_cell_size_is_fixed_fraction_of_printable_area() {
        let engine = LayoutEngine::a4();
        let printable = engine.printable_area();
        let plan = engine
            .layout(&items(2), LayoutMode::Grid { rows: 2, cols: 2 })
            .unwrap();

        // Cells keep their fixed size even on a partially-filled page.
        for placement in &plan.pages[0].placements {
            assert!((placement.rect.width - printable.width / 2.0).abs() < 1e-3);
            assert!((placement.rect.height - printable.height / 2.0).abs() < 1e-3);
        }
    }

    #[test]
    fn single_mode_fit_preserves_aspect_and_centres() {
        let engine = LayoutEngine::a4();
        let printable = engine.printable_area();

        // A wide landscape cartoon: 2000x1000.
        let item = DocumentItem::new("wide.png", 0).with_pixel_size(2000, 1000);
        let plan = engine.layout(&[item], LayoutMode::Single).unwrap();
        let rect = plan.pages[0].placements[0].rect;

        assert!((rect.width / rect.height - 2.0).abs() < 1e-3);
        assert!(rect.width <= printable.width + 1e-3);
        // Width-limited, so horizontally flush and vertically centred.
        assert!((rect.x - printable.x).abs() < 1e-3);
        let top_gap = rect.y - printable.y;
        let bottom_gap = (printable.y + printable.height) - (rect.y + rect.height);
        assert!((top_gap - bottom_gap).abs() < 1e-3);
    }

    #[test]
    fn single_mode_without_pixel_size_fills_printable_area() {
        let engine = LayoutEngine::a4();
        let plan = engine
            .layout(&[DocumentItem::new("unknown.png", 0)], LayoutMode::Single)
            .unwrap();
        assert_eq!(plan.pages[0].placements[0].rect, engine.printable_area());
    }
}
