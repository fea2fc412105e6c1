// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Print-visibility rules — which UI regions survive onto paper.
//
// Tags are declarative, not computed: the host registers each region's
// selector once and the emitter produces the `@media print` stylesheet. The
// `@page` rule uses the same `PageSize` the layout ran with, so preview and
// physical output agree on geometry.

use serde::{Deserialize, Serialize};

use retinote_core::types::{Margins, PageSize};

/// Where a UI region is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrintVisibility {
    /// Interactive chrome (buttons, navigation) — hidden when printing.
    InteractiveOnly,
    /// Print-only furniture (page footers, signatures) — hidden on screen.
    PrintOnly,
    /// Visible in both contexts.
    Always,
}

/// One tagged UI region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedRegion {
    /// CSS selector for the region (".toolbar", "#report-footer", …).
    pub selector: String,
    pub visibility: PrintVisibility,
}

/// Collected visibility tags plus the page geometry they assume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintRuleSet {
    page_size: PageSize,
    margins: Margins,
    regions: Vec<TaggedRegion>,
}

impl PrintRuleSet {
    pub fn new(page_size: PageSize, margins: Margins) -> Self {
        Self {
            page_size,
            margins,
            regions: Vec::new(),
        }
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Register a region. Chainable for declarative setup.
    pub fn tag(mut self, selector: impl Into<String>, visibility: PrintVisibility) -> Self {
        self.regions.push(TaggedRegion {
            selector: selector.into(),
            visibility,
        });
        self
    }

    fn selectors_with(&self, visibility: PrintVisibility) -> Vec<&str> {
        self.regions
            .iter()
            .filter(|r| r.visibility == visibility)
            .map(|r| r.selector.as_str())
            .collect()
    }

    /// Emit the stylesheet: an `@page` rule with this rule set's geometry,
    /// screen-hiding for print-only regions, and an `@media print` block
    /// that swaps the two groups.
    pub fn to_css(&self) -> String {
        let mut css = String::new();

        css.push_str(&format!(
            "@page {{ size: {}; margin: {}mm {}mm {}mm {}mm; }}\n",
            self.page_size.css_size_keyword(),
            self.margins.top,
            self.margins.right,
            self.margins.bottom,
            self.margins.left,
        ));

        let print_only = self.selectors_with(PrintVisibility::PrintOnly);
        for selector in &print_only {
            css.push_str(&format!("{selector} {{ display: none; }}\n"));
        }

        let interactive = self.selectors_with(PrintVisibility::InteractiveOnly);
        if !interactive.is_empty() || !print_only.is_empty() {
            css.push_str("@media print {\n");
            for selector in &interactive {
                css.push_str(&format!("  {selector} {{ display: none !important; }}\n"));
            }
            for selector in &print_only {
                css.push_str(&format!("  {selector} {{ display: block !important; }}\n"));
            }
            css.push_str("}\n");
        }

        css
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule_set() -> PrintRuleSet {
        PrintRuleSet::new(PageSize::A4, Margins::default())
            .tag(".toolbar", PrintVisibility::InteractiveOnly)
            .tag(".exam-selector", PrintVisibility::InteractiveOnly)
            .tag("#report-footer", PrintVisibility::PrintOnly)
            .tag(".report-body", PrintVisibility::Always)
    }

    #[test]
    fn page_rule_names_the_layout_page_size() {
        let css = rule_set().to_css();
        assert!(css.contains("@page { size: A4;"));

        let letter = PrintRuleSet::new(PageSize::Letter, Margins::default()).to_css();
        assert!(letter.contains("size: letter;"));
    }

    #[test]
    fn interactive_regions_hidden_in_print() {
        let css = rule_set().to_css();
        assert!(css.contains("  .toolbar { display: none !important; }"));
        assert!(css.contains("  .exam-selector { display: none !important; }"));
    }

    #[test]
    fn print_only_regions_hidden_on_screen_and_forced_in_print() {
        let css = rule_set().to_css();
        assert!(css.contains("#report-footer { display: none; }\n"));
        assert!(css.contains("  #report-footer { display: block !important; }"));
    }

    #[test]
    fn always_regions_generate_no_rules() {
        let css = rule_set().to_css();
        assert!(!css.contains(".report-body {"));
    }

    #[test]
    fn empty_rule_set_still_emits_page_geometry() {
        let css = PrintRuleSet::new(PageSize::A4, Margins::uniform(10.0)).to_css();
        assert!(css.contains("@page"));
        assert!(css.contains("margin: 10mm 10mm 10mm 10mm"));
        assert!(!css.contains("@media print"));
    }
}
