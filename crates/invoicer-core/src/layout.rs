//! # Layout Arithmetic
//!
//! Fixed geometry of the printed Bill of Supply, in millimetres on A4.
//! The renderer draws; this module only decides where.
//!
//! ## Page Map
//! ```text
//! y (mm)
//!   12 ┤              Bill of Supply
//!   17 ┤   Composition taxable person. Not eligible to collect tax ...
//!   22 ┼────────────────────────────┬───────────┬───────────┐
//!      │ [logo] COMPANY NAME        │ Invoice No│ Dated     │
//!   43 │        address, GSTIN ...  ├───────────┴───────────┤
//!      │                            │ Reference             │
//!   64 ┼────────────────────────────┴───────────────────────┤
//!   66 ┼ Buyer (Bill to)                                    │
//!   92 ┼────────────────────────────────────────────────────┘
//!   95 ┼ Sl No. │ Description │ Qty │ Rate │ per │ Amount   (table)
//!      ┊
//!      ┊  footer: E. & O.E / words + bank / declaration + sign /
//!      ┊          customer seal / jurisdiction notes
//! ```
//!
//! Text measurement belongs to the renderer, so anything that depends on
//! glyph widths (the wrapped amount-in-words) enters as a line count. The
//! footer is placed only once the renderer knows where its item table
//! ended: it calls [`crate::document::BillDocument::footer_plan`] with that
//! y and its own width predicate, which wraps the words at
//! [`PageLayout::words_wrap_width`] and hands the line count to
//! [`FooterPlan::place`].

use serde::Serialize;

// =============================================================================
// Constants
// =============================================================================

/// Item table column widths (Sl No., Description, Quantity, Rate, per, Amount).
pub const TABLE_COLUMN_WIDTHS: [f64; 6] = [12.0, 92.0, 26.0, 24.0, 12.0, 24.0];

/// Share of the content width taken by the left footer column.
const FOOTER_LEFT_SHARE: f64 = 0.55;

const FOOTER_GAP_ABOVE: f64 = 10.0;
const EOE_HEIGHT: f64 = 6.0;
const AMOUNT_WORDS_MIN_HEIGHT: f64 = 18.0;
const BANK_ROW_HEIGHT: f64 = 4.8;
const BANK_HEADER_HEIGHT: f64 = 6.0;
const WORDS_HEADER_HEIGHT: f64 = 6.0;
const WORDS_LINE_HEIGHT: f64 = 4.5;
const DECLARATION_HEIGHT: f64 = 26.0;
const CUSTOMER_SEAL_HEIGHT: f64 = 24.0;
const BOTTOM_NOTES_HEIGHT: f64 = 16.0;
const ROW_GAP: f64 = 3.0;

// =============================================================================
// Page Layout
// =============================================================================

/// Page size, margin and header box geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLayout {
    pub page_width: f64,
    pub page_height: f64,
    pub margin: f64,
    pub header_y: f64,
    pub header_height: f64,
    /// Width of the company (left) header box.
    pub left_width: f64,
    pub buyer_height: f64,
}

impl PageLayout {
    /// Portrait A4.
    pub const fn a4() -> Self {
        PageLayout {
            page_width: 210.0,
            page_height: 297.0,
            margin: 10.0,
            header_y: 22.0,
            header_height: 42.0,
            left_width: 110.0,
            buyer_height: 26.0,
        }
    }

    #[inline]
    pub fn content_width(&self) -> f64 {
        self.page_width - self.margin * 2.0
    }

    /// Width of the invoice meta (right) header box.
    #[inline]
    pub fn right_width(&self) -> f64 {
        self.content_width() - self.left_width
    }

    /// y of the horizontal split inside the meta box.
    #[inline]
    pub fn right_mid_y(&self) -> f64 {
        self.header_y + self.header_height / 2.0
    }

    /// x of the vertical split between "Invoice No." and "Dated".
    #[inline]
    pub fn right_col_mid(&self) -> f64 {
        self.margin + self.left_width + self.right_width() / 2.0
    }

    #[inline]
    pub fn center_x(&self) -> f64 {
        self.page_width / 2.0
    }

    #[inline]
    pub fn buyer_y(&self) -> f64 {
        self.header_y + self.header_height + 2.0
    }

    #[inline]
    pub fn table_start_y(&self) -> f64 {
        self.buyer_y() + self.buyer_height + ROW_GAP
    }

    /// Left footer column (amount in words, declaration, customer seal).
    /// The bank details and signatory take the rest of the content width.
    #[inline]
    pub fn footer_left_width(&self) -> f64 {
        self.content_width() * FOOTER_LEFT_SHARE
    }

    /// Width available to the wrapped amount-in-words text.
    #[inline]
    pub fn words_wrap_width(&self) -> f64 {
        self.footer_left_width() - 4.0
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        PageLayout::a4()
    }
}

// =============================================================================
// Footer Placement
// =============================================================================

/// Where every footer row lands, and whether it needs a fresh page.
///
/// ## Placement Rule
/// ```text
/// start = table_end + 3 + 10
/// total = eoe 6 + 4 + words/bank box + 3 + declaration 26 + 3
///         + customer seal 24 + notes 16
///
/// page_height - margin - start < total ?
///     ├── yes → new page, start = margin + 2
///     └── no  → stay below the table
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterPlan {
    pub new_page: bool,
    pub start_y: f64,
    /// Baseline of the right-aligned "E. & O.E".
    pub eoe_y: f64,
    /// Top of the amount-in-words / bank details row.
    pub words_row_y: f64,
    pub words_row_height: f64,
    /// Top of the declaration / signatory row.
    pub declaration_row_y: f64,
    /// Top of the customer seal box.
    pub seal_row_y: f64,
    /// Baseline of the jurisdiction note.
    pub jurisdiction_y: f64,
    /// Baseline of the "Computer Generated Invoice" note.
    pub generated_note_y: f64,
    pub total_height: f64,
}

impl FooterPlan {
    /// Plans the footer below a table that ended at `table_end_y`.
    ///
    /// `words_lines` is the number of lines the renderer wrapped the
    /// amount-in-words phrase into; `bank_rows` the number of bank detail
    /// rows printed beside it.
    ///
    /// ## Example
    /// ```rust
    /// use invoicer_core::layout::{FooterPlan, PageLayout};
    ///
    /// let page = PageLayout::a4();
    /// let short_table = FooterPlan::place(&page, 150.0, 2, 5);
    /// assert!(!short_table.new_page);
    ///
    /// let long_table = FooterPlan::place(&page, 200.0, 2, 5);
    /// assert!(long_table.new_page);
    /// assert_eq!(long_table.start_y, 12.0);
    /// ```
    pub fn place(page: &PageLayout, table_end_y: f64, words_lines: usize, bank_rows: usize) -> Self {
        let words_row_height = Self::words_row_height(words_lines, bank_rows);
        let total_height = EOE_HEIGHT
            + 4.0
            + words_row_height
            + ROW_GAP
            + DECLARATION_HEIGHT
            + ROW_GAP
            + CUSTOMER_SEAL_HEIGHT
            + BOTTOM_NOTES_HEIGHT;

        let mut start_y = table_end_y + ROW_GAP + FOOTER_GAP_ABOVE;
        let space_left = page.page_height - page.margin - start_y;
        let new_page = space_left < total_height;
        if new_page {
            start_y = page.margin + 2.0;
        }

        let words_row_y = start_y + EOE_HEIGHT + 4.0;
        let declaration_row_y = words_row_y + words_row_height + ROW_GAP;
        let seal_row_y = declaration_row_y + DECLARATION_HEIGHT + ROW_GAP;
        let jurisdiction_y =
            (page.page_height - 14.0).min(seal_row_y + CUSTOMER_SEAL_HEIGHT + 10.0);
        let generated_note_y = (page.page_height - 8.0).min(jurisdiction_y + 6.0);

        FooterPlan {
            new_page,
            start_y,
            eoe_y: start_y + EOE_HEIGHT,
            words_row_y,
            words_row_height,
            declaration_row_y,
            seal_row_y,
            jurisdiction_y,
            generated_note_y,
            total_height,
        }
    }

    /// Height of the words / bank row: the tallest of its two boxes, never
    /// below the minimum.
    pub fn words_row_height(words_lines: usize, bank_rows: usize) -> f64 {
        let bank = BANK_HEADER_HEIGHT + bank_rows as f64 * BANK_ROW_HEIGHT + 6.0;
        let words = WORDS_HEADER_HEIGHT + words_lines as f64 * WORDS_LINE_HEIGHT + 4.0;
        AMOUNT_WORDS_MIN_HEIGHT.max(bank).max(words)
    }
}

// =============================================================================
// Text Wrapping
// =============================================================================

/// Greedy word wrap.
///
/// `fits` answers whether a candidate line fits the target width; the
/// renderer supplies it from its own font metrics. A single word that does
/// not fit on its own still gets a line.
///
/// ## Example
/// ```rust
/// use invoicer_core::layout::wrap_text;
///
/// let lines = wrap_text("INR One Lakh Twenty Thousand Only", |line| line.len() <= 16);
/// assert_eq!(lines, vec!["INR One Lakh", "Twenty Thousand", "Only"]);
/// ```
pub fn wrap_text<F>(text: &str, fits: F) -> Vec<String>
where
    F: Fn(&str) -> bool,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{} {}", current, word);
        if fits(&candidate) {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.001
    }

    #[test]
    fn test_a4_header_geometry() {
        let page = PageLayout::a4();
        assert!(approx(page.content_width(), 190.0));
        assert!(approx(page.right_width(), 80.0));
        assert!(approx(page.right_mid_y(), 43.0));
        assert!(approx(page.right_col_mid(), 160.0));
        assert!(approx(page.buyer_y(), 66.0));
        assert!(approx(page.table_start_y(), 95.0));
        assert!(approx(page.center_x(), 105.0));
    }

    #[test]
    fn test_table_columns_fill_content_width() {
        let total: f64 = TABLE_COLUMN_WIDTHS.iter().sum();
        assert!(approx(total, PageLayout::a4().content_width()));
    }

    #[test]
    fn test_footer_columns() {
        let page = PageLayout::a4();
        assert!(approx(page.footer_left_width(), 104.5));
        assert!(approx(page.words_wrap_width(), 100.5));
    }

    #[test]
    fn test_words_row_height() {
        // Five bank rows dominate short phrases: 6 + 24 + 6
        assert!(approx(FooterPlan::words_row_height(2, 5), 36.0));
        // Long phrase: 6 + 8 * 4.5 + 4
        assert!(approx(FooterPlan::words_row_height(8, 5), 46.0));
        // Nothing to show: minimum height
        assert!(approx(FooterPlan::words_row_height(0, 0), 18.0));
    }

    #[test]
    fn test_footer_stays_on_page() {
        let plan = FooterPlan::place(&PageLayout::a4(), 150.0, 2, 5);
        assert!(!plan.new_page);
        assert!(approx(plan.total_height, 118.0));
        assert!(approx(plan.start_y, 163.0));
        assert!(approx(plan.eoe_y, 169.0));
        assert!(approx(plan.words_row_y, 173.0));
        assert!(approx(plan.declaration_row_y, 212.0));
        assert!(approx(plan.seal_row_y, 241.0));
        assert!(approx(plan.jurisdiction_y, 275.0));
        assert!(approx(plan.generated_note_y, 281.0));
    }

    #[test]
    fn test_footer_moves_to_new_page() {
        let plan = FooterPlan::place(&PageLayout::a4(), 160.0, 2, 5);
        assert!(plan.new_page);
        assert!(approx(plan.start_y, 12.0));
        assert!(approx(plan.words_row_y, 22.0));
        assert!(approx(plan.seal_row_y, 90.0));
        assert!(approx(plan.jurisdiction_y, 124.0));
        assert!(approx(plan.generated_note_y, 130.0));
    }

    #[test]
    fn test_bottom_notes_clamped_to_page() {
        // Exactly enough space: footer stays, notes clamp near the bottom edge
        let page = PageLayout::a4();
        let plan = FooterPlan::place(&page, 156.0, 2, 5);
        assert!(!plan.new_page);
        assert!(plan.jurisdiction_y <= page.page_height - 14.0 + 0.001);
        assert!(plan.generated_note_y <= page.page_height - 8.0 + 0.001);
    }

    #[test]
    fn test_wrap_text() {
        let fits = |line: &str| line.chars().count() <= 20;
        assert_eq!(
            wrap_text("INR Twelve Lakh Thirty-Four Thousand Only", fits),
            vec!["INR Twelve Lakh", "Thirty-Four Thousand", "Only"]
        );
        assert!(wrap_text("   ", fits).is_empty());
        assert_eq!(
            wrap_text("Supercalifragilisticexpialidocious ok", fits),
            vec!["Supercalifragilisticexpialidocious", "ok"]
        );
    }
}
