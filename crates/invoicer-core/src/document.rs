//! # Document Model
//!
//! Everything a renderer prints on a Bill of Supply, already formatted.
//! Positions come from [`crate::layout`]; glyphs and colours are the
//! renderer's business.
//!
//! ## Document Kinds
//! ```text
//! ┌───────────────┬────────┬─────────┬──────────────┬──────────────────────┐
//! │ Kind          │ Titles │ Company │ Left hdr box │ Meta/Buyer/Table/Ftr │
//! ├───────────────┼────────┼─────────┼──────────────┼──────────────────────┤
//! │ HeaderSection │   ✓    │    ✓    │      -       │          -           │
//! │ BodySection   │   ✓    │    -    │      -       │          ✓           │
//! │ FullBill      │   ✓    │    ✓    │      ✓       │          ✓           │
//! └───────────────┴────────┴─────────┴──────────────┴──────────────────────┘
//! ```
//! The two sections are printed in separate passes onto the same sheet
//! (colour letterhead, then black and white body), so both keep the
//! full-bill positions.

use serde::Serialize;

use crate::bill::{Bill, BillTotals};
use crate::error::CoreResult;
use crate::layout::{wrap_text, FooterPlan, PageLayout, TABLE_COLUMN_WIDTHS};
use crate::types::{BankDetails, CompanyProfile};
use crate::{FALLBACK_INVOICE_NO, NO_REFERENCE};

pub const TITLE: &str = "Bill of Supply";
pub const SUBTITLE: &str = "Composition taxable person. Not eligible to collect tax on supplies";
pub const DECLARATION: &str = "We declare that this invoice shows the actual price of the goods described and that all particulars are true and correct.";

const TABLE_HEADERS: [&str; 6] = [
    "Sl No.",
    "Description of Goods",
    "Quantity",
    "Rate",
    "per",
    "Amount",
];

const TABLE_ALIGNS: [Align; 6] = [
    Align::Left,
    Align::Left,
    Align::Right,
    Align::Right,
    Align::Center,
    Align::Right,
];

// =============================================================================
// Document Kind
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Letterhead pass: titles and company block.
    HeaderSection,
    /// Body pass: everything except the company block.
    BodySection,
    /// Complete bill on one sheet.
    FullBill,
}

impl DocumentKind {
    /// Output file name for this kind.
    ///
    /// ## Example
    /// ```rust
    /// use invoicer_core::document::DocumentKind;
    ///
    /// assert_eq!(DocumentKind::FullBill.file_name("17"), "Bill_17.pdf");
    /// assert_eq!(DocumentKind::BodySection.file_name(""), "Section2_Body_BW_Generated.pdf");
    /// assert_eq!(DocumentKind::HeaderSection.file_name("17"), "Section1_Header_Color.pdf");
    /// ```
    pub fn file_name(&self, invoice_no: &str) -> String {
        let invoice_no = match invoice_no.trim() {
            "" => FALLBACK_INVOICE_NO,
            no => no,
        };

        match self {
            DocumentKind::HeaderSection => "Section1_Header_Color.pdf".to_string(),
            DocumentKind::BodySection => format!("Section2_Body_BW_{}.pdf", invoice_no),
            DocumentKind::FullBill => format!("Bill_{}.pdf", invoice_no),
        }
    }

    #[inline]
    pub fn includes_company(&self) -> bool {
        !matches!(self, DocumentKind::BodySection)
    }

    /// Meta, buyer, item table and footer.
    #[inline]
    pub fn includes_bill_details(&self) -> bool {
        !matches!(self, DocumentKind::HeaderSection)
    }

    /// Outline around the company block. Only the full bill draws it.
    #[inline]
    pub fn draws_left_header_box(&self) -> bool {
        matches!(self, DocumentKind::FullBill)
    }
}

// =============================================================================
// Blocks
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Titles {
    pub title: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyBlock {
    pub name: String,
    pub lines: Vec<String>,
}

/// Right header box: invoice number, date, reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaBlock {
    pub invoice_no: String,
    /// `yyyy-mm-dd`, as entered on the form.
    pub dated: String,
    pub reference: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerBlock {
    pub heading: String,
    /// Upper-cased buyer name.
    pub name: String,
    pub address_lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumn {
    pub header: String,
    pub width: f64,
    pub align: Align,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FootCell {
    pub content: String,
    pub col_span: usize,
    pub align: Align,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemTable {
    pub columns: Vec<TableColumn>,
    pub body: Vec<Vec<String>>,
    pub foot: Vec<FootCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BankRow {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Footer {
    pub eoe: String,
    pub amount_in_words_label: String,
    pub amount_in_words: String,
    pub bank_heading: String,
    pub bank_rows: Vec<BankRow>,
    pub declaration_heading: String,
    pub declaration: String,
    /// "for <COMPANY>", right-aligned above the signature space.
    pub signatory_for: String,
    pub signatory: String,
    pub customer_seal: String,
    pub jurisdiction_note: String,
    pub generated_note: String,
}

// =============================================================================
// Bill Document
// =============================================================================

/// A fully formatted bill, ready for a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillDocument {
    pub kind: DocumentKind,
    pub file_name: String,
    pub page: PageLayout,
    pub titles: Titles,
    pub draw_left_header_box: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<CompanyBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<MetaBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer: Option<BuyerBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<ItemTable>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<Footer>,
}

impl BillDocument {
    /// Builds the document for `kind`.
    ///
    /// Row amounts are read as stored; call [`Bill::recompute_amounts`]
    /// first when the bill came from outside. Fails only when the bill
    /// totals overflow.
    ///
    /// ## Example
    /// ```rust
    /// use invoicer_core::document::{BillDocument, DocumentKind};
    /// use invoicer_core::{BankDetails, Bill, CompanyProfile};
    ///
    /// let doc = BillDocument::build(
    ///     DocumentKind::HeaderSection,
    ///     &Bill::default(),
    ///     &CompanyProfile::default(),
    ///     &BankDetails::default(),
    /// )
    /// .unwrap();
    /// assert!(doc.company.is_some());
    /// assert!(doc.table.is_none());
    /// ```
    pub fn build(
        kind: DocumentKind,
        bill: &Bill,
        company: &CompanyProfile,
        bank: &BankDetails,
    ) -> CoreResult<Self> {
        let company_block = kind.includes_company().then(|| CompanyBlock {
            name: company.name.clone(),
            lines: company.detail_lines(),
        });

        let (meta, buyer, table, footer) = if kind.includes_bill_details() {
            let totals = bill.totals()?;
            (
                Some(meta_block(bill)),
                Some(buyer_block(bill)),
                Some(item_table(bill, &totals)),
                Some(footer(&totals, company, bank)),
            )
        } else {
            (None, None, None, None)
        };

        Ok(BillDocument {
            kind,
            file_name: kind.file_name(&bill.data.invoice_no),
            page: PageLayout::a4(),
            titles: Titles {
                title: TITLE.to_string(),
                subtitle: SUBTITLE.to_string(),
            },
            draw_left_header_box: kind.draws_left_header_box(),
            company: company_block,
            meta,
            buyer,
            table,
            footer,
        })
    }

    /// Places the footer below an item table the renderer finished at
    /// `table_end_y`. `None` for documents without a footer.
    ///
    /// `fits(line, max_width)` is the renderer's text measurement; it is
    /// asked with the amount-in-words wrap width of this page.
    ///
    /// ## Example
    /// ```rust
    /// use invoicer_core::document::{BillDocument, DocumentKind};
    /// use invoicer_core::{BankDetails, Bill, CompanyProfile};
    ///
    /// let doc = BillDocument::build(
    ///     DocumentKind::FullBill,
    ///     &Bill::default(),
    ///     &CompanyProfile::default(),
    ///     &BankDetails::default(),
    /// )
    /// .unwrap();
    ///
    /// // Rough metrics: 2 mm per character
    /// let plan = doc.footer_plan(120.0, |line, width| line.len() as f64 * 2.0 <= width);
    /// assert!(!plan.unwrap().new_page);
    /// ```
    pub fn footer_plan<F>(&self, table_end_y: f64, fits: F) -> Option<FooterPlan>
    where
        F: Fn(&str, f64) -> bool,
    {
        let footer = self.footer.as_ref()?;
        let width = self.page.words_wrap_width();
        let words_lines = wrap_text(&footer.amount_in_words, |line| fits(line, width)).len();

        Some(FooterPlan::place(
            &self.page,
            table_end_y,
            words_lines,
            footer.bank_rows.len(),
        ))
    }
}

fn meta_block(bill: &Bill) -> MetaBlock {
    let reference = match bill.data.reference.trim() {
        "" => NO_REFERENCE.to_string(),
        reference => reference.to_string(),
    };

    MetaBlock {
        invoice_no: bill.data.invoice_no.clone(),
        dated: bill.data.date.format("%Y-%m-%d").to_string(),
        reference,
    }
}

fn buyer_block(bill: &Bill) -> BuyerBlock {
    BuyerBlock {
        heading: "Buyer (Bill to)".to_string(),
        name: bill.data.buyer_name.to_uppercase(),
        address_lines: vec![
            bill.data.buyer_address1.clone(),
            bill.data.buyer_address2.clone(),
        ],
    }
}

fn item_table(bill: &Bill, totals: &BillTotals) -> ItemTable {
    let columns = TABLE_HEADERS
        .iter()
        .zip(TABLE_COLUMN_WIDTHS)
        .zip(TABLE_ALIGNS)
        .map(|((header, width), align)| TableColumn {
            header: header.to_string(),
            width,
            align,
        })
        .collect();

    let body = bill
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            vec![
                (i + 1).to_string(),
                item.description.clone(),
                item.quantity_label(),
                item.rate_money().format_inr(),
                item.per.clone(),
                item.amount().format_inr(),
            ]
        })
        .collect();

    let foot = vec![
        FootCell {
            content: "Total".to_string(),
            col_span: 2,
            align: Align::Right,
        },
        FootCell {
            content: totals.quantity_label(),
            col_span: 1,
            align: Align::Right,
        },
        FootCell {
            content: String::new(),
            col_span: 1,
            align: Align::Right,
        },
        FootCell {
            content: String::new(),
            col_span: 1,
            align: Align::Center,
        },
        FootCell {
            content: format!("₹ {}", totals.total_amount.format_inr()),
            col_span: 1,
            align: Align::Right,
        },
    ];

    ItemTable {
        columns,
        body,
        foot,
    }
}

fn footer(totals: &BillTotals, company: &CompanyProfile, bank: &BankDetails) -> Footer {
    Footer {
        eoe: "E. & O.E".to_string(),
        amount_in_words_label: "Amount Chargeable (in words)".to_string(),
        amount_in_words: totals.amount_in_words(),
        bank_heading: "Company's Bank Details".to_string(),
        bank_rows: bank
            .rows()
            .into_iter()
            .map(|(label, value)| BankRow { label, value })
            .collect(),
        declaration_heading: "Declaration".to_string(),
        declaration: DECLARATION.to_string(),
        signatory_for: format!("for {}", company.name),
        signatory: "Authorised Signatory".to_string(),
        customer_seal: "Customer's Seal and Signature".to_string(),
        jurisdiction_note: format!("SUBJECT TO {} JURISDICTION", company.jurisdiction.to_uppercase()),
        generated_note: "This is a Computer Generated Invoice".to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
