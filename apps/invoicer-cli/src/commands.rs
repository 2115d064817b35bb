//! Command implementations. Each returns the text to print so `main` stays
//! a dispatcher.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use invoicer_core::document::{BillDocument, DocumentKind};
use invoicer_core::validation::validate_bill;
use invoicer_core::{amount_to_words_inr, Bill, CoreError, IntoAmount};

use crate::config::InvoicerConfig;

// =============================================================================
// Bill Loading
// =============================================================================

/// Reads a bill JSON file, recomputes row amounts and validates it.
pub fn load_bill(path: &Path) -> Result<Bill> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read bill file {}", path.display()))?;

    let mut bill: Bill = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid bill JSON in {}", path.display()))?;

    bill.recompute_amounts()?;
    validate_bill(&bill)
        .map_err(CoreError::from)
        .with_context(|| format!("Bill {} is incomplete", path.display()))?;

    debug!(items = bill.items.len(), invoice_no = %bill.data.invoice_no, "Bill loaded");
    Ok(bill)
}

// =============================================================================
// Commands
// =============================================================================

/// `invoicer words <AMOUNT>`
pub fn words(amount: &str) -> String {
    if amount.to_amount().is_none() {
        warn!(input = %amount, "Not a number, converting as zero");
    }
    amount_to_words_inr(amount)
}

/// `invoicer summary --bill <FILE>`
pub fn summary(bill: &Bill) -> Result<String> {
    let totals = bill.totals()?;

    let text = [
        format!("Invoice No. : {}", bill.data.invoice_no),
        format!("Dated       : {}", bill.data.date.format("%Y-%m-%d")),
        format!("Buyer       : {}", bill.data.buyer_name),
        format!("Items       : {}", bill.items.len()),
        format!("Quantity    : {}", totals.quantity_label()),
        format!("Total       : {}", totals.total_amount),
        format!("In words    : {}", totals.amount_in_words()),
    ]
    .join("\n");
    Ok(text)
}

/// Serializes the document model as JSON.
pub fn render_document(document: &BillDocument, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(document)?
    } else {
        serde_json::to_string(document)?
    };
    Ok(json)
}

/// Builds the document for `bill` with the configured issuer.
pub fn build_document(
    kind: DocumentKind,
    bill: &Bill,
    config: &InvoicerConfig,
) -> Result<BillDocument> {
    let document = BillDocument::build(kind, bill, &config.company, &config.bank)?;
    Ok(document)
}

/// Writes the document JSON as `<dir>/<file_name>.json` and returns the path.
pub fn write_document(document: &BillDocument, dir: &Path, pretty: bool) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let path = dir.join(format!("{}.json", document.file_name));
    std::fs::write(&path, render_document(document, pretty)?)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!(?path, kind = ?document.kind, "Document written");
    Ok(path)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use invoicer_core::ValidationError;

    const BILL_JSON: &str = r#"{
        "invoiceNo": "17",
        "date": "2024-08-15",
        "reference": "",
        "buyerName": "Ravi Traders",
        "buyerAddress1": "Plot 4, GIDC",
        "buyerAddress2": "Kalol",
        "items": [
            {"description": "Cement Bag", "quantity": "100", "rate": "385.50", "per": "BAG", "amountPaise": 1},
            {"description": "Binding Wire", "quantity": 2.5, "rate": 90, "per": "BAG"}
        ]
    }"#;

    fn write_bill(dir: &Path, json: &str) -> PathBuf {
        let path = dir.join("bill.json");
        std::fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_words_command() {
        assert_eq!(words("1500"), "INR One Thousand Five Hundred Only");
        assert_eq!(words("abc"), "INR Zero Only");
    }

    #[test]
    fn test_load_bill_recomputes_amounts() {
        let dir = tempfile::tempdir().unwrap();
        let bill = load_bill(&write_bill(dir.path(), BILL_JSON)).unwrap();
        assert_eq!(bill.items[0].amount_paise, 3_855_000);
        assert_eq!(bill.totals().unwrap().total_amount.paise(), 3_877_500);
    }

    #[test]
    fn test_load_bill_rejects_incomplete() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_bill(dir.path(), r#"{"invoiceNo": "17", "items": []}"#);
        assert!(load_bill(&path).is_err());

        let missing = dir.path().join("missing.json");
        assert!(load_bill(&missing).is_err());
    }

    #[test]
    fn test_load_bill_error_keeps_validation_cause() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_bill(dir.path(), r#"{"invoiceNo": "", "buyerName": "Ravi Traders"}"#);

        let err = load_bill(&path).unwrap_err();
        assert!(err.to_string().starts_with("Bill "));
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_load_bill_rejects_overflowing_totals() {
        let dir = tempfile::tempdir().unwrap();
        let json = r#"{
            "invoiceNo": "18",
            "date": "2024-08-15",
            "buyerName": "Ravi Traders",
            "buyerAddress1": "Plot 4, GIDC",
            "buyerAddress2": "Kalol",
            "items": [
                {"description": "Gold", "quantity": "90000000000000000", "rate": "1", "per": "NO"},
                {"description": "Gold", "quantity": "90000000000000000", "rate": "1", "per": "NO"}
            ]
        }"#;

        let err = load_bill(&write_bill(dir.path(), json)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::Validation(ValidationError::TooLarge { .. }))
        ));
    }

    #[test]
    fn test_summary_text() {
        let dir = tempfile::tempdir().unwrap();
        let bill = load_bill(&write_bill(dir.path(), BILL_JSON)).unwrap();
        let text = summary(&bill).unwrap();
        assert!(text.contains("Items       : 2"));
        assert!(text.contains("Quantity    : 102.5 BAG"));
        assert!(text.contains("Total       : ₹38,775.00"));
        assert!(text.contains("Seven Hundred Seventy-Five Only"));
    }

    #[test]
    fn test_write_document() {
        let dir = tempfile::tempdir().unwrap();
        let bill = load_bill(&write_bill(dir.path(), BILL_JSON)).unwrap();
        let config = InvoicerConfig::default();

        let document = build_document(DocumentKind::BodySection, &bill, &config).unwrap();
        let out = dir.path().join("out");
        let path = write_document(&document, &out, false).unwrap();

        assert_eq!(path, out.join("Section2_Body_BW_17.pdf.json"));
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["meta"]["reference"], "NA");
        assert_eq!(written["buyer"]["name"], "RAVI TRADERS");
        assert!(written.get("company").is_none());
    }
}
