//! # Domain Types
//!
//! The records the billing form produces and the issuer details printed
//! on every bill.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    BillData     │   │    LineItem     │   │ CompanyProfile  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  invoiceNo      │   │  description    │   │  name           │       │
//! │  │  date           │   │  quantity       │   │  addressLines   │       │
//! │  │  reference      │   │  rate           │   │  gstin          │       │
//! │  │  buyerName      │   │  per            │   │  state / code   │       │
//! │  │  buyerAddress1  │   │  amountPaise    │   │  contact, email │       │
//! │  │  buyerAddress2  │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                         ┌─────────────────┐       │
//! │                                              │   BankDetails   │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field names serialize in camelCase so the browser form can post its
//! state as-is.

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::{parse_lenient, IntoAmount, Money};
use crate::DEFAULT_UNIT;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn default_unit() -> String {
    DEFAULT_UNIT.to_string()
}

/// Form fields arrive as numbers, numeric strings or "" for an untouched
/// input; anything that is not a number reads as zero.
fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.to_amount().unwrap_or(Decimal::ZERO))
}

// =============================================================================
// Bill Data
// =============================================================================

/// Header fields of a bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillData {
    /// Invoice number as printed ("AS/24-25/017").
    #[serde(default)]
    pub invoice_no: String,

    /// Invoice date. Defaults to today.
    #[serde(default = "today")]
    #[ts(as = "String")]
    pub date: NaiveDate,

    /// Free-form reference (PO number, note). Printed as "NA" when blank.
    #[serde(default)]
    pub reference: String,

    #[serde(default)]
    pub buyer_name: String,

    #[serde(default)]
    pub buyer_address1: String,

    #[serde(default)]
    pub buyer_address2: String,
}

impl BillData {
    /// Empty header dated `date`.
    pub fn dated(date: NaiveDate) -> Self {
        BillData {
            invoice_no: String::new(),
            date,
            reference: String::new(),
            buyer_name: String::new(),
            buyer_address1: String::new(),
            buyer_address2: String::new(),
        }
    }
}

impl Default for BillData {
    fn default() -> Self {
        BillData::dated(today())
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One row of goods on the bill.
///
/// `amount_paise` is derived: it is always `quantity × rate` rounded to
/// paise, and is recomputed whenever quantity or rate change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(default)]
    pub description: String,

    /// Quantity, fractional allowed (2.5 KG).
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[ts(as = "String")]
    pub quantity: Decimal,

    /// Rate per unit in Rupees, as entered.
    #[serde(default, deserialize_with = "lenient_decimal")]
    #[ts(as = "String")]
    pub rate: Decimal,

    /// Unit the rate applies to ("NO", "KG", "BOX").
    #[serde(default = "default_unit")]
    pub per: String,

    /// Line amount in paise.
    #[serde(default)]
    pub amount_paise: i64,
}

impl LineItem {
    /// Blank row, as added by the form's "+ Add Item" button.
    pub fn blank() -> Self {
        LineItem {
            description: String::new(),
            quantity: Decimal::ZERO,
            rate: Decimal::ZERO,
            per: default_unit(),
            amount_paise: 0,
        }
    }

    /// A filled row with its amount already computed.
    ///
    /// Returns `None` if `quantity × rate` overflows paise arithmetic.
    ///
    /// ## Example
    /// ```rust
    /// use invoicer_core::types::LineItem;
    ///
    /// let item = LineItem::new("Cement Bag", "10", "385.50", "BAG").unwrap();
    /// assert_eq!(item.amount().paise(), 3_855_00);
    /// ```
    pub fn new(description: &str, quantity: &str, rate: &str, per: &str) -> Option<Self> {
        let quantity = parse_lenient(quantity);
        let rate = parse_lenient(rate);
        let amount = Money::from_quantity_rate(quantity, rate)?;

        Some(LineItem {
            description: description.to_string(),
            quantity,
            rate,
            per: per.to_string(),
            amount_paise: amount.paise(),
        })
    }

    /// Returns the line amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_paise(self.amount_paise)
    }

    /// Returns the rate rounded to paise.
    #[inline]
    pub fn rate_money(&self) -> Money {
        Money::coerce(self.rate)
    }

    /// Recomputes `amount_paise` from quantity and rate.
    pub(crate) fn recompute_amount(&mut self, index: usize) -> CoreResult<()> {
        let amount = Money::from_quantity_rate(self.quantity, self.rate)
            .ok_or(crate::CoreError::AmountOverflow { index })?;
        self.amount_paise = amount.paise();
        Ok(())
    }

    /// "10 BAG" style label for the quantity column.
    pub fn quantity_label(&self) -> String {
        format!("{} {}", self.quantity.normalize(), self.per.trim())
            .trim()
            .to_string()
    }
}

impl Default for LineItem {
    fn default() -> Self {
        LineItem::blank()
    }
}

/// Editable columns of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ItemField {
    Description,
    Quantity,
    Rate,
    Per,
}

// =============================================================================
// Issuer
// =============================================================================

/// The business issuing the bill (printed in the header block).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyProfile {
    pub name: String,
    pub address_lines: Vec<String>,
    pub gstin: String,
    pub state_name: String,
    pub state_code: String,
    pub contact: String,
    pub email: String,
    /// City named in the "SUBJECT TO ... JURISDICTION" note.
    pub jurisdiction: String,
}

impl CompanyProfile {
    /// Text lines under the company name, in print order.
    pub fn detail_lines(&self) -> Vec<String> {
        let mut lines = self.address_lines.clone();
        lines.push(format!("GSTIN/UIN: {}", self.gstin));
        lines.push(format!(
            "State Name : {}, Code : {}",
            self.state_name, self.state_code
        ));
        lines.push(format!("Contact : {}", self.contact));
        lines.push(format!("E-Mail : {}", self.email));
        lines
    }
}

impl Default for CompanyProfile {
    /// Placeholder issuer for development; real values come from config.
    fn default() -> Self {
        CompanyProfile {
            name: "YOUR COMPANY NAME".to_string(),
            address_lines: vec![
                "Shop No. 1, Main Road,".to_string(),
                "Your City".to_string(),
            ],
            gstin: "00AAAAA0000A0Z0".to_string(),
            state_name: "Gujarat".to_string(),
            state_code: "24".to_string(),
            contact: "0000000000".to_string(),
            email: "billing@example.com".to_string(),
            jurisdiction: "YOUR CITY".to_string(),
        }
    }
}

/// Bank account printed in the footer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct BankDetails {
    pub holder_name: String,
    pub bank_name: String,
    pub account_no: String,
    pub branch_ifsc: String,
    pub swift_code: String,
}

impl BankDetails {
    /// Label / value rows in print order.
    pub fn rows(&self) -> Vec<(String, String)> {
        vec![
            ("A/c Holder's Name".to_string(), self.holder_name.clone()),
            ("Bank Name".to_string(), self.bank_name.clone()),
            ("A/c No.".to_string(), self.account_no.clone()),
            ("Branch & IFS Code".to_string(), self.branch_ifsc.clone()),
            ("SWIFT Code".to_string(), self.swift_code.clone()),
        ]
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_blank_item_defaults() {
        let item = LineItem::blank();
        assert_eq!(item.per, "NO");
        assert_eq!(item.amount(), Money::zero());
        assert_eq!(item.quantity, Decimal::ZERO);
    }

    #[test]
    fn test_line_item_new_computes_amount() {
        let item = LineItem::new("Tiles", "2.5", "10.01", "BOX").unwrap();
        assert_eq!(item.quantity, dec!(2.5));
        assert_eq!(item.amount().paise(), 2503);
        assert_eq!(item.rate_money().paise(), 1001);
    }

    #[test]
    fn test_line_item_lenient_numbers() {
        let item = LineItem::new("Sand", "", "abc", "NO").unwrap();
        assert_eq!(item.amount(), Money::zero());
    }

    #[test]
    fn test_quantity_label() {
        let item = LineItem::new("Tiles", "2.50", "1", "BOX").unwrap();
        assert_eq!(item.quantity_label(), "2.5 BOX");

        let mut unitless = LineItem::new("Labour", "3", "100", "").unwrap();
        assert_eq!(unitless.quantity_label(), "3");
        unitless.per = "  HRS ".to_string();
        assert_eq!(unitless.quantity_label(), "3 HRS");
    }

    #[test]
    fn test_bill_data_json_shape() {
        let json = r#"{
            "invoiceNo": "17",
            "date": "2024-08-15",
            "buyerName": "Ravi Traders",
            "buyerAddress1": "Plot 4, GIDC",
            "buyerAddress2": "Kalol"
        }"#;
        let data: BillData = serde_json::from_str(json).unwrap();
        assert_eq!(data.invoice_no, "17");
        assert_eq!(data.date, NaiveDate::from_ymd_opt(2024, 8, 15).unwrap());
        assert_eq!(data.reference, "");
    }

    #[test]
    fn test_line_item_json_accepts_numbers_and_strings() {
        let json = r#"{"description": "Pipe", "quantity": 4, "rate": "12.5"}"#;
        let item: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.quantity, dec!(4));
        assert_eq!(item.rate, dec!(12.5));
        assert_eq!(item.per, "NO");
    }

    #[test]
    fn test_line_item_json_blank_fields_read_as_zero() {
        let json = r#"{"description": "Pipe", "quantity": "", "rate": null, "per": "NO"}"#;
        let item: LineItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.quantity, Decimal::ZERO);
        assert_eq!(item.rate, Decimal::ZERO);
    }

    #[test]
    fn test_company_detail_lines() {
        let company = CompanyProfile::default();
        let lines = company.detail_lines();
        assert_eq!(lines.len(), company.address_lines.len() + 4);
        assert!(lines.contains(&"State Name : Gujarat, Code : 24".to_string()));
    }

    #[test]
    fn test_bank_rows_order() {
        let bank = BankDetails {
            holder_name: "ACME".to_string(),
            ..BankDetails::default()
        };
        let rows = bank.rows();
        assert_eq!(rows[0], ("A/c Holder's Name".to_string(), "ACME".to_string()));
        assert_eq!(rows[4].0, "SWIFT Code");
    }
}
