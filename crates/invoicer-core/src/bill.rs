//! # Bill
//!
//! A bill header plus its rows of goods, with the edits the form performs
//! and the totals printed under the item table.
//!
//! ## Editing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Form Action              Bill Method                 Effect            │
//! │  ───────────              ───────────                 ──────            │
//! │  "+ Add Item" ──────────► add_item() ───────────────► push blank row   │
//! │  Edit cell ─────────────► update_item(i, field, v) ─► set + recompute  │
//! │  "Remove" ──────────────► remove_item(i) ───────────► drop row         │
//! │  Download ──────────────► totals() ─────────────────► qty, ₹, unit     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::{parse_lenient, Money};
use crate::types::{BillData, ItemField, LineItem};
use crate::MAX_BILL_ITEMS;

// =============================================================================
// Bill
// =============================================================================

/// Header and line items of one bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    #[serde(flatten)]
    pub data: BillData,

    #[serde(default)]
    pub items: Vec<LineItem>,
}

impl Bill {
    /// New bill with a single blank row, the way the form opens.
    pub fn new(data: BillData) -> Self {
        Bill {
            data,
            items: vec![LineItem::blank()],
        }
    }

    /// Appends a blank row and returns its index.
    pub fn add_item(&mut self) -> CoreResult<usize> {
        if self.items.len() >= MAX_BILL_ITEMS {
            return Err(CoreError::TooManyItems {
                max: MAX_BILL_ITEMS,
            });
        }

        self.items.push(LineItem::blank());
        Ok(self.items.len() - 1)
    }

    /// Removes the row at `index` and returns it.
    pub fn remove_item(&mut self, index: usize) -> CoreResult<LineItem> {
        if index >= self.items.len() {
            return Err(CoreError::ItemNotFound {
                index,
                len: self.items.len(),
            });
        }

        Ok(self.items.remove(index))
    }

    /// Sets one field of a row from raw form text.
    ///
    /// Quantity and rate are read leniently (blank or invalid → 0). The
    /// row amount is recomputed after every edit, whichever field changed.
    ///
    /// ## Example
    /// ```rust
    /// use invoicer_core::bill::Bill;
    /// use invoicer_core::types::{BillData, ItemField};
    ///
    /// let mut bill = Bill::new(BillData::default());
    /// bill.update_item(0, ItemField::Quantity, "3").unwrap();
    /// bill.update_item(0, ItemField::Rate, "2.99").unwrap();
    /// assert_eq!(bill.items[0].amount().paise(), 897);
    /// ```
    pub fn update_item(&mut self, index: usize, field: ItemField, value: &str) -> CoreResult<()> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(CoreError::ItemNotFound { index, len })?;

        match field {
            ItemField::Description => item.description = value.to_string(),
            ItemField::Quantity => item.quantity = parse_lenient(value),
            ItemField::Rate => item.rate = parse_lenient(value),
            ItemField::Per => item.per = value.to_string(),
        }

        item.recompute_amount(index)
    }

    /// Recomputes every row amount. Used after loading a bill from JSON,
    /// where stored amounts cannot be trusted.
    pub fn recompute_amounts(&mut self) -> CoreResult<()> {
        self.items
            .iter_mut()
            .enumerate()
            .try_for_each(|(index, item)| item.recompute_amount(index))
    }

    /// Totals for the table footer and the amount-in-words line.
    pub fn totals(&self) -> CoreResult<BillTotals> {
        BillTotals::of(&self.items)
    }
}

impl Default for Bill {
    fn default() -> Self {
        Bill::new(BillData::default())
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Sums over all rows of a bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillTotals {
    #[ts(as = "String")]
    pub total_quantity: Decimal,

    pub total_amount: Money,

    /// The shared unit when every non-blank `per` is the same, else `None`.
    pub unit: Option<String>,
}

impl BillTotals {
    /// Computes totals for a slice of rows.
    ///
    /// ## Unit Rule
    /// ```text
    /// per: ["KG", " KG ", ""]   → Some("KG")   one distinct unit
    /// per: ["KG", "BOX"]        → None         mixed units, no label
    /// per: ["", ""]             → None         nothing to show
    /// ```
    ///
    /// Fails with [`CoreError::TotalOverflow`] when the rows fit one by one
    /// but their sum does not.
    pub fn of(items: &[LineItem]) -> CoreResult<Self> {
        let total_quantity = items
            .iter()
            .try_fold(Decimal::ZERO, |total, item| total.checked_add(item.quantity))
            .ok_or(CoreError::TotalOverflow { field: "quantity" })?;

        let total_amount = items
            .iter()
            .try_fold(Money::zero(), |total, item| total.checked_add(item.amount()))
            .ok_or(CoreError::TotalOverflow { field: "amount" })?;

        let mut units = items
            .iter()
            .map(|item| item.per.trim())
            .filter(|per| !per.is_empty());
        let unit = match units.next() {
            Some(first) if units.all(|per| per == first) => Some(first.to_string()),
            _ => None,
        };

        Ok(BillTotals {
            total_quantity,
            total_amount,
            unit,
        })
    }

    /// "12.5 KG" when there is a shared unit, "12.5" otherwise.
    pub fn quantity_label(&self) -> String {
        match &self.unit {
            Some(unit) => format!("{} {}", self.total_quantity.normalize(), unit),
            None => self.total_quantity.normalize().to_string(),
        }
    }

    /// Amount-in-words phrase for the total.
    pub fn amount_in_words(&self) -> String {
        self.total_amount.to_words()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(description: &str, qty: &str, rate: &str, per: &str) -> LineItem {
        LineItem::new(description, qty, rate, per).unwrap()
    }

    #[test]
    fn test_new_bill_has_one_blank_row() {
        let bill = Bill::default();
        assert_eq!(bill.items.len(), 1);
        assert_eq!(bill.items[0], LineItem::blank());
    }

    #[test]
    fn test_add_and_remove_items() {
        let mut bill = Bill::default();
        assert_eq!(bill.add_item().unwrap(), 1);
        assert_eq!(bill.items.len(), 2);

        bill.remove_item(0).unwrap();
        assert_eq!(bill.items.len(), 1);

        let err = bill.remove_item(5).unwrap_err();
        assert!(matches!(err, CoreError::ItemNotFound { index: 5, len: 1 }));
    }

    #[test]
    fn test_add_item_respects_cap() {
        let mut bill = Bill::default();
        bill.items = vec![LineItem::blank(); MAX_BILL_ITEMS];
        assert!(matches!(
            bill.add_item(),
            Err(CoreError::TooManyItems { .. })
        ));
    }

    #[test]
    fn test_update_recomputes_amount() {
        let mut bill = Bill::default();
        bill.update_item(0, ItemField::Rate, "150").unwrap();
        assert_eq!(bill.items[0].amount(), Money::zero());

        bill.update_item(0, ItemField::Quantity, "2.5").unwrap();
        assert_eq!(bill.items[0].amount().paise(), 37_500);

        // Clearing a numeric field zeroes it
        bill.update_item(0, ItemField::Quantity, "").unwrap();
        assert_eq!(bill.items[0].amount(), Money::zero());

        bill.update_item(0, ItemField::Description, "Steel Rod").unwrap();
        bill.update_item(0, ItemField::Per, "KG").unwrap();
        assert_eq!(bill.items[0].description, "Steel Rod");
        assert_eq!(bill.items[0].per, "KG");
    }

    #[test]
    fn test_update_unknown_row() {
        let mut bill = Bill::default();
        assert!(bill.update_item(3, ItemField::Rate, "1").is_err());
    }

    #[test]
    fn test_recompute_amounts_fixes_stale_values() {
        let mut bill = Bill::default();
        bill.items = vec![item("Pipe", "4", "12.5", "NO")];
        bill.items[0].amount_paise = 1;
        bill.recompute_amounts().unwrap();
        assert_eq!(bill.items[0].amount_paise, 5000);
    }

    #[test]
    fn test_totals_single_unit() {
        let items = vec![
            item("Rice", "10", "52", "KG"),
            item("Dal", "2.5", "110", " KG "),
            item("Bag", "1", "5", ""),
        ];
        let totals = BillTotals::of(&items).unwrap();
        assert_eq!(totals.total_quantity, dec!(13.5));
        assert_eq!(totals.total_amount.paise(), 52_000 + 27_500 + 500);
        assert_eq!(totals.unit.as_deref(), Some("KG"));
        assert_eq!(totals.quantity_label(), "13.5 KG");
    }

    #[test]
    fn test_totals_mixed_units() {
        let items = vec![item("Rice", "10", "52", "KG"), item("Box", "1", "5", "BOX")];
        let totals = BillTotals::of(&items).unwrap();
        assert_eq!(totals.unit, None);
        assert_eq!(totals.quantity_label(), "11");
    }

    #[test]
    fn test_totals_empty() {
        let totals = BillTotals::of(&[]).unwrap();
        assert_eq!(totals.total_amount, Money::zero());
        assert_eq!(totals.unit, None);
        assert_eq!(totals.amount_in_words(), "INR Zero Only");
    }

    #[test]
    fn test_bill_json_roundtrip_shape() {
        let json = r#"{
            "invoiceNo": "17",
            "date": "2024-08-15",
            "buyerName": "Ravi Traders",
            "buyerAddress1": "Plot 4",
            "buyerAddress2": "Kalol",
            "items": [{"description": "Pipe", "quantity": "4", "rate": "12.5", "per": "NO"}]
        }"#;
        let mut bill: Bill = serde_json::from_str(json).unwrap();
        bill.recompute_amounts().unwrap();
        assert_eq!(bill.data.invoice_no, "17");
        let totals = bill.totals().unwrap();
        assert_eq!(totals.total_amount.paise(), 5000);
        assert_eq!(totals.amount_in_words(), "INR Fifty Only");
    }

    #[test]
    fn test_totals_quantity_overflow() {
        // Each row is fine on its own (zero rate, zero amount)
        let mut bill = Bill::default();
        bill.items = vec![
            item("Sand", "70000000000000000000000000000", "0", "KG"),
            item("Sand", "70000000000000000000000000000", "0", "KG"),
        ];
        bill.recompute_amounts().unwrap();

        assert!(matches!(
            bill.totals(),
            Err(CoreError::TotalOverflow { field: "quantity" })
        ));
    }

    #[test]
    fn test_totals_amount_overflow() {
        let mut bill = Bill::default();
        bill.items = vec![
            item("Gold", "90000000000000000", "1", "NO"),
            item("Gold", "90000000000000000", "1", "NO"),
        ];
        bill.recompute_amounts().unwrap();
        assert_eq!(bill.items[0].amount_paise, 9_000_000_000_000_000_000);

        assert!(matches!(
            bill.totals(),
            Err(CoreError::TotalOverflow { field: "amount" })
        ));
    }
}
