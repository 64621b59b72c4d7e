//! Per-designation rollup of donation amounts.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    DonationRecord, EngineError, ResultEngine,
    money::{self, normalize},
};

/// Subtotals by designation plus the grand total of one donation source.
///
/// Every value has exactly two fractional digits and `by_designation` is kept
/// in lexicographic order. Amounts are serialized as fixed strings
/// (`"150.00"`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DesignationTotals {
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    pub by_designation: BTreeMap<String, Decimal>,
    /// Records left out because their amount could not be normalized.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub rejected: usize,
}

fn is_zero(value: &usize) -> bool {
    *value == 0
}

impl Default for DesignationTotals {
    fn default() -> Self {
        Self {
            total: money::zero(),
            by_designation: BTreeMap::new(),
            rejected: 0,
        }
    }
}

impl DesignationTotals {
    /// `false` when at least one record was rejected, i.e. the total does not
    /// cover the whole source.
    pub fn is_complete(&self) -> bool {
        self.rejected == 0
    }

    /// Sum of the subtotals. Equals `total` for any rollup.
    pub fn subtotal_sum(&self) -> Decimal {
        self.by_designation
            .values()
            .fold(money::zero(), |acc, value| acc + *value)
    }
}

/// Group `records` by designation and sum their amounts.
///
/// Additions are exact decimal additions on already-rounded amounts, so the
/// subtotals always add up to the total. A record whose amount cannot be
/// normalized is skipped and counted in [`DesignationTotals::rejected`].
///
/// Fails only if a sum overflows the decimal range.
pub fn rollup(records: &[DonationRecord]) -> ResultEngine<DesignationTotals> {
    let overflow = || EngineError::InvalidAmount("donation total overflow".to_string());
    let mut totals = DesignationTotals::default();

    for record in records {
        let amount = match normalize(&record.amount) {
            Ok(amount) => amount,
            Err(err) => {
                tracing::warn!(
                    designation = %record.designation,
                    "skipping donation with amount {}: {err}",
                    record.amount
                );
                totals.rejected += 1;
                continue;
            }
        };

        let subtotal = totals
            .by_designation
            .entry(record.designation.clone())
            .or_insert_with(money::zero);
        *subtotal = subtotal.checked_add(amount).ok_or_else(overflow)?;
        totals.total = totals.total.checked_add(amount).ok_or_else(overflow)?;
    }

    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GENERAL_FUND, RawAmount};

    fn record(amount: impl Into<RawAmount>, designation: &str) -> DonationRecord {
        DonationRecord::new(amount, Some(designation))
    }

    fn totals_json(totals: &DesignationTotals) -> serde_json::Value {
        serde_json::to_value(totals).unwrap()
    }

    #[test]
    fn empty_input() {
        let totals = rollup(&[]).unwrap();

        assert_eq!(
            totals_json(&totals),
            serde_json::json!({"total": "0.00", "by_designation": {}})
        );
    }

    #[test]
    fn groups_by_designation() {
        let records = vec![
            record(100.0, "Education"),
            record(50.0, "Education"),
            record(25.0, ""),
        ];
        let totals = rollup(&records).unwrap();

        assert_eq!(
            totals_json(&totals),
            serde_json::json!({
                "total": "175.00",
                "by_designation": {"Education": "150.00", GENERAL_FUND: "25.00"}
            })
        );
    }

    #[test]
    fn designations_are_not_trimmed() {
        let records = vec![record("10", "Education"), record("5", "Education ")];
        let totals = rollup(&records).unwrap();

        let keys: Vec<_> = totals.by_designation.keys().cloned().collect();
        assert_eq!(keys, vec!["Education", "Education "]);
        assert_eq!(totals.total.to_string(), "15.00");
    }

    #[test]
    fn keys_are_sorted() {
        let records = vec![
            record("1", "Zoo"),
            record("1", "Art"),
            record("1", "Meals"),
        ];
        let totals = rollup(&records).unwrap();
        let keys: Vec<_> = totals.by_designation.keys().cloned().collect();

        assert_eq!(keys, vec!["Art", "Meals", "Zoo"]);
    }

    #[test]
    fn subtotals_sum_to_total() {
        let records = vec![
            record(0.1, "A"),
            record(0.2, "B"),
            record(10.005, "A"),
            record("3.333", "C"),
            record(-1.25, "B"),
            record(RawAmount::Missing, "C"),
        ];
        let totals = rollup(&records).unwrap();

        assert_eq!(totals.subtotal_sum(), totals.total);
        assert_eq!(money::format_money(totals.total), "12.39");
    }

    #[test]
    fn malformed_amounts_are_rejected() {
        let records = vec![record("20", "A"), record("twenty", "A")];
        let totals = rollup(&records).unwrap();

        assert_eq!(totals.rejected, 1);
        assert!(!totals.is_complete());
        assert_eq!(money::format_money(totals.total), "20.00");
        assert_eq!(totals.subtotal_sum(), totals.total);
        assert_eq!(totals_json(&totals)["rejected"], 1);
    }

    #[test]
    fn deserializes_what_it_serializes() {
        let totals = rollup(&[record("7.5", "A")]).unwrap();
        let json = serde_json::to_string(&totals).unwrap();

        assert_eq!(
            serde_json::from_str::<DesignationTotals>(&json).unwrap(),
            totals
        );
    }
}
