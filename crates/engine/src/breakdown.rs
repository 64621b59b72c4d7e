//! Designation breakdown for receipts, statements and reviewer metrics.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};

use crate::{DonationRecord, money};

/// Total given to one designation, as a plain number.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DesignationAmount {
    pub designation: String,
    pub amount: f64,
}

/// One entry per distinct designation, ordered by designation name.
///
/// Malformed amounts count as zero. Amounts are accumulated exactly and only
/// converted to `f64` on output.
pub fn designation_breakdown(records: &[DonationRecord]) -> Vec<DesignationAmount> {
    let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();
    for record in records {
        let amount = money::normalize_or_zero(&record.amount);
        let entry = totals
            .entry(record.designation.as_str())
            .or_insert(Decimal::ZERO);
        *entry = entry.saturating_add(amount);
    }

    totals
        .into_iter()
        .map(|(designation, amount)| DesignationAmount {
            designation: designation.to_string(),
            amount: amount.to_f64().unwrap_or_default(),
        })
        .collect()
}
