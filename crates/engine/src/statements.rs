//! Annual giving statement data.
//!
//! Rendering (PDF) and delivery (email) happen outside the engine; this
//! module only assembles what goes on the statement.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    DesignationAmount, DonationRecord, Donor, designation_breakdown,
    money::{self, normalize_or_zero},
};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DonorStatement {
    /// `YEAR-{year}-{donor_id}`
    pub statement_id: String,
    pub donor_id: String,
    pub donor_name: String,
    pub email: String,
    pub year: i32,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    pub donation_count: usize,
    pub line_items: Vec<DesignationAmount>,
}

pub fn statement_id(year: i32, donor_id: &str) -> String {
    format!("YEAR-{year}-{donor_id}")
}

/// Build the statement of `donor` for `year` out of that year's records.
///
/// Returns `None` when there is nothing to report.
pub fn build_statement(
    donor: &Donor,
    year: i32,
    records: &[DonationRecord],
) -> Option<DonorStatement> {
    if records.is_empty() {
        return None;
    }

    let total = records
        .iter()
        .fold(money::zero(), |acc, record| {
            acc.saturating_add(normalize_or_zero(&record.amount))
        });

    Some(DonorStatement {
        statement_id: statement_id(year, &donor.donor_id),
        donor_id: donor.donor_id.clone(),
        donor_name: donor.display_name().to_string(),
        email: donor.email.clone(),
        year,
        total: money::round_money(total),
        donation_count: records.len(),
        line_items: designation_breakdown(records),
    })
}
