//! Receipt data for a single donation.
//!
//! Like statements, rendering and delivery happen elsewhere.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    DesignationAmount, Donation, Donor, designation_breakdown,
    money::normalize_or_zero,
};

/// Payment method printed when a donation has none.
pub const DEFAULT_PAYMENT_METHOD: &str = "Square";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DonationReceipt {
    pub receipt_id: String,
    pub donation_id: String,
    pub donor_name: String,
    pub email: String,
    /// Day the gift was received (UTC), `YYYY-MM-DD` on the wire.
    pub donation_date: NaiveDate,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub designation: String,
    pub restricted: bool,
    pub payment_method: String,
    pub soft_credit_to: Option<String>,
    pub line_items: Vec<DesignationAmount>,
}

pub fn receipt_id(donation_id: &str) -> String {
    format!("RCPT-{donation_id}")
}

/// Title-case a payment method, `"credit card"` -> `"Credit Card"`.
///
/// Missing or blank methods are [`DEFAULT_PAYMENT_METHOD`].
pub fn payment_method(method: Option<&str>) -> String {
    let Some(method) = method.map(str::trim).filter(|m| !m.is_empty()) else {
        return DEFAULT_PAYMENT_METHOD.to_string();
    };

    let mut previous_alphabetic = false;
    method
        .chars()
        .map(|c| {
            let mapped = if previous_alphabetic {
                c.to_lowercase().collect::<String>()
            } else {
                c.to_uppercase().collect::<String>()
            };
            previous_alphabetic = c.is_alphabetic();
            mapped
        })
        .collect()
}

/// Build the receipt of `donation`.
///
/// The amount uses the lenient policy: a malformed stored amount prints as
/// zero and is logged.
pub fn build_receipt(donation: &Donation, donor: &Donor) -> DonationReceipt {
    let record = donation.record();
    let amount = normalize_or_zero(&record.amount);
    if amount.is_sign_negative() || amount.is_zero() {
        tracing::warn!(
            "receipt for donation {} has non-positive amount {amount}",
            donation.donation_id
        );
    }

    let receipt_id = if donation.receipt_id.trim().is_empty() {
        receipt_id(&donation.donation_id)
    } else {
        donation.receipt_id.clone()
    };

    DonationReceipt {
        receipt_id,
        donation_id: donation.donation_id.clone(),
        donor_name: donor.display_name().to_string(),
        email: donor.email.trim().to_string(),
        donation_date: donation.received_at.date_naive(),
        amount,
        designation: record.designation.clone(),
        restricted: donation.restricted,
        payment_method: payment_method(donation.method.as_deref()),
        soft_credit_to: donation.soft_credit_to.clone(),
        line_items: designation_breakdown(&[record]),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::GENERAL_FUND;

    fn donation(amount: &str, designation: &str) -> Donation {
        Donation {
            donation_id: "don-7".to_string(),
            donor_id: "D1".to_string(),
            receipt_id: String::new(),
            received_at: Utc.with_ymd_and_hms(2024, 11, 30, 23, 15, 0).unwrap(),
            amount: amount.to_string(),
            designation: designation.to_string(),
            restricted: false,
            method: None,
            source: None,
            soft_credit_to: None,
        }
    }

    #[test]
    fn methods() {
        assert_eq!(payment_method(None), "Square");
        assert_eq!(payment_method(Some("  ")), "Square");
        assert_eq!(payment_method(Some("credit card")), "Credit Card");
        assert_eq!(payment_method(Some("ACH")), "Ach");
        assert_eq!(payment_method(Some("pay-pal")), "Pay-Pal");
    }

    #[test]
    fn receipt_defaults() {
        let donor = Donor::new("D1", "", "ada@example.org");
        let receipt = build_receipt(&donation("25.5", ""), &donor);

        assert_eq!(receipt.receipt_id, "RCPT-don-7");
        assert_eq!(receipt.donor_name, "Donor");
        assert_eq!(receipt.designation, GENERAL_FUND);
        assert_eq!(receipt.payment_method, "Square");
        assert_eq!(receipt.amount.to_string(), "25.50");
        assert_eq!(
            receipt.line_items,
            vec![DesignationAmount {
                designation: GENERAL_FUND.to_string(),
                amount: 25.5
            }]
        );

        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["donation_date"], "2024-11-30");
        assert_eq!(json["amount"], "25.50");
    }

    #[test]
    fn malformed_amount_prints_zero() {
        let donor = Donor::new("D1", "Ada", "ada@example.org");
        let mut stored = donation("abc", "Meals");
        stored.receipt_id = "R-1".to_string();
        let receipt = build_receipt(&stored, &donor);

        assert_eq!(receipt.receipt_id, "R-1");
        assert_eq!(receipt.amount.to_string(), "0.00");
        assert_eq!(receipt.line_items[0].amount, 0.0);
    }
}
