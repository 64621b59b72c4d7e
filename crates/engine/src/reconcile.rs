//! Dual-source reconciliation.
//!
//! The primary source is the donation table; the secondary source is an
//! out-of-band import (see [`SecondarySource`](crate::SecondarySource)). Both
//! are rolled up independently and compared on their grand totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    DonationRecord, ResultEngine,
    money::round_money,
    rollup::{DesignationTotals, rollup},
};

/// Result of one reconciliation run.
///
/// On disk and on the wire the primary rollup is named `square` and the
/// secondary one `internal`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    #[serde(rename = "square")]
    pub primary: DesignationTotals,
    #[serde(rename = "internal")]
    pub secondary: DesignationTotals,
    /// `primary.total - secondary.total`, or `None` when either total is
    /// unusable.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub variance_total: Option<Decimal>,
}

/// Roll up both sources and compute the variance of their totals.
///
/// An incomplete rollup (rejected amounts) degrades `variance_total` to
/// `None`; it never fails the report.
pub fn reconcile(
    primary: &[DonationRecord],
    secondary: &[DonationRecord],
) -> ResultEngine<ReconciliationReport> {
    let primary = rollup(primary)?;
    let secondary = rollup(secondary)?;
    let variance_total = variance(&primary, &secondary);

    Ok(ReconciliationReport {
        primary,
        secondary,
        variance_total,
    })
}

fn variance(primary: &DesignationTotals, secondary: &DesignationTotals) -> Option<Decimal> {
    if !primary.is_complete() || !secondary.is_complete() {
        tracing::warn!(
            primary_rejected = primary.rejected,
            secondary_rejected = secondary.rejected,
            "variance not computed: a source total is incomplete"
        );
        return None;
    }

    match primary.total.checked_sub(secondary.total) {
        Some(value) => Some(round_money(value)),
        None => {
            tracing::warn!("variance not computed: subtraction overflow");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::format_money;

    #[test]
    fn empty_sources() {
        let report = reconcile(&[], &[]).unwrap();

        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            serde_json::json!({
                "square": {"total": "0.00", "by_designation": {}},
                "internal": {"total": "0.00", "by_designation": {}},
                "variance_total": "0.00"
            })
        );
    }

    #[test]
    fn empty_secondary_variance_is_primary_total() {
        let primary = vec![
            DonationRecord::new(100.0, Some("Education")),
            DonationRecord::new(50.0, Some("Education")),
            DonationRecord::new(25.0, Some("")),
        ];
        let report = reconcile(&primary, &[]).unwrap();

        assert_eq!(format_money(report.primary.total), "175.00");
        assert_eq!(
            serde_json::to_value(&report.primary.by_designation).unwrap(),
            serde_json::json!({"Education": "150.00", "General Fund": "25.00"})
        );
        assert_eq!(
            serde_json::to_value(&report).unwrap()["variance_total"],
            "175.00"
        );
    }

    #[test]
    fn variance_is_primary_minus_secondary() {
        let primary = vec![DonationRecord::new("40.10", Some("Meals"))];
        let secondary = vec![
            DonationRecord::new("30", Some("Meals")),
            DonationRecord::new("20.05", None),
        ];
        let report = reconcile(&primary, &secondary).unwrap();

        assert_eq!(report.variance_total, Some(Decimal::new(-995, 2)));
        assert_eq!(
            report.variance_total,
            Some(report.primary.total - report.secondary.total)
        );
    }

    #[test]
    fn rejected_amount_degrades_variance_only() {
        let primary = vec![
            DonationRecord::new("10", Some("A")),
            DonationRecord::new("1O.00", Some("A")),
        ];
        let secondary = vec![DonationRecord::new("10", Some("A"))];
        let report = reconcile(&primary, &secondary).unwrap();

        assert_eq!(report.variance_total, None);
        assert_eq!(format_money(report.primary.total), "10.00");
        assert_eq!(format_money(report.secondary.total), "10.00");

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["variance_total"].is_null());
        assert_eq!(json["square"]["rejected"], 1);
    }

    #[test]
    fn report_deserializes_from_its_json() {
        let report = reconcile(&[DonationRecord::new(1.0, None)], &[]).unwrap();
        let json = serde_json::to_string_pretty(&report).unwrap();

        assert_eq!(
            serde_json::from_str::<ReconciliationReport>(&json).unwrap(),
            report
        );
    }
}
