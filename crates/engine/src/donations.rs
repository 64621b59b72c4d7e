//! The module contains `Donation`, the `DonationRecord` the aggregation code
//! works on, and the `donations` table entity.

use chrono::{DateTime, Utc};
use sea_orm::entity::{ActiveValue, prelude::*};

use crate::RawAmount;

/// Designation used for donations without one.
pub const GENERAL_FUND: &str = "General Fund";

/// Resolve the designation of a donation.
///
/// A missing or blank designation is [`GENERAL_FUND`]. Any other value is
/// kept verbatim, so `"Education "` and `"Education"` stay distinct.
pub fn resolve_designation(designation: Option<&str>) -> String {
    designation
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(GENERAL_FUND)
        .to_string()
}

/// The part of a donation that takes part in aggregation.
///
/// Records are read-only snapshots. The designation is resolved when the
/// record is built; the amount is kept raw so every consumer applies its own
/// normalization policy (strict for reconciliation, lenient for documents).
#[derive(Clone, Debug, PartialEq)]
pub struct DonationRecord {
    pub amount: RawAmount,
    pub designation: String,
}

impl DonationRecord {
    pub fn new(amount: impl Into<RawAmount>, designation: Option<&str>) -> Self {
        Self {
            amount: amount.into(),
            designation: resolve_designation(designation),
        }
    }
}

/// A stored gift.
#[derive(Clone, Debug, PartialEq)]
pub struct Donation {
    pub donation_id: String,
    pub donor_id: String,
    pub receipt_id: String,
    pub received_at: DateTime<Utc>,
    /// Exact amount as stored; normalized on write, so it is usually a
    /// two-digit decimal string.
    pub amount: String,
    /// Resolved designation (never empty).
    pub designation: String,
    pub restricted: bool,
    pub method: Option<String>,
    pub source: Option<String>,
    pub soft_credit_to: Option<String>,
}

impl Donation {
    pub fn record(&self) -> DonationRecord {
        DonationRecord::new(self.amount.as_str(), Some(&self.designation))
    }
}

/// Input for [`Engine::new_donation`](crate::Engine::new_donation).
#[derive(Clone, Debug)]
pub struct NewDonation {
    /// Generated when absent.
    pub donation_id: Option<String>,
    pub donor_id: String,
    /// Defaults to `RCPT-{donation_id}`.
    pub receipt_id: Option<String>,
    pub received_at: DateTime<Utc>,
    pub amount: RawAmount,
    pub designation: Option<String>,
    pub restricted: bool,
    pub method: Option<String>,
    pub source: Option<String>,
    pub soft_credit_to: Option<String>,
}

impl NewDonation {
    /// Minimal donation, received now.
    pub fn new(donor_id: &str, amount: impl Into<RawAmount>) -> Self {
        Self {
            donation_id: None,
            donor_id: donor_id.to_string(),
            receipt_id: None,
            received_at: Utc::now(),
            amount: amount.into(),
            designation: None,
            restricted: false,
            method: None,
            source: None,
            soft_credit_to: None,
        }
    }

    pub fn designation(mut self, designation: &str) -> Self {
        self.designation = Some(designation.to_string());
        self
    }

    pub fn received_at(mut self, received_at: DateTime<Utc>) -> Self {
        self.received_at = received_at;
        self
    }

    pub fn id(mut self, donation_id: &str) -> Self {
        self.donation_id = Some(donation_id.to_string());
        self
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "donations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub donation_id: String,
    pub donor_id: String,
    pub receipt_id: String,
    pub received_at: DateTimeUtc,
    pub amount: String,
    pub designation: Option<String>,
    pub restricted: bool,
    pub method: Option<String>,
    pub source: Option<String>,
    pub soft_credit_to: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::donors::Entity",
        from = "Column::DonorId",
        to = "super::donors::Column::DonorId",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Donor,
}

impl Related<super::donors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Donor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Model> for DonationRecord {
    fn from(value: &Model) -> Self {
        DonationRecord::new(value.amount.as_str(), value.designation.as_deref())
    }
}

impl From<Model> for Donation {
    fn from(value: Model) -> Self {
        Self {
            designation: resolve_designation(value.designation.as_deref()),
            donation_id: value.donation_id,
            donor_id: value.donor_id,
            receipt_id: value.receipt_id,
            received_at: value.received_at,
            amount: value.amount,
            restricted: value.restricted,
            method: value.method,
            source: value.source,
            soft_credit_to: value.soft_credit_to,
        }
    }
}

impl From<&Donation> for ActiveModel {
    fn from(value: &Donation) -> Self {
        Self {
            donation_id: ActiveValue::Set(value.donation_id.clone()),
            donor_id: ActiveValue::Set(value.donor_id.clone()),
            receipt_id: ActiveValue::Set(value.receipt_id.clone()),
            received_at: ActiveValue::Set(value.received_at),
            amount: ActiveValue::Set(value.amount.clone()),
            designation: ActiveValue::Set(Some(value.designation.clone())),
            restricted: ActiveValue::Set(value.restricted),
            method: ActiveValue::Set(value.method.clone()),
            source: ActiveValue::Set(value.source.clone()),
            soft_credit_to: ActiveValue::Set(value.soft_credit_to.clone()),
        }
    }
}
