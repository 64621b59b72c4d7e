use sea_orm::{QueryFilter, QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{
    Donation, DonationRecord, EngineError, NewDonation, ResultEngine, donations, donors,
    donations::resolve_designation,
    money,
    receipts::receipt_id,
    util::{normalize_optional_text, validate_id, year_bounds},
};

use super::Engine;

impl Engine {
    /// Store a donation. Returns its id.
    ///
    /// The amount is validated strictly and stored as its normalized decimal
    /// text, so the donation table only ever holds exact two-digit amounts.
    pub async fn new_donation(&self, donation: NewDonation) -> ResultEngine<String> {
        let donation_id = match donation.donation_id.as_deref() {
            Some(id) => validate_id(id, "donation")?,
            None => Uuid::new_v4().to_string(),
        };
        let donor_id = validate_id(&donation.donor_id, "donor")?;
        let amount = money::normalize(&donation.amount)?;
        if amount.is_sign_negative() || amount.is_zero() {
            tracing::warn!("donation {donation_id} has non-positive amount {amount}");
        }

        if donors::Entity::find_by_id(donor_id.clone())
            .one(&self.database)
            .await?
            .is_none()
        {
            return Err(EngineError::KeyNotFound(donor_id));
        }
        if donations::Entity::find_by_id(donation_id.clone())
            .one(&self.database)
            .await?
            .is_some()
        {
            return Err(EngineError::ExistingKey(donation_id));
        }

        let receipt_id = normalize_optional_text(donation.receipt_id.as_deref())
            .unwrap_or_else(|| receipt_id(&donation_id));
        let stored = Donation {
            donation_id: donation_id.clone(),
            donor_id,
            receipt_id,
            received_at: donation.received_at,
            amount: amount.to_string(),
            designation: resolve_designation(donation.designation.as_deref()),
            restricted: donation.restricted,
            method: normalize_optional_text(donation.method.as_deref()),
            source: normalize_optional_text(donation.source.as_deref()),
            soft_credit_to: normalize_optional_text(donation.soft_credit_to.as_deref()),
        };
        donations::ActiveModel::from(&stored)
            .insert(&self.database)
            .await?;

        tracing::info!(
            "stored donation {donation_id} of {amount} to {}",
            stored.designation
        );
        Ok(donation_id)
    }

    pub async fn donation(&self, donation_id: &str) -> ResultEngine<Donation> {
        let donation_id = validate_id(donation_id, "donation")?;
        donations::Entity::find_by_id(donation_id.clone())
            .one(&self.database)
            .await?
            .map(Donation::from)
            .ok_or(EngineError::KeyNotFound(donation_id))
    }

    /// Every stored donation, oldest first.
    pub async fn donations(&self) -> ResultEngine<Vec<Donation>> {
        let models = donations::Entity::find()
            .order_by_asc(donations::Column::ReceivedAt)
            .order_by_asc(donations::Column::DonationId)
            .all(&self.database)
            .await?;

        Ok(models.into_iter().map(Donation::from).collect())
    }

    /// Snapshot of every stored donation, oldest first.
    ///
    /// This is the primary source of a reconciliation run.
    pub async fn donation_records(&self) -> ResultEngine<Vec<DonationRecord>> {
        Ok(self.donations().await?.iter().map(Donation::record).collect())
    }

    pub async fn donation_count(&self) -> ResultEngine<u64> {
        Ok(donations::Entity::find().count(&self.database).await?)
    }

    /// Donations of `donor_id` received during `year` (UTC).
    pub async fn donations_for_donor_year(
        &self,
        donor_id: &str,
        year: i32,
    ) -> ResultEngine<Vec<Donation>> {
        let donor_id = validate_id(donor_id, "donor")?;
        let (start, end) = year_bounds(year)?;
        let models = donations::Entity::find()
            .filter(donations::Column::DonorId.eq(donor_id))
            .filter(donations::Column::ReceivedAt.gte(start))
            .filter(donations::Column::ReceivedAt.lt(end))
            .order_by_asc(donations::Column::ReceivedAt)
            .order_by_asc(donations::Column::DonationId)
            .all(&self.database)
            .await?;

        Ok(models.into_iter().map(Donation::from).collect())
    }

    /// Every donation received during `year` (UTC), ordered by donor, then
    /// date.
    pub(crate) async fn donations_in_year(&self, year: i32) -> ResultEngine<Vec<Donation>> {
        let (start, end) = year_bounds(year)?;
        let models = donations::Entity::find()
            .filter(donations::Column::ReceivedAt.gte(start))
            .filter(donations::Column::ReceivedAt.lt(end))
            .order_by_asc(donations::Column::DonorId)
            .order_by_asc(donations::Column::ReceivedAt)
            .order_by_asc(donations::Column::DonationId)
            .all(&self.database)
            .await?;

        Ok(models.into_iter().map(Donation::from).collect())
    }
}
