use crate::{DonationReceipt, Donor, ResultEngine, donors, receipts::build_receipt};

use sea_orm::EntityTrait;

use super::Engine;

impl Engine {
    /// Receipt data of one donation.
    ///
    /// A donation whose donor row is gone still gets a receipt, addressed to
    /// the default donor name with no email.
    pub async fn donation_receipt(&self, donation_id: &str) -> ResultEngine<DonationReceipt> {
        let donation = self.donation(donation_id).await?;
        let donor = donors::Entity::find_by_id(donation.donor_id.clone())
            .one(&self.database)
            .await?
            .map(Donor::from)
            .unwrap_or_default();

        tracing::debug!("built receipt data for donation {}", donation.donation_id);
        Ok(build_receipt(&donation, &donor))
    }
}
