use sea_orm::{QueryOrder, prelude::*};

use crate::{Donor, EngineError, ResultEngine, donors, util::validate_id};

use super::Engine;

impl Engine {
    /// Register a donor. Returns the (trimmed) donor id.
    pub async fn new_donor(&self, donor: &Donor) -> ResultEngine<String> {
        let donor_id = validate_id(&donor.donor_id, "donor")?;
        if donors::Entity::find_by_id(donor_id.clone())
            .one(&self.database)
            .await?
            .is_some()
        {
            return Err(EngineError::ExistingKey(donor_id));
        }

        let donor = Donor {
            donor_id: donor_id.clone(),
            primary_contact_name: donor.primary_contact_name.trim().to_string(),
            email: donor.email.trim().to_string(),
            ..donor.clone()
        };
        donors::ActiveModel::from(&donor)
            .insert(&self.database)
            .await?;

        tracing::info!("created donor {donor_id}");
        Ok(donor_id)
    }

    pub async fn donor(&self, donor_id: &str) -> ResultEngine<Donor> {
        let donor_id = validate_id(donor_id, "donor")?;
        donors::Entity::find_by_id(donor_id.clone())
            .one(&self.database)
            .await?
            .map(Donor::from)
            .ok_or(EngineError::KeyNotFound(donor_id))
    }

    /// Every donor, ordered by id.
    pub async fn donors(&self) -> ResultEngine<Vec<Donor>> {
        let models = donors::Entity::find()
            .order_by_asc(donors::Column::DonorId)
            .all(&self.database)
            .await?;

        Ok(models.into_iter().map(Donor::from).collect())
    }
}
