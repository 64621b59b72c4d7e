//! Donors table and the `Donor` struct.

use chrono::NaiveDate;
use sea_orm::entity::{ActiveValue, prelude::*};

/// Name used on documents when a donor has no contact name.
pub const DEFAULT_DONOR_NAME: &str = "Donor";

/// A donor.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Donor {
    pub donor_id: String,
    pub primary_contact_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub donor_type: Option<String>,
    pub first_donation_date: Option<NaiveDate>,
}

impl Donor {
    pub fn new(donor_id: &str, primary_contact_name: &str, email: &str) -> Self {
        Self {
            donor_id: donor_id.to_string(),
            primary_contact_name: primary_contact_name.to_string(),
            email: email.to_string(),
            ..Default::default()
        }
    }

    /// Name to print on receipts and statements.
    pub fn display_name(&self) -> &str {
        let name = self.primary_contact_name.trim();
        if name.is_empty() {
            DEFAULT_DONOR_NAME
        } else {
            name
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "donors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub donor_id: String,
    pub primary_contact_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    pub donor_type: Option<String>,
    pub first_donation_date: Option<Date>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::donations::Entity")]
    Donations,
}

impl Related<super::donations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Donations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Donor {
    fn from(value: Model) -> Self {
        Self {
            donor_id: value.donor_id,
            primary_contact_name: value.primary_contact_name,
            email: value.email,
            phone: value.phone,
            street_address: value.street_address,
            city: value.city,
            state: value.state,
            zip_code: value.zip_code,
            country: value.country,
            donor_type: value.donor_type,
            first_donation_date: value.first_donation_date,
        }
    }
}

impl From<&Donor> for ActiveModel {
    fn from(value: &Donor) -> Self {
        Self {
            donor_id: ActiveValue::Set(value.donor_id.clone()),
            primary_contact_name: ActiveValue::Set(value.primary_contact_name.clone()),
            email: ActiveValue::Set(value.email.clone()),
            phone: ActiveValue::Set(value.phone.clone()),
            street_address: ActiveValue::Set(value.street_address.clone()),
            city: ActiveValue::Set(value.city.clone()),
            state: ActiveValue::Set(value.state.clone()),
            zip_code: ActiveValue::Set(value.zip_code.clone()),
            country: ActiveValue::Set(value.country.clone()),
            donor_type: ActiveValue::Set(value.donor_type.clone()),
            first_donation_date: ActiveValue::Set(value.first_donation_date),
        }
    }
}
