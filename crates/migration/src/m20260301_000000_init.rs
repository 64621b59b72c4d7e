//! Initial schema migration.
//!
//! - `donors`: people and organisations giving to the charity
//! - `donations`: individual gifts, one row per receipt

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Donors {
    Table,
    DonorId,
    PrimaryContactName,
    Email,
    Phone,
    StreetAddress,
    City,
    State,
    ZipCode,
    Country,
    DonorType,
    FirstDonationDate,
}

#[derive(Iden)]
enum Donations {
    Table,
    DonationId,
    DonorId,
    ReceiptId,
    ReceivedAt,
    Amount,
    Designation,
    Restricted,
    Method,
    Source,
    SoftCreditTo,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Donors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Donors::DonorId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Donors::PrimaryContactName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Donors::Email).string().not_null())
                    .col(ColumnDef::new(Donors::Phone).string())
                    .col(ColumnDef::new(Donors::StreetAddress).string())
                    .col(ColumnDef::new(Donors::City).string())
                    .col(ColumnDef::new(Donors::State).string())
                    .col(ColumnDef::new(Donors::ZipCode).string())
                    .col(ColumnDef::new(Donors::Country).string())
                    .col(ColumnDef::new(Donors::DonorType).string())
                    .col(ColumnDef::new(Donors::FirstDonationDate).date())
                    .to_owned(),
            )
            .await?;

        // Amounts are kept as decimal text: REAL would lose exactness.
        manager
            .create_table(
                Table::create()
                    .table(Donations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Donations::DonationId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Donations::DonorId).string().not_null())
                    .col(ColumnDef::new(Donations::ReceiptId).string().not_null())
                    .col(
                        ColumnDef::new(Donations::ReceivedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Donations::Amount).string().not_null())
                    .col(ColumnDef::new(Donations::Designation).string())
                    .col(
                        ColumnDef::new(Donations::Restricted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Donations::Method).string())
                    .col(ColumnDef::new(Donations::Source).string())
                    .col(ColumnDef::new(Donations::SoftCreditTo).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-donations-donor_id")
                            .from(Donations::Table, Donations::DonorId)
                            .to(Donors::Table, Donors::DonorId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-donations-donor_id-received_at")
                    .table(Donations::Table)
                    .col(Donations::DonorId)
                    .col(Donations::ReceivedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Donations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Donors::Table).to_owned())
            .await?;
        Ok(())
    }
}
