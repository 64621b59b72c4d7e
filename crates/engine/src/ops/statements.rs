use std::collections::BTreeMap;

use crate::{
    DesignationAmount, Donation, DonationRecord, DonorStatement, ResultEngine, designation_breakdown,
    statements::build_statement,
};

use super::Engine;

impl Engine {
    /// Annual statement data of a donor.
    ///
    /// Fails with `KeyNotFound` for an unknown donor; `Ok(None)` means the
    /// donor gave nothing that year.
    pub async fn donor_statement(
        &self,
        donor_id: &str,
        year: i32,
    ) -> ResultEngine<Option<DonorStatement>> {
        let donor = self.donor(donor_id).await?;
        let records: Vec<_> = self
            .donations_for_donor_year(&donor.donor_id, year)
            .await?
            .iter()
            .map(Donation::record)
            .collect();
        let statement = build_statement(&donor, year, &records);
        if statement.is_none() {
            tracing::debug!("no donations for donor {} in {year}", donor.donor_id);
        }
        Ok(statement)
    }

    /// Statement data of every donor who gave during `year`, ordered by
    /// donor id.
    pub async fn year_end_statements(&self, year: i32) -> ResultEngine<Vec<DonorStatement>> {
        let mut by_donor: BTreeMap<String, Vec<DonationRecord>> = BTreeMap::new();
        for donation in self.donations_in_year(year).await? {
            by_donor
                .entry(donation.donor_id.clone())
                .or_default()
                .push(donation.record());
        }

        let statements: Vec<_> = self
            .donors()
            .await?
            .iter()
            .filter_map(|donor| {
                let records = by_donor.get(&donor.donor_id)?;
                build_statement(donor, year, records)
            })
            .collect();

        tracing::info!("assembled {} year-end statements for {year}", statements.len());
        Ok(statements)
    }

    /// Totals by designation over all stored donations.
    pub async fn funds_by_designation(&self) -> ResultEngine<Vec<DesignationAmount>> {
        Ok(designation_breakdown(&self.donation_records().await?))
    }
}
