//! Secondary donation source.
//!
//! The secondary source is an out-of-band export of the same donations
//! (e.g. the internal spreadsheet). It is optional: when it is not
//! configured, or the file does not exist yet, it is an empty set.

use std::{io, path::PathBuf};

use crate::{DonationRecord, EngineError, RawAmount, ResultEngine};

#[derive(Clone, Debug, Default, PartialEq)]
pub enum SecondarySource {
    #[default]
    None,
    /// CSV file with an `amount` column and an optional `designation` column.
    Csv(PathBuf),
}

impl SecondarySource {
    pub fn load(&self) -> ResultEngine<Vec<DonationRecord>> {
        match self {
            Self::None => Ok(Vec::new()),
            Self::Csv(path) => {
                if !path.exists() {
                    tracing::info!(
                        "secondary source {} not found, using an empty set",
                        path.display()
                    );
                    return Ok(Vec::new());
                }
                let file = std::fs::File::open(path)?;
                records_from_csv(file)
            }
        }
    }
}

/// Read donation records from CSV.
///
/// Headers are matched case-insensitively. Amount cells stay text, so a
/// malformed cell shows up as a rejected amount in the rollup rather than as
/// an import failure.
pub fn records_from_csv<R: io::Read>(reader: R) -> ResultEngine<Vec<DonationRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers().map_err(import_error)?.clone();
    let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    let amount_idx = column("amount")
        .ok_or_else(|| EngineError::Import("missing 'amount' column".to_string()))?;
    let designation_idx = column("designation");

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(import_error)?;
        let amount = row
            .get(amount_idx)
            .map_or(RawAmount::Missing, RawAmount::from);
        let designation = designation_idx.and_then(|idx| row.get(idx));
        records.push(DonationRecord::new(amount, designation));
    }

    tracing::debug!("loaded {} secondary donation records", records.len());
    Ok(records)
}

fn import_error(err: csv::Error) -> EngineError {
    EngineError::Import(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GENERAL_FUND;

    #[test]
    fn reads_amount_and_designation() {
        let data = "donation_id,Amount,Designation\n\
                    a,100.00,Education\n\
                    b,25,\n\
                    c,abc,Meals\n";
        let records = records_from_csv(data.as_bytes()).unwrap();

        assert_eq!(
            records,
            vec![
                DonationRecord::new("100.00", Some("Education")),
                DonationRecord::new("25", None),
                DonationRecord::new("abc", Some("Meals")),
            ]
        );
        assert_eq!(records[1].designation, GENERAL_FUND);
    }

    #[test]
    fn short_rows_have_missing_amount() {
        let records = records_from_csv("designation,amount\nMeals\n".as_bytes()).unwrap();

        assert_eq!(records, vec![DonationRecord::new(RawAmount::Missing, Some("Meals"))]);
    }

    #[test]
    fn missing_amount_column_is_an_error() {
        let err = records_from_csv("designation\nMeals\n".as_bytes()).unwrap_err();
        assert_eq!(err, EngineError::Import("missing 'amount' column".to_string()));
    }

    #[test]
    fn absent_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let source = SecondarySource::Csv(dir.path().join("internal_donations.csv"));

        assert!(source.load().unwrap().is_empty());
        assert!(SecondarySource::None.load().unwrap().is_empty());
    }

    #[test]
    fn loads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("internal_donations.csv");
        std::fs::write(&path, "amount,designation\n5.5,Art\n").unwrap();

        let records = SecondarySource::Csv(path).load().unwrap();
        assert_eq!(records, vec![DonationRecord::new("5.5", Some("Art"))]);
    }
}
