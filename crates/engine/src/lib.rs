//! Donation records, reconciliation and annual statement data.
//!
//! The aggregation core is pure and works on [`DonationRecord`] slices:
//!
//! - [`money`] normalizes amounts into exact two-digit decimals.
//! - [`rollup`] sums a source by designation.
//! - [`reconcile`] rolls up two sources and computes their variance.
//! - [`ReportStore`] keeps the latest [`ReconciliationReport`] on disk.
//! - [`designation_breakdown`] feeds receipts and statements.
//! - [`DonationReceipt`] and [`DonorStatement`] hold document data.
//!
//! [`Engine`] ties the core to the donation database.

pub use breakdown::{DesignationAmount, designation_breakdown};
pub use donations::{Donation, DonationRecord, GENERAL_FUND, NewDonation};
pub use donors::Donor;
pub use error::EngineError;
pub use import::{SecondarySource, records_from_csv};
pub use money::RawAmount;
pub use ops::{DEFAULT_DATA_DIR, Engine, EngineBuilder};
pub use receipts::{DEFAULT_PAYMENT_METHOD, DonationReceipt};
pub use reconcile::{ReconciliationReport, reconcile};
pub use report_store::{LatestReport, NO_REPORT_STATUS, REPORT_FILE_NAME, ReportStore};
pub use rollup::{DesignationTotals, rollup};
pub use statements::DonorStatement;

mod breakdown;
pub mod donations;
pub mod donors;
mod error;
mod import;
pub mod money;
mod ops;
mod receipts;
mod reconcile;
mod report_store;
mod rollup;
mod statements;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
