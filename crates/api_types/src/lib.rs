use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod reconciliation {
    use super::*;

    /// Query parameters of the reconciliation routes.
    ///
    /// `data_dir` names a subdirectory of the configured report location.
    /// It must be a single path component.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ReportLocation {
        pub data_dir: Option<String>,
    }
}

pub mod metrics {
    use super::*;

    /// One designation in the reviewer dashboard.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct DesignationFunds {
        pub name: String,
        pub value: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ReviewerMetrics {
        pub donation_count: u64,
        pub funds_by_designation: Vec<DesignationFunds>,
    }

    /// Process counters.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProcessMetrics {
        pub timestamp: DateTime<Utc>,
        pub uptime_seconds: u64,
        /// `{h}h {m}m {s}s`
        pub uptime_human: String,
        pub reconciliations_run: u64,
        pub statements_generated: u64,
        pub receipts_generated: u64,
    }

    /// Render a duration in seconds as `{h}h {m}m {s}s`.
    pub fn format_uptime(seconds: u64) -> String {
        let hours = seconds / 3600;
        let minutes = (seconds % 3600) / 60;
        format!("{hours}h {minutes}m {}s", seconds % 60)
    }
}

pub mod statement {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct YearEndParams {
        pub year: i32,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    pub struct YearEndSummary {
        pub generated: usize,
    }
}

pub mod data_room {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct DataRoomFolder {
        pub folder: String,
        pub items: Vec<String>,
    }
}

pub mod health {
    use super::*;

    pub const HEALTHY: &str = "healthy";
    pub const DEGRADED: &str = "degraded";
    /// Reported when no email provider is configured.
    pub const NOT_SET: &str = "not-set";

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Health {
        /// [`HEALTHY`] or [`DEGRADED`].
        pub status: String,
        pub version: String,
        pub timestamp: DateTime<Utc>,
        pub checks: HealthChecks,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct HealthChecks {
        pub email_provider: String,
        pub logo_exists: bool,
        pub required_settings: RequiredSettings,
    }

    /// Whether each organization setting printed on documents is present.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct RequiredSettings {
        pub organization_name: bool,
        pub ein: bool,
        pub address: bool,
    }

    impl HealthChecks {
        /// Documents can be produced and delivered: logo, organization name
        /// and an email provider are all present.
        pub fn all_healthy(&self) -> bool {
            self.logo_exists
                && self.required_settings.organization_name
                && self.email_provider != NOT_SET
        }
    }
}
