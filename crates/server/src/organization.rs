//! Organization settings printed on documents, checked by `/health`.

use std::path::PathBuf;

use api_types::data_room::DataRoomFolder;
use serde::Deserialize;

fn folder(name: &str, items: &[&str]) -> DataRoomFolder {
    DataRoomFolder {
        folder: name.to_string(),
        items: items.iter().map(|item| item.to_string()).collect(),
    }
}

/// Index served by `/api/v1/data-room` unless configured.
pub fn default_data_room() -> Vec<DataRoomFolder> {
    vec![
        folder("governance", &["IRS Letter.pdf", "FDACS Registration.pdf"]),
        folder(
            "policies",
            &["Donor Privacy Policy.pdf", "Conflict of Interest Policy.pdf"],
        ),
        folder("financials", &["Budget Summary FY2025.pdf"]),
    ]
}

#[derive(Clone, Debug, Deserialize)]
pub struct Organization {
    pub name: Option<String>,
    pub ein: Option<String>,
    pub address: Option<String>,
    pub logo_path: Option<PathBuf>,
    pub email_provider: Option<String>,
    #[serde(default = "default_data_room")]
    pub data_room: Vec<DataRoomFolder>,
}

impl Default for Organization {
    fn default() -> Self {
        Self {
            name: None,
            ein: None,
            address: None,
            logo_path: None,
            email_provider: None,
            data_room: default_data_room(),
        }
    }
}

pub(crate) fn is_set(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}
