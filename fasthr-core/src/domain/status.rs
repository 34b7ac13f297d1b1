//! Approval status shared by leave and expense requests

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::result::Error;

/// Status of a leave or expense request
///
/// The API speaks Turkish on the wire (`Bekliyor`, `Onaylandı`, `Reddedildi`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestStatus {
    #[serde(rename = "Bekliyor")]
    Pending,
    #[serde(rename = "Onaylandı")]
    Approved,
    #[serde(rename = "Reddedildi")]
    Rejected,
}

impl RequestStatus {
    /// Value used in query strings and request bodies
    pub fn wire_value(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Bekliyor",
            RequestStatus::Approved => "Onaylandı",
            RequestStatus::Rejected => "Reddedildi",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RequestStatus {
    type Err = Error;

    /// Accepts the English labels as well as the wire values
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" | "bekliyor" => Ok(RequestStatus::Pending),
            "approved" | "onaylandı" => Ok(RequestStatus::Approved),
            "rejected" | "reddedildi" => Ok(RequestStatus::Rejected),
            other => Err(Error::validation(format!(
                "Unknown status '{}'. Use pending, approved or rejected",
                other
            ))),
        }
    }
}
