//! Reservation API data models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A meeting room as listed by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub room_no: Option<String>,
    pub capacity: u32,
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default)]
    pub usage: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

fn default_available() -> bool {
    true
}

/// A room that is free for the requested slot and head count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableRoom {
    pub id: i64,
    pub name: String,
    pub capacity: u32,
    #[serde(default)]
    pub usage: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
}

/// Lifecycle state of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReservationStatus {
    /// Waiting for administrator approval.
    Pending,
    Approved,
    Rejected,
    Canceled,
    /// Use was confirmed by the booker.
    Used,
    /// A status this client does not know about.
    #[serde(other)]
    Unknown,
}

impl ReservationStatus {
    /// Whether the booker may still cancel.
    pub fn is_cancelable(&self) -> bool {
        matches!(self, Self::Pending | Self::Approved)
    }

    /// Whether the booker may confirm use.
    pub fn is_confirmable(&self) -> bool {
        matches!(self, Self::Approved)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Canceled => "CANCELED",
            Self::Used => "USED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the caller's reservations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    /// Display name of the room.
    pub room: String,
    pub date: NaiveDate,
    /// Display form of the slot, e.g. `9:00 - 11:00`.
    pub time: String,
    pub status: ReservationStatus,
    #[serde(default)]
    pub approve_time: Option<String>,
    #[serde(default)]
    pub reject_reason: Option<String>,
}
