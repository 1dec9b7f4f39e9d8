//! Reservation time slot type.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use crate::error::{Error, InvalidInputError};

/// Last hour a reservation may end at.
const MAX_HOUR: u8 = 24;

/// A whole-hour booking window on a single day.
///
/// Hours are within `0..=24` and the window is never empty. Whether the
/// date lies in the past is left to the server, which judges it against
/// its own clock.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use meetroom_core::TimeSlot;
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
/// let slot = TimeSlot::new(date, 9, 11).unwrap();
/// assert_eq!(slot.hours(), 2);
/// assert!(TimeSlot::new(date, 11, 9).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    date: NaiveDate,
    start_hour: u8,
    end_hour: u8,
}

impl TimeSlot {
    /// Create a validated time slot.
    ///
    /// # Errors
    ///
    /// Returns an error if an hour is out of range or `start_hour >= end_hour`.
    pub fn new(date: NaiveDate, start_hour: u8, end_hour: u8) -> Result<Self, Error> {
        let invalid = |reason: &str| -> Error {
            InvalidInputError::TimeSlot {
                start_hour,
                end_hour,
                reason: reason.to_string(),
            }
            .into()
        };

        if start_hour > MAX_HOUR || end_hour > MAX_HOUR {
            return Err(invalid("hours must be within 0-24"));
        }
        if start_hour >= end_hour {
            return Err(invalid("end must be later than start"));
        }

        Ok(Self {
            date,
            start_hour,
            end_hour,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn start_hour(&self) -> u8 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u8 {
        self.end_hour
    }

    /// Length of the window in hours.
    pub fn hours(&self) -> u8 {
        self.end_hour - self.start_hour
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}:00 - {}:00",
            self.date, self.start_hour, self.end_hour
        )
    }
}
