//! Request types for the roster API.
//!
//! This module defines the JSON bodies and query strings the handlers accept,
//! and the parsing of shift keys taken from the URL path.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{ShiftTime, SlotPosition};

use super::response::ApiErrorResponse;

/// Body for creating or editing a volunteer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolunteerRequest {
    /// Display name; blank names are rejected.
    pub name: String,
    /// Phone number in any format; non-digits are stripped.
    #[serde(default)]
    pub phone: String,
}

/// Body for placing a volunteer on a shift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignRequest {
    /// The volunteer to place.
    pub volunteer_id: String,
}

/// Query string of the volunteer removal endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoveQuery {
    /// Must be `true` for the removal to go ahead.
    #[serde(default)]
    pub confirm: bool,
}

/// Parses the `(date, time)` key of a shift from path segments.
pub(crate) fn parse_shift_key(
    date: &str,
    time: &str,
) -> Result<(NaiveDate, ShiftTime), ApiErrorResponse> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
        ApiErrorResponse::bad_request(format!("Invalid date '{}', expected YYYY-MM-DD", date))
    })?;
    let time = time.parse::<ShiftTime>()?;
    Ok((date, time))
}

/// Parses a seat index from a path segment.
pub(crate) fn parse_position(position: usize) -> Result<SlotPosition, ApiErrorResponse> {
    Ok(SlotPosition::new(position)?)
}
