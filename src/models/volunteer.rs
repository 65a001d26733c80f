//! Volunteer model.
//!
//! This module defines the [`Volunteer`] struct for the people who can be
//! scheduled onto shifts.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{RosterError, RosterResult};

/// Represents a person who can be placed on the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volunteer {
    /// Unique, stable identifier.
    pub id: String,
    /// Display name; never empty.
    pub name: String,
    /// Phone number as digits only (country and area code included), possibly empty.
    #[serde(default)]
    pub phone: String,
}

impl Volunteer {
    /// Creates a volunteer with a freshly generated id.
    ///
    /// The name is trimmed and must not be empty. Every non-digit character
    /// is stripped from the phone number.
    ///
    /// # Examples
    ///
    /// ```
    /// use sunday_roster::models::Volunteer;
    ///
    /// let volunteer = Volunteer::new("  Maria Souza ", "+55 (11) 99999-9999").unwrap();
    /// assert_eq!(volunteer.name, "Maria Souza");
    /// assert_eq!(volunteer.phone, "5511999999999");
    /// assert!(Volunteer::new("   ", "").is_err());
    /// ```
    pub fn new(name: &str, phone: &str) -> RosterResult<Self> {
        Self::with_id(Uuid::new_v4().to_string(), name, phone)
    }

    /// Creates a volunteer with a caller-provided id.
    pub fn with_id(id: impl Into<String>, name: &str, phone: &str) -> RosterResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(RosterError::InvalidVolunteer {
                field: "id".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        Ok(Self {
            id,
            name: validate_name(name)?,
            phone: normalize_phone(phone),
        })
    }
}

/// Trims a display name, rejecting names that are blank.
pub(crate) fn validate_name(name: &str) -> RosterResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RosterError::InvalidVolunteer {
            field: "name".to_string(),
            message: "must not be empty".to_string(),
        });
    }
    Ok(name.to_string())
}

/// Keeps only the ASCII digits of a phone number.
///
/// # Example
///
/// ```
/// use sunday_roster::models::normalize_phone;
///
/// assert_eq!(normalize_phone("(11) 9 8765-4321"), "11987654321");
/// ```
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}
