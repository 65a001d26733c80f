//! Error types for the roster engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition the assignment engine, the stores and the loaders
//! can report.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::ShiftTime;

/// The main error type for the roster engine.
///
/// All fallible operations in the crate return this error type. The
/// message-generation collaborator has its own error type and never
/// surfaces through this one.
///
/// # Example
///
/// ```
/// use sunday_roster::error::RosterError;
///
/// let error = RosterError::InvalidReference {
///     volunteer_id: "v-404".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unknown volunteer: v-404");
/// ```
#[derive(Debug, Error)]
pub enum RosterError {
    /// An operation addressed a shift that does not exist.
    #[error("Shift not found: {date} {time}")]
    NotFound {
        /// The date of the missing shift.
        date: NaiveDate,
        /// The time of the missing shift.
        time: ShiftTime,
    },

    /// A shift would hold more occupants than it has slots.
    #[error("Shift {date} {time} is full ({capacity} volunteers)")]
    CapacityExceeded {
        /// The date of the full shift.
        date: NaiveDate,
        /// The time of the full shift.
        time: ShiftTime,
        /// The number of slots in the shift.
        capacity: usize,
    },

    /// A volunteer id is not present in the roster.
    #[error("Unknown volunteer: {volunteer_id}")]
    InvalidReference {
        /// The id that could not be resolved.
        volunteer_id: String,
    },

    /// The same volunteer occupies two positions of one shift.
    #[error("Volunteer '{volunteer_id}' appears more than once in shift {date} {time}")]
    DuplicateOccupant {
        /// The duplicated volunteer id.
        volunteer_id: String,
        /// The date of the shift.
        date: NaiveDate,
        /// The time of the shift.
        time: ShiftTime,
    },

    /// Two shifts share the same date and time.
    #[error("More than one shift exists for {date} {time}")]
    DuplicateShift {
        /// The date of the duplicated key.
        date: NaiveDate,
        /// The time of the duplicated key.
        time: ShiftTime,
    },

    /// A volunteer record was invalid.
    #[error("Invalid volunteer field '{field}': {message}")]
    InvalidVolunteer {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A date cannot carry a shift.
    #[error("Invalid shift date {date}: {message}")]
    InvalidDate {
        /// The rejected date.
        date: NaiveDate,
        /// Why the date was rejected.
        message: String,
    },

    /// A month index outside 0..=11.
    #[error("Invalid month index {month} (expected 0-11)")]
    InvalidMonth {
        /// The rejected zero-based month.
        month: u32,
    },

    /// A year outside the range the calendar can represent.
    #[error("Invalid year {year}")]
    InvalidYear {
        /// The rejected year.
        year: i32,
    },

    /// A slot position outside the shift.
    #[error("Invalid slot position {position} (expected 0-2)")]
    InvalidSlot {
        /// The rejected position.
        position: usize,
    },

    /// A time-of-day that is not one of the scheduled times.
    #[error("Invalid shift time '{value}' (expected 09:00 or 18:00)")]
    InvalidShiftTime {
        /// The rejected value.
        value: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A persisted blob could not be read, written or decoded.
    #[error("Persistence error for key '{key}': {message}")]
    Persistence {
        /// The storage key involved.
        key: String,
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return RosterError.
pub type RosterResult<T> = Result<T, RosterError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn sunday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()
    }

    #[test]
    fn test_not_found_displays_key() {
        let error = RosterError::NotFound {
            date: sunday(),
            time: ShiftTime::Morning,
        };
        assert_eq!(error.to_string(), "Shift not found: 2024-06-02 09:00");
    }

    #[test]
    fn test_capacity_exceeded_displays_capacity() {
        let error = RosterError::CapacityExceeded {
            date: sunday(),
            time: ShiftTime::Evening,
            capacity: 3,
        };
        assert_eq!(
            error.to_string(),
            "Shift 2024-06-02 18:00 is full (3 volunteers)"
        );
    }

    #[test]
    fn test_duplicate_occupant_displays_id_and_key() {
        let error = RosterError::DuplicateOccupant {
            volunteer_id: "v1".to_string(),
            date: sunday(),
            time: ShiftTime::Morning,
        };
        assert_eq!(
            error.to_string(),
            "Volunteer 'v1' appears more than once in shift 2024-06-02 09:00"
        );
    }

    #[test]
    fn test_invalid_volunteer_displays_field_and_message() {
        let error = RosterError::InvalidVolunteer {
            field: "name".to_string(),
            message: "must not be empty".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid volunteer field 'name': must not be empty"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = RosterError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<RosterError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_slot() -> RosterResult<()> {
            Err(RosterError::InvalidSlot { position: 7 })
        }

        fn propagates_error() -> RosterResult<()> {
            returns_invalid_slot()?;
            Ok(())
        }

        assert!(matches!(
            propagates_error(),
            Err(RosterError::InvalidSlot { position: 7 })
        ));
    }
}
