//! Response types for the roster API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API, plus the small response bodies the handlers return.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::RosterError;
use crate::models::{Shift, SlotPosition};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 response with a validation error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::validation_error(message),
        }
    }

    /// Creates a 404 response.
    pub fn not_found(code: &str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            error: ApiError::new(code, message),
        }
    }

    /// Creates a 409 response.
    pub fn conflict(code: &str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            error: ApiError::new(code, message),
        }
    }

    /// Creates the response for a destructive call sent without confirmation.
    pub fn confirmation_required(volunteer_id: &str) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            error: ApiError::with_details(
                "CONFIRMATION_REQUIRED",
                format!("Removing volunteer '{}' needs confirmation", volunteer_id),
                "Every assignment of the volunteer will be lost; \
                 repeat the request with ?confirm=true",
            ),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<RosterError> for ApiErrorResponse {
    fn from(error: RosterError) -> Self {
        let message = error.to_string();
        let (status, code) = match &error {
            RosterError::NotFound { .. } => (StatusCode::NOT_FOUND, "SHIFT_NOT_FOUND"),
            RosterError::InvalidReference { .. } => (StatusCode::NOT_FOUND, "VOLUNTEER_NOT_FOUND"),
            RosterError::CapacityExceeded { .. } => (StatusCode::CONFLICT, "CAPACITY_EXCEEDED"),
            RosterError::DuplicateOccupant { .. } => (StatusCode::CONFLICT, "DUPLICATE_OCCUPANT"),
            RosterError::DuplicateShift { .. } => (StatusCode::CONFLICT, "DUPLICATE_SHIFT"),
            RosterError::InvalidVolunteer { .. } => (StatusCode::BAD_REQUEST, "INVALID_VOLUNTEER"),
            RosterError::InvalidDate { .. } => (StatusCode::BAD_REQUEST, "INVALID_DATE"),
            RosterError::InvalidMonth { .. } => (StatusCode::BAD_REQUEST, "INVALID_MONTH"),
            RosterError::InvalidYear { .. } => (StatusCode::BAD_REQUEST, "INVALID_YEAR"),
            RosterError::InvalidSlot { .. } => (StatusCode::BAD_REQUEST, "INVALID_SLOT"),
            RosterError::InvalidShiftTime { .. } => (StatusCode::BAD_REQUEST, "INVALID_SHIFT_TIME"),
            RosterError::ConfigNotFound { .. } | RosterError::ConfigParseError { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
            }
            RosterError::Persistence { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "PERSISTENCE_ERROR")
            }
        };

        ApiErrorResponse {
            status,
            error: ApiError::new(code, message),
        }
    }
}

/// Body returned by the message endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// The generated or fallback text.
    pub text: String,
    /// Digits-only phone of the recipient, for individual reminders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// `wa.me` link carrying the text, when the recipient has a phone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Body returned when reading a shift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftResponse {
    /// The shift, stored or placeholder.
    pub shift: Shift,
    /// Whether the shift exists in the store.
    pub persisted: bool,
}

/// Body returned by the append-style assignment endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccupantResponse {
    /// The seat the volunteer ended up in.
    pub position: SlotPosition,
    /// The updated shift.
    pub shift: Shift,
}
