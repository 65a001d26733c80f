//! HTTP API module for the volunteer roster.
//!
//! This module provides the REST endpoints for managing volunteers, filling
//! shift seats, reading month schedules and quota reports, and generating
//! reminder messages.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AssignRequest, RemoveQuery, VolunteerRequest};
pub use response::{ApiError, MessageResponse, OccupantResponse, ShiftResponse};
pub use state::AppState;
