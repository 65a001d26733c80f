//! HTTP request handlers for the roster API.
//!
//! This module contains the handler functions for all API endpoints. Every
//! mutation goes through [`AppState::mutate`], so a rejected request never
//! changes the roster and an accepted one is persisted before it answers.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde::de::DeserializeOwned;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calendar::format_date_pt_br;
use crate::messaging::whatsapp_link;
use crate::models::{MonthContext, Volunteer};
use crate::persistence::{self, Settings};

use super::request::{
    AssignRequest, RemoveQuery, VolunteerRequest, parse_position, parse_shift_key,
};
use super::response::{
    ApiError, ApiErrorResponse, MessageResponse, OccupantResponse, ShiftResponse,
};
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/volunteers", get(list_volunteers).post(create_volunteer))
        .route(
            "/volunteers/:id",
            put(update_volunteer).delete(delete_volunteer),
        )
        .route("/months/:year/:month", get(month_schedule))
        .route("/months/:year/:month/stats", get(month_stats))
        .route("/shifts/:date/:time", get(get_shift))
        .route(
            "/shifts/:date/:time/slots/:position",
            put(assign_slot).delete(clear_slot),
        )
        .route(
            "/shifts/:date/:time/slots/:position/candidates",
            get(slot_candidates),
        )
        .route("/shifts/:date/:time/occupants", post(add_occupant))
        .route("/shifts/:date/:time/announcement", post(announce_shift))
        .route(
            "/shifts/:date/:time/reminders/:volunteer_id",
            post(remind_volunteer),
        )
        .route("/settings", get(get_settings).put(update_settings))
        .with_state(state)
}

/// Unwraps a JSON body, turning extractor rejections into API errors.
fn json_body<T: DeserializeOwned>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> ApiResult<T> {
    let rejection = match payload {
        Ok(Json(body)) => return Ok(body),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    Err(ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    })
}

fn parse_month(year: &str, month: &str) -> ApiResult<MonthContext> {
    let year: i32 = year
        .parse()
        .map_err(|_| ApiErrorResponse::bad_request(format!("Invalid year '{}'", year)))?;
    let month: u32 = month
        .parse()
        .map_err(|_| ApiErrorResponse::bad_request(format!("Invalid month '{}'", month)))?;
    Ok(MonthContext::new(year, month)?)
}

fn parse_slot_index(position: &str) -> ApiResult<usize> {
    position
        .parse()
        .map_err(|_| ApiErrorResponse::bad_request(format!("Invalid seat '{}'", position)))
}

/// Logs a failed request and passes the error through.
fn log_failure(correlation_id: Uuid, error: ApiErrorResponse) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        code = %error.error.code,
        error = %error.error.message,
        "Request rejected"
    );
    error
}

/// Handler for GET /volunteers.
async fn list_volunteers(State(state): State<AppState>) -> Json<Vec<Volunteer>> {
    Json(state.read(|roster| roster.roster().as_slice().to_vec()).await)
}

/// Handler for POST /volunteers.
async fn create_volunteer(
    State(state): State<AppState>,
    payload: Result<Json<VolunteerRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let request = json_body(payload, correlation_id)?;

    let volunteer = state
        .mutate(|roster| roster.add_volunteer(&request.name, &request.phone))
        .await
        .map_err(|err| log_failure(correlation_id, err.into()))?;

    info!(
        correlation_id = %correlation_id,
        volunteer_id = %volunteer.id,
        "Volunteer registered"
    );
    Ok((StatusCode::CREATED, Json(volunteer)))
}

/// Handler for PUT /volunteers/:id.
async fn update_volunteer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<VolunteerRequest>, JsonRejection>,
) -> ApiResult<Json<Volunteer>> {
    let correlation_id = Uuid::new_v4();
    let request = json_body(payload, correlation_id)?;

    let volunteer = state
        .mutate(|roster| roster.update_volunteer(&id, &request.name, &request.phone))
        .await
        .map_err(|err| log_failure(correlation_id, err.into()))?;

    info!(correlation_id = %correlation_id, volunteer_id = %id, "Volunteer updated");
    Ok(Json(volunteer))
}

/// Handler for DELETE /volunteers/:id.
///
/// Removal cascades to every seat the volunteer holds, so it needs
/// `?confirm=true`.
async fn delete_volunteer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<RemoveQuery>,
) -> ApiResult<Json<Volunteer>> {
    let correlation_id = Uuid::new_v4();

    let known = state.read(|roster| roster.roster().contains(&id)).await;
    if !known {
        return Err(log_failure(
            correlation_id,
            ApiErrorResponse::not_found(
                "VOLUNTEER_NOT_FOUND",
                format!("Volunteer '{}' does not exist", id),
            ),
        ));
    }
    if !query.confirm {
        return Err(log_failure(
            correlation_id,
            ApiErrorResponse::confirmation_required(&id),
        ));
    }

    let removed = state
        .mutate(|roster| roster.remove_volunteer(&id))
        .await
        .map_err(|err| log_failure(correlation_id, err.into()))?;

    info!(correlation_id = %correlation_id, volunteer_id = %id, "Volunteer removed");
    Ok(Json(removed))
}

/// Handler for GET /months/:year/:month.
async fn month_schedule(
    State(state): State<AppState>,
    Path((year, month)): Path<(String, String)>,
) -> ApiResult<impl IntoResponse> {
    let month = parse_month(&year, &month)?;
    let policy = *state.config().quota();
    let schedule = state
        .read(|roster| roster.month_schedule(&month, &policy))
        .await;
    Ok(Json(schedule))
}

/// Handler for GET /months/:year/:month/stats.
async fn month_stats(
    State(state): State<AppState>,
    Path((year, month)): Path<(String, String)>,
) -> ApiResult<impl IntoResponse> {
    let month = parse_month(&year, &month)?;
    let policy = *state.config().quota();
    let report = state.read(|roster| roster.month_stats(&month, &policy)).await;
    Ok(Json(report))
}

/// Handler for GET /shifts/:date/:time.
async fn get_shift(
    State(state): State<AppState>,
    Path((date, time)): Path<(String, String)>,
) -> ApiResult<Json<ShiftResponse>> {
    let (date, time) = parse_shift_key(&date, &time)?;
    let response = state
        .read(|roster| {
            let view = roster.get_shift(date, time);
            ShiftResponse {
                shift: view.shift().clone(),
                persisted: view.is_persisted(),
            }
        })
        .await;
    Ok(Json(response))
}

/// Handler for PUT /shifts/:date/:time/slots/:position.
async fn assign_slot(
    State(state): State<AppState>,
    Path((date, time, position)): Path<(String, String, String)>,
    payload: Result<Json<AssignRequest>, JsonRejection>,
) -> ApiResult<Json<ShiftResponse>> {
    let correlation_id = Uuid::new_v4();
    let (date, time) = parse_shift_key(&date, &time)?;
    let position = parse_position(parse_slot_index(&position)?)?;
    let request = json_body(payload, correlation_id)?;

    let shift = state
        .mutate(|roster| {
            roster
                .assign(&request.volunteer_id, date, time, position)
                .cloned()
        })
        .await
        .map_err(|err| log_failure(correlation_id, err.into()))?;

    info!(
        correlation_id = %correlation_id,
        shift_id = %shift.id,
        volunteer_id = %request.volunteer_id,
        position = position.index(),
        "Seat assigned"
    );
    Ok(Json(ShiftResponse {
        shift,
        persisted: true,
    }))
}

/// Handler for DELETE /shifts/:date/:time/slots/:position.
///
/// Clearing a seat of a shift that was never created answers 204.
async fn clear_slot(
    State(state): State<AppState>,
    Path((date, time, position)): Path<(String, String, String)>,
) -> ApiResult<axum::response::Response> {
    let correlation_id = Uuid::new_v4();
    let (date, time) = parse_shift_key(&date, &time)?;
    let position = parse_position(parse_slot_index(&position)?)?;

    let shift = state
        .mutate(|roster| Ok(roster.unassign(date, time, position).cloned()))
        .await
        .map_err(|err| log_failure(correlation_id, err.into()))?;

    info!(
        correlation_id = %correlation_id,
        date = %date,
        time = %time,
        position = position.index(),
        "Seat cleared"
    );
    Ok(match shift {
        Some(shift) => Json(ShiftResponse {
            shift,
            persisted: true,
        })
        .into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

/// Handler for GET /shifts/:date/:time/slots/:position/candidates.
async fn slot_candidates(
    State(state): State<AppState>,
    Path((date, time, position)): Path<(String, String, String)>,
) -> ApiResult<impl IntoResponse> {
    let (date, time) = parse_shift_key(&date, &time)?;
    let position = parse_position(parse_slot_index(&position)?)?;
    let candidates = state
        .read(|roster| roster.candidates(date, time, position))
        .await;
    Ok(Json(candidates))
}

/// Handler for POST /shifts/:date/:time/occupants.
async fn add_occupant(
    State(state): State<AppState>,
    Path((date, time)): Path<(String, String)>,
    payload: Result<Json<AssignRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let correlation_id = Uuid::new_v4();
    let (date, time) = parse_shift_key(&date, &time)?;
    let request = json_body(payload, correlation_id)?;

    let (position, shift) = state
        .mutate(|roster| {
            let position = roster.add_occupant(&request.volunteer_id, date, time)?;
            let shift = roster.shifts().require(date, time)?.clone();
            Ok((position, shift))
        })
        .await
        .map_err(|err| log_failure(correlation_id, err.into()))?;

    info!(
        correlation_id = %correlation_id,
        shift_id = %shift.id,
        volunteer_id = %request.volunteer_id,
        position = position.index(),
        "Occupant added"
    );
    Ok((StatusCode::CREATED, Json(OccupantResponse { position, shift })))
}

/// Handler for POST /shifts/:date/:time/announcement.
async fn announce_shift(
    State(state): State<AppState>,
    Path((date, time)): Path<(String, String)>,
) -> ApiResult<Json<MessageResponse>> {
    let correlation_id = Uuid::new_v4();
    let (date, time) = parse_shift_key(&date, &time)?;

    // Names are copied out so the lock is not held while generating.
    let names = state
        .read(|roster| roster.shift_volunteer_names(date, time))
        .await;
    if names.is_empty() {
        return Err(log_failure(
            correlation_id,
            ApiErrorResponse::conflict(
                "EMPTY_SHIFT",
                format!("Shift {} {} has no volunteers", date, time),
            ),
        ));
    }

    let text = state
        .announcer()
        .group_message(&format_date_pt_br(date), time.as_str(), &names)
        .await;

    info!(
        correlation_id = %correlation_id,
        date = %date,
        time = %time,
        recipients = names.len(),
        "Announcement generated"
    );
    Ok(Json(MessageResponse {
        text,
        phone: None,
        link: None,
    }))
}

/// Handler for POST /shifts/:date/:time/reminders/:volunteer_id.
async fn remind_volunteer(
    State(state): State<AppState>,
    Path((date, time, volunteer_id)): Path<(String, String, String)>,
) -> ApiResult<Json<MessageResponse>> {
    let correlation_id = Uuid::new_v4();
    let (date, time) = parse_shift_key(&date, &time)?;

    let (volunteer, assigned) = state
        .read(|roster| {
            let volunteer = roster.roster().require(&volunteer_id).cloned();
            let assigned = roster
                .shifts()
                .find(date, time)
                .is_some_and(|shift| shift.contains(&volunteer_id));
            volunteer.map(|volunteer| (volunteer, assigned))
        })
        .await
        .map_err(|err| log_failure(correlation_id, err.into()))?;

    if !assigned {
        return Err(log_failure(
            correlation_id,
            ApiErrorResponse::conflict(
                "NOT_ASSIGNED",
                format!(
                    "Volunteer '{}' is not assigned to {} {}",
                    volunteer_id, date, time
                ),
            ),
        ));
    }

    let text = state
        .announcer()
        .individual_message(&volunteer.name, &format_date_pt_br(date), time.as_str())
        .await;

    info!(
        correlation_id = %correlation_id,
        volunteer_id = %volunteer_id,
        date = %date,
        time = %time,
        "Reminder generated"
    );
    let link = whatsapp_link(&volunteer.phone, &text);
    Ok(Json(MessageResponse {
        text,
        phone: Some(volunteer.phone),
        link,
    }))
}

/// Handler for GET /settings.
async fn get_settings(State(state): State<AppState>) -> ApiResult<Json<Settings>> {
    let settings = persistence::load_settings(state.store(), state.config().config())?;
    Ok(Json(settings))
}

/// Handler for PUT /settings.
async fn update_settings(
    State(state): State<AppState>,
    payload: Result<Json<Settings>, JsonRejection>,
) -> ApiResult<Json<Settings>> {
    let correlation_id = Uuid::new_v4();
    let settings = json_body(payload, correlation_id)?;

    persistence::save_settings(state.store(), &settings)
        .map_err(|err| log_failure(correlation_id, err.into()))?;

    info!(correlation_id = %correlation_id, "Settings saved");
    Ok(Json(settings))
}
