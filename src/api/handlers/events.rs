//! Event management handlers.
//!
//! Every route here sits behind the auth middleware. Reads are open to any
//! signed-in user; update and delete require the caller to be the creator.

use crate::{
    auth::{middleware::AuthUser, ownership::authorize_mutation},
    types::{
        AppError, Event, EventCreate, EventCreatedResponse, EventUpdate, MessageResponse, Result,
    },
    AppState,
};
use axum::{
    extract::{Path, State},
    Json,
};

fn event_not_found() -> AppError {
    AppError::NotFound("Event with supplied ID does not exist".to_string())
}

/// Loads an event, reporting absence before any ownership question is asked.
async fn load_event(state: &AppState, id: i64) -> Result<Event> {
    state.turso.get_event(id).await?.ok_or_else(event_not_found)
}

/// List all events.
#[utoipa::path(
    get,
    path = "/event/",
    responses(
        (status = 200, description = "List of events", body = Vec<Event>),
        (status = 403, description = "Missing, invalid or expired token")
    ),
    tag = "events",
    security(("bearer" = []))
)]
pub async fn list_events(
    State(state): State<AppState>,
    AuthUser(_subject): AuthUser,
) -> Result<Json<Vec<Event>>> {
    Ok(Json(state.turso.list_events().await?))
}

/// Get a single event.
#[utoipa::path(
    get,
    path = "/event/{id}",
    params(
        ("id" = i64, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event details", body = Event),
        (status = 404, description = "Event not found"),
        (status = 403, description = "Missing, invalid or expired token")
    ),
    tag = "events",
    security(("bearer" = []))
)]
pub async fn get_event(
    State(state): State<AppState>,
    AuthUser(_subject): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Event>> {
    Ok(Json(load_event(&state, id).await?))
}

/// Create an event owned by the caller.
#[utoipa::path(
    post,
    path = "/event/new",
    request_body = EventCreate,
    responses(
        (status = 200, description = "Event created", body = EventCreatedResponse),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Missing, invalid or expired token")
    ),
    tag = "events",
    security(("bearer" = []))
)]
pub async fn create_event(
    State(state): State<AppState>,
    AuthUser(subject): AuthUser,
    Json(payload): Json<EventCreate>,
) -> Result<Json<EventCreatedResponse>> {
    payload.validate()?;

    let id = state.turso.create_event(&payload, &subject).await?;

    tracing::info!(event_id = id, creator = %subject, "event created");
    Ok(Json(EventCreatedResponse {
        message: "Event created successfully".to_string(),
        id,
    }))
}

/// Apply a partial update to an event the caller owns.
#[utoipa::path(
    patch,
    path = "/event/edit/{id}",
    params(
        ("id" = i64, Path, description = "Event ID")
    ),
    request_body = EventUpdate,
    responses(
        (status = 200, description = "Updated event", body = Event),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Not the event creator, or bad token"),
        (status = 404, description = "Event not found")
    ),
    tag = "events",
    security(("bearer" = []))
)]
pub async fn update_event(
    State(state): State<AppState>,
    AuthUser(subject): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<EventUpdate>,
) -> Result<Json<Event>> {
    let mut event = load_event(&state, id).await?;
    authorize_mutation(&subject, &event)?;
    payload.validate()?;

    if !payload.is_empty() {
        payload.apply(&mut event);
        if !state.turso.update_event(&event).await? {
            return Err(event_not_found());
        }
        tracing::info!(event_id = id, "event updated");
    }

    Ok(Json(event))
}

/// Delete an event the caller owns.
#[utoipa::path(
    delete,
    path = "/event/delete/{id}",
    params(
        ("id" = i64, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event deleted", body = MessageResponse),
        (status = 403, description = "Not the event creator, or bad token"),
        (status = 404, description = "Event not found")
    ),
    tag = "events",
    security(("bearer" = []))
)]
pub async fn delete_event(
    State(state): State<AppState>,
    AuthUser(subject): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>> {
    let event = load_event(&state, id).await?;
    authorize_mutation(&subject, &event)?;

    if !state.turso.delete_event(id).await? {
        return Err(event_not_found());
    }

    tracing::info!(event_id = id, "event deleted");
    Ok(Json(MessageResponse::new("Event deleted successfully")))
}
