//! Handlers for the `/tickets` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use helpdesk_core::error::CoreError;
use helpdesk_core::types::DbId;
use helpdesk_db::models::ticket::{CreateTicket, Ticket, UpdateTicket};
use helpdesk_db::repositories::TicketRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Body returned by a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Ticket",
        id,
    })
}

/// GET /api/tickets
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Ticket>>> {
    let tickets = TicketRepo::list(&state.pool).await?;
    Ok(Json(tickets))
}

/// GET /api/tickets/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Ticket>> {
    let ticket = TicketRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(ticket))
}

/// POST /api/tickets
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateTicket>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Ticket>)> {
    let Json(input) = payload?;
    let new_ticket = input.into_new_ticket()?;

    let ticket = TicketRepo::create(&state.pool, &new_ticket).await?;
    tracing::info!(
        ticket_id = ticket.id,
        status = %ticket.status,
        priority = %ticket.priority,
        "Ticket created"
    );

    Ok((StatusCode::CREATED, Json(ticket)))
}

/// PUT /api/tickets/{id}
///
/// Supplied fields are validated with the same rules as create before the
/// lookup, so an invalid body is a 400 even for a missing id.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    payload: Result<Json<UpdateTicket>, JsonRejection>,
) -> AppResult<Json<Ticket>> {
    let Json(input) = payload?;
    let patch = input.into_patch()?;

    let ticket = TicketRepo::update(&state.pool, id, &patch)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(ticket_id = id, "Ticket updated");

    Ok(Json(ticket))
}

/// DELETE /api/tickets/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DeleteResponse>> {
    let deleted = TicketRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(not_found(id));
    }
    tracing::info!(ticket_id = id, "Ticket deleted");

    Ok(Json(DeleteResponse {
        message: format!("Ticket {id} deleted successfully"),
    }))
}
