//! Ticket entity model and DTOs.

use helpdesk_core::error::CoreError;
use helpdesk_core::ticket::{validate_priority, validate_status, TicketPriority, TicketStatus};
use helpdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A ticket row from the `tickets` table.
///
/// Serializes directly as the wire representation; timestamps render as
/// RFC 3339 UTC strings.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Ticket {
    pub id: DbId,
    pub title: String,
    pub description: String,
    #[sqlx(try_from = "String")]
    pub status: TicketStatus,
    #[sqlx(try_from = "String")]
    pub priority: TicketPriority,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for creating a ticket.
///
/// Every field is an `Option` so that a missing `title` is reported as a
/// field error alongside any other failures instead of aborting
/// deserialization.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateTicket {
    #[validate(
        required(message = "Missing data for required field."),
        length(min = 3, max = 100, message = "Length must be between 3 and 100.")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "Missing data for required field."),
        length(min = 10, message = "Shorter than minimum length 10.")
    )]
    pub description: Option<String>,
    /// Defaults to `open` if omitted.
    #[validate(custom(function = "validate_status"))]
    pub status: Option<String>,
    /// Defaults to `medium` if omitted.
    #[validate(custom(function = "validate_priority"))]
    pub priority: Option<String>,
}

/// Request body for a partial update. All fields are optional; only the
/// supplied ones are checked and applied. JSON `null` counts as absent.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTicket {
    #[validate(length(min = 3, max = 100, message = "Length must be between 3 and 100."))]
    pub title: Option<String>,
    #[validate(length(min = 10, message = "Shorter than minimum length 10."))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_status"))]
    pub status: Option<String>,
    #[validate(custom(function = "validate_priority"))]
    pub priority: Option<String>,
}

/// Validated values for a new row. Built only through
/// [`CreateTicket::into_new_ticket`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
}

/// Validated partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
}

impl CreateTicket {
    /// Validate every field and resolve status/priority defaults.
    pub fn into_new_ticket(self) -> Result<NewTicket, CoreError> {
        self.validate()?;

        let title = self.title.ok_or_else(|| missing_field("title"))?;
        let description = self.description.ok_or_else(|| missing_field("description"))?;
        let status = self
            .status
            .as_deref()
            .map(str::parse::<TicketStatus>)
            .transpose()?
            .unwrap_or_default();
        let priority = self
            .priority
            .as_deref()
            .map(str::parse::<TicketPriority>)
            .transpose()?
            .unwrap_or_default();

        Ok(NewTicket {
            title,
            description,
            status,
            priority,
        })
    }
}

impl UpdateTicket {
    /// Validate the supplied fields and convert them into a [`TicketPatch`].
    pub fn into_patch(self) -> Result<TicketPatch, CoreError> {
        self.validate()?;

        Ok(TicketPatch {
            title: self.title,
            description: self.description,
            status: self
                .status
                .as_deref()
                .map(str::parse::<TicketStatus>)
                .transpose()?,
            priority: self
                .priority
                .as_deref()
                .map(str::parse::<TicketPriority>)
                .transpose()?,
        })
    }
}

fn missing_field(field: &str) -> CoreError {
    let mut fields = helpdesk_core::validation::FieldErrors::new();
    fields.insert(
        field.to_string(),
        vec!["Missing data for required field.".to_string()],
    );
    CoreError::InvalidFields(fields)
}
