//! Ticket lifecycle enums and field rules.
//!
//! Status and priority travel as lowercase snake_case strings on the wire
//! and in the `tickets` table. Parsing is case-sensitive.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::ValidationError;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

pub const STATUS_OPEN: &str = "open";
pub const STATUS_IN_PROGRESS: &str = "in_progress";
pub const STATUS_CLOSED: &str = "closed";

/// All valid ticket statuses, in lifecycle order.
pub const VALID_STATUSES: &[&str] = &[STATUS_OPEN, STATUS_IN_PROGRESS, STATUS_CLOSED];

/// Where a ticket sits in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Closed,
}

impl TicketStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => STATUS_OPEN,
            Self::InProgress => STATUS_IN_PROGRESS,
            Self::Closed => STATUS_CLOSED,
        }
    }
}

impl FromStr for TicketStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_OPEN => Ok(Self::Open),
            STATUS_IN_PROGRESS => Ok(Self::InProgress),
            STATUS_CLOSED => Ok(Self::Closed),
            other => Err(CoreError::Validation(format!(
                "Invalid status '{other}'. Valid statuses: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }
}

impl TryFrom<String> for TicketStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

pub const PRIORITY_LOW: &str = "low";
pub const PRIORITY_MEDIUM: &str = "medium";
pub const PRIORITY_HIGH: &str = "high";

/// All valid ticket priorities, lowest first.
pub const VALID_PRIORITIES: &[&str] = &[PRIORITY_LOW, PRIORITY_MEDIUM, PRIORITY_HIGH];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TicketPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => PRIORITY_LOW,
            Self::Medium => PRIORITY_MEDIUM,
            Self::High => PRIORITY_HIGH,
        }
    }
}

impl FromStr for TicketPriority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            PRIORITY_LOW => Ok(Self::Low),
            PRIORITY_MEDIUM => Ok(Self::Medium),
            PRIORITY_HIGH => Ok(Self::High),
            other => Err(CoreError::Validation(format!(
                "Invalid priority '{other}'. Valid priorities: {}",
                VALID_PRIORITIES.join(", ")
            ))),
        }
    }
}

impl TryFrom<String> for TicketPriority {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Field validators (used by `#[validate(custom(...))]` on request DTOs)
// ---------------------------------------------------------------------------

/// Check a raw status string against [`VALID_STATUSES`].
pub fn validate_status(status: &str) -> Result<(), ValidationError> {
    one_of(status, VALID_STATUSES)
}

/// Check a raw priority string against [`VALID_PRIORITIES`].
pub fn validate_priority(priority: &str) -> Result<(), ValidationError> {
    one_of(priority, VALID_PRIORITIES)
}

fn one_of(value: &str, choices: &[&str]) -> Result<(), ValidationError> {
    if choices.contains(&value) {
        return Ok(());
    }
    let mut err = ValidationError::new("one_of");
    err.message = Some(Cow::Owned(format!(
        "Must be one of: {}.",
        choices.join(", ")
    )));
    Err(err)
}
