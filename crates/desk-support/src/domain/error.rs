//! Support domain errors
//!
//! Every failure is a structured value carrying the offending status, role
//! or field so callers can branch on kind rather than parse strings.

use thiserror::Error;

use crate::domain::aggregates::TicketStatus;
use crate::domain::services::TicketAction;
use crate::domain::value_objects::{Role, TicketId};

#[derive(Clone, Debug, PartialEq, Error)]
pub enum TicketError {
    #[error("invalid transition from {from} to {to}")]
    InvalidTransition { from: TicketStatus, to: TicketStatus },

    #[error("role {role} may not perform {action}")]
    PermissionDenied { role: Role, action: TicketAction },

    #[error("agent {agent_id} is not an eligible assignee")]
    UnknownAgent { agent_id: String },

    #[error("required field {field} is missing or empty")]
    MissingField { field: &'static str },

    #[error("ticket {ticket_id} not found")]
    NotFound { ticket_id: TicketId },
}
