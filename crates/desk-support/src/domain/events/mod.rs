//! Domain Events
//!
//! Events raised by the ticket aggregate to communicate state changes.

use chrono::{DateTime, Utc};

use crate::domain::aggregates::TicketStatus;
use crate::domain::value_objects::{Priority, TicketId};

/// All domain events in the support bounded context
#[derive(Clone, Debug)]
pub enum DomainEvent {
    Ticket(TicketEvent),
}

/// Ticket-related domain events
#[derive(Clone, Debug)]
pub enum TicketEvent {
    Created {
        ticket_id: TicketId,
        submitted_by: String,
        created_at: DateTime<Utc>,
    },

    Assigned {
        ticket_id: TicketId,
        agent_id: String,
        assigned_at: DateTime<Utc>,
    },

    Reassigned {
        ticket_id: TicketId,
        from_agent: String,
        to_agent: String,
    },

    StatusChanged {
        ticket_id: TicketId,
        from: TicketStatus,
        to: TicketStatus,
        changed_at: DateTime<Utc>,
    },

    Resolved {
        ticket_id: TicketId,
        resolved_by: String,
        resolved_at: DateTime<Utc>,
    },

    Reopened {
        ticket_id: TicketId,
        reopened_at: DateTime<Utc>,
    },

    CommentAdded {
        ticket_id: TicketId,
        author_id: String,
    },

    Escalated {
        ticket_id: TicketId,
        priority: Priority,
    },
}

impl DomainEvent {
    /// Get the aggregate ID this event belongs to
    pub fn aggregate_id(&self) -> &TicketId {
        match self {
            DomainEvent::Ticket(e) => match e {
                TicketEvent::Created { ticket_id, .. } => ticket_id,
                TicketEvent::Assigned { ticket_id, .. } => ticket_id,
                TicketEvent::Reassigned { ticket_id, .. } => ticket_id,
                TicketEvent::StatusChanged { ticket_id, .. } => ticket_id,
                TicketEvent::Resolved { ticket_id, .. } => ticket_id,
                TicketEvent::Reopened { ticket_id, .. } => ticket_id,
                TicketEvent::CommentAdded { ticket_id, .. } => ticket_id,
                TicketEvent::Escalated { ticket_id, .. } => ticket_id,
            },
        }
    }

    /// Get event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            DomainEvent::Ticket(e) => match e {
                TicketEvent::Created { .. } => "ticket.created",
                TicketEvent::Assigned { .. } => "ticket.assigned",
                TicketEvent::Reassigned { .. } => "ticket.reassigned",
                TicketEvent::StatusChanged { .. } => "ticket.status_changed",
                TicketEvent::Resolved { .. } => "ticket.resolved",
                TicketEvent::Reopened { .. } => "ticket.reopened",
                TicketEvent::CommentAdded { .. } => "ticket.comment_added",
                TicketEvent::Escalated { .. } => "ticket.escalated",
            },
        }
    }
}
