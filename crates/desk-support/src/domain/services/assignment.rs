//! Assignment Engine
//!
//! Resolves an assignment target against the eligible-candidate list and
//! applies it to the ticket. Status never regresses on reassignment.

use chrono::{DateTime, Utc};

use crate::domain::aggregates::{Agent, Ticket};
use crate::domain::error::TicketError;

pub struct AssignmentService;

impl AssignmentService {
    /// Assign `chosen_agent_id` to the ticket.
    ///
    /// The candidate list is expected to come from the agent directory;
    /// anyone inactive or without a support role is rejected with
    /// `UnknownAgent` and the ticket is left unchanged.
    pub fn assign(
        ticket: &mut Ticket,
        candidates: &[Agent],
        chosen_agent_id: &str,
        now: DateTime<Utc>,
    ) -> Result<(), TicketError> {
        let eligible = candidates
            .iter()
            .any(|a| a.id == chosen_agent_id && a.is_assignable());

        if !eligible {
            return Err(TicketError::UnknownAgent {
                agent_id: chosen_agent_id.to_string(),
            });
        }

        ticket.assign(chosen_agent_id, now)
    }
}
