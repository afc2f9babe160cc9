//! Authorization Policy
//!
//! Pure role -> action decision matrix. The policy decides *who* may do
//! something; whether the ticket's current status makes the operation
//! legal is the lifecycle table's concern. Callers authorize before
//! mutating so a denial never leaves a partial write behind.

use crate::domain::aggregates::{Ticket, TicketStatus};
use crate::domain::error::TicketError;
use crate::domain::value_objects::{Actor, Role};
use std::fmt;

/// Actions a caller can request on a ticket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TicketAction {
    View,
    EditFields,
    Assign,
    Reassign,
    Transition(TicketStatus),
    Resolve,
    Delete,
    Reopen,
    Comment,
    Escalate,
}

impl fmt::Display for TicketAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketAction::View => write!(f, "view"),
            TicketAction::EditFields => write!(f, "edit_fields"),
            TicketAction::Assign => write!(f, "assign"),
            TicketAction::Reassign => write!(f, "reassign"),
            TicketAction::Transition(to) => write!(f, "transition({})", to),
            TicketAction::Resolve => write!(f, "resolve"),
            TicketAction::Delete => write!(f, "delete"),
            TicketAction::Reopen => write!(f, "reopen"),
            TicketAction::Comment => write!(f, "comment"),
            TicketAction::Escalate => write!(f, "escalate"),
        }
    }
}

/// Fixed department alias groups. An agent in any member department sees
/// tickets filed under the group's other members.
const DEPARTMENT_ALIASES: &[(&str, &[&str])] = &[
    (
        "IT",
        &[
            "IT Support",
            "Software Support",
            "Hardware Support",
            "Network Operations",
            "Email Support",
        ],
    ),
    ("HR", &["Human Resources", "Facility Management"]),
];

/// Resolve a department name to its alias-group key, or itself when it
/// belongs to no group.
pub fn canonical_department(name: &str) -> &str {
    for (group, members) in DEPARTMENT_ALIASES {
        if group.eq_ignore_ascii_case(name) {
            return group;
        }
        if members.iter().any(|m| m.eq_ignore_ascii_case(name)) {
            return group;
        }
    }
    name
}

/// Whether two department names refer to the same support area.
pub fn departments_match(a: &str, b: &str) -> bool {
    canonical_department(a).eq_ignore_ascii_case(canonical_department(b))
}

/// Stateless authorization policy service.
pub struct AuthorizationPolicy;

impl AuthorizationPolicy {
    /// Decide whether `actor` may perform `action` on `ticket`.
    pub fn can_perform(actor: &Actor, action: TicketAction, ticket: &Ticket) -> bool {
        match actor.role {
            Role::Superadmin | Role::Admin => true,
            Role::Agent => Self::agent_can_perform(actor, action, ticket),
            Role::Staff => Self::staff_can_perform(actor, action, ticket),
        }
    }

    /// Like `can_perform`, but a denial is a structured error.
    pub fn authorize(actor: &Actor, action: TicketAction, ticket: &Ticket) -> Result<(), TicketError> {
        if Self::can_perform(actor, action, ticket) {
            Ok(())
        } else {
            tracing::debug!(role = %actor.role, action = %action, ticket = %ticket.id(), "denied");
            Err(TicketError::PermissionDenied {
                role: actor.role,
                action,
            })
        }
    }

    fn agent_can_perform(actor: &Actor, action: TicketAction, ticket: &Ticket) -> bool {
        let visible = Self::agent_can_view(actor, ticket);

        match action {
            TicketAction::View | TicketAction::Comment | TicketAction::Escalate => visible,
            // Agents route unassigned tickets and hand off assigned ones;
            // eligibility of the target agent is checked by the assignment
            // engine, not here.
            TicketAction::Assign => visible && ticket.assigned_to().is_none(),
            TicketAction::Reassign => visible && ticket.assigned_to().is_some(),
            TicketAction::Resolve => visible && ticket.status().is_resolvable(),
            TicketAction::Transition(to) => {
                visible
                    && matches!(
                        to,
                        TicketStatus::InProgress | TicketStatus::OnHold | TicketStatus::Closed
                    )
            }
            TicketAction::EditFields | TicketAction::Delete | TicketAction::Reopen => false,
        }
    }

    fn agent_can_view(actor: &Actor, ticket: &Ticket) -> bool {
        if ticket.assigned_to() == Some(actor.user_id.as_str()) {
            return true;
        }
        actor
            .department
            .as_deref()
            .map(|dept| departments_match(dept, ticket.department()))
            .unwrap_or(false)
    }

    fn staff_can_perform(actor: &Actor, action: TicketAction, ticket: &Ticket) -> bool {
        let own = ticket.submitted_by() == actor.user_id;

        match action {
            TicketAction::View => own,
            TicketAction::EditFields => {
                own && matches!(
                    ticket.status(),
                    TicketStatus::Open | TicketStatus::Assigned | TicketStatus::InProgress
                )
            }
            TicketAction::Comment => own && ticket.status() != TicketStatus::Closed,
            _ => false,
        }
    }
}
