//! Ticket Aggregate
//!
//! Rich aggregate root for support tickets. All status changes go through
//! the transition methods below; an edge missing from the lifecycle table
//! fails with `TicketError::InvalidTransition` and leaves the ticket
//! untouched. The clock is injected (`now`) so the aggregate stays pure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::error::TicketError;
use crate::domain::events::{DomainEvent, TicketEvent};
use crate::domain::value_objects::{Priority, TicketId};

/// Ticket lifecycle states, ordered by pipeline position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    Open,
    Assigned,
    InProgress,
    OnHold,
    Resolved,
    Closed,
}

impl TicketStatus {
    /// States a ticket can be resolved from. A ticket must have an
    /// assignee before resolution, so `Open` is excluded.
    pub fn is_resolvable(self) -> bool {
        matches!(
            self,
            TicketStatus::Assigned | TicketStatus::InProgress | TicketStatus::OnHold
        )
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TicketStatus::Open => "open",
            TicketStatus::Assigned => "assigned",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::OnHold => "on_hold",
            TicketStatus::Resolved => "resolved",
            TicketStatus::Closed => "closed",
        };
        write!(f, "{}", s)
    }
}

/// Resolution data captured when a ticket is resolved.
///
/// Text is stored verbatim; validation trims only for the emptiness check.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub description: String,
    pub agent_feedback: String,
    pub resolved_by: String,
    pub resolved_date: DateTime<Utc>,
}

/// Conversation entry on a ticket.
#[derive(Clone, Debug)]
pub struct Comment {
    pub id: String,
    pub author_id: String,
    pub body: String,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

/// Ticket aggregate root
#[derive(Clone, Debug)]
pub struct Ticket {
    id: TicketId,
    title: String,
    description: String,
    status: TicketStatus,
    priority: Priority,
    department: String,
    category: Option<String>,
    submitted_by: String,
    assigned_to: Option<String>,
    comments: Vec<Comment>,
    resolution: Option<Resolution>,
    submitted_date: DateTime<Utc>,
    last_updated: DateTime<Utc>,
    version: u64,
    events: Vec<DomainEvent>,
}

impl Ticket {
    /// Create a new ticket in the `Open` state with no assignee.
    pub fn create(
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
        department: impl Into<String>,
        submitted_by: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, TicketError> {
        let title = title.into();
        let description = description.into();

        if title.trim().is_empty() {
            return Err(TicketError::MissingField { field: "title" });
        }
        if description.trim().is_empty() {
            return Err(TicketError::MissingField { field: "description" });
        }

        let id = TicketId::new();
        let submitted_by = submitted_by.into();

        let mut ticket = Self {
            id: id.clone(),
            title,
            description,
            status: TicketStatus::Open,
            priority,
            department: department.into(),
            category: None,
            submitted_by: submitted_by.clone(),
            assigned_to: None,
            comments: vec![],
            resolution: None,
            submitted_date: now,
            last_updated: now,
            version: 0,
            events: vec![],
        };

        ticket.raise_event(DomainEvent::Ticket(TicketEvent::Created {
            ticket_id: id,
            submitted_by,
            created_at: now,
        }));

        Ok(ticket)
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn id(&self) -> &TicketId { &self.id }
    pub fn title(&self) -> &str { &self.title }
    pub fn description(&self) -> &str { &self.description }
    pub fn status(&self) -> TicketStatus { self.status }
    pub fn priority(&self) -> Priority { self.priority }
    pub fn department(&self) -> &str { &self.department }
    pub fn category(&self) -> Option<&str> { self.category.as_deref() }
    pub fn submitted_by(&self) -> &str { &self.submitted_by }
    pub fn assigned_to(&self) -> Option<&str> { self.assigned_to.as_deref() }
    pub fn comments(&self) -> &[Comment] { &self.comments }
    pub fn resolution(&self) -> Option<&Resolution> { self.resolution.as_ref() }
    pub fn submitted_date(&self) -> DateTime<Utc> { self.submitted_date }
    pub fn last_updated(&self) -> DateTime<Utc> { self.last_updated }
    pub fn version(&self) -> u64 { self.version }

    // =========================================================================
    // Lifecycle transitions
    // =========================================================================

    /// Set the assignee. An `Open` ticket advances to `Assigned`;
    /// reassignment never regresses a later status. Eligibility of the
    /// agent is the assignment engine's concern, not the aggregate's.
    pub fn assign(&mut self, agent_id: impl Into<String>, now: DateTime<Utc>) -> Result<(), TicketError> {
        let agent_id = agent_id.into();

        match self.status {
            TicketStatus::Open => {
                self.assigned_to = Some(agent_id.clone());
                self.status = TicketStatus::Assigned;
                self.touch(now);
                self.raise_event(DomainEvent::Ticket(TicketEvent::Assigned {
                    ticket_id: self.id.clone(),
                    agent_id,
                    assigned_at: now,
                }));
                Ok(())
            }
            TicketStatus::Assigned | TicketStatus::InProgress | TicketStatus::OnHold => {
                let previous = self.assigned_to.replace(agent_id.clone());
                self.touch(now);
                match previous {
                    Some(from_agent) if from_agent != agent_id => {
                        self.raise_event(DomainEvent::Ticket(TicketEvent::Reassigned {
                            ticket_id: self.id.clone(),
                            from_agent,
                            to_agent: agent_id,
                        }));
                    }
                    _ => {
                        self.raise_event(DomainEvent::Ticket(TicketEvent::Assigned {
                            ticket_id: self.id.clone(),
                            agent_id,
                            assigned_at: now,
                        }));
                    }
                }
                Ok(())
            }
            from => Err(TicketError::InvalidTransition {
                from,
                to: TicketStatus::Assigned,
            }),
        }
    }

    /// Agent begins work: `Assigned` -> `InProgress`.
    pub fn start_work(&mut self, now: DateTime<Utc>) -> Result<(), TicketError> {
        self.change_status(TicketStatus::Assigned, TicketStatus::InProgress, now)
    }

    /// Pause: `Assigned`/`InProgress` -> `OnHold`.
    pub fn place_on_hold(&mut self, now: DateTime<Utc>) -> Result<(), TicketError> {
        match self.status {
            TicketStatus::Assigned | TicketStatus::InProgress => {
                self.transition_to(TicketStatus::OnHold, now);
                Ok(())
            }
            from => Err(TicketError::InvalidTransition {
                from,
                to: TicketStatus::OnHold,
            }),
        }
    }

    /// Resume: `OnHold` -> `InProgress`.
    pub fn resume(&mut self, now: DateTime<Utc>) -> Result<(), TicketError> {
        self.change_status(TicketStatus::OnHold, TicketStatus::InProgress, now)
    }

    /// Resolve the ticket, capturing resolution data.
    ///
    /// This is the only path that populates resolution fields. Both texts
    /// must be non-empty after trimming; they are stored verbatim.
    pub fn resolve(
        &mut self,
        resolution_description: impl Into<String>,
        agent_feedback: impl Into<String>,
        resolved_by: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<(), TicketError> {
        let resolution_description = resolution_description.into();
        let agent_feedback = agent_feedback.into();

        if resolution_description.trim().is_empty() {
            return Err(TicketError::MissingField { field: "resolution_description" });
        }
        if agent_feedback.trim().is_empty() {
            return Err(TicketError::MissingField { field: "agent_feedback" });
        }

        if !self.status.is_resolvable() {
            return Err(TicketError::InvalidTransition {
                from: self.status,
                to: TicketStatus::Resolved,
            });
        }

        let resolved_by = resolved_by.into();
        self.resolution = Some(Resolution {
            description: resolution_description,
            agent_feedback,
            resolved_by: resolved_by.clone(),
            resolved_date: now,
        });
        self.status = TicketStatus::Resolved;
        self.touch(now);

        self.raise_event(DomainEvent::Ticket(TicketEvent::Resolved {
            ticket_id: self.id.clone(),
            resolved_by,
            resolved_at: now,
        }));

        Ok(())
    }

    /// Confirm closure: `Resolved` -> `Closed`.
    pub fn close(&mut self, now: DateTime<Utc>) -> Result<(), TicketError> {
        self.change_status(TicketStatus::Resolved, TicketStatus::Closed, now)
    }

    /// Reopen a closed ticket: `Closed` -> `Open`, clearing the assignee
    /// and resolution data. The only edge out of `Closed`.
    pub fn reopen(&mut self, now: DateTime<Utc>) -> Result<(), TicketError> {
        if self.status != TicketStatus::Closed {
            return Err(TicketError::InvalidTransition {
                from: self.status,
                to: TicketStatus::Open,
            });
        }

        self.status = TicketStatus::Open;
        self.assigned_to = None;
        self.resolution = None;
        self.touch(now);

        self.raise_event(DomainEvent::Ticket(TicketEvent::Reopened {
            ticket_id: self.id.clone(),
            reopened_at: now,
        }));

        Ok(())
    }

    // =========================================================================
    // Field edits
    // =========================================================================

    /// Update editable fields. `None` leaves a field unchanged; a provided
    /// blank value is rejected.
    pub fn update_details(
        &mut self,
        title: Option<String>,
        description: Option<String>,
        priority: Option<Priority>,
        department: Option<String>,
        category: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<(), TicketError> {
        if let Some(ref t) = title {
            if t.trim().is_empty() {
                return Err(TicketError::MissingField { field: "title" });
            }
        }
        if let Some(ref d) = description {
            if d.trim().is_empty() {
                return Err(TicketError::MissingField { field: "description" });
            }
        }

        if let Some(t) = title {
            self.title = t;
        }
        if let Some(d) = description {
            self.description = d;
        }
        if let Some(p) = priority {
            self.priority = p;
        }
        if let Some(dep) = department {
            self.department = dep;
        }
        if category.is_some() {
            self.category = category;
        }
        self.touch(now);

        Ok(())
    }

    pub fn set_priority(&mut self, priority: Priority, now: DateTime<Utc>) {
        self.priority = priority;
        self.touch(now);
    }

    /// Bump priority one rank up.
    pub fn escalate(&mut self, now: DateTime<Utc>) {
        self.priority = self.priority.escalated();
        self.touch(now);
        self.raise_event(DomainEvent::Ticket(TicketEvent::Escalated {
            ticket_id: self.id.clone(),
            priority: self.priority,
        }));
    }

    pub fn add_comment(
        &mut self,
        author_id: impl Into<String>,
        body: impl Into<String>,
        is_public: bool,
        now: DateTime<Utc>,
    ) -> Result<(), TicketError> {
        let body = body.into();
        if body.trim().is_empty() {
            return Err(TicketError::MissingField { field: "comment" });
        }

        let author_id = author_id.into();
        self.comments.push(Comment {
            id: uuid::Uuid::new_v4().to_string(),
            author_id: author_id.clone(),
            body,
            is_public,
            created_at: now,
        });
        self.touch(now);

        self.raise_event(DomainEvent::Ticket(TicketEvent::CommentAdded {
            ticket_id: self.id.clone(),
            author_id,
        }));

        Ok(())
    }

    // =========================================================================
    // Private
    // =========================================================================

    fn change_status(
        &mut self,
        expected: TicketStatus,
        to: TicketStatus,
        now: DateTime<Utc>,
    ) -> Result<(), TicketError> {
        if self.status != expected {
            return Err(TicketError::InvalidTransition { from: self.status, to });
        }
        self.transition_to(to, now);
        Ok(())
    }

    fn transition_to(&mut self, to: TicketStatus, now: DateTime<Utc>) {
        let from = self.status;
        self.status = to;
        self.touch(now);
        self.raise_event(DomainEvent::Ticket(TicketEvent::StatusChanged {
            ticket_id: self.id.clone(),
            from,
            to,
            changed_at: now,
        }));
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    fn raise_event(&mut self, event: DomainEvent) {
        self.events.push(event);
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.last_updated = now;
        self.version += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_ticket() -> Ticket {
        Ticket::create(
            "VPN keeps dropping",
            "Connection drops every few minutes",
            Priority::High,
            "IT Support",
            "u1@example.com",
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn test_created_ticket_is_open_and_unassigned() {
        let ticket = create_test_ticket();
        assert_eq!(ticket.status(), TicketStatus::Open);
        assert!(ticket.assigned_to().is_none());
        assert!(ticket.resolution().is_none());
        assert_eq!(ticket.last_updated(), ticket.submitted_date());
    }

    #[test]
    fn test_create_rejects_blank_title() {
        let result = Ticket::create(
            "   ",
            "desc",
            Priority::Low,
            "IT Support",
            "u1",
            Utc::now(),
        );
        assert_eq!(result.unwrap_err(), TicketError::MissingField { field: "title" });
    }

    #[test]
    fn test_assign_advances_open_to_assigned() {
        let mut ticket = create_test_ticket();
        ticket.assign("a1", Utc::now()).unwrap();

        assert_eq!(ticket.status(), TicketStatus::Assigned);
        assert_eq!(ticket.assigned_to(), Some("a1"));
    }

    #[test]
    fn test_reassign_does_not_regress_status() {
        let mut ticket = create_test_ticket();
        ticket.assign("a1", Utc::now()).unwrap();
        ticket.start_work(Utc::now()).unwrap();

        ticket.assign("a2", Utc::now()).unwrap();

        assert_eq!(ticket.status(), TicketStatus::InProgress);
        assert_eq!(ticket.assigned_to(), Some("a2"));
    }

    #[test]
    fn test_cannot_resolve_open_ticket() {
        let mut ticket = create_test_ticket();
        let result = ticket.resolve("fixed", "done", "a1", Utc::now());

        assert_eq!(
            result.unwrap_err(),
            TicketError::InvalidTransition {
                from: TicketStatus::Open,
                to: TicketStatus::Resolved,
            }
        );
        assert!(ticket.resolution().is_none());
    }

    #[test]
    fn test_resolve_rejects_whitespace_only_text() {
        let mut ticket = create_test_ticket();
        ticket.assign("a1", Utc::now()).unwrap();

        let result = ticket.resolve("  ", "replaced hardware", "a1", Utc::now());
        assert_eq!(
            result.unwrap_err(),
            TicketError::MissingField { field: "resolution_description" }
        );

        let result = ticket.resolve("fixed cable", "\t\n", "a1", Utc::now());
        assert_eq!(
            result.unwrap_err(),
            TicketError::MissingField { field: "agent_feedback" }
        );

        assert_eq!(ticket.status(), TicketStatus::Assigned);
        assert!(ticket.resolution().is_none());
    }

    #[test]
    fn test_resolve_sets_resolution_verbatim() {
        let mut ticket = create_test_ticket();
        let now = Utc::now();
        ticket.assign("a1", now).unwrap();
        ticket.resolve("fixed cable ", " replaced hardware", "a1", now).unwrap();

        assert_eq!(ticket.status(), TicketStatus::Resolved);
        let resolution = ticket.resolution().unwrap();
        assert_eq!(resolution.description, "fixed cable ");
        assert_eq!(resolution.agent_feedback, " replaced hardware");
        assert_eq!(resolution.resolved_by, "a1");
        assert_eq!(resolution.resolved_date, now);
    }

    #[test]
    fn test_hold_and_resume() {
        let mut ticket = create_test_ticket();
        ticket.assign("a1", Utc::now()).unwrap();
        ticket.start_work(Utc::now()).unwrap();
        ticket.place_on_hold(Utc::now()).unwrap();
        assert_eq!(ticket.status(), TicketStatus::OnHold);

        ticket.resume(Utc::now()).unwrap();
        assert_eq!(ticket.status(), TicketStatus::InProgress);

        // on-hold tickets stay resolvable
        ticket.place_on_hold(Utc::now()).unwrap();
        ticket.resolve("fixed", "ok", "a1", Utc::now()).unwrap();
        assert_eq!(ticket.status(), TicketStatus::Resolved);
    }

    #[test]
    fn test_close_requires_resolved() {
        let mut ticket = create_test_ticket();
        assert!(matches!(
            ticket.close(Utc::now()),
            Err(TicketError::InvalidTransition { .. })
        ));

        ticket.assign("a1", Utc::now()).unwrap();
        ticket.resolve("fixed", "ok", "a1", Utc::now()).unwrap();
        ticket.close(Utc::now()).unwrap();
        assert_eq!(ticket.status(), TicketStatus::Closed);
    }

    #[test]
    fn test_reopen_clears_assignee_and_resolution() {
        let mut ticket = create_test_ticket();
        ticket.assign("a1", Utc::now()).unwrap();
        ticket.resolve("fixed", "ok", "a1", Utc::now()).unwrap();
        ticket.close(Utc::now()).unwrap();

        ticket.reopen(Utc::now()).unwrap();

        assert_eq!(ticket.status(), TicketStatus::Open);
        assert!(ticket.assigned_to().is_none());
        assert!(ticket.resolution().is_none());
    }

    #[test]
    fn test_closed_ticket_rejects_assignment() {
        let mut ticket = create_test_ticket();
        ticket.assign("a1", Utc::now()).unwrap();
        ticket.resolve("fixed", "ok", "a1", Utc::now()).unwrap();
        ticket.close(Utc::now()).unwrap();

        assert!(matches!(
            ticket.assign("a2", Utc::now()),
            Err(TicketError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_version_increments_on_every_mutation() {
        let mut ticket = create_test_ticket();
        let v0 = ticket.version();
        ticket.assign("a1", Utc::now()).unwrap();
        ticket.start_work(Utc::now()).unwrap();
        ticket.escalate(Utc::now());
        assert_eq!(ticket.version(), v0 + 3);
    }

    #[test]
    fn test_escalate_bumps_priority() {
        let mut ticket = create_test_ticket();
        ticket.escalate(Utc::now());
        assert_eq!(ticket.priority(), Priority::Urgent);
    }

    #[test]
    fn test_add_comment_rejects_blank_body() {
        let mut ticket = create_test_ticket();
        assert_eq!(
            ticket.add_comment("u1", "   ", true, Utc::now()).unwrap_err(),
            TicketError::MissingField { field: "comment" }
        );

        ticket.add_comment("u1", "any update?", true, Utc::now()).unwrap();
        assert_eq!(ticket.comments().len(), 1);
    }
}
