//! Command handlers
//!
//! Application services that orchestrate use cases: fetch the current
//! ticket, authorize the caller, apply the domain function, persist and
//! publish. A denial or domain error surfaces before anything is written,
//! so no partial mutation ever reaches the store.

use chrono::Utc;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::application::dto::*;
use crate::domain::aggregates::{Ticket, TicketStatus};
use crate::domain::error::TicketError;
use crate::domain::services::{
    AssignmentService, AuthorizationPolicy, QueryEngine, TicketAction, TicketPage, TicketQuery,
};
use crate::domain::value_objects::{Actor, TicketId, ViewPreferences};
use crate::ports::inbound::{TicketUseCases, UseCaseError};
use crate::ports::outbound::{
    AgentDirectory, DepartmentDirectory, EventPublisher, PreferencesStore, TicketRepository,
};

/// Ticket application service
pub struct TicketService {
    tickets: Arc<dyn TicketRepository>,
    agents: Arc<dyn AgentDirectory>,
    departments: Arc<dyn DepartmentDirectory>,
    preferences: Arc<dyn PreferencesStore>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl TicketService {
    pub fn new(
        tickets: Arc<dyn TicketRepository>,
        agents: Arc<dyn AgentDirectory>,
        departments: Arc<dyn DepartmentDirectory>,
        preferences: Arc<dyn PreferencesStore>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            tickets,
            agents,
            departments,
            preferences,
            event_publisher,
        }
    }

    async fn load(&self, id: &TicketId) -> Result<Ticket, UseCaseError> {
        self.tickets
            .find_by_id(id)
            .await?
            .ok_or_else(|| UseCaseError::Domain(TicketError::NotFound { ticket_id: id.clone() }))
    }

    async fn persist(&self, ticket: &mut Ticket) -> Result<(), UseCaseError> {
        self.tickets.save(ticket).await?;
        let events = ticket.take_events();
        if !events.is_empty() {
            self.event_publisher.publish(events).await?;
        }
        Ok(())
    }

    /// Normalize a submitted department against the directory: a
    /// case-insensitive hit adopts the directory spelling, anything else
    /// is stored verbatim.
    async fn resolve_department(&self, name: &str) -> Result<String, UseCaseError> {
        let active = self.departments.list_active().await?;
        Ok(active
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
            .map(|d| d.name.clone())
            .unwrap_or_else(|| name.to_string()))
    }
}

#[async_trait]
impl TicketUseCases for TicketService {
    async fn create_ticket(&self, actor: &Actor, command: CreateTicketCommand) -> Result<Ticket, UseCaseError> {
        let department = self.resolve_department(&command.department).await?;

        let mut ticket = Ticket::create(
            command.title,
            command.description,
            command.priority,
            department,
            actor.user_id.clone(),
            Utc::now(),
        )?;
        if let Some(category) = command.category {
            ticket = ticket.with_category(category);
        }

        self.persist(&mut ticket).await?;
        info!(ticket = %ticket.id(), submitter = %actor.user_id, "ticket created");
        Ok(ticket)
    }

    async fn get_ticket(&self, actor: &Actor, id: &TicketId) -> Result<Ticket, UseCaseError> {
        let ticket = self.load(id).await?;
        AuthorizationPolicy::authorize(actor, TicketAction::View, &ticket)?;
        Ok(ticket)
    }

    async fn update_ticket(&self, actor: &Actor, command: UpdateTicketCommand) -> Result<Ticket, UseCaseError> {
        let id = TicketId::from_string(&command.ticket_id);
        let mut ticket = self.load(&id).await?;
        AuthorizationPolicy::authorize(actor, TicketAction::EditFields, &ticket)?;

        let department = match command.department {
            Some(name) => Some(self.resolve_department(&name).await?),
            None => None,
        };

        ticket.update_details(
            command.title,
            command.description,
            command.priority,
            department,
            command.category,
            Utc::now(),
        )?;

        self.persist(&mut ticket).await?;
        Ok(ticket)
    }

    async fn assign_ticket(&self, actor: &Actor, command: AssignTicketCommand) -> Result<Ticket, UseCaseError> {
        let id = TicketId::from_string(&command.ticket_id);
        let mut ticket = self.load(&id).await?;

        let action = if ticket.assigned_to().is_some() {
            TicketAction::Reassign
        } else {
            TicketAction::Assign
        };
        AuthorizationPolicy::authorize(actor, action, &ticket)?;

        let candidates = self.agents.list_active_agents().await?;
        AssignmentService::assign(&mut ticket, &candidates, &command.agent_id, Utc::now())?;

        self.persist(&mut ticket).await?;
        info!(ticket = %ticket.id(), agent = %command.agent_id, "ticket assigned");
        Ok(ticket)
    }

    async fn start_work(&self, actor: &Actor, id: &TicketId) -> Result<Ticket, UseCaseError> {
        let mut ticket = self.load(id).await?;
        AuthorizationPolicy::authorize(
            actor,
            TicketAction::Transition(TicketStatus::InProgress),
            &ticket,
        )?;
        ticket.start_work(Utc::now())?;
        self.persist(&mut ticket).await?;
        Ok(ticket)
    }

    async fn place_on_hold(&self, actor: &Actor, id: &TicketId) -> Result<Ticket, UseCaseError> {
        let mut ticket = self.load(id).await?;
        AuthorizationPolicy::authorize(
            actor,
            TicketAction::Transition(TicketStatus::OnHold),
            &ticket,
        )?;
        ticket.place_on_hold(Utc::now())?;
        self.persist(&mut ticket).await?;
        Ok(ticket)
    }

    async fn resume_work(&self, actor: &Actor, id: &TicketId) -> Result<Ticket, UseCaseError> {
        let mut ticket = self.load(id).await?;
        AuthorizationPolicy::authorize(
            actor,
            TicketAction::Transition(TicketStatus::InProgress),
            &ticket,
        )?;
        ticket.resume(Utc::now())?;
        self.persist(&mut ticket).await?;
        Ok(ticket)
    }

    async fn resolve_ticket(&self, actor: &Actor, command: ResolveTicketCommand) -> Result<Ticket, UseCaseError> {
        let id = TicketId::from_string(&command.ticket_id);
        let mut ticket = self.load(&id).await?;
        AuthorizationPolicy::authorize(actor, TicketAction::Resolve, &ticket)?;

        ticket.resolve(
            command.resolution_description,
            command.agent_feedback,
            actor.user_id.clone(),
            Utc::now(),
        )?;

        self.persist(&mut ticket).await?;
        info!(ticket = %ticket.id(), resolved_by = %actor.user_id, "ticket resolved");
        Ok(ticket)
    }

    async fn close_ticket(&self, actor: &Actor, id: &TicketId) -> Result<Ticket, UseCaseError> {
        let mut ticket = self.load(id).await?;
        AuthorizationPolicy::authorize(
            actor,
            TicketAction::Transition(TicketStatus::Closed),
            &ticket,
        )?;
        ticket.close(Utc::now())?;
        self.persist(&mut ticket).await?;
        Ok(ticket)
    }

    async fn reopen_ticket(&self, actor: &Actor, id: &TicketId) -> Result<Ticket, UseCaseError> {
        let mut ticket = self.load(id).await?;
        AuthorizationPolicy::authorize(actor, TicketAction::Reopen, &ticket)?;
        ticket.reopen(Utc::now())?;
        self.persist(&mut ticket).await?;
        info!(ticket = %ticket.id(), "ticket reopened");
        Ok(ticket)
    }

    async fn delete_ticket(&self, actor: &Actor, id: &TicketId) -> Result<(), UseCaseError> {
        let ticket = self.load(id).await?;
        AuthorizationPolicy::authorize(actor, TicketAction::Delete, &ticket)?;
        self.tickets.delete(id).await?;
        info!(ticket = %id, "ticket deleted");
        Ok(())
    }

    async fn escalate_ticket(&self, actor: &Actor, id: &TicketId) -> Result<Ticket, UseCaseError> {
        let mut ticket = self.load(id).await?;
        AuthorizationPolicy::authorize(actor, TicketAction::Escalate, &ticket)?;
        ticket.escalate(Utc::now());
        self.persist(&mut ticket).await?;
        Ok(ticket)
    }

    async fn add_comment(&self, actor: &Actor, command: AddCommentCommand) -> Result<Ticket, UseCaseError> {
        let id = TicketId::from_string(&command.ticket_id);
        let mut ticket = self.load(&id).await?;
        AuthorizationPolicy::authorize(actor, TicketAction::Comment, &ticket)?;
        ticket.add_comment(actor.user_id.clone(), command.body, command.is_public, Utc::now())?;
        self.persist(&mut ticket).await?;
        Ok(ticket)
    }

    async fn list_tickets(&self, actor: &Actor, query: Option<TicketQuery>) -> Result<TicketPage, UseCaseError> {
        let query = match query {
            Some(q) => q,
            None => {
                let prefs = self
                    .preferences
                    .get(&actor.user_id)
                    .await?
                    .unwrap_or_default();
                TicketQuery::from_preferences(&prefs)
            }
        };

        let tickets = self.tickets.list().await?;
        Ok(QueryEngine::run(&tickets, &query, actor))
    }

    async fn get_preferences(&self, actor: &Actor) -> Result<ViewPreferences, UseCaseError> {
        Ok(self
            .preferences
            .get(&actor.user_id)
            .await?
            .unwrap_or_default())
    }

    async fn save_preferences(&self, actor: &Actor, prefs: ViewPreferences) -> Result<(), UseCaseError> {
        self.preferences.put(&actor.user_id, &prefs).await?;
        Ok(())
    }
}
