//! Inbound ports (Use case traits)
//!
//! Hexagonal architecture: application service interfaces. Every call
//! carries the caller's `Actor` explicitly; the core never reads identity
//! from ambient state.

use async_trait::async_trait;
use thiserror::Error;

use crate::application::dto::*;
use crate::domain::aggregates::Ticket;
use crate::domain::error::TicketError;
use crate::domain::services::{TicketPage, TicketQuery};
use crate::domain::value_objects::{Actor, TicketId, ViewPreferences};

/// Ticket management use cases
#[async_trait]
pub trait TicketUseCases: Send + Sync {
    /// Submit a new ticket
    async fn create_ticket(&self, actor: &Actor, command: CreateTicketCommand) -> Result<Ticket, UseCaseError>;

    /// Fetch a single ticket the actor may view
    async fn get_ticket(&self, actor: &Actor, id: &TicketId) -> Result<Ticket, UseCaseError>;

    /// Edit ticket fields
    async fn update_ticket(&self, actor: &Actor, command: UpdateTicketCommand) -> Result<Ticket, UseCaseError>;

    /// Assign or reassign an agent
    async fn assign_ticket(&self, actor: &Actor, command: AssignTicketCommand) -> Result<Ticket, UseCaseError>;

    /// Agent begins work
    async fn start_work(&self, actor: &Actor, id: &TicketId) -> Result<Ticket, UseCaseError>;

    /// Pause an active ticket
    async fn place_on_hold(&self, actor: &Actor, id: &TicketId) -> Result<Ticket, UseCaseError>;

    /// Resume a held ticket
    async fn resume_work(&self, actor: &Actor, id: &TicketId) -> Result<Ticket, UseCaseError>;

    /// Capture resolution data and mark resolved
    async fn resolve_ticket(&self, actor: &Actor, command: ResolveTicketCommand) -> Result<Ticket, UseCaseError>;

    /// Confirm closure of a resolved ticket
    async fn close_ticket(&self, actor: &Actor, id: &TicketId) -> Result<Ticket, UseCaseError>;

    /// Reopen a closed ticket
    async fn reopen_ticket(&self, actor: &Actor, id: &TicketId) -> Result<Ticket, UseCaseError>;

    /// Remove a ticket permanently
    async fn delete_ticket(&self, actor: &Actor, id: &TicketId) -> Result<(), UseCaseError>;

    /// Bump priority one rank
    async fn escalate_ticket(&self, actor: &Actor, id: &TicketId) -> Result<Ticket, UseCaseError>;

    /// Append a comment
    async fn add_comment(&self, actor: &Actor, command: AddCommentCommand) -> Result<Ticket, UseCaseError>;

    /// List tickets; `None` seeds the query from stored preferences
    async fn list_tickets(&self, actor: &Actor, query: Option<TicketQuery>) -> Result<TicketPage, UseCaseError>;

    /// The actor's list-view defaults (hard-coded defaults when unset)
    async fn get_preferences(&self, actor: &Actor) -> Result<ViewPreferences, UseCaseError>;

    /// Overwrite the actor's list-view defaults
    async fn save_preferences(&self, actor: &Actor, prefs: ViewPreferences) -> Result<(), UseCaseError>;
}

#[derive(Clone, Debug, Error)]
pub enum UseCaseError {
    #[error(transparent)]
    Domain(#[from] TicketError),

    #[error("repository error: {0}")]
    Repository(String),
}

impl From<crate::ports::outbound::RepositoryError> for UseCaseError {
    fn from(err: crate::ports::outbound::RepositoryError) -> Self {
        UseCaseError::Repository(err.to_string())
    }
}
