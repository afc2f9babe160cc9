//! Outbound ports (Repository traits)
//!
//! Hexagonal architecture: interfaces the infrastructure must implement.
//! The core never performs I/O itself; callers fetch state, apply domain
//! functions and persist the result through these ports.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::aggregates::{Agent, Ticket};
use crate::domain::events::DomainEvent;
use crate::domain::value_objects::{Department, TicketId, ViewPreferences};

/// Ticket store port
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Find ticket by ID
    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, RepositoryError>;

    /// List all tickets
    async fn list(&self) -> Result<Vec<Ticket>, RepositoryError>;

    /// Save ticket (insert or update)
    async fn save(&self, ticket: &Ticket) -> Result<(), RepositoryError>;

    /// Delete ticket
    async fn delete(&self, id: &TicketId) -> Result<(), RepositoryError>;
}

/// Agent directory port
#[async_trait]
pub trait AgentDirectory: Send + Sync {
    /// List agents eligible for assignment
    async fn list_active_agents(&self) -> Result<Vec<Agent>, RepositoryError>;
}

/// Department directory port
#[async_trait]
pub trait DepartmentDirectory: Send + Sync {
    /// List active departments
    async fn list_active(&self) -> Result<Vec<Department>, RepositoryError>;
}

/// Per-user view preferences port
#[async_trait]
pub trait PreferencesStore: Send + Sync {
    /// Stored preferences for a user, if any
    async fn get(&self, user_id: &str) -> Result<Option<ViewPreferences>, RepositoryError>;

    /// Overwrite a user's preferences wholesale
    async fn put(&self, user_id: &str, prefs: &ViewPreferences) -> Result<(), RepositoryError>;
}

/// Event publisher port
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish domain events
    async fn publish(&self, events: Vec<DomainEvent>) -> Result<(), RepositoryError>;
}

/// Repository error type
#[derive(Clone, Debug, Error)]
pub enum RepositoryError {
    #[error("entity not found")]
    NotFound,

    #[error("connection error: {0}")]
    ConnectionError(String),

    #[error("query error: {0}")]
    QueryError(String),

    #[error("serialization error: {0}")]
    SerializationError(String),
}
