//! OpenDesk Support Platform (ODSP)
//!
//! Ticket lifecycle, authorization and list-query core for the OpenDesk
//! helpdesk, following Domain-Driven Design (DDD) principles.
//!
//! ## Architecture
//!
//! - **Domain Layer**: Rich aggregates, value objects, domain events
//! - **Application Layer**: Use case orchestration, DTOs
//! - **Ports Layer**: Hexagonal architecture interfaces
//! - **Infrastructure Layer**: Concrete implementations
//!
//! ## Key Components
//!
//! - **Ticket**: support request aggregate with an enforced lifecycle
//!   (`open -> assigned -> in_progress/on_hold -> resolved -> closed`)
//! - **AuthorizationPolicy**: role-gated action matrix with
//!   department-alias visibility for agents
//! - **AssignmentService**: eligible-agent resolution and (re)assignment
//! - **QueryEngine**: the search/filter/sort/paginate pipeline every
//!   list view shares, seeded from per-user view preferences
//!
//! The core is synchronous and stateless between calls: every operation
//! maps current state plus inputs to new state or a structured error,
//! and the caller persists through the outbound ports.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

// Re-exports for convenience
pub use domain::aggregates::{Agent, Comment, Resolution, Ticket, TicketStatus};
pub use domain::error::TicketError;
pub use domain::events::{DomainEvent, TicketEvent};
pub use domain::services::{
    AssignmentService, AuthorizationPolicy, QueryEngine, TicketAction, TicketPage, TicketQuery,
};
pub use domain::value_objects::{
    Actor, Department, Priority, Role, SortField, SortOrder, TicketId, ViewPreferences,
};
pub use application::dto::{
    AddCommentCommand, AssignTicketCommand, CreateTicketCommand, ResolveTicketCommand,
    UpdateTicketCommand,
};
pub use application::TicketService;
pub use ports::inbound::{TicketUseCases, UseCaseError};
pub use ports::outbound::{
    AgentDirectory, DepartmentDirectory, EventPublisher, PreferencesStore, RepositoryError,
    TicketRepository,
};
