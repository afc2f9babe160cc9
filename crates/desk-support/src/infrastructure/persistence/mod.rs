//! In-memory adapter implementations
//!
//! Reference implementations of the outbound ports, used by tests and by
//! embedders that have no persistence of their own yet.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::aggregates::{Agent, Ticket};
use crate::domain::events::DomainEvent;
use crate::domain::value_objects::{Department, TicketId, ViewPreferences};
use crate::ports::outbound::{
    AgentDirectory, DepartmentDirectory, EventPublisher, PreferencesStore, RepositoryError,
    TicketRepository,
};

/// In-memory ticket repository
#[derive(Default)]
pub struct InMemoryTicketRepository {
    tickets: DashMap<String, Ticket>,
}

impl InMemoryTicketRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TicketRepository for InMemoryTicketRepository {
    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, RepositoryError> {
        Ok(self.tickets.get(id.as_str()).map(|t| t.clone()))
    }

    async fn list(&self) -> Result<Vec<Ticket>, RepositoryError> {
        Ok(self.tickets.iter().map(|t| t.clone()).collect())
    }

    async fn save(&self, ticket: &Ticket) -> Result<(), RepositoryError> {
        self.tickets.insert(ticket.id().to_string(), ticket.clone());
        Ok(())
    }

    async fn delete(&self, id: &TicketId) -> Result<(), RepositoryError> {
        self.tickets.remove(id.as_str());
        Ok(())
    }
}

/// In-memory agent directory
#[derive(Default)]
pub struct InMemoryAgentDirectory {
    agents: DashMap<String, Agent>,
}

impl InMemoryAgentDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, agent: Agent) {
        self.agents.insert(agent.id.clone(), agent);
    }
}

#[async_trait]
impl AgentDirectory for InMemoryAgentDirectory {
    async fn list_active_agents(&self) -> Result<Vec<Agent>, RepositoryError> {
        Ok(self
            .agents
            .iter()
            .filter(|a| a.is_assignable())
            .map(|a| a.clone())
            .collect())
    }
}

/// In-memory department directory
#[derive(Default)]
pub struct InMemoryDepartmentDirectory {
    departments: DashMap<String, Department>,
}

impl InMemoryDepartmentDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_departments(names: &[&str]) -> Self {
        let directory = Self::default();
        for name in names {
            directory.departments.insert(
                name.to_string(),
                Department {
                    name: name.to_string(),
                    is_active: true,
                },
            );
        }
        directory
    }
}

#[async_trait]
impl DepartmentDirectory for InMemoryDepartmentDirectory {
    async fn list_active(&self) -> Result<Vec<Department>, RepositoryError> {
        Ok(self
            .departments
            .iter()
            .filter(|d| d.is_active)
            .map(|d| d.clone())
            .collect())
    }
}

/// In-memory preferences store
#[derive(Default)]
pub struct InMemoryPreferencesStore {
    preferences: DashMap<String, ViewPreferences>,
}

impl InMemoryPreferencesStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferencesStore for InMemoryPreferencesStore {
    async fn get(&self, user_id: &str) -> Result<Option<ViewPreferences>, RepositoryError> {
        Ok(self.preferences.get(user_id).map(|p| p.clone()))
    }

    async fn put(&self, user_id: &str, prefs: &ViewPreferences) -> Result<(), RepositoryError> {
        self.preferences.insert(user_id.to_string(), prefs.clone());
        Ok(())
    }
}

/// No-op event publisher
#[derive(Default)]
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _events: Vec<DomainEvent>) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Priority;
    use chrono::Utc;

    fn test_ticket() -> Ticket {
        Ticket::create(
            "Password reset",
            "Locked out after vacation",
            Priority::Medium,
            "IT Support",
            "u1",
            Utc::now(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_ticket_repository_save_and_find() {
        let repo = InMemoryTicketRepository::new();
        let ticket = test_ticket();

        repo.save(&ticket).await.unwrap();

        let found = repo.find_by_id(ticket.id()).await.unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().title(), "Password reset");

        repo.delete(ticket.id()).await.unwrap();
        assert!(repo.find_by_id(ticket.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_agent_directory_filters_unassignable() {
        let directory = InMemoryAgentDirectory::new();
        directory.insert(Agent::new("a1", "Dana Reyes", "dana@example.com", "IT Support"));
        directory.insert(
            Agent::new("a2", "Sam Ortiz", "sam@example.com", "IT Support").deactivated(),
        );

        let active = directory.list_active_agents().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, "a1");
    }

    #[tokio::test]
    async fn test_preferences_default_on_missing() {
        let store = InMemoryPreferencesStore::new();

        assert!(store.get("u1").await.unwrap().is_none());

        let prefs = ViewPreferences {
            items_per_page: 25,
            ..ViewPreferences::default()
        };
        store.put("u1", &prefs).await.unwrap();
        assert_eq!(store.get("u1").await.unwrap(), Some(prefs));
    }
}
