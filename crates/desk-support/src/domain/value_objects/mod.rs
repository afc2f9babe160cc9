//! Support value objects
//!
//! Immutable, validated domain primitives shared across the support context.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ticket identifier value object
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketId(String);

impl TicketId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TicketId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for TicketId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Ticket priority, ordered by escalation rank (not lexically).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
    Critical,
}

impl Priority {
    /// Next rank up; `Critical` saturates.
    pub fn escalated(self) -> Self {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Urgent,
            Priority::Urgent | Priority::Critical => Priority::Critical,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
            Priority::Critical => "critical",
        };
        write!(f, "{}", s)
    }
}

/// Caller role, supplied by the session layer on every call.
///
/// The core never stores or derives a role; it validates whatever the
/// caller hands in against the authorization policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Staff,
    Agent,
    Admin,
    Superadmin,
}

impl Role {
    /// Roles eligible to hold ticket assignments.
    pub fn is_support_role(self) -> bool {
        matches!(self, Role::Agent | Role::Admin | Role::Superadmin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Staff => "staff",
            Role::Agent => "agent",
            Role::Admin => "admin",
            Role::Superadmin => "superadmin",
        };
        write!(f, "{}", s)
    }
}

/// Identity context threaded into every core call.
///
/// Supplied by the external session layer; `department` is only populated
/// for support roles and feeds department-scoped visibility.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: String,
    pub role: Role,
    pub department: Option<String>,
}

impl Actor {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
            department: None,
        }
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }
}

/// Department directory entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Department {
    pub name: String,
    pub is_active: bool,
}

/// Sortable ticket list columns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortField {
    Priority,
    Status,
    #[default]
    SubmittedDate,
    Title,
    Department,
}

impl SortField {
    /// Parse a stored preference value. Unknown fields yield `None` so the
    /// caller can fall back instead of failing the list view.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "priority" => Some(SortField::Priority),
            "status" => Some(SortField::Status),
            "submittedDate" | "submitted_date" => Some(SortField::SubmittedDate),
            "title" => Some(SortField::Title),
            "department" => Some(SortField::Department),
            _ => None,
        }
    }
}

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Per-user list view defaults.
///
/// Created lazily on first use and overwritten wholesale on save; `None`
/// filter fields mean "all".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewPreferences {
    pub default_status: Option<super::aggregates::TicketStatus>,
    pub default_priority: Option<Priority>,
    pub default_sort_by: SortField,
    pub default_sort_order: SortOrder,
    pub items_per_page: usize,
}

impl Default for ViewPreferences {
    fn default() -> Self {
        Self {
            default_status: Some(super::aggregates::TicketStatus::Open),
            default_priority: Some(Priority::High),
            default_sort_by: SortField::Priority,
            default_sort_order: SortOrder::Desc,
            items_per_page: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_rank_order() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
        assert!(Priority::High < Priority::Urgent);
        assert!(Priority::Urgent < Priority::Critical);
    }

    #[test]
    fn test_priority_escalation_saturates() {
        assert_eq!(Priority::High.escalated(), Priority::Urgent);
        assert_eq!(Priority::Critical.escalated(), Priority::Critical);
    }

    #[test]
    fn test_sort_field_parse_fallback() {
        assert_eq!(SortField::parse("priority"), Some(SortField::Priority));
        assert_eq!(SortField::parse("submittedDate"), Some(SortField::SubmittedDate));
        assert_eq!(SortField::parse("color"), None);
    }

    #[test]
    fn test_default_preferences() {
        let prefs = ViewPreferences::default();
        assert_eq!(prefs.items_per_page, 10);
        assert_eq!(prefs.default_priority, Some(Priority::High));
        assert_eq!(prefs.default_sort_by, SortField::Priority);
    }
}
