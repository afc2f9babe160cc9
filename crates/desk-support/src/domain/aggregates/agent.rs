//! Agent entity

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Role;

/// Support agent directory record.
///
/// A thin projection of the external user directory: only the fields the
/// assignment engine and visibility rules need.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub role: Role,
    pub department: String,
    pub is_active: bool,
}

impl Agent {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        email: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            email: email.into(),
            role: Role::Agent,
            department: department.into(),
            is_active: true,
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Only active agents with a support role may hold assignments.
    pub fn is_assignable(&self) -> bool {
        self.is_active && self.role.is_support_role()
    }
}
