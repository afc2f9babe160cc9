//! Data Transfer Objects (DTOs)
//!
//! Command objects crossing the application boundary. Ticket ids arrive
//! as raw strings from the transport layer and are wrapped at the edge.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Priority;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateTicketCommand {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub department: String,
    pub category: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateTicketCommand {
    pub ticket_id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub department: Option<String>,
    pub category: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AssignTicketCommand {
    pub ticket_id: String,
    pub agent_id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResolveTicketCommand {
    pub ticket_id: String,
    pub resolution_description: String,
    pub agent_feedback: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AddCommentCommand {
    pub ticket_id: String,
    pub body: String,
    pub is_public: bool,
}
