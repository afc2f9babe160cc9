//! Domain module
//!
//! Contains all domain logic following DDD principles.

pub mod aggregates;
pub mod error;
pub mod events;
pub mod services;
pub mod value_objects;

pub use aggregates::*;
pub use error::TicketError;
pub use events::*;
pub use value_objects::*;
