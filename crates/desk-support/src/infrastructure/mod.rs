//! Infrastructure module
//!
//! Concrete adapter implementations of the outbound ports.

pub mod persistence;
