//! Request-facing models shared across the portal handlers.

pub mod auth;
pub mod config;
