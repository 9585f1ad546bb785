//! Domain records mirrored from the backend services.

pub mod blog;
pub mod event;
pub mod member;
pub mod paper;
pub mod types;
