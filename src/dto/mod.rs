//! DTO modules that bridge services with templates.

pub mod blogs;
pub mod events;
pub mod members;
pub mod papers;
