pub mod blogs;
pub mod members;
