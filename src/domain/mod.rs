// Domain layer module exports
// Entities, value objects and repository ports
// Domain is independent of infrastructure concerns

pub mod application;
pub mod comment;
pub mod company;
pub mod job;
pub mod post;
pub mod repositories;
pub mod user;
