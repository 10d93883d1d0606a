// User domain module
// Account entity, email and role value objects

#![allow(clippy::module_inception)]

pub mod user;
pub mod value_objects;

pub use user::{normalize_name, ProfileCompletion, ProfileUpdate, User};
pub use value_objects::{Email, Role};
