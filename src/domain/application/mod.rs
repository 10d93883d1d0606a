#![allow(clippy::module_inception)]

pub mod application;
pub mod value_objects;

pub use application::Application;
pub use value_objects::ApplicationStatus;
