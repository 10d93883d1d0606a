// Job domain module
// Job posting aggregate, search filter and job type

#![allow(clippy::module_inception)]

pub mod job;
pub mod value_objects;

pub use job::{Job, JobFilter, NewJob};
pub use value_objects::JobType;
