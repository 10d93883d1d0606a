//! Job Portal API Library
//!
//! Accounts, job postings, applications, company profiles and a community
//! feed behind a JSON REST API. Domain logic and repository traits live in
//! [`domain`]; storage adapters in [`infrastructure`]; the HTTP surface in
//! [`api`].

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
