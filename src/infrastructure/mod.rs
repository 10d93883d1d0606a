// Infrastructure layer module
// Storage adapters behind the domain repository traits: PostgreSQL and in-memory

pub mod repositories;
