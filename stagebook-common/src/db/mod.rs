//! Persistence layer for the booking directory
//!
//! Three tables: venues, artists, shows. Shows reference one venue and one
//! artist by non-null foreign key.

pub mod init;
pub mod models;
pub mod store;

pub use init::{create_schema, init_database};
