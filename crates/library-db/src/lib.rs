//! Typed access to the library's book collection.
//!
//! [`Database`] exposes one method per collection operation (insert, find,
//! update, delete, aggregate, index). Filters and pipelines are built in
//! [`query_builder`]; the server does all query and aggregation work.

pub mod config;
pub mod database;
pub mod errors;
pub mod models;
pub mod query_builder;

pub use config::DatabaseConfig;
pub use database::Database;
pub use mongodb::bson::{Bson, Document};
pub use errors::{DbError, Result};
pub use models::{Book, GenreCount, PublishedYearAverage, UpdateOutcome};
pub use query_builder::BookFilter;
