//! Database integration for the seed walkthrough.
//!
//! The [`Seeder`] inserts the literal dataset and then runs each query,
//! update, delete, aggregation and index step in order, printing results.

mod seeder;

pub use seeder::{SeedError, Seeder};
