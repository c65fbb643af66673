//! Seed-and-query walkthrough for the library book collection.
//!
//! Inserts five literal books, then runs a fixed sequence of reads, updates,
//! deletes, aggregations and an index build, printing each result.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use library_seed::prelude::*;
//!
//! let db = Database::connect(&DatabaseConfig::from_env()?).await?;
//! let mut seeder = Seeder::new(db, WalkthroughConfig::default(), std::io::stdout());
//! let report = seeder.run().await?;
//! report.log_summary();
//! ```

pub mod config;
pub mod dataset;
pub mod db;
pub mod report;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::WalkthroughConfig;
    pub use crate::db::{SeedError, Seeder};
    pub use crate::report::{ResultPrinter, WalkthroughReport};
    pub use library_db::{Book, Database, DatabaseConfig};
}
