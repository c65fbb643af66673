//! Seeds the `library.books` collection and runs the query walkthrough.
//!
//! Run with:
//! ```
//! MONGODB_URI=mongodb://localhost:27017 cargo run -p library-seed --bin seed
//! ```

use library_seed::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let db_config = DatabaseConfig::from_env()?;
    let walkthrough = WalkthroughConfig::from_env();

    let db = Database::connect(&db_config).await?;

    let mut seeder = Seeder::new(db, walkthrough, std::io::stdout().lock());
    let report = seeder.run().await?;

    report.log_summary();

    Ok(())
}
