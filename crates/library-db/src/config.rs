//! Connection configuration for the library database.

use serde::{Deserialize, Serialize};

use crate::errors::{DbError, Result};

pub const DEFAULT_URI: &str = "mongodb://localhost:27017";
pub const DEFAULT_DATABASE: &str = "library";
pub const DEFAULT_COLLECTION: &str = "books";

/// Where the book collection lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// MongoDB connection string.
    pub uri: String,

    /// Database holding the collection.
    pub database: String,

    /// Collection holding book records.
    pub collection: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_URI.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }
}

impl DatabaseConfig {
    /// Reads `MONGODB_URI`, `LIBRARY_DATABASE` and `LIBRARY_COLLECTION`,
    /// falling back to the defaults for any variable that is unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            uri: lookup("MONGODB_URI").unwrap_or(defaults.uri),
            database: lookup("LIBRARY_DATABASE").unwrap_or(defaults.database),
            collection: lookup("LIBRARY_COLLECTION").unwrap_or(defaults.collection),
        };
        config.validate()?;
        Ok(config)
    }

    /// Returns a copy pointed at a different database, keeping uri and collection.
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = database.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("MONGODB_URI", &self.uri),
            ("LIBRARY_DATABASE", &self.database),
            ("LIBRARY_COLLECTION", &self.collection),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(DbError::InvalidConfig(format!("{name} is empty")));
            }
        }
        Ok(())
    }
}
