//! Parameters for the seed walkthrough.

use serde::{Deserialize, Serialize};

use crate::dataset;

/// The literal values each walkthrough step filters or writes with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkthroughConfig {
    /// Author for the equality query.
    pub featured_author: String,

    /// Range query returns books published strictly after this year.
    pub published_after: i32,

    /// Title whose publication year gets revised.
    pub revised_title: String,

    /// New publication year for `revised_title`.
    pub revised_year: i32,

    /// Rating set on every record.
    pub default_rating: f64,

    /// ISBN of the single record to delete.
    pub removed_isbn: String,

    /// Genre whose records are all deleted.
    pub removed_genre: String,

    /// Drop the collection before seeding so reruns start from scratch.
    pub reset_before_seed: bool,
}

impl Default for WalkthroughConfig {
    fn default() -> Self {
        Self {
            featured_author: dataset::NGUGI.to_string(),
            published_after: 2000,
            revised_title: dataset::GRAIN_OF_WHEAT.to_string(),
            revised_year: 1970,
            default_rating: 4.5,
            removed_isbn: dataset::PETALS_OF_BLOOD_ISBN.to_string(),
            removed_genre: dataset::HISTORICAL_FICTION.to_string(),
            reset_before_seed: false,
        }
    }
}

impl WalkthroughConfig {
    /// Defaults, with `LIBRARY_RESET` (`1`/`true`/`yes`) toggling the reset.
    pub fn from_env() -> Self {
        let reset = std::env::var("LIBRARY_RESET").ok();
        Self::default().with_reset(reset.as_deref().is_some_and(is_truthy))
    }

    pub fn with_reset(mut self, reset: bool) -> Self {
        self.reset_before_seed = reset;
        self
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}
