//! Seeds the book collection and runs the query walkthrough against it.

use std::io::Write;

use library_db::{Book, Database, DbError, Document, GenreCount, UpdateOutcome};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::WalkthroughConfig;
use crate::dataset;
use crate::report::{PrintError, ResultPrinter, WalkthroughReport};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),
    #[error("Output error: {0}")]
    Output(#[from] PrintError),
}

impl From<std::io::Error> for SeedError {
    fn from(e: std::io::Error) -> Self {
        SeedError::Output(PrintError::Io(e))
    }
}

/// Runs each walkthrough step against the database, printing results to `W`.
///
/// Steps are independent, non-atomic calls. [`Seeder::run`] executes them
/// in order and stops at the first error, leaving whatever the earlier steps
/// wrote.
pub struct Seeder<W: Write> {
    db: Database,
    config: WalkthroughConfig,
    printer: ResultPrinter<W>,
}

impl<W: Write> Seeder<W> {
    pub fn new(db: Database, config: WalkthroughConfig, out: W) -> Self {
        Self {
            db,
            config,
            printer: ResultPrinter::new(out),
        }
    }

    /// Returns a reference to the database handle for verification queries.
    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn into_output(self) -> W {
        self.printer.into_inner()
    }

    /// Runs the full sequence once.
    pub async fn run(&mut self) -> Result<WalkthroughReport, SeedError> {
        if self.config.reset_before_seed {
            self.reset().await?;
        }

        let mut report = WalkthroughReport {
            collection_created: self.ensure_collection().await?,
            inserted: self.seed_books(&dataset::books()).await?,
            ..Default::default()
        };

        report.all_books = self.show_all_books().await?.len();
        report.by_author = self.show_books_by_author().await?.len();
        report.published_after = self.show_books_published_after().await?.len();

        report.year_update = self.revise_published_year().await?;
        report.rating_update = self.apply_default_rating().await?;

        report.deleted_by_isbn = self.remove_by_isbn().await?;
        report.deleted_by_genre = self.remove_by_genre().await?;

        report.genre_counts = self.show_genre_counts().await?;
        report.average_published_year = self.show_average_published_year().await?;
        report.top_rated = self.show_top_rated().await?;

        report.author_index = self.index_author().await?;
        report.final_count = self.db.count_books().await?;

        Ok(report)
    }

    /// Drops the collection so the run starts empty.
    pub async fn reset(&mut self) -> Result<(), SeedError> {
        info!("Dropping collection {}...", self.db.collection_name());
        self.db.drop_collection().await?;
        Ok(())
    }

    pub async fn ensure_collection(&mut self) -> Result<bool, SeedError> {
        let created = self.db.ensure_collection().await?;
        if created {
            info!("Created collection {}", self.db.collection_name());
        } else {
            info!("Collection {} already present", self.db.collection_name());
        }
        Ok(created)
    }

    pub async fn seed_books(&mut self, books: &[Book]) -> Result<usize, SeedError> {
        info!("Seeding {} books...", books.len());
        let inserted = self.db.insert_books(books).await?;
        info!("Seeded {} books", inserted);
        Ok(inserted)
    }

    pub async fn show_all_books(&mut self) -> Result<Vec<Document>, SeedError> {
        let books = self.db.find_all().await?;
        self.printer.heading("All books in the collection:")?;
        self.printer.documents(&books)?;
        Ok(books)
    }

    pub async fn show_books_by_author(&mut self) -> Result<Vec<Document>, SeedError> {
        let author = self.config.featured_author.clone();
        let books = self.db.find_by_author(&author).await?;
        self.printer.heading(&format!("Books by {author}:"))?;
        self.printer.documents(&books)?;
        Ok(books)
    }

    pub async fn show_books_published_after(&mut self) -> Result<Vec<Document>, SeedError> {
        let year = self.config.published_after;
        let books = self.db.find_published_after(year).await?;
        self.printer.heading(&format!("Books published after {year}:"))?;
        self.printer.documents(&books)?;
        Ok(books)
    }

    pub async fn revise_published_year(&mut self) -> Result<UpdateOutcome, SeedError> {
        let outcome = self
            .db
            .update_published_year(&self.config.revised_title, self.config.revised_year)
            .await?;

        if outcome.matched == 0 {
            warn!("No book titled {:?} to revise", self.config.revised_title);
        } else {
            info!(
                "Set publishedYear={} on {:?} (modified {})",
                self.config.revised_year, self.config.revised_title, outcome.modified
            );
        }
        Ok(outcome)
    }

    pub async fn apply_default_rating(&mut self) -> Result<UpdateOutcome, SeedError> {
        let outcome = self.db.set_rating_for_all(self.config.default_rating).await?;
        info!(
            "Set rating={} on {} books (modified {})",
            self.config.default_rating, outcome.matched, outcome.modified
        );
        Ok(outcome)
    }

    pub async fn remove_by_isbn(&mut self) -> Result<u64, SeedError> {
        let deleted = self.db.delete_by_isbn(&self.config.removed_isbn).await?;
        info!("Deleted {} book(s) with ISBN {}", deleted, self.config.removed_isbn);
        Ok(deleted)
    }

    pub async fn remove_by_genre(&mut self) -> Result<u64, SeedError> {
        let deleted = self.db.delete_by_genre(&self.config.removed_genre).await?;
        info!("Deleted {} book(s) in genre {:?}", deleted, self.config.removed_genre);
        Ok(deleted)
    }

    /// Prints each group row as it arrives, with no heading.
    pub async fn show_genre_counts(&mut self) -> Result<Vec<GenreCount>, SeedError> {
        let counts = self.db.count_by_genre().await?;
        self.printer.documents(&counts)?;
        Ok(counts)
    }

    pub async fn show_average_published_year(&mut self) -> Result<Option<f64>, SeedError> {
        let row = self.db.average_published_year().await?;
        self.printer.heading("Average published year:")?;
        if let Some(row) = &row {
            self.printer.value(row)?;
        }
        Ok(row.and_then(|r| r.avg_published_year))
    }

    pub async fn show_top_rated(&mut self) -> Result<Option<Document>, SeedError> {
        let book = self.db.top_rated().await?;
        self.printer.heading("Top-rated book:")?;
        if let Some(book) = &book {
            self.printer.value(book)?;
        }
        Ok(book)
    }

    pub async fn index_author(&mut self) -> Result<String, SeedError> {
        let name = self.db.create_author_index().await?;
        info!("Created index {} on author", name);
        Ok(name)
    }
}
