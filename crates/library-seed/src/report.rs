//! Console output for the walkthrough and the end-of-run summary.

use std::io::Write;

use library_db::{Document, GenreCount, UpdateOutcome};
use serde::Serialize;
use tracing::info;

/// Writes step headings and pretty-printed JSON values to a sink.
pub struct ResultPrinter<W: Write> {
    out: W,
}

impl<W: Write> ResultPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn heading(&mut self, text: &str) -> std::io::Result<()> {
        writeln!(self.out, "{text}")
    }

    /// One pretty JSON value per item, in the order given.
    pub fn documents<T: Serialize>(&mut self, items: &[T]) -> Result<(), PrintError> {
        for item in items {
            self.value(item)?;
        }
        Ok(())
    }

    pub fn value<T: Serialize + ?Sized>(&mut self, item: &T) -> Result<(), PrintError> {
        let json = serde_json::to_string_pretty(item)?;
        writeln!(self.out, "{json}")?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PrintError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Outcome of every walkthrough step.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WalkthroughReport {
    pub collection_created: bool,
    pub inserted: usize,
    pub all_books: usize,
    pub by_author: usize,
    pub published_after: usize,
    pub year_update: UpdateOutcome,
    pub rating_update: UpdateOutcome,
    pub deleted_by_isbn: u64,
    pub deleted_by_genre: u64,
    pub genre_counts: Vec<GenreCount>,
    pub average_published_year: Option<f64>,
    pub top_rated: Option<Document>,
    pub author_index: String,
    pub final_count: u64,
}

impl WalkthroughReport {
    /// Sum of the per-genre counts.
    pub fn grouped_total(&self) -> i64 {
        self.genre_counts.iter().map(|g| g.total_books).sum()
    }

    pub fn log_summary(&self) {
        info!("Walkthrough completed!");
        info!(
            "  Collection: {}",
            if self.collection_created {
                "created"
            } else {
                "already present"
            }
        );
        info!("  Inserted: {}", self.inserted);
        info!(
            "  Queries: all={} by_author={} published_after={}",
            self.all_books, self.by_author, self.published_after
        );
        info!(
            "  Year update: matched={} modified={}",
            self.year_update.matched, self.year_update.modified
        );
        info!(
            "  Rating update: matched={} modified={}",
            self.rating_update.matched, self.rating_update.modified
        );
        info!(
            "  Deleted: by_isbn={} by_genre={}",
            self.deleted_by_isbn, self.deleted_by_genre
        );
        info!(
            "  Genres: {} groups, {} books",
            self.genre_counts.len(),
            self.grouped_total()
        );
        match self.average_published_year {
            Some(avg) => info!("  Average published year: {:.1}", avg),
            None => info!("  Average published year: n/a"),
        }
        if let Some(title) = self.top_rated.as_ref().and_then(|b| b.get_str("title").ok()) {
            info!("  Top rated: {}", title);
        }
        info!("  Index: {}", self.author_index);
        info!("  Remaining books: {}", self.final_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use library_db::Book;
    use mongodb::bson::{Bson, doc};

    fn printed(f: impl FnOnce(&mut ResultPrinter<Vec<u8>>)) -> String {
        let mut printer = ResultPrinter::new(Vec::new());
        f(&mut printer);
        String::from_utf8(printer.into_inner()).unwrap()
    }

    #[test]
    fn test_heading_and_documents() {
        let books = vec![
            Book::new("Dust", "Yvonne Adhiambo Owuor", 2013, "Literary Fiction", "978-0345802545"),
            Book::new("Weep Not, Child", "Ngũgĩ wa Thiong'o", 1964, "Coming-of-Age, Fiction", "978-0435908309"),
        ];

        let output = printed(|p| {
            p.heading("Books published after 2000:").unwrap();
            p.documents(&books).unwrap();
        });

        assert!(output.starts_with("Books published after 2000:\n"));
        assert!(output.contains("\"publishedYear\": 2013"));
        assert!(output.contains("\"ISBN\": \"978-0435908309\""));
        assert!(output.find("Dust").unwrap() < output.find("Weep Not, Child").unwrap());
        assert!(!output.contains("rating"));
    }

    #[test]
    fn test_prints_documents_that_do_not_fit_book_shape() {
        let stored = vec![
            doc! {
                "title": "A Grain of Wheat",
                "author": "Ngũgĩ wa Thiong'o",
                "publishedYear": 1967.0,
                "genre": "Historical Fiction",
            },
            doc! { "title": "Untitled", "publishedYear": "unknown" },
        ];

        let output = printed(|p| p.documents(&stored).unwrap());

        assert!(output.contains("\"publishedYear\": 1967.0"));
        assert!(output.contains("\"publishedYear\": \"unknown\""));
        assert!(!output.contains("ISBN"));
        assert!(output.find("A Grain of Wheat").unwrap() < output.find("Untitled").unwrap());
    }

    #[test]
    fn test_value_prints_genre_count() {
        let count = GenreCount {
            genre: "Literary Fiction".into(),
            total_books: 1,
        };
        let output = printed(|p| p.value(&count).unwrap());
        assert!(output.contains("\"_id\": \"Literary Fiction\""));
        assert!(output.contains("\"totalBooks\": 1"));
    }

    #[test]
    fn test_grouped_total() {
        let report = WalkthroughReport {
            genre_counts: vec![
                GenreCount {
                    genre: "Literary Fiction".into(),
                    total_books: 1,
                },
                GenreCount {
                    genre: Bson::Null,
                    total_books: 1,
                },
            ],
            final_count: 2,
            ..Default::default()
        };
        assert_eq!(report.grouped_total(), report.final_count as i64);
    }
}
