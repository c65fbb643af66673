//! Builders for filter documents and aggregation pipelines.
//!
//! Filters are plain BSON documents; every condition added to a
//! [`BookFilter`] is ANDed with the others by the server.

use mongodb::bson::{Bson, Document, doc};

/// Field names as they appear in stored book documents.
pub mod fields {
    pub const TITLE: &str = "title";
    pub const AUTHOR: &str = "author";
    pub const PUBLISHED_YEAR: &str = "publishedYear";
    pub const GENRE: &str = "genre";
    pub const ISBN: &str = "ISBN";
    pub const RATING: &str = "rating";
}

/// Builder for book filter documents.
///
/// # Example
/// ```ignore
/// let filter = BookFilter::new()
///     .author("Margaret Ogola")
///     .published_after(1990)
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct BookFilter {
    conditions: Document,
}

impl BookFilter {
    /// Creates an empty filter, which matches every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an exact-match condition on an arbitrary field.
    pub fn eq(mut self, field: &str, value: impl Into<Bson>) -> Self {
        self.conditions.insert(field, value);
        self
    }

    pub fn title(self, title: &str) -> Self {
        self.eq(fields::TITLE, title)
    }

    pub fn author(self, author: &str) -> Self {
        self.eq(fields::AUTHOR, author)
    }

    pub fn isbn(self, isbn: &str) -> Self {
        self.eq(fields::ISBN, isbn)
    }

    pub fn genre(self, genre: &str) -> Self {
        self.eq(fields::GENRE, genre)
    }

    /// Matches records published strictly after `year`.
    pub fn published_after(mut self, year: i32) -> Self {
        self.range_condition(fields::PUBLISHED_YEAR, "$gt", year);
        self
    }

    /// Matches records published strictly before `year`.
    pub fn published_before(mut self, year: i32) -> Self {
        self.range_condition(fields::PUBLISHED_YEAR, "$lt", year);
        self
    }

    /// Merges a comparison operator into the field's operator document so
    /// that `published_after(a).published_before(b)` yields one range.
    fn range_condition(&mut self, field: &str, op: &str, value: i32) {
        match self.conditions.get_document_mut(field) {
            Ok(existing) => {
                existing.insert(op, value);
            }
            Err(_) => {
                self.conditions.insert(field, doc! { op: value });
            }
        }
    }

    /// Returns the number of fields constrained.
    pub fn condition_count(&self) -> usize {
        self.conditions.len()
    }

    /// Returns true if the filter matches every record.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn build(self) -> Document {
        self.conditions
    }
}

/// `$set` update document for a single field.
pub fn set_field(field: &str, value: impl Into<Bson>) -> Document {
    let value: Bson = value.into();
    doc! { "$set": { field: value } }
}

/// Sort document ordering by `field` descending.
pub fn descending(field: &str) -> Document {
    doc! { field: -1 }
}

/// Index key document ordering by `field` ascending.
pub fn ascending(field: &str) -> Document {
    doc! { field: 1 }
}

/// Aggregation pipelines run against the book collection.
pub mod pipelines {
    use mongodb::bson::{Document, doc};

    use super::fields;

    /// Groups records by genre and counts each group. No sort stage, so
    /// group order is whatever the server emits.
    pub fn count_by_genre() -> Vec<Document> {
        vec![doc! {
            "$group": {
                "_id": format!("${}", fields::GENRE),
                "totalBooks": { "$sum": 1 },
            }
        }]
    }

    /// Collapses all records into one group holding the mean published year.
    pub fn average_published_year() -> Vec<Document> {
        vec![doc! {
            "$group": {
                "_id": null,
                "avgPublishedYear": { "$avg": format!("${}", fields::PUBLISHED_YEAR) },
            }
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter() {
        let filter = BookFilter::new();
        assert!(filter.is_empty());
        assert_eq!(filter.build(), doc! {});
    }

    #[test]
    fn test_author_equality() {
        let filter = BookFilter::new().author("Ngũgĩ wa Thiong'o").build();
        assert_eq!(filter, doc! { "author": "Ngũgĩ wa Thiong'o" });
    }

    #[test]
    fn test_published_after() {
        let filter = BookFilter::new().published_after(2000).build();
        assert_eq!(filter, doc! { "publishedYear": { "$gt": 2000 } });
    }

    #[test]
    fn test_range_merges_into_one_field() {
        let filter = BookFilter::new()
            .published_after(1960)
            .published_before(1980);
        assert_eq!(filter.condition_count(), 1);
        assert_eq!(
            filter.build(),
            doc! { "publishedYear": { "$gt": 1960, "$lt": 1980 } }
        );
    }

    #[test]
    fn test_combined_conditions() {
        let filter = BookFilter::new()
            .genre("Historical Fiction")
            .published_after(1990)
            .build();
        assert_eq!(
            filter,
            doc! { "genre": "Historical Fiction", "publishedYear": { "$gt": 1990 } }
        );
    }

    #[test]
    fn test_isbn_uses_stored_field_name() {
        let filter = BookFilter::new().isbn("978-0141187026").build();
        assert_eq!(filter, doc! { "ISBN": "978-0141187026" });
    }

    #[test]
    fn test_set_field() {
        assert_eq!(
            set_field(fields::RATING, 4.5),
            doc! { "$set": { "rating": 4.5 } }
        );
        assert_eq!(
            set_field(fields::PUBLISHED_YEAR, 1970),
            doc! { "$set": { "publishedYear": 1970 } }
        );
    }

    #[test]
    fn test_sort_and_index_keys() {
        assert_eq!(descending(fields::RATING), doc! { "rating": -1 });
        assert_eq!(ascending(fields::AUTHOR), doc! { "author": 1 });
    }

    #[test]
    fn test_count_by_genre_pipeline() {
        assert_eq!(
            pipelines::count_by_genre(),
            vec![doc! { "$group": { "_id": "$genre", "totalBooks": { "$sum": 1 } } }]
        );
    }

    #[test]
    fn test_average_pipeline() {
        assert_eq!(
            pipelines::average_published_year(),
            vec![doc! {
                "$group": { "_id": null, "avgPublishedYear": { "$avg": "$publishedYear" } }
            }]
        );
    }
}
