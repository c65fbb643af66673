use mongodb::bson::{Bson, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// A book record as stored in the collection.
///
/// Field names on the wire follow the collection's existing documents
/// (`publishedYear`, `ISBN`), not Rust naming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub author: String,
    #[serde(rename = "publishedYear")]
    pub published_year: i32,
    pub genre: String,
    #[serde(rename = "ISBN")]
    pub isbn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl Book {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        published_year: i32,
        genre: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            author: author.into(),
            published_year,
            genre: genre.into(),
            isbn: isbn.into(),
            rating: None,
        }
    }
}

/// One row of the per-genre count aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenreCount {
    /// Group key, whatever type the stored `genre` has. `Null` collects
    /// records with no genre field.
    #[serde(rename = "_id")]
    pub genre: Bson,
    #[serde(rename = "totalBooks")]
    pub total_books: i64,
}

/// Result of the average-published-year aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishedYearAverage {
    /// Always null: the pipeline groups every record together.
    #[serde(rename = "_id", default)]
    pub id: Option<Bson>,
    #[serde(rename = "avgPublishedYear")]
    pub avg_published_year: Option<f64>,
}

/// Counts reported by an update call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{self, doc};

    #[test]
    fn test_book_field_names() {
        let book = Book::new("Dust", "Yvonne Adhiambo Owuor", 2013, "Literary Fiction", "978-0345802545");
        let document = bson::to_document(&book).unwrap();

        assert_eq!(document.get_i32("publishedYear").unwrap(), 2013);
        assert_eq!(document.get_str("ISBN").unwrap(), "978-0345802545");
        assert!(!document.contains_key("_id"));
        assert!(!document.contains_key("rating"));
        assert!(!document.contains_key("published_year"));
    }

    #[test]
    fn test_book_decodes_with_rating_and_id() {
        let id = ObjectId::new();
        let document = doc! {
            "_id": id,
            "title": "Weep Not, Child",
            "author": "Ngũgĩ wa Thiong'o",
            "publishedYear": 1964,
            "genre": "Coming-of-Age, Fiction",
            "ISBN": "978-0435908309",
            "rating": 4.5,
        };

        let book: Book = bson::from_document(document).unwrap();
        assert_eq!(book.id, Some(id));
        assert_eq!(book.rating, Some(4.5));
        assert_eq!(book.published_year, 1964);
    }

    #[test]
    fn test_genre_count_decodes_int32_sum() {
        let document = doc! { "_id": "Literary Fiction", "totalBooks": 1_i32 };
        let count: GenreCount = bson::from_document(document).unwrap();
        assert_eq!(count.genre.as_str(), Some("Literary Fiction"));
        assert_eq!(count.total_books, 1);
    }

    #[test]
    fn test_average_decodes_null_id() {
        let document = doc! { "_id": null, "avgPublishedYear": 1988.5 };
        let average: PublishedYearAverage = bson::from_document(document).unwrap();
        assert_eq!(average.id, None);
        assert_eq!(average.avg_published_year, Some(1988.5));

        let encoded = bson::to_document(&average).unwrap();
        assert_eq!(encoded, doc! { "_id": null, "avgPublishedYear": 1988.5 });
    }

    #[test]
    fn test_genre_count_keeps_missing_genre_as_null() {
        let document = doc! { "_id": null, "totalBooks": 2_i32 };
        let count: GenreCount = bson::from_document(document).unwrap();
        assert_eq!(count.genre, Bson::Null);
        assert_eq!(count.total_books, 2);
    }
}
