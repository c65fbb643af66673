use futures::TryStreamExt;
use mongodb::{
    Client, Collection, IndexModel,
    bson::{self, Document, doc},
    options::ClientOptions,
};
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::errors::{Result, is_namespace_exists};
use crate::models::{Book, GenreCount, PublishedYearAverage, UpdateOutcome};
use crate::query_builder::{self, BookFilter, fields, pipelines};

/// Handle on the book collection.
///
/// Every method is a single round trip; nothing is retried or wrapped in a
/// transaction. Writes go through the typed [`Book`]; reads return stored
/// documents as-is, since nothing enforces their shape.
#[derive(Clone)]
pub struct Database {
    db: mongodb::Database,
    collection_name: String,
}

impl Database {
    /// Connects and pings the server before returning.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        config.validate()?;

        let options = ClientOptions::parse(&config.uri).await?;
        let client = Client::with_options(options)?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;

        info!("Connected to MongoDB, using {}.{}", config.database, config.collection);

        Ok(Self::new(client, &config.database, &config.collection))
    }

    /// Wraps an existing client without contacting the server.
    pub fn new(client: Client, database: &str, collection: &str) -> Self {
        Self {
            db: client.database(database),
            collection_name: collection.to_string(),
        }
    }

    fn books(&self) -> Collection<Book> {
        self.db.collection(&self.collection_name)
    }

    fn raw(&self) -> Collection<Document> {
        self.db.collection(&self.collection_name)
    }

    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    /// Creates the collection. Returns `false` if it already existed.
    pub async fn ensure_collection(&self) -> Result<bool> {
        match self.db.create_collection(&self.collection_name).await {
            Ok(()) => {
                debug!("Created collection {}", self.collection_name);
                Ok(true)
            }
            Err(e) if is_namespace_exists(&e) => {
                debug!("Collection {} already present", self.collection_name);
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Ordered bulk insert. Returns the number of documents inserted.
    pub async fn insert_books(&self, books: &[Book]) -> Result<usize> {
        let result = self.books().insert_many(books).await?;
        Ok(result.inserted_ids.len())
    }

    /// Runs a filtered find, returning documents in server order.
    pub async fn find(&self, filter: BookFilter) -> Result<Vec<Document>> {
        let cursor = self.raw().find(filter.build()).await?;
        let documents = cursor.try_collect().await?;
        Ok(documents)
    }

    pub async fn find_all(&self) -> Result<Vec<Document>> {
        self.find(BookFilter::new()).await
    }

    pub async fn find_by_author(&self, author: &str) -> Result<Vec<Document>> {
        self.find(BookFilter::new().author(author)).await
    }

    pub async fn find_published_after(&self, year: i32) -> Result<Vec<Document>> {
        self.find(BookFilter::new().published_after(year)).await
    }

    /// Sets `publishedYear` on at most one record with the given title.
    pub async fn update_published_year(&self, title: &str, year: i32) -> Result<UpdateOutcome> {
        let result = self
            .books()
            .update_one(
                BookFilter::new().title(title).build(),
                query_builder::set_field(fields::PUBLISHED_YEAR, year),
            )
            .await?;

        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    /// Sets `rating` on every record.
    pub async fn set_rating_for_all(&self, rating: f64) -> Result<UpdateOutcome> {
        let result = self
            .books()
            .update_many(
                BookFilter::new().build(),
                query_builder::set_field(fields::RATING, rating),
            )
            .await?;

        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    /// Deletes at most one record with the given ISBN.
    pub async fn delete_by_isbn(&self, isbn: &str) -> Result<u64> {
        let result = self
            .books()
            .delete_one(BookFilter::new().isbn(isbn).build())
            .await?;
        Ok(result.deleted_count)
    }

    /// Deletes every record with exactly the given genre.
    pub async fn delete_by_genre(&self, genre: &str) -> Result<u64> {
        let result = self
            .books()
            .delete_many(BookFilter::new().genre(genre).build())
            .await?;
        Ok(result.deleted_count)
    }

    async fn aggregate(&self, pipeline: Vec<Document>) -> Result<Vec<Document>> {
        let cursor = self.raw().aggregate(pipeline).await?;
        let documents = cursor.try_collect().await?;
        Ok(documents)
    }

    /// Record count per genre, in server order.
    pub async fn count_by_genre(&self) -> Result<Vec<GenreCount>> {
        self.aggregate(pipelines::count_by_genre())
            .await?
            .into_iter()
            .map(|document| bson::from_document(document).map_err(Into::into))
            .collect()
    }

    /// The single row of the mean-`publishedYear` aggregation.
    /// `None` when the collection is empty, since `$group` then emits nothing.
    pub async fn average_published_year(&self) -> Result<Option<PublishedYearAverage>> {
        let documents = self.aggregate(pipelines::average_published_year()).await?;
        match documents.into_iter().next() {
            Some(document) => Ok(Some(bson::from_document(document)?)),
            None => Ok(None),
        }
    }

    /// Highest-rated record. Ties are broken by the server.
    pub async fn top_rated(&self) -> Result<Option<Document>> {
        let document = self
            .raw()
            .find_one(BookFilter::new().build())
            .sort(query_builder::descending(fields::RATING))
            .await?;
        Ok(document)
    }

    /// Creates a non-unique ascending index on `author`. Returns the index name.
    pub async fn create_author_index(&self) -> Result<String> {
        let index = IndexModel::builder()
            .keys(query_builder::ascending(fields::AUTHOR))
            .build();
        let result = self.books().create_index(index).await?;
        Ok(result.index_name)
    }

    pub async fn list_index_names(&self) -> Result<Vec<String>> {
        let names = self.books().list_index_names().await?;
        Ok(names)
    }

    pub async fn count_books(&self) -> Result<u64> {
        let count = self.books().count_documents(doc! {}).await?;
        Ok(count)
    }

    /// Drops the collection with its indexes. Dropping a missing collection is not an error.
    pub async fn drop_collection(&self) -> Result<()> {
        self.books().drop().await?;
        Ok(())
    }

    /// Drops the whole database. Used to clean up scratch databases.
    pub async fn drop_database(&self) -> Result<()> {
        self.db.drop().await?;
        Ok(())
    }
}
