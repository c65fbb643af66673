use mongodb::error::{Error as MongoError, ErrorKind};
use thiserror::Error;

/// Server error code returned by `create` when the namespace is already taken.
pub const NAMESPACE_EXISTS: i32 = 48;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Database(#[from] MongoError),

    #[error("Document decoding error: {0}")]
    Decode(#[from] mongodb::bson::de::Error),

    #[error("Document encoding error: {0}")]
    Encode(#[from] mongodb::bson::ser::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, DbError>;

/// Returns true if the driver error is the server's `NamespaceExists` response.
pub fn is_namespace_exists(err: &MongoError) -> bool {
    matches!(err.kind.as_ref(), ErrorKind::Command(cmd) if cmd.code == NAMESPACE_EXISTS)
}
