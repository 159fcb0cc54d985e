use async_trait::async_trait;
use mongodb::bson::Document;
use thiserror::Error;

/// Server error code for "namespace already exists".
pub const NAMESPACE_EXISTS: i32 = 48;
/// Server error code for "namespace not found".
pub const NAMESPACE_NOT_FOUND: i32 = 26;

/// Failure reported by a connection handle.
///
/// Connectivity loss and command rejection are not told apart. The two
/// namespace variants exist so that a create/drop racing with another session
/// can still be reported as the matching existence error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    #[error("{0}")]
    NamespaceExists(String),
    #[error("{0}")]
    NamespaceNotFound(String),
    #[error("{0}")]
    Failed(String),
}

impl BackendError {
    pub fn message(&self) -> &str {
        match self {
            BackendError::NamespaceExists(m)
            | BackendError::NamespaceNotFound(m)
            | BackendError::Failed(m) => m,
        }
    }
}

impl From<mongodb::error::Error> for BackendError {
    fn from(value: mongodb::error::Error) -> Self {
        match value.kind.as_ref() {
            mongodb::error::ErrorKind::Command(cmd) if cmd.code == NAMESPACE_EXISTS => {
                BackendError::NamespaceExists(cmd.message.clone())
            }
            mongodb::error::ErrorKind::Command(cmd) if cmd.code == NAMESPACE_NOT_FOUND => {
                BackendError::NamespaceNotFound(cmd.message.clone())
            }
            _ => BackendError::Failed(value.to_string()),
        }
    }
}

pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// Live handle to a document database server.
///
/// This is the whole surface the collection registry needs. It is implemented
/// by [`crate::server::MongoClient`]; tests provide in-memory fakes.
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    /// Names of all databases currently on the server.
    async fn list_database_names(&self) -> BackendResult<Vec<String>>;

    /// Names of all collections currently in `database`, system ones included.
    async fn list_collection_names(&self, database: &str) -> BackendResult<Vec<String>>;

    /// Create `name` in `database`. `options` holds exactly the creation
    /// fields to send (`capped`, and `size`/`max` for capped collections).
    async fn create_collection(
        &self,
        database: &str,
        name: &str,
        options: Document,
    ) -> BackendResult<()>;

    async fn drop_collection(&self, database: &str, name: &str) -> BackendResult<()>;

    /// Raw statistics record for a collection, in the server's field order.
    async fn collection_stats(&self, database: &str, name: &str) -> BackendResult<Document>;
}
