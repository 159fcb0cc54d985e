use thiserror::Error;

/// Common result type used across the crate.
pub type Result<T> = std::result::Result<T, AdminError>;

/// Unified error enum surfaced by all public APIs.
///
/// The first nine variants form the closed administrative taxonomy; each one
/// carries the message shown to the caller. The remaining variants are
/// structural or setup failures that never come from a collection operation's
/// own checks.
#[derive(Error, Debug)]
pub enum AdminError {
    #[error("{0}")]
    DatabaseNameEmpty(String),
    #[error("{0}")]
    CollectionNameEmpty(String),
    #[error("{0}")]
    DatabaseDoesNotExist(String),
    #[error("{0}")]
    CollectionAlreadyExists(String),
    #[error("{0}")]
    CollectionDoesNotExist(String),
    #[error("{0}")]
    CollectionListFailure(String),
    #[error("{0}")]
    CollectionCreationFailure(String),
    #[error("{0}")]
    CollectionDeletionFailure(String),
    #[error("{0}")]
    CollectionStatsFailure(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("connection error: {0}")]
    Connection(String),
    #[error("config error: {0}")]
    Config(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Grouping of taxonomy kinds by the object they concern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorFamily {
    Validation,
    Database,
    Collection,
}

/// Stable identity of a taxonomy error, independent of its message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    DatabaseNameEmpty,
    CollectionNameEmpty,
    DatabaseDoesNotExist,
    CollectionAlreadyExists,
    CollectionDoesNotExist,
    CollectionListFailure,
    CollectionCreationFailure,
    CollectionDeletionFailure,
    CollectionStatsFailure,
}

impl ErrorKind {
    /// Wire code callers use to tell kinds apart.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::DatabaseNameEmpty => "DB_NAME_EMPTY",
            ErrorKind::CollectionNameEmpty => "COLLECTION_NAME_EMPTY",
            ErrorKind::DatabaseDoesNotExist => "DB_DOES_NOT_EXIST",
            ErrorKind::CollectionAlreadyExists => "COLLECTION_ALREADY_EXISTS",
            ErrorKind::CollectionDoesNotExist => "COLLECTION_DOES_NOT_EXIST",
            ErrorKind::CollectionListFailure => "GET_COLLECTION_LIST_EXCEPTION",
            ErrorKind::CollectionCreationFailure => "COLLECTION_CREATION_EXCEPTION",
            ErrorKind::CollectionDeletionFailure => "COLLECTION_DELETION_EXCEPTION",
            ErrorKind::CollectionStatsFailure => "GET_COLL_STATS_EXCEPTION",
        }
    }

    pub fn family(&self) -> ErrorFamily {
        match self {
            ErrorKind::DatabaseNameEmpty | ErrorKind::CollectionNameEmpty => {
                ErrorFamily::Validation
            }
            ErrorKind::DatabaseDoesNotExist => ErrorFamily::Database,
            _ => ErrorFamily::Collection,
        }
    }
}

impl AdminError {
    /// Taxonomy kind of this error, or `None` for structural/setup failures.
    pub fn kind(&self) -> Option<ErrorKind> {
        let kind = match self {
            AdminError::DatabaseNameEmpty(_) => ErrorKind::DatabaseNameEmpty,
            AdminError::CollectionNameEmpty(_) => ErrorKind::CollectionNameEmpty,
            AdminError::DatabaseDoesNotExist(_) => ErrorKind::DatabaseDoesNotExist,
            AdminError::CollectionAlreadyExists(_) => ErrorKind::CollectionAlreadyExists,
            AdminError::CollectionDoesNotExist(_) => ErrorKind::CollectionDoesNotExist,
            AdminError::CollectionListFailure(_) => ErrorKind::CollectionListFailure,
            AdminError::CollectionCreationFailure(_) => ErrorKind::CollectionCreationFailure,
            AdminError::CollectionDeletionFailure(_) => ErrorKind::CollectionDeletionFailure,
            AdminError::CollectionStatsFailure(_) => ErrorKind::CollectionStatsFailure,
            AdminError::Serialization(_)
            | AdminError::Connection(_)
            | AdminError::Config(_)
            | AdminError::Other(_) => return None,
        };
        Some(kind)
    }

    /// Code of the taxonomy kind, if any.
    pub fn code(&self) -> Option<&'static str> {
        self.kind().map(|k| k.code())
    }
}
