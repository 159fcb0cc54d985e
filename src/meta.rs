/// Name checks applied before any call reaches the server.
///
/// Only presence is checked here. Length limits and character rules are left
/// to the server, which rejects bad names on its own.
use crate::error::{AdminError, Result};

pub struct DatabaseNames;

impl DatabaseNames {
    /// Validate a database name: it must be present and non-empty.
    pub fn validate(name: Option<&str>) -> Result<&str> {
        match name {
            None => Err(AdminError::DatabaseNameEmpty(
                "Database name is null".into(),
            )),
            Some("") => Err(AdminError::DatabaseNameEmpty(
                "Database name is empty".into(),
            )),
            Some(name) => Ok(name),
        }
    }
}

pub struct CollectionNames;

impl CollectionNames {
    /// Marker of collections owned by the server itself.
    pub const SYSTEM_PREFIX: &'static str = "system.";

    /// Validate a collection name: it must be present and non-empty.
    pub fn validate(name: Option<&str>) -> Result<&str> {
        match name {
            None => Err(AdminError::CollectionNameEmpty(
                "Collection name is null".into(),
            )),
            Some("") => Err(AdminError::CollectionNameEmpty(
                "Collection name is empty".into(),
            )),
            Some(name) => Ok(name),
        }
    }

    /// Whether a collection is internal to the server and hidden from listings.
    ///
    /// Matches the marker anywhere in the name, not only as a prefix.
    pub fn is_system(name: &str) -> bool {
        name.contains(Self::SYSTEM_PREFIX)
    }
}

/// Validate both names, database first.
pub fn validate_names<'a>(
    database: Option<&'a str>,
    collection: Option<&'a str>,
) -> Result<(&'a str, &'a str)> {
    let database = DatabaseNames::validate(database)?;
    let collection = CollectionNames::validate(collection)?;
    Ok((database, collection))
}
