use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::backend::{BackendError, DocumentBackend};
use crate::error::{AdminError, Result};
use crate::existence::ExistenceChecker;
use crate::meta::{CollectionNames, DatabaseNames, validate_names};
use crate::provider::InstanceProvider;
use crate::stats::project_stats;
use crate::types::{CollectionCreationSpec, StatEntry};

/// Collection administration API.
///
/// Names are optional so that a caller can pass along a missing parameter
/// and get the matching validation error back.
#[async_trait]
pub trait CollectionService {
    async fn list_collections(&self, database: Option<&str>) -> Result<BTreeSet<String>>;
    async fn create_collection(
        &self,
        database: Option<&str>,
        collection: Option<&str>,
        spec: CollectionCreationSpec,
    ) -> Result<String>;
    async fn drop_collection(
        &self,
        database: Option<&str>,
        collection: Option<&str>,
    ) -> Result<String>;
    async fn collection_stats(
        &self,
        database: Option<&str>,
        collection: Option<&str>,
    ) -> Result<Vec<StatEntry>>;
}

/// Session-scoped collection service over a single connection handle.
///
/// Every operation validates names first, then checks existence against the
/// server, then issues the call. Existence checks and the call that follows
/// are not atomic; a late "already exists" or "not found" from the call
/// itself is reported as the same existence error.
pub struct CollectionRegistry<B: DocumentBackend + ?Sized> {
    backend: Arc<B>,
}

impl<B: DocumentBackend + ?Sized> Clone for CollectionRegistry<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B: DocumentBackend + ?Sized> CollectionRegistry<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Build a registry over the handle registered for `session_key`.
    pub fn from_provider<P>(provider: &P, session_key: &str) -> Result<Self>
    where
        P: InstanceProvider<B> + ?Sized,
    {
        Ok(Self::new(provider.instance(session_key)?))
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    fn checker(&self) -> ExistenceChecker<'_, B> {
        ExistenceChecker::new(self.backend.as_ref())
    }

    // Optional ergonomic inherent methods matching CollectionService.
    pub async fn list_collections(&self, database: Option<&str>) -> Result<BTreeSet<String>> {
        self.list_collections_impl(database).await
    }

    pub async fn create_collection(
        &self,
        database: Option<&str>,
        collection: Option<&str>,
        spec: CollectionCreationSpec,
    ) -> Result<String> {
        self.create_collection_impl(database, collection, spec).await
    }

    pub async fn drop_collection(
        &self,
        database: Option<&str>,
        collection: Option<&str>,
    ) -> Result<String> {
        self.drop_collection_impl(database, collection).await
    }

    pub async fn collection_stats(
        &self,
        database: Option<&str>,
        collection: Option<&str>,
    ) -> Result<Vec<StatEntry>> {
        self.collection_stats_impl(database, collection).await
    }

    // ---- Operation bodies (shared by inherent & trait impl) ----
    async fn list_collections_impl(&self, database: Option<&str>) -> Result<BTreeSet<String>> {
        let database = DatabaseNames::validate(database)?;
        debug!(database = %database, "listing collections");

        self.ensure_database(database, AdminError::CollectionListFailure)
            .await?;

        let names = self
            .backend
            .list_collection_names(database)
            .await
            .map_err(|e| rewrap(AdminError::CollectionListFailure, database, e))?;

        Ok(names
            .into_iter()
            .filter(|name| !CollectionNames::is_system(name))
            .collect())
    }

    async fn create_collection_impl(
        &self,
        database: Option<&str>,
        collection: Option<&str>,
        spec: CollectionCreationSpec,
    ) -> Result<String> {
        let (database, collection) = validate_names(database, collection)?;
        debug!(database = %database, collection = %collection, capped = spec.capped, "creating collection");

        self.ensure_database(database, AdminError::CollectionCreationFailure)
            .await?;
        let exists = self
            .checker()
            .collection_exists(database, collection)
            .await
            .map_err(|e| rewrap(AdminError::CollectionCreationFailure, database, e))?;
        if exists {
            return Err(already_exists(database, collection));
        }

        match self
            .backend
            .create_collection(database, collection, spec.to_options())
            .await
        {
            Ok(()) => {}
            Err(BackendError::NamespaceExists(_)) => {
                return Err(already_exists(database, collection));
            }
            Err(e) => return Err(rewrap(AdminError::CollectionCreationFailure, database, e)),
        }

        info!(database = %database, collection = %collection, "collection created");
        Ok(format!(
            "Collection [{collection}] added to database [{database}]."
        ))
    }

    async fn drop_collection_impl(
        &self,
        database: Option<&str>,
        collection: Option<&str>,
    ) -> Result<String> {
        let (database, collection) = validate_names(database, collection)?;
        debug!(database = %database, collection = %collection, "dropping collection");

        self.ensure_collection(database, collection, AdminError::CollectionDeletionFailure)
            .await?;

        match self.backend.drop_collection(database, collection).await {
            Ok(()) => {}
            Err(BackendError::NamespaceNotFound(_)) => {
                return Err(does_not_exist(database, collection));
            }
            Err(e) => return Err(rewrap(AdminError::CollectionDeletionFailure, database, e)),
        }

        info!(database = %database, collection = %collection, "collection dropped");
        Ok(format!(
            "Collection [{collection}] has been deleted from database [{database}]."
        ))
    }

    async fn collection_stats_impl(
        &self,
        database: Option<&str>,
        collection: Option<&str>,
    ) -> Result<Vec<StatEntry>> {
        let (database, collection) = validate_names(database, collection)?;
        debug!(database = %database, collection = %collection, "fetching collection stats");

        self.ensure_collection(database, collection, AdminError::CollectionStatsFailure)
            .await?;

        let raw = match self.backend.collection_stats(database, collection).await {
            Ok(raw) => raw,
            Err(BackendError::NamespaceNotFound(_)) => {
                return Err(does_not_exist(database, collection));
            }
            Err(e) => return Err(rewrap(AdminError::CollectionStatsFailure, database, e)),
        };

        // Serialization failures are structural and pass through as-is.
        project_stats(raw)
    }

    /// Fail with `DatabaseDoesNotExist` unless `database` is on the server.
    /// A backend failure during the check is reported through `wrap`.
    async fn ensure_database(&self, database: &str, wrap: fn(String) -> AdminError) -> Result<()> {
        let exists = self
            .checker()
            .database_exists(database)
            .await
            .map_err(|e| rewrap(wrap, database, e))?;
        if !exists {
            return Err(AdminError::DatabaseDoesNotExist(format!(
                "Database [{database}] does not exist"
            )));
        }
        Ok(())
    }

    async fn ensure_collection(
        &self,
        database: &str,
        collection: &str,
        wrap: fn(String) -> AdminError,
    ) -> Result<()> {
        self.ensure_database(database, wrap).await?;
        let exists = self
            .checker()
            .collection_exists(database, collection)
            .await
            .map_err(|e| rewrap(wrap, database, e))?;
        if !exists {
            return Err(does_not_exist(database, collection));
        }
        Ok(())
    }
}

#[async_trait]
impl<B: DocumentBackend + ?Sized> CollectionService for CollectionRegistry<B> {
    async fn list_collections(&self, database: Option<&str>) -> Result<BTreeSet<String>> {
        self.list_collections_impl(database).await
    }

    async fn create_collection(
        &self,
        database: Option<&str>,
        collection: Option<&str>,
        spec: CollectionCreationSpec,
    ) -> Result<String> {
        self.create_collection_impl(database, collection, spec).await
    }

    async fn drop_collection(
        &self,
        database: Option<&str>,
        collection: Option<&str>,
    ) -> Result<String> {
        self.drop_collection_impl(database, collection).await
    }

    async fn collection_stats(
        &self,
        database: Option<&str>,
        collection: Option<&str>,
    ) -> Result<Vec<StatEntry>> {
        self.collection_stats_impl(database, collection).await
    }
}

// Identifiers are embedded as-is; callers render the message verbatim.
fn already_exists(database: &str, collection: &str) -> AdminError {
    AdminError::CollectionAlreadyExists(format!(
        "Collection [{collection}] already exists in database [{database}]"
    ))
}

fn does_not_exist(database: &str, collection: &str) -> AdminError {
    AdminError::CollectionDoesNotExist(format!(
        "Collection [{collection}] does not exist in database [{database}]"
    ))
}

/// Wrap a backend failure into an operation-specific kind, keeping only its message.
fn rewrap(wrap: fn(String) -> AdminError, database: &str, err: BackendError) -> AdminError {
    warn!(database = %database, error = %err, "database call failed");
    wrap(err.message().to_string())
}
