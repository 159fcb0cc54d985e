use std::collections::BTreeSet;
use std::sync::Arc;

use crate::admin::CollectionRegistry;
use crate::backend::DocumentBackend;
use crate::error::{AdminError, Result};
use crate::types::{CollectionCreationSpec, StatEntry};

#[cfg(feature = "server")]
use crate::config::MongoConfig;
#[cfg(feature = "server")]
use crate::server::{MongoClient, MongoClientBuilder};

/// Shared inner state for synchronous wrappers.
///
/// Holds a Tokio runtime and the underlying async `CollectionRegistry`.
struct Inner<B: DocumentBackend + ?Sized> {
    rt: tokio::runtime::Runtime,
    registry: CollectionRegistry<B>,
}

/// Blocking/synchronous wrapper around [`CollectionRegistry`].
///
/// This type is only available when the `sync` feature is enabled. It runs all
/// operations on an internal Tokio runtime using `block_on`.
///
/// Note: do not call these blocking APIs from within an existing Tokio runtime,
/// as that can lead to deadlocks. In async contexts, use the async
/// [`CollectionRegistry`] APIs directly instead.
pub struct SyncCollectionRegistry<B: DocumentBackend + ?Sized> {
    inner: Arc<Inner<B>>,
}

impl<B: DocumentBackend + ?Sized> Clone for SyncCollectionRegistry<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

fn new_runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().map_err(|e| AdminError::Other(anyhow::Error::new(e)))
}

impl<B: DocumentBackend + ?Sized> SyncCollectionRegistry<B> {
    /// Wrap an existing connection handle.
    pub fn new(backend: Arc<B>) -> Result<Self> {
        let rt = new_runtime()?;
        let inner = Inner {
            rt,
            registry: CollectionRegistry::new(backend),
        };
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    pub fn registry(&self) -> &CollectionRegistry<B> {
        &self.inner.registry
    }

    pub fn list_collections(&self, database: Option<&str>) -> Result<BTreeSet<String>> {
        self.inner
            .rt
            .block_on(self.inner.registry.list_collections(database))
    }

    pub fn create_collection(
        &self,
        database: Option<&str>,
        collection: Option<&str>,
        spec: CollectionCreationSpec,
    ) -> Result<String> {
        self.inner.rt.block_on(
            self.inner
                .registry
                .create_collection(database, collection, spec),
        )
    }

    pub fn drop_collection(
        &self,
        database: Option<&str>,
        collection: Option<&str>,
    ) -> Result<String> {
        self.inner
            .rt
            .block_on(self.inner.registry.drop_collection(database, collection))
    }

    pub fn collection_stats(
        &self,
        database: Option<&str>,
        collection: Option<&str>,
    ) -> Result<Vec<StatEntry>> {
        self.inner
            .rt
            .block_on(self.inner.registry.collection_stats(database, collection))
    }
}

#[cfg(feature = "server")]
impl SyncCollectionRegistry<MongoClient> {
    /// Connect to a server described by a [`MongoConfig`].
    pub fn from_config(config: MongoConfig) -> Result<Self> {
        Self::connect(MongoClientBuilder::from_config(config))
    }

    /// Connect using `MONGO_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::connect(MongoClientBuilder::from_env()?)
    }

    fn connect(builder: MongoClientBuilder) -> Result<Self> {
        let rt = new_runtime()?;
        let client = rt.block_on(builder.build())?;
        let inner = Inner {
            rt,
            registry: CollectionRegistry::new(Arc::new(client)),
        };
        Ok(Self {
            inner: Arc::new(inner),
        })
    }
}
