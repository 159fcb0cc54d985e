use crate::backend::{BackendResult, DocumentBackend};

/// Point-in-time membership checks against live server state.
///
/// Nothing is cached: every call asks the server again, so a result can be
/// stale by the time the caller acts on it.
pub struct ExistenceChecker<'a, B: DocumentBackend + ?Sized> {
    backend: &'a B,
}

impl<'a, B: DocumentBackend + ?Sized> ExistenceChecker<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    pub async fn database_exists(&self, name: &str) -> BackendResult<bool> {
        let names = self.backend.list_database_names().await?;
        Ok(names.iter().any(|n| n == name))
    }

    pub async fn collection_exists(&self, database: &str, name: &str) -> BackendResult<bool> {
        let names = self.backend.list_collection_names(database).await?;
        Ok(names.iter().any(|n| n == name))
    }
}
