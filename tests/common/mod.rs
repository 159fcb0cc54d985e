#![allow(dead_code)]

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use mongoadmin_rs::bson::Document;
use mongoadmin_rs::{BackendError, BackendResult, DocumentBackend, MongoConfig};
use parking_lot::Mutex;

/// Load MongoConfig from environment when `MONGO_INTEGRATION=1` is set.
/// Returns None and prints a SKIP message otherwise.
pub fn load_config_for_integration() -> Option<MongoConfig> {
    if std::env::var("MONGO_INTEGRATION").ok().as_deref() != Some("1") {
        eprintln!("SKIP: set MONGO_INTEGRATION=1 and MONGO_* env vars to run integration tests");
        return None;
    }
    MongoConfig::from_env().ok()
}

/// Millisecond timestamp string used to make database/collection names unique.
pub fn ts_suffix() -> String {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    ts.to_string()
}

/// Every call the registry made against the fake, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    ListDatabases,
    ListCollections(String),
    Create {
        database: String,
        name: String,
        options: Document,
    },
    Drop {
        database: String,
        name: String,
    },
    Stats {
        database: String,
        name: String,
    },
}

/// Which backend call an injected failure applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    ListDatabases,
    ListCollections,
    Create,
    Drop,
    Stats,
}

#[derive(Default)]
struct State {
    databases: BTreeMap<String, BTreeMap<String, Document>>,
    calls: Vec<Call>,
    failures: Vec<(Op, BackendError)>,
}

/// In-memory document server: databases hold collections, each collection
/// holds the stats record it reports.
#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<State>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_database(self, database: &str) -> Self {
        self.state
            .lock()
            .databases
            .entry(database.to_string())
            .or_default();
        self
    }

    pub fn with_collection(self, database: &str, name: &str) -> Self {
        self.with_stats(database, name, Document::new())
    }

    pub fn with_stats(self, database: &str, name: &str, stats: Document) -> Self {
        self.state
            .lock()
            .databases
            .entry(database.to_string())
            .or_default()
            .insert(name.to_string(), stats);
        self
    }

    /// Make the next call of kind `op` fail with `error`.
    pub fn fail_next(&self, op: Op, error: BackendError) {
        self.state.lock().failures.push((op, error));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    pub fn mutating_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Create { .. } | Call::Drop { .. }))
            .collect()
    }

    fn record(&self, op: Op, call: Call) -> BackendResult<()> {
        let mut state = self.state.lock();
        state.calls.push(call);
        if let Some(pos) = state.failures.iter().position(|(o, _)| *o == op) {
            let (_, err) = state.failures.remove(pos);
            return Err(err);
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentBackend for FakeBackend {
    async fn list_database_names(&self) -> BackendResult<Vec<String>> {
        self.record(Op::ListDatabases, Call::ListDatabases)?;
        Ok(self.state.lock().databases.keys().cloned().collect())
    }

    async fn list_collection_names(&self, database: &str) -> BackendResult<Vec<String>> {
        self.record(Op::ListCollections, Call::ListCollections(database.to_string()))?;
        Ok(self
            .state
            .lock()
            .databases
            .get(database)
            .map(|colls| colls.keys().cloned().collect())
            .unwrap_or_default())
    }

    async fn create_collection(
        &self,
        database: &str,
        name: &str,
        options: Document,
    ) -> BackendResult<()> {
        self.record(
            Op::Create,
            Call::Create {
                database: database.to_string(),
                name: name.to_string(),
                options,
            },
        )?;
        let mut state = self.state.lock();
        let colls = state.databases.entry(database.to_string()).or_default();
        if colls.contains_key(name) {
            return Err(BackendError::NamespaceExists("collection already exists".into()));
        }
        colls.insert(name.to_string(), Document::new());
        Ok(())
    }

    async fn drop_collection(&self, database: &str, name: &str) -> BackendResult<()> {
        self.record(
            Op::Drop,
            Call::Drop {
                database: database.to_string(),
                name: name.to_string(),
            },
        )?;
        let mut state = self.state.lock();
        match state.databases.get_mut(database).and_then(|c| c.remove(name)) {
            Some(_) => Ok(()),
            None => Err(BackendError::NamespaceNotFound("ns not found".into())),
        }
    }

    async fn collection_stats(&self, database: &str, name: &str) -> BackendResult<Document> {
        self.record(
            Op::Stats,
            Call::Stats {
                database: database.to_string(),
                name: name.to_string(),
            },
        )?;
        self.state
            .lock()
            .databases
            .get(database)
            .and_then(|c| c.get(name))
            .cloned()
            .ok_or_else(|| BackendError::NamespaceNotFound("ns not found".into()))
    }
}
