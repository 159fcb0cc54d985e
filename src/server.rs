use std::time::Duration;

use async_trait::async_trait;
use mongodb::Client;
use mongodb::bson::{Document, doc};
use mongodb::options::ClientOptions;
use tracing::info;

use crate::backend::{BackendResult, DocumentBackend};
use crate::config::MongoConfig;
use crate::error::{AdminError, Result};

/// Builder for configuring and constructing a [`MongoClient`].
///
/// Chainable counterpart of [`MongoConfig`]; `MongoClient::from_config` and
/// `from_env` remain available.
pub struct MongoClientBuilder {
    config: MongoConfig,
}

/// Connection handle to a MongoDB server.
#[derive(Clone)]
pub struct MongoClient {
    client: Client,
    session_key: String,
}

impl MongoClient {
    /// Build a client from a `MongoConfig`.
    pub async fn from_config(config: MongoConfig) -> Result<Self> {
        Self::connect_internal(&config).await
    }

    pub async fn from_env() -> Result<Self> {
        let config = MongoConfig::from_env()?;
        Self::from_config(config).await
    }

    pub fn builder() -> MongoClientBuilder {
        MongoClientBuilder::new()
    }

    /// Underlying driver client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Session key this handle was opened for; see [`MongoConfig::session_key`].
    pub fn session_key(&self) -> &str {
        &self.session_key
    }

    async fn connect_internal(config: &MongoConfig) -> Result<Self> {
        let mut options = ClientOptions::parse(config.connection_uri())
            .await
            .map_err(|e| AdminError::Connection(e.to_string()))?;
        options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

        let client =
            Client::with_options(options).map_err(|e| AdminError::Connection(e.to_string()))?;

        info!(host = %config.host, port = config.port, "connected to mongodb");
        Ok(Self {
            client,
            session_key: config.session_key(),
        })
    }
}

#[async_trait]
impl DocumentBackend for MongoClient {
    async fn list_database_names(&self) -> BackendResult<Vec<String>> {
        Ok(self.client.list_database_names().await?)
    }

    async fn list_collection_names(&self, database: &str) -> BackendResult<Vec<String>> {
        Ok(self.client.database(database).list_collection_names().await?)
    }

    async fn create_collection(
        &self,
        database: &str,
        name: &str,
        options: Document,
    ) -> BackendResult<()> {
        // Raw command so that exactly the given option fields are sent.
        let command = build_create_command(name, options);
        self.client.database(database).run_command(command).await?;
        Ok(())
    }

    async fn drop_collection(&self, database: &str, name: &str) -> BackendResult<()> {
        // The driver's drop helper swallows "ns not found"; the raw command keeps it.
        self.client
            .database(database)
            .run_command(doc! { "drop": name })
            .await?;
        Ok(())
    }

    async fn collection_stats(&self, database: &str, name: &str) -> BackendResult<Document> {
        let stats = self
            .client
            .database(database)
            .run_command(doc! { "collStats": name })
            .await?;
        Ok(stats)
    }
}

fn build_create_command(name: &str, options: Document) -> Document {
    let mut command = doc! { "create": name };
    for (key, value) in options {
        command.insert(key, value);
    }
    command
}

impl MongoClientBuilder {
    fn new() -> Self {
        Self {
            config: MongoConfig::default(),
        }
    }

    /// Start from an existing configuration.
    pub fn from_config(config: MongoConfig) -> Self {
        Self { config }
    }

    /// Populate the builder from `MONGO_*` environment variables using
    /// [`MongoConfig::from_env`]. Individual fields can still be overridden
    /// afterwards via the other builder methods.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            config: MongoConfig::from_env()?,
        })
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.config.user = Some(user.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.config.password = Some(password.into());
        self
    }

    pub fn auth_source(mut self, auth_source: impl Into<String>) -> Self {
        self.config.auth_source = auth_source.into();
        self
    }

    pub fn connect_timeout_secs(mut self, secs: u64) -> Self {
        self.config.connect_timeout_secs = secs;
        self
    }

    /// Configuration the builder currently holds.
    pub fn config(&self) -> &MongoConfig {
        &self.config
    }

    /// Build a [`MongoClient`] using the current builder configuration.
    pub async fn build(self) -> Result<MongoClient> {
        MongoClient::connect_internal(&self.config).await
    }
}
