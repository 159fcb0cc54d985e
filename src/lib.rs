//! MongoDB collection administration: list, create, drop, and inspect
//! collections through a session-scoped connection handle.

mod existence;

pub mod admin;
pub mod backend;
pub mod config;
pub mod error;
pub mod meta;
pub mod provider;
#[cfg(feature = "server")]
pub mod server;
pub mod stats;
#[cfg(feature = "sync")]
pub mod sync;
pub mod types;

pub use crate::admin::{CollectionRegistry, CollectionService};
pub use crate::backend::{BackendError, BackendResult, DocumentBackend};
pub use crate::config::MongoConfig;
pub use crate::error::{AdminError, ErrorFamily, ErrorKind};
pub use crate::existence::ExistenceChecker;
pub use crate::meta::{CollectionNames, DatabaseNames};
pub use crate::provider::{InstanceProvider, SessionInstanceProvider};
#[cfg(feature = "server")]
pub use crate::server::{MongoClient, MongoClientBuilder};
pub use crate::stats::{StatValue, project_stats};
#[cfg(feature = "sync")]
pub use crate::sync::SyncCollectionRegistry;
pub use crate::types::{CollectionCreationSpec, StatEntry};

/// Re-export of the BSON types used in the backend contract.
pub use mongodb::bson;
