use mongodb::bson::{Document, doc};
use serde::{Deserialize, Serialize};

/// Parameters for creating a collection. Built per call, never stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollectionCreationSpec {
    pub capped: bool,
    /// Maximum size in bytes; only sent when `capped` is set.
    pub size_bytes: i64,
    /// Maximum document count; only sent when `capped` is set.
    pub max_documents: i64,
}

impl CollectionCreationSpec {
    /// An ordinary, uncapped collection.
    pub fn uncapped() -> Self {
        Self::default()
    }

    pub fn capped(size_bytes: i64, max_documents: i64) -> Self {
        Self {
            capped: true,
            size_bytes,
            max_documents,
        }
    }

    /// Creation options as sent to the server. Size and max are omitted
    /// entirely for uncapped collections.
    pub fn to_options(&self) -> Document {
        let mut options = doc! { "capped": self.capped };
        if self.capped {
            options.insert("size", self.size_bytes);
            options.insert("max", self.max_documents);
        }
        options
    }
}

/// One displayed line of a collection's statistics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatEntry {
    pub key: String,
    pub value: String,
    #[serde(rename = "Type")]
    pub type_name: String,
}
