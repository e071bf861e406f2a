use std::fmt;

use api::{JsonObject, SearchOptions};
use core_types::CollectionSchema;

/// The seven buttons of the form; also the key under which dispatched tasks
/// are tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Search,
    Insert,
    Delete,
    CreateCollection,
    DeleteCollection,
    GetDetails,
    GetResources,
}

impl ActionKind {
    pub const ALL: [Self; 7] = [
        Self::Search,
        Self::Insert,
        Self::Delete,
        Self::CreateCollection,
        Self::DeleteCollection,
        Self::GetDetails,
        Self::GetResources,
    ];

    /// Command word used by the shell and the CLI.
    pub const fn command(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Insert => "insert",
            Self::Delete => "delete",
            Self::CreateCollection => "create-collection",
            Self::DeleteCollection => "delete-collection",
            Self::GetDetails => "details",
            Self::GetResources => "resources",
        }
    }

    pub fn from_command(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.command() == word)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}

/// A fully parsed store call, ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreAction {
    Search {
        id: i64,
        pc: String,
        collection: String,
        vector_field: String,
        embeddings: Vec<f64>,
        options: Option<SearchOptions>,
    },
    Insert {
        id: i64,
        pc: String,
        collection: String,
        data: Vec<JsonObject>,
    },
    Delete {
        id: i64,
        pc: String,
        collection: String,
        conditions: JsonObject,
    },
    CreateCollection {
        id: i64,
        pc: String,
        name: String,
        schema: CollectionSchema,
    },
    DeleteCollection {
        id: i64,
        pc: String,
        name: String,
    },
    GetDetails {
        cids: Vec<String>,
    },
    GetResources {
        id: Option<i64>,
        pc: Option<String>,
    },
}

impl StoreAction {
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::Search { .. } => ActionKind::Search,
            Self::Insert { .. } => ActionKind::Insert,
            Self::Delete { .. } => ActionKind::Delete,
            Self::CreateCollection { .. } => ActionKind::CreateCollection,
            Self::DeleteCollection { .. } => ActionKind::DeleteCollection,
            Self::GetDetails { .. } => ActionKind::GetDetails,
            Self::GetResources { .. } => ActionKind::GetResources,
        }
    }
}
