//! Client-side state shared by the views, and the operations that update it.
//!
//! Each operation sends one request and, on success, applies its single state
//! change. Failures of any kind are logged here and go no further: callers
//! never see an error and the state is left as it was.

use std::sync::Arc;

use api::{
    CreateCollectionRequest, DeleteCollectionRequest, DeleteRequest, DetailsRequest,
    InsertRequest, JsonObject, ResourcesQuery, SearchOptions, SearchRequest, VectorBackend,
};
use core_types::config::ConcurrencyPolicy;
use core_types::{CollectionSchema, Product};
use tokio::sync::watch;
use tracing::{error, info};
use uuid::Uuid;

use super::action::StoreAction;
use super::dispatch::Dispatcher;

/// What the views render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    /// Results of the most recent successful search.
    pub results: Vec<Product>,
    /// Collections created during this session, in creation order.
    pub collections: Vec<String>,
}

/// Handle to the store. Clones share the same state and backend.
pub struct VectorStore<B> {
    backend: Arc<B>,
    state: Arc<watch::Sender<StoreState>>,
    dispatcher: Dispatcher,
}

impl<B> Clone for VectorStore<B> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            state: self.state.clone(),
            dispatcher: self.dispatcher.clone(),
        }
    }
}

impl<B: VectorBackend> VectorStore<B> {
    pub fn new(backend: B, policy: ConcurrencyPolicy) -> Self {
        Self::with_state(backend, policy, StoreState::default())
    }

    pub fn with_state(backend: B, policy: ConcurrencyPolicy, initial: StoreState) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            backend: Arc::new(backend),
            state: Arc::new(tx),
            dispatcher: Dispatcher::new(policy),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn snapshot(&self) -> StoreState {
        self.state.borrow().clone()
    }

    pub fn results(&self) -> Vec<Product> {
        self.state.borrow().results.clone()
    }

    pub fn collections(&self) -> Vec<String> {
        self.state.borrow().collections.clone()
    }

    /// Receiver that is marked changed after every state mutation.
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.state.subscribe()
    }

    /// Run `action` to completion on the current task.
    pub async fn run(&self, action: StoreAction) {
        match action {
            StoreAction::Search {
                id,
                pc,
                collection,
                vector_field,
                embeddings,
                options,
            } => {
                self.search(id, pc, collection, vector_field, embeddings, options)
                    .await;
            }
            StoreAction::Insert {
                id,
                pc,
                collection,
                data,
            } => self.insert(id, pc, collection, data).await,
            StoreAction::Delete {
                id,
                pc,
                collection,
                conditions,
            } => self.delete(id, pc, collection, conditions).await,
            StoreAction::CreateCollection {
                id,
                pc,
                name,
                schema,
            } => self.create_collection(id, pc, name, schema).await,
            StoreAction::DeleteCollection { id, pc, name } => {
                self.delete_collection(id, pc, name).await;
            }
            StoreAction::GetDetails { cids } => self.get_details(cids).await,
            StoreAction::GetResources { id, pc } => self.get_resources(id, pc).await,
        }
    }

    /// Spawn `action` without waiting for it. Must be called inside a tokio runtime.
    pub fn dispatch(&self, action: StoreAction) -> Uuid {
        let kind = action.kind();
        let store = self.clone();
        self.dispatcher
            .dispatch(kind, async move { store.run(action).await })
    }

    /// Wait for every dispatched action to settle.
    pub async fn wait_idle(&self) {
        self.dispatcher.wait_idle().await;
    }

    pub async fn search(
        &self,
        id: i64,
        pc: String,
        collection: String,
        vector_field: String,
        embeddings: Vec<f64>,
        options: Option<SearchOptions>,
    ) {
        let req = SearchRequest {
            id,
            pc,
            collection,
            vector_field,
            embeddings,
            options,
        };
        match self.backend.search(req).await {
            Ok(resp) => {
                info!(results = resp.results.len(), "search completed");
                self.state.send_modify(|s| s.results = resp.results);
            }
            Err(err) => error!(error = %err, "Search error"),
        }
    }

    pub async fn insert(&self, id: i64, pc: String, collection: String, data: Vec<JsonObject>) {
        let rows = data.len();
        let req = InsertRequest {
            id,
            pc,
            collection,
            data,
        };
        match self.backend.insert(req).await {
            Ok(ack) => info!(rows, message = ?ack.message, "insert completed"),
            Err(err) => error!(error = %err, "Insert error"),
        }
    }

    pub async fn delete(&self, id: i64, pc: String, collection: String, conditions: JsonObject) {
        let req = DeleteRequest {
            id,
            pc,
            collection,
            conditions,
        };
        match self.backend.delete(req).await {
            Ok(ack) => info!(message = ?ack.message, "delete completed"),
            Err(err) => error!(error = %err, "Delete error"),
        }
    }

    pub async fn create_collection(
        &self,
        id: i64,
        pc: String,
        name: String,
        schema: CollectionSchema,
    ) {
        let req = CreateCollectionRequest {
            id,
            pc,
            name: name.clone(),
            fields: schema.into_fields(),
        };
        match self.backend.create_collection(req).await {
            Ok(ack) => {
                info!(collection = %name, message = ?ack.message, "collection created");
                self.state.send_modify(|s| s.collections.push(name));
            }
            Err(err) => error!(collection = %name, error = %err, "Create Collection error"),
        }
    }

    pub async fn delete_collection(&self, id: i64, pc: String, name: String) {
        let req = DeleteCollectionRequest {
            id,
            pc,
            name: name.clone(),
        };
        match self.backend.delete_collection(req).await {
            Ok(ack) => {
                info!(collection = %name, message = ?ack.message, "collection deleted");
                self.state
                    .send_modify(|s| s.collections.retain(|c| *c != name));
            }
            Err(err) => error!(collection = %name, error = %err, "Delete Collection error"),
        }
    }

    pub async fn get_details(&self, cids: Vec<String>) {
        match self.backend.details(DetailsRequest { body: cids }).await {
            Ok(details) => info!(?details, "Details retrieved"),
            Err(err) => error!(error = %err, "Details retrieval error"),
        }
    }

    pub async fn get_resources(&self, id: Option<i64>, pc: Option<String>) {
        match self.backend.resources(ResourcesQuery { id, pc }).await {
            Ok(resources) => info!(?resources, "Resources retrieved"),
            Err(err) => error!(error = %err, "Resource retrieval error"),
        }
    }
}
