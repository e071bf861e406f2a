//! Terminal counterpart of the vector-store web form.
//!
//! `model` holds the form fields, the client-state store and the dispatcher
//! that runs store calls in the background; `views` renders the store state as
//! text. Nothing here talks to a terminal directly, so the binary decides where
//! output and notifications go.

pub mod model;
pub mod notify;
pub mod views;

pub use model::{ActionKind, FormController, FormField, FormState, StoreAction, StoreState, VectorStore};
pub use notify::Notifier;
