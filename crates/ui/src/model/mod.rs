pub mod action;
pub mod controller;
pub mod dispatch;
pub mod form;
pub mod input;
pub mod state;

pub use action::{ActionKind, StoreAction};
pub use controller::FormController;
pub use dispatch::Dispatcher;
pub use form::{FormField, FormState};
pub use input::InputError;
pub use state::{StoreState, VectorStore};
