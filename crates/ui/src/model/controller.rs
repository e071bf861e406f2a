use api::VectorBackend;
use uuid::Uuid;

use super::action::ActionKind;
use super::form::FormState;
use super::state::VectorStore;
use crate::notify::Notifier;

/// Binds the form to a store: pressing an action either notifies the user of
/// an input problem or hands the built call to the store.
pub struct FormController<B, N> {
    pub form: FormState,
    store: VectorStore<B>,
    notifier: N,
}

impl<B: VectorBackend, N: Notifier> FormController<B, N> {
    pub fn new(form: FormState, store: VectorStore<B>, notifier: N) -> Self {
        Self {
            form,
            store,
            notifier,
        }
    }

    pub fn store(&self) -> &VectorStore<B> {
        &self.store
    }

    /// Fire-and-forget press. Returns the dispatch id, or `None` when the
    /// input was rejected and nothing was sent.
    pub fn press(&self, action: ActionKind) -> Option<Uuid> {
        match self.form.build(action) {
            Ok(call) => Some(self.store.dispatch(call)),
            Err(err) => {
                self.notifier.notify(&err.to_string());
                None
            }
        }
    }

    /// Press and wait for the request to finish. Returns `false` when the
    /// input was rejected.
    pub async fn press_and_wait(&self, action: ActionKind) -> bool {
        match self.form.build(action) {
            Ok(call) => {
                self.store.run(call).await;
                true
            }
            Err(err) => {
                self.notifier.notify(&err.to_string());
                false
            }
        }
    }
}
