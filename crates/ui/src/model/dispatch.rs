//! Fire-and-forget task tracking, keyed by action kind.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use core_types::config::ConcurrencyPolicy;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, info_span};
use uuid::Uuid;

use super::action::ActionKind;

#[derive(Debug)]
struct Tracked {
    id: Uuid,
    handle: JoinHandle<()>,
}

/// Spawns actions on the current tokio runtime and remembers them until they
/// finish, so a later action can supersede an earlier one or a caller can
/// wait for everything in flight.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    policy: ConcurrencyPolicy,
    tasks: Arc<Mutex<HashMap<ActionKind, Vec<Tracked>>>>,
}

impl Dispatcher {
    pub fn new(policy: ConcurrencyPolicy) -> Self {
        Self {
            policy,
            tasks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Spawn `fut` as the newest task of `kind`. Must be called from within a
    /// tokio runtime.
    pub fn dispatch<F>(&self, kind: ActionKind, fut: F) -> Uuid
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let id = Uuid::new_v4();
        let mut tasks = self.tasks.lock();
        let slot = tasks.entry(kind).or_default();
        slot.retain(|t| !t.handle.is_finished());

        if self.policy == ConcurrencyPolicy::Supersede {
            for stale in slot.drain(..) {
                debug!(action = %kind, superseded = %stale.id, by = %id, "aborting pending action");
                stale.handle.abort();
            }
        }

        let span = info_span!("action", kind = %kind, id = %id);
        let handle = tokio::spawn(fut.instrument(span));
        slot.push(Tracked { id, handle });
        id
    }

    /// Number of unfinished tasks of `kind`.
    pub fn pending(&self, kind: ActionKind) -> usize {
        self.tasks
            .lock()
            .get(&kind)
            .map_or(0, |slot| slot.iter().filter(|t| !t.handle.is_finished()).count())
    }

    pub fn is_idle(&self) -> bool {
        self.tasks
            .lock()
            .values()
            .flatten()
            .all(|t| t.handle.is_finished())
    }

    /// Wait until every dispatched task, including ones dispatched while
    /// waiting, has finished or been aborted.
    pub async fn wait_idle(&self) {
        loop {
            let drained: Vec<Tracked> = {
                let mut tasks = self.tasks.lock();
                tasks.values_mut().flat_map(|slot| slot.drain(..)).collect()
            };
            if drained.is_empty() {
                return;
            }
            for tracked in drained {
                if let Err(err) = tracked.handle.await {
                    if err.is_panic() {
                        tracing::error!(id = %tracked.id, "action task panicked");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn race_lets_every_task_finish() {
        let dispatcher = Dispatcher::new(ConcurrencyPolicy::Race);
        let done = Arc::new(AtomicUsize::new(0));
        for delay in [30, 10] {
            let done = done.clone();
            dispatcher.dispatch(ActionKind::Search, async move {
                tokio::time::sleep(Duration::from_millis(delay)).await;
                done.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert_eq!(dispatcher.pending(ActionKind::Search), 2);
        dispatcher.wait_idle().await;
        assert_eq!(done.load(Ordering::SeqCst), 2);
        assert!(dispatcher.is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn supersede_aborts_pending_task_of_same_kind() {
        let dispatcher = Dispatcher::new(ConcurrencyPolicy::Supersede);
        let done = Arc::new(AtomicUsize::new(0));

        let first = done.clone();
        dispatcher.dispatch(ActionKind::Search, async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            first.fetch_add(1, Ordering::SeqCst);
        });
        let other_kind = done.clone();
        dispatcher.dispatch(ActionKind::GetResources, async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            other_kind.fetch_add(10, Ordering::SeqCst);
        });
        let second = done.clone();
        dispatcher.dispatch(ActionKind::Search, async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            second.fetch_add(100, Ordering::SeqCst);
        });

        dispatcher.wait_idle().await;
        assert_eq!(done.load(Ordering::SeqCst), 110);
    }
}
