// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

/// Read-only handler: derives a value from the state
pub type QueryFn<S> = Box<dyn Fn(Option<&Value>, &S) -> anyhow::Result<Value> + Send + Sync>;

/// Update handler: computes the next state
pub type UpdateFn<S> = Box<dyn Fn(Option<&Value>, &S) -> anyhow::Result<S> + Send + Sync>;

/// Subscriber callback
pub type Subscriber<S> = Arc<dyn Fn(&S) + Send + Sync>;

/// Handle returned by [`Model::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Initial state plus action handlers
pub struct ModelInit<S, A> {
    state: S,
    query: HashMap<A, QueryFn<S>>,
    update: HashMap<A, UpdateFn<S>>,
}

impl<S, A: Eq + Hash> ModelInit<S, A> {
    pub fn new(state: S) -> Self {
        Self {
            state,
            query: HashMap::new(),
            update: HashMap::new(),
        }
    }

    /// Register a query handler for `action`
    pub fn query<F>(mut self, action: A, handler: F) -> Self
    where
        F: Fn(Option<&Value>, &S) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.query.insert(action, Box::new(handler));
        self
    }

    /// Register an update handler for `action`
    pub fn update<F>(mut self, action: A, handler: F) -> Self
    where
        F: Fn(Option<&Value>, &S) -> anyhow::Result<S> + Send + Sync + 'static,
    {
        self.update.insert(action, Box::new(handler));
        self
    }
}

/// Shared state cell with action dispatch and change notification
pub struct Model<S, A> {
    state: RwLock<S>,
    query: HashMap<A, QueryFn<S>>,
    update: HashMap<A, UpdateFn<S>>,
    subscribers: RwLock<Vec<(SubscriptionId, Subscriber<S>)>>,
    next_id: AtomicU64,
}

impl<S, A> Model<S, A>
where
    S: Clone,
    A: Eq + Hash + fmt::Debug,
{
    pub fn new(init: ModelInit<S, A>) -> Self {
        Self {
            state: RwLock::new(init.state),
            query: init.query,
            update: init.update,
            subscribers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Current state
    pub fn get(&self) -> S {
        self.state.read().clone()
    }

    /// Run a query handler.
    ///
    /// Returns `None` for an unknown action or a failing handler.
    pub fn query(&self, action: A, payload: Option<Value>) -> Option<Value> {
        let Some(handler) = self.query.get(&action) else {
            tracing::warn!(action = ?action, "Unknown query action");
            return None;
        };

        let state = self.state.read();
        match handler(payload.as_ref(), &*state) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(action = ?action, error = %e, "Query handler failed");
                None
            }
        }
    }

    /// Run an update handler and notify subscribers.
    ///
    /// An unknown action or a failing handler leaves the state untouched and
    /// notifies nobody. Returns whether the state was replaced.
    pub fn update(&self, action: A, payload: Option<Value>) -> bool {
        let Some(handler) = self.update.get(&action) else {
            tracing::warn!(action = ?action, "Unknown update action");
            return false;
        };

        let snapshot = {
            let mut state = self.state.write();
            match handler(payload.as_ref(), &*state) {
                Ok(next) => {
                    *state = next;
                    state.clone()
                }
                Err(e) => {
                    tracing::warn!(action = ?action, error = %e, "Update handler failed");
                    return false;
                }
            }
        };

        // Subscribers run without any lock held, so they may call back in.
        let subscribers: Vec<Subscriber<S>> = self
            .subscribers
            .read()
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect();

        tracing::trace!(action = ?action, subscribers = subscribers.len(), "State updated");

        for callback in subscribers {
            callback(&snapshot);
        }
        true
    }

    /// Call `callback` with the new state after every update
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&S) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers.write().push((id, Arc::new(callback)));
        id
    }

    /// Remove a subscription; returns whether it existed
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.write();
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }
}

impl<S: fmt::Debug, A> fmt::Debug for Model<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("state", &*self.state.read())
            .field("subscribers", &self.subscribers.read().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Action {
        Push,
        Clear,
        Fail,
        Count,
        Missing,
    }

    fn todo_model() -> Model<Vec<String>, Action> {
        Model::new(
            ModelInit::new(Vec::new())
                .update(Action::Push, |payload, state: &Vec<String>| {
                    let item = payload
                        .and_then(Value::as_str)
                        .ok_or_else(|| anyhow::anyhow!("push needs a string"))?;
                    let mut next = state.clone();
                    next.push(item.to_string());
                    Ok(next)
                })
                .update(Action::Clear, |_, _| Ok(Vec::new()))
                .update(Action::Fail, |_, _| anyhow::bail!("always fails"))
                .query(Action::Count, |_, state| Ok(json!(state.len()))),
        )
    }

    #[test]
    fn test_update_and_query() {
        let model = todo_model();

        assert!(model.update(Action::Push, Some(json!("milk"))));
        assert!(model.update(Action::Push, Some(json!("eggs"))));

        assert_eq!(model.get(), vec!["milk", "eggs"]);
        assert_eq!(model.query(Action::Count, None), Some(json!(2)));

        assert!(model.update(Action::Clear, None));
        assert!(model.get().is_empty());
    }

    #[test]
    fn test_subscribers_see_new_state() {
        let model = todo_model();
        let seen = Arc::new(RwLock::new(Vec::new()));
        let sink = seen.clone();
        model.subscribe(move |state: &Vec<String>| sink.write().push(state.len()));

        model.update(Action::Push, Some(json!("a")));
        model.update(Action::Push, Some(json!("b")));

        assert_eq!(*seen.read(), vec![1, 2]);
    }

    #[test]
    fn test_failures_change_nothing() {
        let model = todo_model();
        model.update(Action::Push, Some(json!("keep")));

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        model.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!model.update(Action::Fail, None));
        assert!(!model.update(Action::Push, Some(json!(42))));
        assert!(!model.update(Action::Missing, None));

        assert_eq!(model.get(), vec!["keep"]);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(model.query(Action::Missing, None), None);
    }

    #[test]
    fn test_unsubscribe() {
        let model = todo_model();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let id = model.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        model.update(Action::Push, Some(json!("a")));
        assert!(model.unsubscribe(id));
        assert!(!model.unsubscribe(id));
        model.update(Action::Push, Some(json!("b")));

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(model.subscriber_count(), 0);
    }

    #[test]
    fn test_subscriber_may_read_model() {
        let model = Arc::new(todo_model());
        let inner = model.clone();
        let observed = Arc::new(AtomicUsize::new(0));
        let sink = observed.clone();
        model.subscribe(move |_| {
            sink.store(inner.get().len(), Ordering::SeqCst);
        });

        model.update(Action::Push, Some(json!("x")));
        assert_eq!(observed.load(Ordering::SeqCst), 1);
    }
}
