// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Parameter bags and static-or-dynamic providers

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

/// Ordered `name -> value` parameter bag.
///
/// Insertion order is the order parameters appear in the query string.
pub type Params = IndexMap<String, String>;

/// Build a [`Params`] bag from pairs
pub fn params<I, K, V>(pairs: I) -> Params
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Producer closure behind [`Provider::Dynamic`]
pub type ProducerFn<T> = Arc<dyn Fn() -> Option<T> + Send + Sync>;

/// A value that is either fixed or produced on demand.
///
/// Dynamic producers are invoked on every resolution, never memoized, so a
/// producer that reads a token from storage sees the latest token on each
/// request. A producer returning `None` resolves to the empty value.
pub enum Provider<T> {
    /// Fixed value
    Static(T),
    /// Zero-argument producer
    Dynamic(ProducerFn<T>),
}

impl<T> Provider<T> {
    /// Wrap a producer closure
    pub fn dynamic<F>(producer: F) -> Self
    where
        F: Fn() -> Option<T> + Send + Sync + 'static,
    {
        Provider::Dynamic(Arc::new(producer))
    }

    /// Whether this provider calls a producer on resolution
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Provider::Dynamic(_))
    }
}

impl<T: Clone + Default> Provider<T> {
    /// Produce the concrete value for one call
    pub fn resolve(&self) -> T {
        match self {
            Provider::Static(value) => value.clone(),
            Provider::Dynamic(producer) => producer().unwrap_or_default(),
        }
    }
}

impl<T> Provider<T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    /// Apply `edit` to every value this provider yields.
    ///
    /// Static values are edited once, dynamic producers are wrapped so the
    /// edit runs after each invocation.
    pub fn update<F>(self, edit: F) -> Self
    where
        F: Fn(&mut T) + Send + Sync + 'static,
    {
        match self {
            Provider::Static(mut value) => {
                edit(&mut value);
                Provider::Static(value)
            }
            Provider::Dynamic(producer) => Provider::dynamic(move || {
                let mut value = producer().unwrap_or_default();
                edit(&mut value);
                Some(value)
            }),
        }
    }
}

/// Resolve an optional provider, treating absence as empty
pub fn resolve_or_default<T: Clone + Default>(provider: Option<&Provider<T>>) -> T {
    provider.map(Provider::resolve).unwrap_or_default()
}

impl<T: Default> Default for Provider<T> {
    fn default() -> Self {
        Provider::Static(T::default())
    }
}

impl<T> From<T> for Provider<T> {
    fn from(value: T) -> Self {
        Provider::Static(value)
    }
}

impl<T> Clone for Provider<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        match self {
            Provider::Static(value) => Provider::Static(value.clone()),
            Provider::Dynamic(producer) => Provider::Dynamic(producer.clone()),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Provider<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Static(value) => f.debug_tuple("Static").field(value).finish(),
            Provider::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_params_keep_insertion_order() {
        let p = params([("b", "2"), ("a", "1")]);
        let keys: Vec<_> = p.keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_dynamic_provider_runs_every_time() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let provider: Provider<Params> = Provider::dynamic(move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            Some(params([("n", n.to_string())]))
        });

        assert_eq!(provider.resolve().get("n").map(String::as_str), Some("1"));
        assert_eq!(provider.resolve().get("n").map(String::as_str), Some("2"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_dynamic_none_is_empty() {
        let provider: Provider<Params> = Provider::dynamic(|| None);
        assert!(provider.resolve().is_empty());
        assert!(resolve_or_default::<Params>(None).is_empty());
    }

    #[test]
    fn test_update_wraps_dynamic_producer() {
        let provider: Provider<Params> = Provider::dynamic(|| Some(params([("a", "1")])))
            .update(|p| {
                p.insert("b".into(), "2".into());
            });

        assert!(provider.is_dynamic());
        let resolved = provider.resolve();
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved.get("b").map(String::as_str), Some("2"));
    }
}
