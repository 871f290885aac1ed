// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Configuration merging
//!
//! Right-hand side wins per key. Two objects under the same key merge
//! recursively; anything else (arrays, scalars, null) replaces wholesale.

use serde_json::Value;

use super::config::RequestConfig;
use super::params::Params;

/// Merge `over` on top of `self`
pub trait Merge: Sized {
    fn merge(self, over: Self) -> Self;
}

/// Deep-merge two JSON values
pub fn deep_merge(base: Value, over: Value) -> Value {
    match (base, over) {
        (Value::Object(mut base), Value::Object(over)) => {
            for (key, value) in over {
                let merged = match base.remove(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => value,
                };
                base.insert(key, merged);
            }
            Value::Object(base)
        }
        (_, over) => over,
    }
}

impl Merge for Value {
    fn merge(self, over: Self) -> Self {
        deep_merge(self, over)
    }
}

impl Merge for Params {
    fn merge(mut self, over: Self) -> Self {
        for (key, value) in over {
            self.insert(key, value);
        }
        self
    }
}

impl Merge for RequestConfig {
    fn merge(self, over: Self) -> Self {
        let mut extra = self.extra;
        for (key, value) in over.extra {
            let merged = match extra.remove(&key) {
                Some(existing) => deep_merge(existing, value),
                None => value,
            };
            extra.insert(key, merged);
        }

        RequestConfig {
            method: over.method.or(self.method),
            headers: self.headers.merge(over.headers),
            body: over.body.or(self.body),
            timeout: over.timeout.or(self.timeout),
            signal: over.signal.or(self.signal),
            extra,
        }
    }
}

impl<T: Merge> Merge for Option<T> {
    fn merge(self, over: Self) -> Self {
        match (self, over) {
            (Some(base), Some(over)) => Some(base.merge(over)),
            (base, None) => base,
            (None, over) => over,
        }
    }
}
