// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Observable state container
//!
//! A [`Model`] holds one state value. Named actions from a closed enum
//! query it or replace it; subscribers are told about every replacement.
//!
//! ```rust
//! use fetchkit::model::{Model, ModelInit};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Counter {
//!     Add,
//!     Doubled,
//! }
//!
//! let model = Model::new(
//!     ModelInit::new(1i64)
//!         .update(Counter::Add, |payload, state| {
//!             let by = payload.and_then(|p| p.as_i64()).unwrap_or(1);
//!             Ok(state + by)
//!         })
//!         .query(Counter::Doubled, |_, state| Ok((state * 2).into())),
//! );
//!
//! model.update(Counter::Add, Some(4.into()));
//! assert_eq!(model.get(), 5);
//! assert_eq!(model.query(Counter::Doubled, None), Some(10.into()));
//! ```

mod model;

pub use model::{Model, ModelInit, QueryFn, SubscriptionId, Subscriber, UpdateFn};
