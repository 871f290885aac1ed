// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # fetchkit - Declarative HTTP Client Pipeline
//!
//! Named endpoints, ordered interceptors and mock handlers over a pluggable
//! transport, plus a small observable state container, key/value storage
//! and file-reading helpers.
//!
//! ## Features
//!
//! - URL templates: `{name}` path placeholders, leftovers become the query
//! - Deep merge of client defaults, endpoint config and per-call overrides
//! - Request, response and error interceptors run in registration order
//! - Mock handlers that bypass the transport, switchable per client
//! - Content-type based decoding into text, form, JSON or blob payloads
//! - One abort signal per request
//!
//! ## Example
//!
//! ```rust,no_run
//! use fetchkit::{Client, ClientConfig, Endpoint, HeaderInjector, RequestOptions};
//!
//! #[tokio::main]
//! async fn main() -> fetchkit::Result<()> {
//!     let client = Client::register(
//!         ClientConfig::new("https://api.example.com")
//!             .with_endpoint("getUser", Endpoint::get("/users/{id}"))
//!             .with_request_interceptor(HeaderInjector::new().bearer_token("secret")),
//!     )?;
//!
//!     let user = client
//!         .fetch("getUser", Some(RequestOptions::new().param("id", "42")))
//!         .await?;
//!     println!("{:?}", user);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod file;
pub mod http;
pub mod model;
pub mod storage;

// Re-exports for convenience

// Client
pub use client::{
    register_client, Client, ClientConfig, ClientRequest, EffectiveRequest, Endpoint, MockMode,
    RequestOptions,
};

// Interceptors
pub use client::{
    ErrorInterceptor, HeaderInjector, InterceptAction, InterceptorChain, RequestInterceptor,
    RequestLogger, ResponseInterceptor,
};

// Metrics
pub use client::{ClientMetrics, MetricsReport};

// Errors
pub use error::{Error, ErrorContext, Result};

// HTTP
pub use http::{
    execute, http_get, http_post, http_post_json, AbortController, AbortSignal, FormData,
    Params, Payload, Provider, Request, RequestConfig, RequestController, Transport,
};

// State, storage, files
pub use file::{Blob, FileReader};
pub use model::{Model, ModelInit};
pub use storage::{BrowserStorage, Storage};

/// fetchkit version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
