// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Named endpoint definitions and per-call request state

use std::fmt;
use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;

use super::interceptor::{error_fn, response_fn, ErrorInterceptor, ResponseInterceptor};
use crate::error::{Error, Result};
use crate::http::{template, Params, Payload, Provider, Request, RequestConfig};

/// Mock handler: fabricates a payload from the final request
pub type MockFn = Arc<dyn Fn(&EffectiveRequest) -> Payload + Send + Sync>;

/// A reusable request template registered under a name.
///
/// # Example
///
/// ```rust
/// use fetchkit::client::Endpoint;
/// use fetchkit::http::Payload;
///
/// let endpoint = Endpoint::get("/users/{id}")
///     .header("accept", "application/json")
///     .mock(|req| Payload::Text(format!("user {}", req.params["id"])));
/// assert!(endpoint.has_mock());
/// ```
#[derive(Clone)]
pub struct Endpoint {
    /// URL template, params and config
    pub request: Request,
    response: Option<Arc<dyn ResponseInterceptor>>,
    error: Option<Arc<dyn ErrorInterceptor>>,
    mock: Option<MockFn>,
}

impl Endpoint {
    /// Endpoint for an existing request template
    pub fn new(request: Request) -> Self {
        Self {
            request,
            response: None,
            error: None,
            mock: None,
        }
    }

    /// GET endpoint
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Request::get(url))
    }

    /// POST endpoint
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Request::post(url))
    }

    /// PUT endpoint
    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Request::new(url).method(Method::PUT))
    }

    /// DELETE endpoint
    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Request::new(url).method(Method::DELETE))
    }

    /// Replace the params provider
    pub fn params(mut self, params: impl Into<Provider<Params>>) -> Self {
        self.request = self.request.params(params);
        self
    }

    /// Replace the config provider
    pub fn config(mut self, config: impl Into<Provider<RequestConfig>>) -> Self {
        self.request = self.request.config(config);
        self
    }

    /// Add one default parameter
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request = self.request.param(name, value);
        self
    }

    /// Add a header
    pub fn header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.request = self.request.header(name, value);
        self
    }

    /// Send `value` as a JSON body
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self> {
        self.request = self.request.json(value)?;
        Ok(self)
    }

    /// Transform successful payloads after the client's response interceptors
    pub fn on_response<F>(self, handler: F) -> Self
    where
        F: Fn(Payload, &EffectiveRequest) -> Result<Payload> + Send + Sync + 'static,
    {
        self.response_handler(response_fn(handler))
    }

    /// Async variant of [`Endpoint::on_response`]
    pub fn response_handler<H: ResponseInterceptor + 'static>(mut self, handler: H) -> Self {
        self.response = Some(Arc::new(handler));
        self
    }

    /// Translate failures after the client's error interceptors.
    ///
    /// Whatever the handler returns, `Ok` or `Err`, is the call's rejection.
    pub fn on_error<F>(self, handler: F) -> Self
    where
        F: Fn(Error, &EffectiveRequest) -> Result<Error> + Send + Sync + 'static,
    {
        self.error_handler(error_fn(handler))
    }

    /// Async variant of [`Endpoint::on_error`]
    pub fn error_handler<H: ErrorInterceptor + 'static>(mut self, handler: H) -> Self {
        self.error = Some(Arc::new(handler));
        self
    }

    /// Fabricate the payload when mocking is enabled
    pub fn mock<F>(mut self, handler: F) -> Self
    where
        F: Fn(&EffectiveRequest) -> Payload + Send + Sync + 'static,
    {
        self.mock = Some(Arc::new(handler));
        self
    }

    /// Whether a mock handler is defined
    pub fn has_mock(&self) -> bool {
        self.mock.is_some()
    }

    pub(crate) fn mock_handler(&self) -> Option<&MockFn> {
        self.mock.as_ref()
    }

    pub(crate) fn response_stage(&self) -> Option<&Arc<dyn ResponseInterceptor>> {
        self.response.as_ref()
    }

    pub(crate) fn error_stage(&self) -> Option<&Arc<dyn ErrorInterceptor>> {
        self.error.as_ref()
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("request", &self.request)
            .field("response", &self.response.is_some())
            .field("error", &self.error.is_some())
            .field("mock", &self.mock.is_some())
            .finish()
    }
}

/// Per-call overrides for [`Client::fetch`](super::Client::fetch)
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Replaces the endpoint URL (the base URL is still prefixed)
    pub url: Option<String>,
    pub params: Params,
    pub config: RequestConfig,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.config.set_header(name, value);
        self
    }

    pub fn config(mut self, config: RequestConfig) -> Self {
        self.config = config;
        self
    }
}

/// The concrete request one `fetch` call works on.
///
/// Providers are already resolved and defaults merged in. Request
/// interceptors may edit it before it is sent.
#[derive(Debug, Clone)]
pub struct EffectiveRequest {
    /// Name of the endpoint being fetched
    pub endpoint: String,
    /// Base URL plus endpoint (or override) URL, placeholders unresolved
    pub url: String,
    pub params: Params,
    pub config: RequestConfig,
}

impl EffectiveRequest {
    /// Method the request will be sent with
    pub fn method(&self) -> Method {
        self.config.method_or_default()
    }

    /// URL with placeholders filled and the query string appended
    pub fn resolved_url(&self) -> String {
        template::resolve(&self.url, &self.params)
    }

    /// Static request for the executor
    pub fn to_request(&self) -> Request {
        Request::new(self.url.clone())
            .params(self.params.clone())
            .config(self.config.clone())
    }
}
