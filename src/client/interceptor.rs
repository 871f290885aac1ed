// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request, response and error interceptors
//!
//! Interceptors run for every call a [`Client`](super::Client) makes, in
//! registration order, one after the other even when async. Later
//! interceptors see the output of earlier ones.

use std::sync::Arc;

use async_trait::async_trait;

use super::endpoint::EffectiveRequest;
use crate::error::{Error, Result};
use crate::http::headers::AUTHORIZATION;
use crate::http::Payload;

/// Runs before the request is sent.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use fetchkit::client::{EffectiveRequest, InterceptAction, RequestInterceptor};
///
/// struct RequireTenant;
///
/// #[async_trait]
/// impl RequestInterceptor for RequireTenant {
///     async fn before_request(&self, request: &mut EffectiveRequest) -> InterceptAction {
///         if request.params.contains_key("tenant") {
///             InterceptAction::Continue
///         } else {
///             InterceptAction::Abort("missing tenant".into())
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait RequestInterceptor: Send + Sync {
    /// Edit the request, or veto it
    async fn before_request(&self, request: &mut EffectiveRequest) -> InterceptAction;

    /// Filter - return true if this interceptor should handle the request
    fn should_intercept(&self, _request: &EffectiveRequest) -> bool {
        true
    }
}

/// Runs on every successful payload
#[async_trait]
pub trait ResponseInterceptor: Send + Sync {
    /// Transform or replace the payload; an error moves the call to the
    /// error path
    async fn after_response(&self, payload: Payload, request: &EffectiveRequest) -> Result<Payload>;
}

/// Runs on every failure
#[async_trait]
pub trait ErrorInterceptor: Send + Sync {
    /// Translate the error.
    ///
    /// `Ok(error)` hands the (possibly replaced) error to the next stage.
    /// `Err(error)` makes it the final rejection; later stages are skipped.
    async fn on_error(&self, error: Error, request: &EffectiveRequest) -> Result<Error>;
}

/// Outcome of a request interceptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterceptAction {
    /// Continue with the (possibly modified) request
    Continue,
    /// Cancel the request with a reason
    Abort(String),
}

impl From<bool> for InterceptAction {
    fn from(proceed: bool) -> Self {
        if proceed {
            InterceptAction::Continue
        } else {
            InterceptAction::Abort("interceptor returned false".to_string())
        }
    }
}

/// Closure adapter for [`RequestInterceptor`]
pub struct RequestFn<F>(F);

/// Closure adapter for [`ResponseInterceptor`]
pub struct ResponseFn<F>(F);

/// Closure adapter for [`ErrorInterceptor`]
pub struct ErrorFn<F>(F);

/// Wrap a closure as a request interceptor.
///
/// The closure may return anything convertible to [`InterceptAction`],
/// so a plain `bool` works.
pub fn request_fn<F, A>(f: F) -> RequestFn<F>
where
    F: Fn(&mut EffectiveRequest) -> A + Send + Sync,
    A: Into<InterceptAction>,
{
    RequestFn(f)
}

/// Wrap a closure as a response interceptor
pub fn response_fn<F>(f: F) -> ResponseFn<F>
where
    F: Fn(Payload, &EffectiveRequest) -> Result<Payload> + Send + Sync,
{
    ResponseFn(f)
}

/// Wrap a closure as an error interceptor
pub fn error_fn<F>(f: F) -> ErrorFn<F>
where
    F: Fn(Error, &EffectiveRequest) -> Result<Error> + Send + Sync,
{
    ErrorFn(f)
}

#[async_trait]
impl<F, A> RequestInterceptor for RequestFn<F>
where
    F: Fn(&mut EffectiveRequest) -> A + Send + Sync,
    A: Into<InterceptAction>,
{
    async fn before_request(&self, request: &mut EffectiveRequest) -> InterceptAction {
        (self.0)(request).into()
    }
}

#[async_trait]
impl<F> ResponseInterceptor for ResponseFn<F>
where
    F: Fn(Payload, &EffectiveRequest) -> Result<Payload> + Send + Sync,
{
    async fn after_response(&self, payload: Payload, request: &EffectiveRequest) -> Result<Payload> {
        (self.0)(payload, request)
    }
}

#[async_trait]
impl<F> ErrorInterceptor for ErrorFn<F>
where
    F: Fn(Error, &EffectiveRequest) -> Result<Error> + Send + Sync,
{
    async fn on_error(&self, error: Error, request: &EffectiveRequest) -> Result<Error> {
        (self.0)(error, request)
    }
}

/// Header injector - adds fixed headers to every request
#[derive(Debug, Clone, Default)]
pub struct HeaderInjector {
    /// Headers to inject into every request
    headers: Vec<(String, String)>,
    /// Hosts to inject into (empty = all)
    hosts: Vec<String>,
}

impl HeaderInjector {
    /// Create an empty injector
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a bearer token
    pub fn bearer_token(self, token: impl Into<String>) -> Self {
        self.header(AUTHORIZATION, format!("Bearer {}", token.into()))
    }

    /// Add basic auth
    pub fn basic_auth(self, username: &str, password: &str) -> Self {
        let encoded = base64::Engine::encode(
            &base64::engine::general_purpose::STANDARD,
            format!("{}:{}", username, password),
        );
        self.header(AUTHORIZATION, format!("Basic {}", encoded))
    }

    /// Add custom header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Restrict to specific hosts
    pub fn for_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hosts = hosts.into_iter().map(Into::into).collect();
        self
    }
}

#[async_trait]
impl RequestInterceptor for HeaderInjector {
    fn should_intercept(&self, request: &EffectiveRequest) -> bool {
        if self.hosts.is_empty() {
            return true;
        }

        url::Url::parse(&request.url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .map(|host| self.hosts.iter().any(|h| host.ends_with(h.as_str())))
            .unwrap_or(false)
    }

    async fn before_request(&self, request: &mut EffectiveRequest) -> InterceptAction {
        for (name, value) in &self.headers {
            request.config.set_header(name, value.clone());
        }
        InterceptAction::Continue
    }
}

/// Logs every request, payload and failure through `tracing`
#[derive(Debug, Clone, Default)]
pub struct RequestLogger {
    /// Log payloads at debug level
    pub log_payloads: bool,
    /// Only log URLs containing this
    pub url_filter: Option<String>,
}

impl RequestLogger {
    fn matches(&self, request: &EffectiveRequest) -> bool {
        self.url_filter
            .as_deref()
            .map_or(true, |filter| request.url.contains(filter))
    }
}

#[async_trait]
impl RequestInterceptor for RequestLogger {
    fn should_intercept(&self, request: &EffectiveRequest) -> bool {
        self.matches(request)
    }

    async fn before_request(&self, request: &mut EffectiveRequest) -> InterceptAction {
        tracing::info!(
            endpoint = %request.endpoint,
            method = %request.method(),
            url = %request.resolved_url(),
            "Request"
        );
        InterceptAction::Continue
    }
}

#[async_trait]
impl ResponseInterceptor for RequestLogger {
    async fn after_response(&self, payload: Payload, request: &EffectiveRequest) -> Result<Payload> {
        if self.matches(request) {
            tracing::info!(endpoint = %request.endpoint, kind = payload.kind(), "Response");
            if self.log_payloads {
                tracing::debug!(payload = ?payload, "Response payload");
            }
        }
        Ok(payload)
    }
}

#[async_trait]
impl ErrorInterceptor for RequestLogger {
    async fn on_error(&self, error: Error, request: &EffectiveRequest) -> Result<Error> {
        if self.matches(request) {
            tracing::warn!(endpoint = %request.endpoint, error = %error, "Request failed");
        }
        Ok(error)
    }
}

/// Ordered interceptor lists of one client.
///
/// Cloning is cheap; the client snapshots the chain at the start of each
/// call.
#[derive(Clone, Default)]
pub struct InterceptorChain {
    request: Vec<Arc<dyn RequestInterceptor>>,
    response: Vec<Arc<dyn ResponseInterceptor>>,
    error: Vec<Arc<dyn ErrorInterceptor>>,
}

impl InterceptorChain {
    /// Create a new empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a request interceptor
    pub fn add_request<I: RequestInterceptor + 'static>(&mut self, interceptor: I) {
        self.request.push(Arc::new(interceptor));
    }

    /// Append a response interceptor
    pub fn add_response<I: ResponseInterceptor + 'static>(&mut self, interceptor: I) {
        self.response.push(Arc::new(interceptor));
    }

    /// Append an error interceptor
    pub fn add_error<I: ErrorInterceptor + 'static>(&mut self, interceptor: I) {
        self.error.push(Arc::new(interceptor));
    }

    /// Register one logger in all three lists
    pub fn add_logger(&mut self, logger: RequestLogger) {
        let logger = Arc::new(logger);
        self.request.push(logger.clone());
        self.response.push(logger.clone());
        self.error.push(logger);
    }

    /// Remove every interceptor
    pub fn clear(&mut self) {
        self.request.clear();
        self.response.clear();
        self.error.clear();
    }

    /// Number of interceptors as (request, response, error)
    pub fn len(&self) -> (usize, usize, usize) {
        (self.request.len(), self.response.len(), self.error.len())
    }

    /// Whether all three lists are empty
    pub fn is_empty(&self) -> bool {
        self.request.is_empty() && self.response.is_empty() && self.error.is_empty()
    }

    /// Run request interceptors; the first abort stops the chain
    pub async fn process_request(&self, request: &mut EffectiveRequest) -> InterceptAction {
        for interceptor in &self.request {
            if !interceptor.should_intercept(request) {
                continue;
            }

            match interceptor.before_request(request).await {
                InterceptAction::Continue => continue,
                action => return action,
            }
        }
        InterceptAction::Continue
    }

    /// Run response interceptors; the first failure stops the chain
    pub async fn process_response(&self, mut payload: Payload, request: &EffectiveRequest) -> Result<Payload> {
        for interceptor in &self.response {
            payload = interceptor.after_response(payload, request).await?;
        }
        Ok(payload)
    }

    /// Run error interceptors.
    ///
    /// `Ok` carries the translated error on to the endpoint handler; `Err` is
    /// an error raised by an interceptor and is already final.
    pub async fn process_error(&self, mut error: Error, request: &EffectiveRequest) -> Result<Error> {
        for interceptor in &self.error {
            error = interceptor.on_error(error, request).await?;
        }
        Ok(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{Params, RequestConfig};

    fn request(url: &str) -> EffectiveRequest {
        EffectiveRequest {
            endpoint: "test".into(),
            url: url.into(),
            params: Params::new(),
            config: RequestConfig::new(),
        }
    }

    #[tokio::test]
    async fn test_header_injector() {
        let injector = HeaderInjector::new()
            .bearer_token("test_token")
            .header("X-Custom", "value");
        let mut req = request("https://api.test/a");

        assert_eq!(injector.before_request(&mut req).await, InterceptAction::Continue);
        assert_eq!(req.config.get_header("authorization"), Some("Bearer test_token"));
        assert_eq!(req.config.get_header("x-custom"), Some("value"));
    }

    #[test]
    fn test_basic_auth() {
        let injector = HeaderInjector::new().basic_auth("user", "pass");
        assert_eq!(injector.headers[0].1, "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn test_injector_host_filter() {
        let injector = HeaderInjector::new().bearer_token("t").for_hosts(["api.test"]);
        assert!(injector.should_intercept(&request("https://eu.api.test/a")));
        assert!(!injector.should_intercept(&request("https://other.test/a")));
        assert!(!injector.should_intercept(&request("/relative")));
    }

    #[tokio::test]
    async fn test_request_chain_stops_at_abort() {
        let mut chain = InterceptorChain::new();
        chain.add_request(request_fn(|r: &mut EffectiveRequest| {
            r.params.insert("first".into(), "1".into());
            true
        }));
        chain.add_request(request_fn(|_: &mut EffectiveRequest| false));
        chain.add_request(request_fn(|r: &mut EffectiveRequest| {
            r.params.insert("third".into(), "3".into());
            InterceptAction::Continue
        }));

        let mut req = request("/a");
        let action = chain.process_request(&mut req).await;

        assert!(matches!(action, InterceptAction::Abort(_)));
        assert!(req.params.contains_key("first"));
        assert!(!req.params.contains_key("third"));
    }

    #[tokio::test]
    async fn test_response_chain_in_order() {
        let mut chain = InterceptorChain::new();
        chain.add_response(response_fn(|p: Payload, _: &EffectiveRequest| {
            Ok(Payload::Text(format!("{}-a", p.as_text().unwrap_or_default())))
        }));
        chain.add_response(response_fn(|p: Payload, _: &EffectiveRequest| {
            Ok(Payload::Text(format!("{}-b", p.as_text().unwrap_or_default())))
        }));

        let out = chain
            .process_response(Payload::Text("x".into()), &request("/a"))
            .await
            .unwrap();
        assert_eq!(out, Payload::Text("x-a-b".into()));
    }

    #[tokio::test]
    async fn test_error_chain_raise_is_final() {
        let mut chain = InterceptorChain::new();
        chain.add_error(error_fn(|_: Error, _: &EffectiveRequest| Ok(Error::other("translated"))));
        chain.add_error(error_fn(|e: Error, _: &EffectiveRequest| Err(Error::other(format!("raised: {}", e)))));
        chain.add_error(error_fn(|_: Error, _: &EffectiveRequest| Ok(Error::other("unreachable"))));

        let out = chain
            .process_error(Error::other("boom"), &request("/a"))
            .await
            .unwrap_err();
        assert_eq!(out.to_string(), "raised: translated");
    }

    #[test]
    fn test_logger_registers_everywhere() {
        let mut chain = InterceptorChain::new();
        assert!(chain.is_empty());
        chain.add_logger(RequestLogger::default());
        chain.add_request(HeaderInjector::new());
        assert_eq!(chain.len(), (2, 1, 1));

        chain.clear();
        assert!(chain.is_empty());
    }
}
