// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! The endpoint client
//!
//! A [`Client`] turns a named endpoint plus per-call overrides into a decoded
//! payload: defaults are merged, request interceptors may edit or veto the
//! request, a mock handler may stand in for the transport, and response and
//! error interceptors post-process the outcome.

use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use indexmap::IndexMap;
use parking_lot::RwLock;

use super::config::{ClientConfig, MockMode};
use super::endpoint::{EffectiveRequest, Endpoint, RequestOptions};
use super::interceptor::{
    ErrorInterceptor, InterceptAction, InterceptorChain, RequestInterceptor, RequestLogger,
    ResponseInterceptor,
};
use super::metrics::{ClientMetrics, MetricsReport};
use crate::error::{Error, Result};
use crate::http::params::resolve_or_default;
use crate::http::{
    execute, AbortController, AbortSignal, Merge, Params, Payload, Provider, ReqwestTransport,
    RequestConfig, Transport,
};

/// Register a client over the default reqwest transport
pub fn register_client(config: ClientConfig) -> Result<Client> {
    Client::register(config)
}

/// Named-endpoint HTTP client.
///
/// Cheap to clone; clones share endpoints, interceptors, transport and
/// metrics.
///
/// # Example
///
/// ```rust,no_run
/// use fetchkit::client::{Client, ClientConfig, Endpoint};
///
/// #[tokio::main]
/// async fn main() -> fetchkit::Result<()> {
///     let client = Client::register(
///         ClientConfig::new("https://api.example.com")
///             .with_endpoint("getUser", Endpoint::get("/users/{id}")),
///     )?;
///
///     let options = fetchkit::client::RequestOptions::new().param("id", "42");
///     let user = client.fetch("getUser", Some(options)).await?;
///     println!("{:?}", user);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    base_url: String,
    default_params: Option<Provider<Params>>,
    default_config: Option<Provider<RequestConfig>>,
    mock: MockMode,
    endpoints: IndexMap<String, Endpoint>,
    interceptors: RwLock<InterceptorChain>,
    transport: Arc<dyn Transport>,
    metrics: ClientMetrics,
}

impl Client {
    /// Register a client over a default [`ReqwestTransport`]
    pub fn register(config: ClientConfig) -> Result<Self> {
        Ok(Self::with_transport(config, ReqwestTransport::new()?))
    }

    /// Register a client over `transport`
    pub fn with_transport<T: Transport + 'static>(config: ClientConfig, transport: T) -> Self {
        tracing::debug!(
            base_url = %config.base_url,
            endpoints = config.endpoints.len(),
            mock = ?config.mock,
            "Registering client"
        );

        Self {
            inner: Arc::new(ClientInner {
                base_url: config.base_url,
                default_params: config.default_params,
                default_config: config.default_config,
                mock: config.mock,
                endpoints: config.endpoints,
                interceptors: RwLock::new(config.interceptors),
                transport: Arc::new(transport),
                metrics: ClientMetrics::new(),
            }),
        }
    }

    /// Base URL prefixed to every endpoint
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Mock switch
    pub fn mock_mode(&self) -> MockMode {
        self.inner.mock
    }

    /// Look up an endpoint
    pub fn endpoint(&self, name: &str) -> Option<&Endpoint> {
        self.inner.endpoints.get(name)
    }

    /// Registered endpoint names, in registration order
    pub fn endpoint_names(&self) -> impl Iterator<Item = &str> {
        self.inner.endpoints.keys().map(String::as_str)
    }

    /// Append a request interceptor; calls already in flight are unaffected
    pub fn add_request_interceptor<I: RequestInterceptor + 'static>(&self, interceptor: I) {
        self.inner.interceptors.write().add_request(interceptor);
    }

    /// Append a response interceptor
    pub fn add_response_interceptor<I: ResponseInterceptor + 'static>(&self, interceptor: I) {
        self.inner.interceptors.write().add_response(interceptor);
    }

    /// Append an error interceptor
    pub fn add_error_interceptor<I: ErrorInterceptor + 'static>(&self, interceptor: I) {
        self.inner.interceptors.write().add_error(interceptor);
    }

    /// Log every request, response and failure
    pub fn add_logger(&self, logger: RequestLogger) {
        self.inner.interceptors.write().add_logger(logger);
    }

    /// Remove all interceptors
    pub fn clear_interceptors(&self) {
        self.inner.interceptors.write().clear();
    }

    /// Metrics snapshot
    pub fn metrics(&self) -> MetricsReport {
        self.inner.metrics.report()
    }

    /// Prepare a call that can be aborted before or while it is sent
    pub fn prepare(&self, name: &str, options: Option<RequestOptions>) -> ClientRequest {
        ClientRequest {
            client: self.clone(),
            name: name.to_string(),
            options: options.unwrap_or_default(),
            controller: AbortController::new(),
        }
    }

    /// Fetch a named endpoint
    pub async fn fetch(&self, name: &str, options: Option<RequestOptions>) -> Result<Payload> {
        self.prepare(name, options).send().await
    }

    /// Fetch several endpoints concurrently.
    ///
    /// Calls are independent; results come back in input order.
    pub async fn fetch_all<I, S>(&self, calls: I) -> Vec<Result<Payload>>
    where
        I: IntoIterator<Item = (S, Option<RequestOptions>)>,
        S: AsRef<str>,
    {
        let requests: Vec<ClientRequest> = calls
            .into_iter()
            .map(|(name, options)| self.prepare(name.as_ref(), options))
            .collect();

        join_all(requests.iter().map(|request| request.send())).await
    }

    async fn run(&self, name: &str, options: &RequestOptions, signal: AbortSignal) -> Result<Payload> {
        let start = Instant::now();
        let chain = self.inner.interceptors.read().clone();

        let result = match self.inner.endpoints.get(name) {
            Some(endpoint) => {
                let mut request = self.effective_request(name, endpoint, options, signal);
                match self.pipeline(&chain, endpoint, &mut request).await {
                    Ok(payload) => Ok(payload),
                    Err(error) => Err(self.handle_error(&chain, Some(endpoint), error, &request).await),
                }
            }
            None => {
                let request = self.placeholder_request(name, options);
                let error = Error::EndpointNotFound(name.to_string());
                Err(self.handle_error(&chain, None, error, &request).await)
            }
        };

        let elapsed_ms = start.elapsed().as_millis() as u64;
        self.inner.metrics.record_fetch(elapsed_ms, result.is_ok());

        match result {
            Ok(ref payload) => {
                tracing::debug!(endpoint = name, kind = payload.kind(), time_ms = elapsed_ms, "Fetch completed");
            }
            Err(ref error) => {
                tracing::debug!(endpoint = name, error = %error, time_ms = elapsed_ms, "Fetch failed");
            }
        }

        result
    }

    async fn pipeline(
        &self,
        chain: &InterceptorChain,
        endpoint: &Endpoint,
        request: &mut EffectiveRequest,
    ) -> Result<Payload> {
        if let InterceptAction::Abort(reason) = chain.process_request(request).await {
            self.inner.metrics.record_cancelled();
            return Err(Error::cancelled(request.url.clone(), reason));
        }

        let payload = match endpoint.mock_handler() {
            Some(mock) if self.inner.mock.is_enabled() => {
                tracing::debug!(endpoint = %request.endpoint, "Answering from mock handler");
                self.inner.metrics.record_mocked();
                mock(request)
            }
            _ => execute(self.inner.transport.as_ref(), &request.to_request()).await?,
        };

        let payload = chain.process_response(payload, request).await?;
        match endpoint.response_stage() {
            Some(handler) => handler.after_response(payload, request).await,
            None => Ok(payload),
        }
    }

    async fn handle_error(
        &self,
        chain: &InterceptorChain,
        endpoint: Option<&Endpoint>,
        error: Error,
        request: &EffectiveRequest,
    ) -> Error {
        let error = match chain.process_error(error, request).await {
            Ok(error) => error,
            Err(raised) => return raised,
        };

        match endpoint.and_then(Endpoint::error_stage) {
            Some(handler) => match handler.on_error(error, request).await {
                Ok(error) | Err(error) => error,
            },
            None => error,
        }
    }

    /// defaults ⊕ endpoint ⊕ overrides, with the call's abort signal attached
    fn effective_request(
        &self,
        name: &str,
        endpoint: &Endpoint,
        options: &RequestOptions,
        signal: AbortSignal,
    ) -> EffectiveRequest {
        let params = resolve_or_default(self.inner.default_params.as_ref())
            .merge(endpoint.request.resolve_params())
            .merge(options.params.clone());

        let mut config = resolve_or_default(self.inner.default_config.as_ref())
            .merge(endpoint.request.resolve_config())
            .merge(options.config.clone());
        config.signal = Some(signal);

        let path = options.url.as_deref().unwrap_or(&endpoint.request.url);

        EffectiveRequest {
            endpoint: name.to_string(),
            url: format!("{}{}", self.inner.base_url, path),
            params,
            config,
        }
    }

    /// Request handed to error interceptors when there is no endpoint
    fn placeholder_request(&self, name: &str, options: &RequestOptions) -> EffectiveRequest {
        EffectiveRequest {
            endpoint: name.to_string(),
            url: format!("{}{}", self.inner.base_url, options.url.as_deref().unwrap_or("")),
            params: options.params.clone(),
            config: options.config.clone(),
        }
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.base_url)
            .field("mock", &self.inner.mock)
            .field("endpoints", &self.inner.endpoints.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// One prepared call with its own abort controller.
///
/// The controller's signal replaces any signal given in the overrides.
pub struct ClientRequest {
    client: Client,
    name: String,
    options: RequestOptions,
    controller: AbortController,
}

impl ClientRequest {
    /// Endpoint name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handle that can abort from another task
    pub fn abort_handle(&self) -> AbortController {
        self.controller.clone()
    }

    /// Abort the call; an in-flight transport call fails as aborted
    pub fn abort(&self) {
        self.controller.abort();
    }

    /// Run the call
    pub async fn send(&self) -> Result<Payload> {
        self.client
            .run(&self.name, &self.options, self.controller.signal())
            .await
    }
}
