// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request templates and the abortable request controller

use bytes::Bytes;
use reqwest::Method;
use serde::Serialize;

use super::abort::AbortController;
use super::config::{Body, RequestConfig};
use super::executor::execute;
use super::params::{resolve_or_default, Params, Provider};
use super::payload::Payload;
use super::transport::Transport;
use crate::error::Result;

/// A URL template plus its parameters and transport config.
///
/// Parameters and config may each be static or produced per call.
#[derive(Debug, Clone)]
pub struct Request {
    /// URL, possibly containing `{name}` placeholders
    pub url: String,
    /// Parameters for placeholders and query string
    pub params: Option<Provider<Params>>,
    /// Transport config
    pub config: Option<Provider<RequestConfig>>,
}

impl Request {
    /// Create a request with no params or config
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: None,
            config: None,
        }
    }

    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(url).method(Method::GET)
    }

    /// Create a POST request
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(url).method(Method::POST)
    }

    /// Replace the params provider
    pub fn params(mut self, params: impl Into<Provider<Params>>) -> Self {
        self.params = Some(params.into());
        self
    }

    /// Replace the config provider
    pub fn config(mut self, config: impl Into<Provider<RequestConfig>>) -> Self {
        self.config = Some(config.into());
        self
    }

    /// Add one parameter
    pub fn param(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let (name, value) = (name.into(), value.into());
        self.edit_params(move |p| {
            p.insert(name.clone(), value.clone());
        })
    }

    /// Set the method
    pub fn method(self, method: Method) -> Self {
        self.edit_config(move |c| c.method = Some(method.clone()))
    }

    /// Set a header
    pub fn header(self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        let (name, value) = (name.as_ref().to_string(), value.into());
        self.edit_config(move |c| c.set_header(&name, value.clone()))
    }

    /// Set a raw body
    pub fn body(self, body: impl Into<Bytes>) -> Self {
        let body = Body::Bytes(body.into());
        self.edit_config(move |c| c.body = Some(body.clone()))
    }

    /// Set a JSON body and content type
    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self> {
        let patch = RequestConfig::new().json(value)?;
        Ok(self.edit_config(move |c| {
            c.body = patch.body.clone();
            for (k, v) in &patch.headers {
                c.set_header(k, v.clone());
            }
        }))
    }

    /// Resolve the params for one call
    pub fn resolve_params(&self) -> Params {
        resolve_or_default(self.params.as_ref())
    }

    /// Resolve the config for one call
    pub fn resolve_config(&self) -> RequestConfig {
        resolve_or_default(self.config.as_ref())
    }

    fn edit_params<F>(mut self, edit: F) -> Self
    where
        F: Fn(&mut Params) + Send + Sync + 'static,
    {
        let provider = self.params.take().unwrap_or_default();
        self.params = Some(provider.update(edit));
        self
    }

    fn edit_config<F>(mut self, edit: F) -> Self
    where
        F: Fn(&mut RequestConfig) + Send + Sync + 'static,
    {
        let provider = self.config.take().unwrap_or_default();
        self.config = Some(provider.update(edit));
        self
    }
}

/// A request bound to its own abort controller.
///
/// The controller's signal is attached to every config the request yields,
/// including configs produced by a dynamic provider.
#[derive(Debug, Clone)]
pub struct RequestController {
    request: Request,
    controller: AbortController,
}

impl RequestController {
    /// Wrap a request
    pub fn new(request: Request) -> Self {
        let controller = AbortController::new();
        let signal = controller.signal();
        let request = request.edit_config(move |c| c.signal = Some(signal.clone()));
        Self {
            request,
            controller,
        }
    }

    /// The wrapped request, signal attached
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Handle that can abort from elsewhere
    pub fn abort_handle(&self) -> AbortController {
        self.controller.clone()
    }

    /// Abort the request
    pub fn abort(&self) {
        self.controller.abort();
    }

    /// Execute once through `transport`
    pub async fn send<T: Transport + ?Sized>(&self, transport: &T) -> Result<Payload> {
        execute(transport, &self.request).await
    }
}

impl From<Request> for RequestController {
    fn from(request: Request) -> Self {
        Self::new(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::params::params;

    #[test]
    fn test_builder_collects_params_and_config() {
        let request = Request::post("/users/{id}")
            .param("id", "1")
            .param("expand", "teams")
            .header("Accept", "application/json");

        assert_eq!(request.resolve_params().len(), 2);
        let config = request.resolve_config();
        assert_eq!(config.method, Some(Method::POST));
        assert_eq!(config.get_header("accept"), Some("application/json"));
    }

    #[test]
    fn test_json_body() {
        let request = Request::post("/x").json(&serde_json::json!({"k": "v"})).unwrap();
        let config = request.resolve_config();
        assert_eq!(config.body, Some(Body::Text("{\"k\":\"v\"}".into())));
        assert_eq!(config.get_header("content-type"), Some("application/json"));
    }

    #[test]
    fn test_param_on_dynamic_provider() {
        let request = Request::new("/x")
            .params(Provider::dynamic(|| Some(params([("token", "abc")]))))
            .param("page", "1");

        let resolved = request.resolve_params();
        assert_eq!(resolved.get("token").map(String::as_str), Some("abc"));
        assert_eq!(resolved.get("page").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_controller_attaches_signal_to_dynamic_config() {
        let request = Request::new("/x").config(Provider::dynamic(|| Some(RequestConfig::new())));
        let controller = RequestController::new(request);

        let config = controller.request().resolve_config();
        let signal = config.signal.expect("signal attached");
        assert!(!signal.is_aborted());

        controller.abort();
        assert!(signal.is_aborted());
        assert!(controller.request().resolve_config().signal.unwrap().is_aborted());
    }
}
