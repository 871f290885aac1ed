// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! One-shot request execution: resolve, send, decode

use reqwest::Method;

use super::config::RequestConfig;
use super::decode::decode;
use super::headers::CONTENT_TYPE;
use super::merge::Merge;
use super::params::Params;
use super::payload::Payload;
use super::request::Request;
use super::template;
use super::transport::Transport;
use crate::error::{Error, ErrorContext, Result};

/// Execute a single request attempt.
///
/// Providers are resolved once for this call. The transport is called with
/// the fully resolved URL and its answer is decoded by status and content
/// type. No interceptors, mocks or endpoints are involved.
pub async fn execute<T: Transport + ?Sized>(transport: &T, request: &Request) -> Result<Payload> {
    if request.url.is_empty() {
        return Err(Error::Config("request URL must not be empty".to_string()));
    }

    let params = request.resolve_params();
    let config = request.resolve_config();
    let url = template::resolve(&request.url, &params);

    tracing::debug!(
        method = %config.method_or_default(),
        url = %url,
        "Executing request"
    );

    let response = transport.send(&url, &config).await.with_url(&url)?;
    decode(response).await
}

async fn execute_with<T: Transport + ?Sized>(
    transport: &T,
    url: &str,
    params: Option<Params>,
    config: Option<RequestConfig>,
    forced: RequestConfig,
) -> Result<Payload> {
    let config = config.unwrap_or_default().merge(forced);
    let mut request = Request::new(url).config(config);
    if let Some(params) = params {
        request = request.params(params);
    }
    execute(transport, &request).await
}

/// GET `url` with optional params and config
pub async fn http_get<T: Transport + ?Sized>(
    transport: &T,
    url: &str,
    params: Option<Params>,
    config: Option<RequestConfig>,
) -> Result<Payload> {
    execute_with(transport, url, params, config, RequestConfig::new().method(Method::GET)).await
}

/// POST `url`; the body, if any, comes from `config`
pub async fn http_post<T: Transport + ?Sized>(
    transport: &T,
    url: &str,
    params: Option<Params>,
    config: Option<RequestConfig>,
) -> Result<Payload> {
    execute_with(transport, url, params, config, RequestConfig::new().method(Method::POST)).await
}

/// POST `url` declaring a JSON body
pub async fn http_post_json<T: Transport + ?Sized>(
    transport: &T,
    url: &str,
    params: Option<Params>,
    config: Option<RequestConfig>,
) -> Result<Payload> {
    let forced = RequestConfig::new()
        .method(Method::POST)
        .header(CONTENT_TYPE, "application/json");
    execute_with(transport, url, params, config, forced).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::abort::AbortController;
    use crate::http::config::Body;
    use crate::http::mock::MockTransport;
    use crate::http::params::{params, Provider};
    use crate::http::request::RequestController;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_execute_resolves_url_and_decodes() {
        let transport = MockTransport::new().with_json(json!({"id": 42}));
        let request = Request::get("https://api.test/users/{id}")
            .param("id", "42")
            .param("expand", "teams");

        let payload = execute(&transport, &request).await.unwrap();

        assert_eq!(payload, Payload::Json(json!({"id": 42})));
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.url, "https://api.test/users/42?expand=teams");
        assert_eq!(sent.method, Method::GET);
    }

    #[tokio::test]
    async fn test_empty_url_is_config_error() {
        let transport = MockTransport::new();
        let err = execute(&transport, &Request::new("")).await.unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(!transport.was_called());
    }

    #[tokio::test]
    async fn test_dynamic_params_invoked_per_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let request = Request::new("https://api.test/items").params(Provider::dynamic(move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            Some(params([("call", n.to_string())]))
        }));
        let transport = MockTransport::new().with_status(204).with_status(204);

        execute(&transport, &request).await.unwrap();
        execute(&transport, &request).await.unwrap();

        let urls: Vec<_> = transport.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            vec!["https://api.test/items?call=1", "https://api.test/items?call=2"]
        );
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_status_propagates() {
        let transport = MockTransport::new().with_status(500);
        let err = execute(&transport, &Request::get("https://api.test/x"))
            .await
            .unwrap_err();
        assert!(err.is_server_error());
        assert_eq!(err.url(), Some("https://api.test/x"));
    }

    #[tokio::test]
    async fn test_http_post_json_forces_method_and_content_type() {
        let transport = MockTransport::new().with_body(201, "text/plain", "created");
        let config = RequestConfig::new()
            .method(Method::PUT)
            .header("x-trace", "t1")
            .body(Body::Text("{\"a\":1}".into()));

        let payload = http_post_json(&transport, "https://api.test/a", None, Some(config))
            .await
            .unwrap();

        assert_eq!(payload.as_text(), Some("created"));
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method, Method::POST);
        assert_eq!(sent.headers.get("content-type").map(String::as_str), Some("application/json"));
        assert_eq!(sent.headers.get("x-trace").map(String::as_str), Some("t1"));
    }

    #[tokio::test]
    async fn test_http_get_with_params() {
        let transport = MockTransport::new().with_status(200);
        http_get(
            &transport,
            "https://api.test/search",
            Some(params([("q", "a b")])),
            None,
        )
        .await
        .unwrap();

        assert_eq!(transport.last_request().unwrap().url, "https://api.test/search?q=a+b");
    }

    #[tokio::test]
    async fn test_http_post_without_config() {
        let transport = MockTransport::new().with_status(200);
        http_post(&transport, "https://api.test/p", None, None).await.unwrap();
        assert_eq!(transport.last_request().unwrap().method, Method::POST);
    }

    #[tokio::test]
    async fn test_controller_abort_before_send() {
        let transport = MockTransport::new().with_status(200);
        let controller = RequestController::new(Request::get("https://api.test/slow"));

        controller.abort();
        let err = controller.send(&transport).await.unwrap_err();

        assert!(err.is_aborted());
    }

    #[tokio::test]
    async fn test_controller_abort_in_flight() {
        let transport = MockTransport::new()
            .with_status(200)
            .with_delay(Duration::from_secs(5));
        let controller = RequestController::new(Request::get("https://api.test/slow"));
        let handle: AbortController = controller.abort_handle();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            handle.abort();
        });

        let err = controller.send(&transport).await.unwrap_err();
        assert!(err.is_aborted());
        assert_eq!(err.url(), Some("https://api.test/slow"));
    }
}
