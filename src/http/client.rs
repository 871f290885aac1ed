// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! reqwest-backed transport

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::redirect::Policy;
use reqwest::Client;

use super::config::{Body, RequestConfig};
use super::form::{FormData, FormValue};
use super::response::TransportResponse;
use super::transport::Transport;
use super::DEFAULT_USER_AGENT;
use crate::error::{Error, ErrorContext, Result};

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// User agent string
    pub user_agent: String,
    /// Default timeout, overridden per request by `RequestConfig::timeout`
    pub timeout: Option<Duration>,
    /// Maximum redirects to follow; 0 hands 3xx answers to the decoder
    pub max_redirects: usize,
    /// Accept invalid certificates (dangerous!)
    pub accept_invalid_certs: bool,
    /// Default headers
    pub default_headers: HeaderMap,
    /// Proxy URL
    pub proxy: Option<String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert("accept", HeaderValue::from_static("*/*"));

        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
            max_redirects: 10,
            accept_invalid_certs: false,
            default_headers,
            proxy: None,
        }
    }
}

impl HttpClientConfig {
    /// Config that surfaces 301/302 to the pipeline instead of following them
    pub fn manual_redirects() -> Self {
        Self {
            max_redirects: 0,
            ..Default::default()
        }
    }
}

/// Transport over a shared reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    config: HttpClientConfig,
}

impl ReqwestTransport {
    /// Create a transport with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a transport with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let redirect = if config.max_redirects == 0 {
            Policy::none()
        } else {
            Policy::limited(config.max_redirects)
        };

        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .redirect(redirect)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .default_headers(config.default_headers.clone());

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(ref proxy_url) = config.proxy {
            builder = builder.proxy(
                reqwest::Proxy::all(proxy_url)
                    .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?,
            );
        }

        let client = builder.build()?;

        Ok(Self { client, config })
    }

    /// Get client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    async fn exchange(&self, url: &str, config: &RequestConfig) -> Result<TransportResponse> {
        let start = Instant::now();
        let method = config.method_or_default();

        let mut builder = self.client.request(method.clone(), url);

        for (name, value) in &config.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(ref body) = config.body {
            builder = match body {
                Body::Text(text) => builder.body(text.clone()),
                Body::Bytes(bytes) => builder.body(bytes.clone()),
                Body::Form(form) => builder.multipart(multipart_form(form)?),
            };
        }

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let final_url = response.url().to_string();
        let body = response.bytes().await?;

        tracing::debug!(
            method = %method,
            url = %final_url,
            status = status.as_u16(),
            time_ms = start.elapsed().as_millis() as u64,
            "Transport response"
        );

        Ok(TransportResponse::new(status, headers, body, final_url))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, url: &str, config: &RequestConfig) -> Result<TransportResponse> {
        match config.signal {
            Some(ref signal) => {
                if signal.is_aborted() {
                    return Err(Error::aborted(url));
                }
                tokio::select! {
                    result = self.exchange(url, config) => result.with_url(url),
                    _ = signal.aborted() => Err(Error::aborted(url)),
                }
            }
            None => self.exchange(url, config).await.with_url(url),
        }
    }
}

fn multipart_form(form: &FormData) -> Result<Form> {
    let mut multipart = Form::new();
    for entry in form.iter() {
        multipart = match &entry.value {
            FormValue::Text(text) => multipart.text(entry.name.clone(), text.clone()),
            FormValue::File(file) => {
                let mut part = Part::bytes(file.data.to_vec());
                if let Some(ref name) = file.file_name {
                    part = part.file_name(name.clone());
                }
                if let Some(ref content_type) = file.content_type {
                    part = part.mime_str(content_type)?;
                }
                multipart.part(entry.name.clone(), part)
            }
        };
    }
    Ok(multipart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::abort::AbortController;
    use reqwest::Method;
    use wiremock::matchers::{body_string, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_transport_creation() {
        let transport = ReqwestTransport::new().unwrap();
        assert_eq!(transport.config().user_agent, DEFAULT_USER_AGENT);
        assert_eq!(transport.config().max_redirects, 10);
    }

    #[test]
    fn test_manual_redirect_preset() {
        let config = HttpClientConfig::manual_redirects();
        assert_eq!(config.max_redirects, 0);
        assert!(ReqwestTransport::with_config(config).is_ok());
    }

    #[tokio::test]
    async fn test_sends_method_headers_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .and(query_param("team", "core"))
            .and(header("x-api-key", "k"))
            .and(body_string("{\"name\":\"ann\"}"))
            .respond_with(
                ResponseTemplate::new(201).set_body_raw("{\"id\":1}", "application/json"),
            )
            .mount(&server)
            .await;

        let transport = ReqwestTransport::new().unwrap();
        let config = RequestConfig::new()
            .method(Method::POST)
            .header("X-Api-Key", "k")
            .body(Body::Text("{\"name\":\"ann\"}".into()));

        let url = format!("{}/users?team=core", server.uri());
        let response = transport.send(&url, &config).await.unwrap();

        assert_eq!(response.status_code(), 201);
        assert_eq!(response.content_type(), Some("application/json"));
        assert_eq!(response.text(), "{\"id\":1}");
    }

    #[tokio::test]
    async fn test_manual_redirects_surface_location() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/old"))
            .respond_with(ResponseTemplate::new(302).insert_header("location", "/new"))
            .mount(&server)
            .await;

        let transport = ReqwestTransport::with_config(HttpClientConfig::manual_redirects()).unwrap();
        let response = transport
            .send(&format!("{}/old", server.uri()), &RequestConfig::new())
            .await
            .unwrap();

        assert_eq!(response.status_code(), 302);
        assert_eq!(response.location(), Some("/new"));
    }

    #[tokio::test]
    async fn test_abort_cancels_in_flight_call() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let controller = AbortController::new();
        let config = RequestConfig::new().signal(controller.signal());
        let transport = ReqwestTransport::new().unwrap();

        let aborter = controller.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            aborter.abort();
        });

        let err = transport.send(&server.uri(), &config).await.unwrap_err();
        assert!(err.is_aborted());
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        let transport = ReqwestTransport::new().unwrap();
        let err = transport
            .send("http://127.0.0.1:9/unreachable", &RequestConfig::new())
            .await
            .unwrap_err();

        assert!(err.is_transport());
        assert!(!err.is_aborted());
        assert!(err.url().is_some());
    }
}
