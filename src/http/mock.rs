// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Recording transport for tests and offline development

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Method;

use super::config::{Body, Headers, RequestConfig};
use super::response::TransportResponse;
use super::transport::Transport;
use crate::error::{Error, Result};

/// Transport that replays queued responses and records every call
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockTransportInner>>,
}

#[derive(Default)]
struct MockTransportInner {
    responses: VecDeque<Result<TransportResponse>>,
    requests: Vec<RecordedRequest>,
    delay: Option<Duration>,
}

/// One call seen by the mock
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub method: Method,
    pub headers: Headers,
    pub body: Option<Body>,
}

impl MockTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response
    pub fn with_response(self, response: TransportResponse) -> Self {
        self.inner.lock().responses.push_back(Ok(response));
        self
    }

    /// Queue a response with a content type
    pub fn with_body(self, status: u16, content_type: &str, body: impl Into<bytes::Bytes>) -> Self {
        self.with_response(
            TransportResponse::with_status(status, body).header_value("content-type", content_type),
        )
    }

    /// Queue a 200 JSON response
    pub fn with_json(self, value: serde_json::Value) -> Self {
        self.with_body(200, "application/json", value.to_string())
    }

    /// Queue a bare status response
    pub fn with_status(self, status: u16) -> Self {
        self.with_response(TransportResponse::with_status(status, ""))
    }

    /// Queue a transport failure
    pub fn with_error(self, error: Error) -> Self {
        self.inner.lock().responses.push_back(Err(error));
        self
    }

    /// Delay every answer, so tests can abort mid-flight
    pub fn with_delay(self, delay: Duration) -> Self {
        self.inner.lock().delay = Some(delay);
        self
    }

    /// Requests made so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.lock().requests.clone()
    }

    /// Number of requests made
    pub fn request_count(&self) -> usize {
        self.inner.lock().requests.len()
    }

    /// Whether any request reached the transport
    pub fn was_called(&self) -> bool {
        self.request_count() > 0
    }

    /// Last request made
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.inner.lock().requests.last().cloned()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, url: &str, config: &RequestConfig) -> Result<TransportResponse> {
        let (next, delay) = {
            let mut inner = self.inner.lock();
            inner.requests.push(RecordedRequest {
                url: url.to_string(),
                method: config.method_or_default(),
                headers: config.headers.clone(),
                body: config.body.clone(),
            });
            (inner.responses.pop_front(), inner.delay)
        };

        if let Some(ref signal) = config.signal {
            if signal.is_aborted() {
                return Err(Error::aborted(url));
            }
            if let Some(delay) = delay {
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    _ = signal.aborted() => return Err(Error::aborted(url)),
                }
            }
        } else if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match next {
            Some(Ok(response)) => {
                let mut response = response;
                if response.url.is_empty() {
                    response.url = url.to_string();
                }
                Ok(response)
            }
            Some(Err(error)) => Err(error),
            None => Err(Error::transport(url, "no mock response queued")),
        }
    }
}
