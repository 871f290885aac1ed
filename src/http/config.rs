// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Per-request transport configuration

use std::time::Duration;

use bytes::Bytes;
use indexmap::IndexMap;
use reqwest::Method;
use serde::Serialize;

use super::abort::AbortSignal;
use super::form::{to_form_data, FormData, FormElement};
use super::headers;
use crate::error::Result;

/// Ordered header map; names are stored lowercase
pub type Headers = IndexMap<String, String>;

/// Request body
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Text(String),
    Bytes(Bytes),
    Form(FormData),
}

/// Serialize a value into a JSON text body
pub fn json_body<T: Serialize + ?Sized>(value: &T) -> Result<Body> {
    Ok(Body::Text(serde_json::to_string(value)?))
}

/// Build a multipart body from text and blob elements
pub async fn form_body(elements: Vec<FormElement>) -> Result<Body> {
    Ok(Body::Form(to_form_data(elements).await?))
}

/// Transport configuration bag.
///
/// Every field is optional so that merging can tell "not set" from an
/// explicit empty value: an override of `Some(..)` always wins, `None`
/// leaves the base alone. `headers` and `extra` merge per key.
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// HTTP method, GET when unset
    pub method: Option<Method>,
    /// Request headers
    pub headers: Headers,
    /// Request body
    pub body: Option<Body>,
    /// Per-request timeout handed to the transport
    pub timeout: Option<Duration>,
    /// Abort signal
    pub signal: Option<AbortSignal>,
    /// Free-form transport options, deep-merged
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RequestConfig {
    /// Create an empty config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the method
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Set a header
    pub fn header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    /// Set the body
    pub fn body(mut self, body: Body) -> Self {
        self.body = Some(body);
        self
    }

    /// Set a JSON body and content type
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self> {
        self.body = Some(json_body(value)?);
        self.set_header(headers::CONTENT_TYPE, "application/json");
        Ok(self)
    }

    /// Set the timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Attach an abort signal
    pub fn signal(mut self, signal: AbortSignal) -> Self {
        self.signal = Some(signal);
        self
    }

    /// Set a free-form option
    pub fn extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Set a header in place
    pub fn set_header(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
    }

    /// Look up a header, case-insensitively
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Effective method
    pub fn method_or_default(&self) -> Method {
        self.method.clone().unwrap_or(Method::GET)
    }
}
