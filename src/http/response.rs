// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Raw transport responses

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;
use url::form_urlencoded;

use super::form::{FilePart, FormData};
use super::headers;
use crate::error::{Error, Result};
use crate::file::Blob;

/// Response as handed back by a transport.
///
/// The body accessors take `self`, so each response body is decoded at most
/// once.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// Response status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
    /// URL the response was fetched from
    pub url: String,
}

impl TransportResponse {
    /// Create a new response
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes, url: impl Into<String>) -> Self {
        Self {
            status,
            headers,
            body,
            url: url.into(),
        }
    }

    /// Create a response with a status and body, no headers
    pub fn with_status(status: u16, body: impl Into<Bytes>) -> Self {
        Self::new(
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            HeaderMap::new(),
            body.into(),
            "",
        )
    }

    /// Add a header
    pub fn header_value(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (HeaderName::try_from(name), HeaderValue::try_from(value)) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Get status code as u16
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Reason phrase for the status ("Not Found")
    pub fn reason(&self) -> &str {
        self.status.canonical_reason().unwrap_or("")
    }

    /// Check if status is success (2xx)
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get content type
    pub fn content_type(&self) -> Option<&str> {
        self.header(headers::CONTENT_TYPE)
    }

    /// Get redirect target
    pub fn location(&self) -> Option<&str> {
        self.header(headers::LOCATION)
    }

    /// Body as text, lossy
    pub fn text(self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body parsed as JSON
    pub fn json(self) -> Result<serde_json::Value> {
        serde_json::from_slice(&self.body)
            .map_err(|e| Error::decode(format!("invalid JSON from {}: {}", self.url, e)))
    }

    /// Body as a blob carrying the declared content type
    pub fn blob(self) -> Blob {
        let mime_type = self.content_type().unwrap_or("").to_string();
        Blob::new(self.body, mime_type)
    }

    /// Body parsed as form data.
    ///
    /// `multipart/*` bodies go through multer; anything else is treated as
    /// `application/x-www-form-urlencoded`.
    pub async fn form_data(self) -> Result<FormData> {
        let content_type = self.content_type().unwrap_or("").to_string();
        if !content_type.contains("multipart") {
            return Ok(form_urlencoded::parse(&self.body).into_owned().collect());
        }

        let boundary = multer::parse_boundary(&content_type)?;
        let body = self.body;
        let stream = futures::stream::once(async move { Ok::<Bytes, std::io::Error>(body) });
        let mut multipart = multer::Multipart::new(stream, boundary);

        let mut form = FormData::new();
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match field.file_name().map(String::from) {
                Some(file_name) => {
                    let content_type = field.content_type().map(|m| m.to_string());
                    let data = field.bytes().await?;
                    form.append_file(
                        name,
                        FilePart {
                            file_name: Some(file_name),
                            content_type,
                            data,
                        },
                    );
                }
                None => {
                    let text = field.text().await?;
                    form.append(name, text);
                }
            }
        }
        Ok(form)
    }
}
