// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Response decoding by status and content type

use super::payload::Payload;
use super::response::TransportResponse;
use crate::error::{Error, Result};

/// How a successful body gets decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStrategy {
    Text,
    Form,
    Json,
    Blob,
}

impl DecodeStrategy {
    /// Pick a strategy from the `Content-Type` header.
    ///
    /// Checked in order: "text", "form", "json"; any other declared type is a
    /// blob and a missing header means text.
    pub fn for_content_type(content_type: Option<&str>) -> Self {
        match content_type {
            None => DecodeStrategy::Text,
            Some(ct) if ct.contains("text") => DecodeStrategy::Text,
            Some(ct) if ct.contains("form") => DecodeStrategy::Form,
            Some(ct) if ct.contains("json") => DecodeStrategy::Json,
            Some(_) => DecodeStrategy::Blob,
        }
    }
}

/// Turn a transport response into a payload.
///
/// 2xx decodes the body. 301/302 fail with [`Error::Redirect`] so the caller
/// can navigate to `Location`. Every other status fails with
/// [`Error::RequestFailed`] carrying the reason phrase.
pub async fn decode(response: TransportResponse) -> Result<Payload> {
    let status = response.status_code();

    if response.is_success() {
        let strategy = DecodeStrategy::for_content_type(response.content_type());
        tracing::trace!(status, strategy = ?strategy, url = %response.url, "Decoding response");
        return Ok(match strategy {
            DecodeStrategy::Text => Payload::Text(response.text()),
            DecodeStrategy::Form => Payload::Form(response.form_data().await?),
            DecodeStrategy::Json => Payload::Json(response.json()?),
            DecodeStrategy::Blob => Payload::Blob(response.blob()),
        });
    }

    if status == 301 || status == 302 {
        let location = response.location().unwrap_or("").to_string();
        tracing::info!(status, from = %response.url, location = %location, "Redirect");
        return Err(Error::Redirect { status, location });
    }

    Err(Error::request_failed(
        response.url.clone(),
        status,
        response.reason(),
    ))
}
