// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Transport seam
//!
//! The pipeline never talks to the network directly; it hands a final URL
//! and a config bag to a [`Transport`] and decodes whatever comes back.

use std::sync::Arc;

use async_trait::async_trait;

use super::config::RequestConfig;
use super::response::TransportResponse;
use crate::error::Result;

/// HTTP-fetching primitive the pipeline wraps
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one HTTP exchange.
    ///
    /// Must honour `config.signal`: once it is aborted the call fails with
    /// [`crate::Error::aborted`].
    async fn send(&self, url: &str, config: &RequestConfig) -> Result<TransportResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, url: &str, config: &RequestConfig) -> Result<TransportResponse> {
        (**self).send(url, config).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn send(&self, url: &str, config: &RequestConfig) -> Result<TransportResponse> {
        (**self).send(url, config).await
    }
}
