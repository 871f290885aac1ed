// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP layer for fetchkit
//!
//! URL templating, config merging, transports and response decoding. The
//! [`execute`] function runs one request end to end without any of the
//! client machinery (endpoints, interceptors, mocks).

pub mod abort;
pub mod client;
pub mod config;
pub mod decode;
pub mod executor;
pub mod form;
pub mod merge;
pub mod mock;
pub mod params;
pub mod payload;
pub mod request;
pub mod response;
pub mod template;
pub mod transport;

pub use abort::{AbortController, AbortSignal};
pub use client::{HttpClientConfig, ReqwestTransport};
pub use config::{form_body, json_body, Body, Headers, RequestConfig};
pub use decode::{decode, DecodeStrategy};
pub use executor::{execute, http_get, http_post, http_post_json};
pub use form::{FilePart, FormData, FormElement, FormElementValue, FormEntry, FormValue};
pub use merge::{deep_merge, Merge};
pub use mock::{MockTransport, RecordedRequest};
pub use params::{params, Params, Provider};
pub use payload::Payload;
pub use request::{Request, RequestController};
pub use response::TransportResponse;
pub use transport::Transport;

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = concat!("fetchkit/", env!("CARGO_PKG_VERSION"));

/// Common HTTP headers
pub mod headers {
    pub const ACCEPT: &str = "accept";
    pub const CONTENT_TYPE: &str = "content-type";
    pub const LOCATION: &str = "location";
    pub const AUTHORIZATION: &str = "authorization";
    pub const USER_AGENT: &str = "user-agent";
}
