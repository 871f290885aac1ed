// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Client configuration

use std::fmt;

use indexmap::IndexMap;

use super::endpoint::Endpoint;
use super::interceptor::{ErrorInterceptor, InterceptorChain, RequestInterceptor, ResponseInterceptor};
use crate::http::{Params, Provider, RequestConfig};

/// Environment variable naming the deployment mode
pub const ENV_MODE_VAR: &str = "FETCHKIT_ENV";

/// Environment variable overriding the mock switch
pub const MOCK_VAR: &str = "FETCHKIT_MOCK";

/// Whether endpoint mock handlers are honoured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockMode {
    Enabled,
    Disabled,
}

impl MockMode {
    /// Read the mode from `FETCHKIT_ENV` and `FETCHKIT_MOCK`
    pub fn from_env() -> Self {
        let mode = std::env::var(ENV_MODE_VAR).ok();
        let mock = std::env::var(MOCK_VAR).ok();
        Self::from_vars(mode.as_deref(), mock.as_deref())
    }

    /// Derive the mode from raw variable values.
    ///
    /// `mock = "on"` forces mocks on, `mock = "none"` forces them off.
    /// Otherwise mocks are on unless the mode is `production`.
    pub fn from_vars(mode: Option<&str>, mock: Option<&str>) -> Self {
        match mock.map(|m| m.trim().to_ascii_lowercase()).as_deref() {
            Some("on") => return MockMode::Enabled,
            Some("none") => return MockMode::Disabled,
            _ => {}
        }

        match mode.map(|m| m.trim().eq_ignore_ascii_case("production")) {
            Some(true) => MockMode::Disabled,
            _ => MockMode::Enabled,
        }
    }

    pub fn is_enabled(self) -> bool {
        self == MockMode::Enabled
    }
}

impl Default for MockMode {
    /// Enabled in debug builds, disabled in release builds
    fn default() -> Self {
        if cfg!(debug_assertions) {
            MockMode::Enabled
        } else {
            MockMode::Disabled
        }
    }
}

/// Everything a [`Client`](super::Client) is registered with
#[derive(Clone, Default)]
pub struct ClientConfig {
    /// Prefixed to every endpoint URL
    pub base_url: String,
    /// Parameters every endpoint starts from
    pub default_params: Option<Provider<Params>>,
    /// Config every endpoint starts from
    pub default_config: Option<Provider<RequestConfig>>,
    /// Mock switch
    pub mock: MockMode,
    /// Named endpoints
    pub endpoints: IndexMap<String, Endpoint>,
    /// Initial interceptors
    pub interceptors: InterceptorChain,
}

impl ClientConfig {
    /// Create a config for `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set default params
    pub fn with_default_params(mut self, params: impl Into<Provider<Params>>) -> Self {
        self.default_params = Some(params.into());
        self
    }

    /// Set default config
    pub fn with_default_config(mut self, config: impl Into<Provider<RequestConfig>>) -> Self {
        self.default_config = Some(config.into());
        self
    }

    /// Set the mock switch
    pub fn with_mock(mut self, mock: MockMode) -> Self {
        self.mock = mock;
        self
    }

    /// Register an endpoint, replacing any previous one with that name
    pub fn with_endpoint(mut self, name: impl Into<String>, endpoint: Endpoint) -> Self {
        self.endpoints.insert(name.into(), endpoint);
        self
    }

    /// Append a request interceptor
    pub fn with_request_interceptor<I: RequestInterceptor + 'static>(mut self, interceptor: I) -> Self {
        self.interceptors.add_request(interceptor);
        self
    }

    /// Append a response interceptor
    pub fn with_response_interceptor<I: ResponseInterceptor + 'static>(mut self, interceptor: I) -> Self {
        self.interceptors.add_response(interceptor);
        self
    }

    /// Append an error interceptor
    pub fn with_error_interceptor<I: ErrorInterceptor + 'static>(mut self, interceptor: I) -> Self {
        self.interceptors.add_error(interceptor);
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("default_params", &self.default_params)
            .field("default_config", &self.default_config)
            .field("mock", &self.mock)
            .field("endpoints", &self.endpoints.keys().collect::<Vec<_>>())
            .field("interceptors", &self.interceptors.len())
            .finish()
    }
}
