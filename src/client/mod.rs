// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Named-endpoint client with interceptors and mocks

mod client;
mod config;
mod endpoint;
mod interceptor;
mod metrics;

pub use client::{register_client, Client, ClientRequest};
pub use config::{ClientConfig, MockMode, ENV_MODE_VAR, MOCK_VAR};
pub use endpoint::{EffectiveRequest, Endpoint, MockFn, RequestOptions};
pub use interceptor::{
    error_fn, request_fn, response_fn, ErrorFn, ErrorInterceptor, HeaderInjector, InterceptAction,
    InterceptorChain, RequestFn, RequestInterceptor, RequestLogger, ResponseFn, ResponseInterceptor,
};
pub use metrics::{ClientMetrics, MetricsReport};
