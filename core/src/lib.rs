//! HTTP client facade with ordered request/response interceptors.
//!
//! # Overview
//! `HttpClient` wraps an injected asynchronous `Transport`. Callers describe
//! a request with `RequestOptions`, either directly through `request` or via
//! the verb helpers (`get`, `post`, `put`, `patch`, `delete`). The
//! descriptor passes through the request interceptors in registration order,
//! the transport executes it, and the resulting envelope passes through the
//! response interceptors in registration order before it reaches the caller.
//!
//! # Design
//! - Descriptors and envelopes are values. Interceptors take one and return
//!   the next; nothing mutates the caller's copy.
//! - Payloads are generic at the edges and erased to `serde_json::Value`
//!   inside the pipeline, so one registry serves every payload type.
//! - The transport is a constructor argument. `UreqTransport` is the
//!   default; tests pass closures or small structs instead.
//! - The pipeline itself does not retry, cache, log or time out. Those are
//!   left to interceptors (see `builtins`) or to the transport.
//!
//! ```no_run
//! use ajax_core::{AuthInterceptor, ClientConfig, HttpClient};
//! use serde_json::Value;
//!
//! # async fn run() -> ajax_core::Result<()> {
//! let mut client = HttpClient::new(ClientConfig::new().with_base_url("https://api.example.com"));
//! client.interceptors_mut().request.push(AuthInterceptor::bearer("token"));
//!
//! let users = client.get::<Value>("/users", None).await?;
//! println!("{} -> {}", users.status, users.response);
//! # Ok(())
//! # }
//! ```

pub mod builtins;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod interceptor;
pub mod request;
pub mod response;
pub mod transport;

pub use builtins::{AuthInterceptor, DefaultHeaders, LoggingInterceptor};
pub use client::HttpClient;
pub use config::ClientConfig;
pub use error::{HttpError, Result};
pub use http::{HttpMethod, ResponseType};
pub use interceptor::{
    Chain, Interceptors, RequestChain, RequestInterceptor, ResponseChain, ResponseInterceptor,
};
pub use request::{Request, RequestOptions};
pub use response::{Response, ResponseEnvelope};
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use transport::Transport;
