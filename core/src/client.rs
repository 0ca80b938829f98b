//! The HTTP client facade.
//!
//! # Design
//! `HttpClient` owns the interceptor registries and a transport and holds no
//! per-call state. A call runs in three stages around a single await:
//!
//! 1. the request chain folds over the descriptor (after the base url has
//!    been prepended);
//! 2. the transport executes the final descriptor;
//! 3. the response chain folds over the envelope the transport produced.
//!
//! Transport errors are returned as-is and skip stage 3. An interceptor
//! error ends the call where it happens, so a failing request interceptor
//! also means the transport is never called.
//!
//! `request` borrows the client immutably, so registries cannot change
//! while a call is in flight. Configure interceptors first, then share the
//! client (for example behind an `Arc`).

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::HttpMethod;
use crate::interceptor::Interceptors;
use crate::request::{Request, RequestOptions};
use crate::response::{Response, ResponseEnvelope};
use crate::transport::Transport;

/// HTTP client with verb helpers and request/response interceptors.
#[derive(Clone)]
pub struct HttpClient {
    base_url: Option<String>,
    interceptors: Interceptors,
    transport: Arc<dyn Transport>,
}

impl HttpClient {
    /// Client backed by the default `UreqTransport`.
    ///
    /// Calls must be awaited inside a tokio runtime of either flavor; the
    /// transport runs ureq on the runtime's blocking pool. Awaited anywhere
    /// else, every call fails with `HttpError::Transport`.
    #[cfg(feature = "ureq")]
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, crate::transport::UreqTransport::new())
    }

    /// Client backed by the given transport.
    pub fn with_transport(config: ClientConfig, transport: impl Transport + 'static) -> Self {
        Self {
            base_url: config.base_url,
            interceptors: Interceptors::default(),
            transport: Arc::new(transport),
        }
    }

    /// Prefix prepended verbatim to every request url.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// The request and response registries.
    pub fn interceptors(&self) -> &Interceptors {
        &self.interceptors
    }

    /// Registries to append to. Each chain runs first-in, first-out, every
    /// entry on every call. Changes need `&mut self`, so finish registering
    /// before the client is shared; for a client behind an `Arc`, ordering
    /// against calls already in flight is up to the caller.
    pub fn interceptors_mut(&mut self) -> &mut Interceptors {
        &mut self.interceptors
    }

    /// `GET url`. Fields set in `options` win over the defaults, including
    /// `method`.
    pub async fn get<T>(&self, url: &str, options: Option<Request>) -> Result<ResponseEnvelope<T>>
    where
        T: DeserializeOwned,
    {
        self.request(verb_options(HttpMethod::Get, url, None, options))
            .await
    }

    /// `POST url` with `body`. Fields set in `options` win, including
    /// `method` and `body`.
    pub async fn post<T, Y>(
        &self,
        url: &str,
        body: Y,
        options: Option<RequestOptions<Y>>,
    ) -> Result<ResponseEnvelope<T>>
    where
        T: DeserializeOwned,
        Y: Serialize,
    {
        self.request(verb_options(HttpMethod::Post, url, Some(body), options))
            .await
    }

    /// `PUT url` with `body`. Same merge rules as `post`.
    pub async fn put<T, Y>(
        &self,
        url: &str,
        body: Y,
        options: Option<RequestOptions<Y>>,
    ) -> Result<ResponseEnvelope<T>>
    where
        T: DeserializeOwned,
        Y: Serialize,
    {
        self.request(verb_options(HttpMethod::Put, url, Some(body), options))
            .await
    }

    /// `PATCH url` with `body`. Same merge rules as `post`.
    pub async fn patch<T, Y>(
        &self,
        url: &str,
        body: Y,
        options: Option<RequestOptions<Y>>,
    ) -> Result<ResponseEnvelope<T>>
    where
        T: DeserializeOwned,
        Y: Serialize,
    {
        self.request(verb_options(HttpMethod::Patch, url, Some(body), options))
            .await
    }

    /// `DELETE url`. Same merge rules as `get`.
    pub async fn delete<T>(
        &self,
        url: &str,
        options: Option<Request>,
    ) -> Result<ResponseEnvelope<T>>
    where
        T: DeserializeOwned,
    {
        self.request(verb_options(HttpMethod::Delete, url, None, options))
            .await
    }

    /// Run `options` through the pipeline and decode the payload as `T`.
    pub async fn request<T, Y>(&self, options: RequestOptions<Y>) -> Result<ResponseEnvelope<T>>
    where
        T: DeserializeOwned,
        Y: Serialize,
    {
        let request = options.into_erased()?;
        self.send(request).await?.decode()
    }

    /// The untyped pipeline: base url, request chain, transport, response
    /// chain.
    pub async fn send(&self, request: Request) -> Result<Response> {
        let request = self.interceptors.request.apply(self.with_base_url(request))?;
        let response = self.transport.send(request).await?;
        self.interceptors.response.apply(response)
    }

    fn with_base_url(&self, mut request: Request) -> Request {
        if let (Some(base), Some(url)) = (&self.base_url, request.url.as_mut()) {
            url.insert_str(0, base);
        }
        request
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("interceptors", &self.interceptors)
            .finish_non_exhaustive()
    }
}

/// `{url, [body,] method}` with `options` layered on top.
fn verb_options<Y>(
    method: HttpMethod,
    url: &str,
    body: Option<Y>,
    options: Option<RequestOptions<Y>>,
) -> RequestOptions<Y> {
    let mut base = RequestOptions::new().url(url).method(method);
    base.body = body;
    match options {
        Some(options) => base.merge(options),
        None => base,
    }
}
