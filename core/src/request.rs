//! Request descriptors.
//!
//! # Design
//! A descriptor is a value: builder methods consume `self` and return the
//! updated copy, and interceptors receive one descriptor and hand back
//! another. Nothing in the crate mutates a descriptor the caller still holds.
//!
//! Every field is optional because callers pass partial descriptors and the
//! verb helpers layer them over a base with `merge`. The body is generic so
//! callers keep their own types; `into_erased` turns it into JSON once, at
//! the entry of the pipeline, and from there on everything works on
//! `Request` (`RequestOptions<Value>`).

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::error::{HttpError, Result};
use crate::http::{HttpMethod, ResponseType};

/// Type-erased descriptor seen by interceptors and transports.
pub type Request = RequestOptions<Value>;

/// A partial description of one HTTP call.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions<B = Value> {
    pub method: Option<HttpMethod>,
    pub url: Option<String>,
    pub body: Option<B>,
    /// Header names are kept exactly as inserted.
    pub headers: Option<BTreeMap<String, String>>,
    pub timeout: Option<Duration>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub response_type: Option<ResponseType>,
}

impl<B> Default for RequestOptions<B> {
    fn default() -> Self {
        Self {
            method: None,
            url: None,
            body: None,
            headers: None,
            timeout: None,
            user: None,
            password: None,
            response_type: None,
        }
    }
}

impl<B> RequestOptions<B> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: impl Into<HttpMethod>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn body(mut self, body: B) -> Self {
        self.body = Some(body);
        self
    }

    /// Add or replace a single header, creating the map if needed.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Replace the whole header map.
    pub fn headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn basic_auth(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self.password = Some(password.into());
        self
    }

    pub fn response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = Some(response_type);
        self
    }

    /// Look up a header by exact name.
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers.as_ref()?.get(name).map(String::as_str)
    }

    /// Layer `overrides` on top of `self`: every field set in `overrides`
    /// wins, the rest is kept. Headers are replaced as a whole.
    pub fn merge(self, overrides: RequestOptions<B>) -> Self {
        Self {
            method: overrides.method.or(self.method),
            url: overrides.url.or(self.url),
            body: overrides.body.or(self.body),
            headers: overrides.headers.or(self.headers),
            timeout: overrides.timeout.or(self.timeout),
            user: overrides.user.or(self.user),
            password: overrides.password.or(self.password),
            response_type: overrides.response_type.or(self.response_type),
        }
    }

    /// Replace the body type, keeping every other field.
    pub fn map_body<C>(self, f: impl FnOnce(B) -> C) -> RequestOptions<C> {
        RequestOptions {
            method: self.method,
            url: self.url,
            body: self.body.map(f),
            headers: self.headers,
            timeout: self.timeout,
            user: self.user,
            password: self.password,
            response_type: self.response_type,
        }
    }
}

impl<B: Serialize> RequestOptions<B> {
    /// Serialize the body into JSON, producing the descriptor the pipeline
    /// works on.
    pub fn into_erased(self) -> Result<Request> {
        let body = self
            .body
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| HttpError::Serialization(e.to_string()))?;
        let mut erased = self.map_body(|_| Value::Null);
        erased.body = body;
        Ok(erased)
    }
}
