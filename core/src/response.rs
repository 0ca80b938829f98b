//! Response envelopes.
//!
//! # Design
//! The envelope keeps transport metadata (status, headers, raw text, the
//! descriptor that was sent) next to the decoded payload in `response`.
//! Interceptors and transports work on `Response` (`ResponseEnvelope<Value>`);
//! `decode` converts the payload into the caller's type only after the
//! response interceptor chain has run.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{HttpError, Result};
use crate::http::ResponseType;
use crate::request::Request;

/// Type-erased envelope seen by interceptors and transports.
pub type Response = ResponseEnvelope<Value>;

/// A completed response plus its decoded payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope<T = Value> {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    /// Response text exactly as received.
    pub raw: String,
    pub response: T,
    pub response_type: ResponseType,
    /// The descriptor the transport executed.
    pub request: Request,
}

impl<T> ResponseEnvelope<T> {
    /// Envelope with the given status and payload and empty metadata.
    pub fn new(status: u16, response: T) -> Self {
        Self {
            status,
            headers: Vec::new(),
            raw: String::new(),
            response,
            response_type: ResponseType::default(),
            request: Request::default(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = raw.into();
        self
    }

    pub fn with_request(mut self, request: Request) -> Self {
        self.request = request;
        self
    }

    /// First header value whose name matches case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Replace the payload, keeping the metadata.
    pub fn map_response<U>(self, f: impl FnOnce(T) -> U) -> ResponseEnvelope<U> {
        ResponseEnvelope {
            status: self.status,
            headers: self.headers,
            raw: self.raw,
            response: f(self.response),
            response_type: self.response_type,
            request: self.request,
        }
    }
}

impl Response {
    /// Deserialize the payload into `U`.
    pub fn decode<U: DeserializeOwned>(self) -> Result<ResponseEnvelope<U>> {
        let Self {
            status,
            headers,
            raw,
            response,
            response_type,
            request,
        } = self;
        let response = serde_json::from_value(response)
            .map_err(|e| HttpError::Deserialization(e.to_string()))?;
        Ok(ResponseEnvelope {
            status,
            headers,
            raw,
            response,
            response_type,
            request,
        })
    }
}
