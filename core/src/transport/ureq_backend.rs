//! ureq-based transport.
//!
//! ureq is blocking, so every exchange runs on tokio's blocking pool and the
//! async side only awaits the join handle. Dropping the future stops waiting
//! but does not abort a request already on the wire. Any tokio runtime
//! works; outside one, `send` fails with `HttpError::Transport`.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use serde_json::Value;
use ureq::http;

use super::Transport;
use crate::error::{HttpError, Result};
use crate::http::{HttpMethod, ResponseType};
use crate::request::Request;
use crate::response::Response;

const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";
const TEXT_CONTENT_TYPE: &str = "text/plain;charset=UTF-8";

/// Default transport backed by a `ureq` agent.
///
/// Statuses outside 200..300 are failures (`HttpError::Status`) and never
/// reach response interceptors.
#[derive(Debug, Clone, Default)]
pub struct UreqTransport {
    default_timeout: Option<Duration>,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timeout for descriptors that do not set their own.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = Some(timeout);
        self
    }
}

#[async_trait]
impl Transport for UreqTransport {
    async fn send(&self, request: Request) -> Result<Response> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| HttpError::transport(format!("no tokio runtime: {e}")))?;
        let timeout = request.timeout.or(self.default_timeout);
        runtime
            .spawn_blocking(move || execute(request, timeout))
            .await
            .map_err(|e| HttpError::transport(format!("transport task failed: {e}")))?
    }
}

fn agent(timeout: Option<Duration>) -> ureq::Agent {
    ureq::Agent::config_builder()
        .http_status_as_error(false)
        .allow_non_standard_methods(true)
        .timeout_global(timeout)
        .build()
        .new_agent()
}

fn execute(request: Request, timeout: Option<Duration>) -> Result<Response> {
    let url = request
        .url
        .clone()
        .ok_or_else(|| HttpError::InvalidRequest("missing url".to_string()))?;
    let method = request.method.clone().unwrap_or(HttpMethod::Get);
    let wire_method = http::Method::from_bytes(method.as_str().as_bytes())
        .map_err(|e| HttpError::InvalidRequest(e.to_string()))?;

    let mut builder = http::Request::builder().method(wire_method).uri(url.as_str());
    for (name, value) in request.headers.iter().flatten() {
        builder = builder.header(name.as_str(), value.as_str());
    }
    if !has_header(&request, "authorization") {
        if let Some(credentials) = basic_credentials(&request) {
            builder = builder.header("Authorization", credentials);
        }
    }

    let payload = encode_body(request.body.as_ref())?;
    if let Some((_, content_type)) = &payload {
        if !has_header(&request, "content-type") {
            builder = builder.header("Content-Type", *content_type);
        }
    }

    tracing::debug!(method = %method, url = %url, "dispatching request");

    let agent = agent(timeout);
    let result = match payload {
        Some((body, _)) => builder
            .body(body)
            .map_err(|e| HttpError::InvalidRequest(e.to_string()))
            .and_then(|req| agent.run(req).map_err(map_ureq_error)),
        None => builder
            .body(())
            .map_err(|e| HttpError::InvalidRequest(e.to_string()))
            .and_then(|req| agent.run(req).map_err(map_ureq_error)),
    };
    let mut response = result?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    let raw = response
        .body_mut()
        .read_to_string()
        .map_err(map_ureq_error)?;

    tracing::debug!(status, url = %url, "response received");

    if !(200..300).contains(&status) {
        return Err(HttpError::Status { status, body: raw });
    }

    let response_type = request.response_type.unwrap_or_default();
    let payload = decode_body(&raw, response_type)?;
    Ok(Response {
        status,
        headers,
        raw,
        response: payload,
        response_type,
        request,
    })
}

fn map_ureq_error(err: ureq::Error) -> HttpError {
    match err {
        ureq::Error::Timeout(_) => HttpError::Timeout,
        other => HttpError::Transport(other.to_string()),
    }
}

fn has_header(request: &Request, name: &str) -> bool {
    request
        .headers
        .iter()
        .flatten()
        .any(|(key, _)| key.eq_ignore_ascii_case(name))
}

fn basic_credentials(request: &Request) -> Option<String> {
    let user = request.user.as_deref()?;
    let password = request.password.as_deref().unwrap_or_default();
    let encoded = base64::engine::general_purpose::STANDARD.encode(format!("{user}:{password}"));
    Some(format!("Basic {encoded}"))
}

/// Strings go out as text, every other non-null value as JSON.
fn encode_body(body: Option<&Value>) -> Result<Option<(String, &'static str)>> {
    match body {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some((text.clone(), TEXT_CONTENT_TYPE))),
        Some(value) => serde_json::to_string(value)
            .map(|json| Some((json, JSON_CONTENT_TYPE)))
            .map_err(|e| HttpError::Serialization(e.to_string())),
    }
}

fn decode_body(raw: &str, response_type: ResponseType) -> Result<Value> {
    match response_type {
        ResponseType::Text => Ok(Value::String(raw.to_string())),
        ResponseType::Json if raw.trim().is_empty() => Ok(Value::Null),
        ResponseType::Json => {
            serde_json::from_str(raw).map_err(|e| HttpError::Deserialization(e.to_string()))
        }
    }
}
