//! Plain-data HTTP vocabulary shared by descriptors, envelopes and transports.
//!
//! # Design
//! The method is an enum for the five verbs the client has helpers for, plus
//! `Custom` for anything else a caller puts in a descriptor. Parsing never
//! fails and never normalizes case: `"get"` is a custom method, not `Get`.
//! Validation is the transport's business.

use std::fmt;

use serde::{Deserialize, Serialize};

/// HTTP method of a request descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    /// Any other method string, passed through as given.
    Custom(String),
}

impl HttpMethod {
    /// The method name as sent on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Custom(name) => name,
        }
    }
}

impl From<&str> for HttpMethod {
    fn from(value: &str) -> Self {
        match value {
            "GET" => HttpMethod::Get,
            "POST" => HttpMethod::Post,
            "PUT" => HttpMethod::Put,
            "PATCH" => HttpMethod::Patch,
            "DELETE" => HttpMethod::Delete,
            other => HttpMethod::Custom(other.to_string()),
        }
    }
}

impl From<String> for HttpMethod {
    fn from(value: String) -> Self {
        HttpMethod::from(value.as_str())
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a transport turns the raw response text into the envelope payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    /// Parse the body as JSON; an empty body becomes `null`.
    #[default]
    Json,
    /// Keep the body as a JSON string.
    Text,
}
