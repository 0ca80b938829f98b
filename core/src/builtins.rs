//! Ready-made interceptors.

use std::collections::BTreeMap;

use base64::Engine;

use crate::error::Result;
use crate::interceptor::{RequestInterceptor, ResponseInterceptor};
use crate::request::Request;
use crate::response::Response;

/// Logs requests and responses through `tracing`.
///
/// Register it on both chains to see each side of the exchange.
#[derive(Debug, Clone, Default)]
pub struct LoggingInterceptor {
    log_headers: bool,
}

impl LoggingInterceptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also log every header at `trace` level.
    pub fn with_headers(mut self) -> Self {
        self.log_headers = true;
        self
    }
}

impl RequestInterceptor for LoggingInterceptor {
    fn intercept(&self, request: Request) -> Result<Request> {
        let method = request.method.as_ref().map_or("GET", |m| m.as_str());
        let url = request.url.as_deref().unwrap_or_default();
        tracing::debug!(method, url, "sending request");

        if self.log_headers {
            for (name, value) in request.headers.iter().flatten() {
                tracing::trace!(header = %name, value = %value, "request header");
            }
        }

        Ok(request)
    }
}

impl ResponseInterceptor for LoggingInterceptor {
    fn intercept(&self, response: Response) -> Result<Response> {
        let url = response.request.url.as_deref().unwrap_or_default();
        tracing::debug!(status = response.status, url, "received response");

        if self.log_headers {
            for (name, value) in &response.headers {
                tracing::trace!(header = %name, value = %value, "response header");
            }
        }

        Ok(response)
    }
}

/// Adds an authentication header to every request.
#[derive(Debug, Clone)]
pub struct AuthInterceptor {
    auth: Auth,
}

#[derive(Clone)]
enum Auth {
    Bearer(String),
    Basic { username: String, password: String },
    ApiKey { header: String, key: String },
}

// Credentials stay out of logs.
impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Auth::Bearer(_) => f.write_str("Bearer(..)"),
            Auth::Basic { username, .. } => write!(f, "Basic({username}:..)"),
            Auth::ApiKey { header, .. } => write!(f, "ApiKey({header})"),
        }
    }
}

impl AuthInterceptor {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            auth: Auth::Bearer(token.into()),
        }
    }

    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            auth: Auth::Basic {
                username: username.into(),
                password: password.into(),
            },
        }
    }

    pub fn api_key(header: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            auth: Auth::ApiKey {
                header: header.into(),
                key: key.into(),
            },
        }
    }
}

impl RequestInterceptor for AuthInterceptor {
    fn intercept(&self, request: Request) -> Result<Request> {
        let request = match &self.auth {
            Auth::Bearer(token) => request.header("Authorization", format!("Bearer {token}")),
            Auth::Basic { username, password } => {
                let credentials = base64::engine::general_purpose::STANDARD
                    .encode(format!("{username}:{password}"));
                request.header("Authorization", format!("Basic {credentials}"))
            }
            Auth::ApiKey { header, key } => request.header(header.as_str(), key.as_str()),
        };
        Ok(request)
    }
}

/// Inserts headers the descriptor does not already carry.
#[derive(Debug, Clone, Default)]
pub struct DefaultHeaders {
    headers: BTreeMap<String, String>,
}

impl DefaultHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

impl RequestInterceptor for DefaultHeaders {
    fn intercept(&self, mut request: Request) -> Result<Request> {
        let headers = request.headers.get_or_insert_with(BTreeMap::new);
        for (name, value) in &self.headers {
            headers
                .entry(name.clone())
                .or_insert_with(|| value.clone());
        }
        Ok(request)
    }
}
