//! The transport seam.
//!
//! # Design
//! `HttpClient` never talks to the network itself. It hands the final
//! descriptor to a `Transport` and awaits exactly one envelope or one error.
//! Tests swap in closures or small structs; production code uses
//! `UreqTransport` (feature `ureq`, on by default).

#[cfg(feature = "ureq")]
mod ureq_backend;

use std::future::Future;

use async_trait::async_trait;

use crate::error::Result;
use crate::request::Request;
use crate::response::Response;

#[cfg(feature = "ureq")]
pub use self::ureq_backend::UreqTransport;

/// Executes one descriptor and yields its envelope.
///
/// A transport decides what counts as failure (network faults, non-2xx
/// statuses, malformed descriptors). Whatever it returns as `Err` reaches
/// the caller of `HttpClient::request` unchanged.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response>;
}

#[async_trait]
impl<F, Fut> Transport for F
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Response>> + Send + 'static,
{
    async fn send(&self, request: Request) -> Result<Response> {
        self(request).await
    }
}
