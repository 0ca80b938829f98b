//! Request and response interceptors.
//!
//! # Design
//! An interceptor is a synchronous transformation: it takes the current
//! descriptor (or envelope) by value and returns the next one, or an error
//! that aborts the call. Closures implement the traits directly, so most
//! callers never name them.
//!
//! A `Chain` applies its entries as a left fold in registration order. The
//! output of entry *i* is the only input of entry *i + 1*, and the first
//! error stops the fold.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::request::Request;
use crate::response::Response;

/// Transforms outgoing descriptors.
pub trait RequestInterceptor: Send + Sync {
    fn intercept(&self, request: Request) -> Result<Request>;
}

/// Transforms successful response envelopes.
pub trait ResponseInterceptor: Send + Sync {
    fn intercept(&self, response: Response) -> Result<Response>;
}

impl<F> RequestInterceptor for F
where
    F: Fn(Request) -> Result<Request> + Send + Sync,
{
    fn intercept(&self, request: Request) -> Result<Request> {
        self(request)
    }
}

impl<F> ResponseInterceptor for F
where
    F: Fn(Response) -> Result<Response> + Send + Sync,
{
    fn intercept(&self, response: Response) -> Result<Response> {
        self(response)
    }
}

/// Ordered list of interceptors of one kind.
pub struct Chain<I: ?Sized> {
    entries: Vec<Arc<I>>,
}

pub type RequestChain = Chain<dyn RequestInterceptor>;
pub type ResponseChain = Chain<dyn ResponseInterceptor>;

impl<I: ?Sized> Chain<I> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove the interceptor registered at `index`. Later entries shift
    /// down; returns `false` if there was nothing at that position.
    pub fn remove(&mut self, index: usize) -> bool {
        if index < self.entries.len() {
            self.entries.remove(index);
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<I: ?Sized> Default for Chain<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ?Sized> Clone for Chain<I> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<I: ?Sized> fmt::Debug for Chain<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("len", &self.entries.len())
            .finish()
    }
}

impl Chain<dyn RequestInterceptor> {
    /// Append an interceptor; it runs after every one already registered.
    pub fn push(&mut self, interceptor: impl RequestInterceptor + 'static) {
        self.entries.push(Arc::new(interceptor));
    }

    /// Append a closure. Same as `push`, with the closure signature spelled
    /// out so argument and error types are inferred.
    pub fn push_fn<F>(&mut self, interceptor: F)
    where
        F: Fn(Request) -> Result<Request> + Send + Sync + 'static,
    {
        self.entries.push(Arc::new(interceptor));
    }

    pub fn push_shared(&mut self, interceptor: Arc<dyn RequestInterceptor>) {
        self.entries.push(interceptor);
    }

    pub fn apply(&self, request: Request) -> Result<Request> {
        self.entries
            .iter()
            .try_fold(request, |request, interceptor| interceptor.intercept(request))
    }
}

impl Chain<dyn ResponseInterceptor> {
    /// Append an interceptor; it runs after every one already registered.
    pub fn push(&mut self, interceptor: impl ResponseInterceptor + 'static) {
        self.entries.push(Arc::new(interceptor));
    }

    /// Append a closure. Same as `push`, with the closure signature spelled
    /// out so argument and error types are inferred.
    pub fn push_fn<F>(&mut self, interceptor: F)
    where
        F: Fn(Response) -> Result<Response> + Send + Sync + 'static,
    {
        self.entries.push(Arc::new(interceptor));
    }

    pub fn push_shared(&mut self, interceptor: Arc<dyn ResponseInterceptor>) {
        self.entries.push(interceptor);
    }

    pub fn apply(&self, response: Response) -> Result<Response> {
        self.entries
            .iter()
            .try_fold(response, |response, interceptor| interceptor.intercept(response))
    }
}

/// The two registries owned by an `HttpClient`.
#[derive(Debug, Clone, Default)]
pub struct Interceptors {
    pub request: RequestChain,
    pub response: ResponseChain,
}
