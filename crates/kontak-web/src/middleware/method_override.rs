//! HTML form method override.
//!
//! Browsers can only submit forms with GET or POST. A form that targets
//! `/contact?_method=PUT` is rewritten to a PUT before routing, so the edit
//! and delete forms reach their handlers. Only POST requests are rewritten,
//! and only to PUT, PATCH, or DELETE.
//!
//! This must wrap the router from the outside; layers added with
//! `Router::layer` run after the route has already been chosen.

use std::task::{Context, Poll};

use http::{Method, Request, Uri};
use tower::{Layer, Service};

/// Query parameter carrying the intended method.
pub const METHOD_PARAM: &str = "_method";

/// Tower `Layer` applying the method override.
#[derive(Clone, Copy, Debug, Default)]
pub struct MethodOverrideLayer;

impl MethodOverrideLayer {
    /// Create the layer.
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for MethodOverrideLayer {
    type Service = MethodOverride<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MethodOverride { inner }
    }
}

/// Tower `Service` produced by [`MethodOverrideLayer`].
#[derive(Clone, Debug)]
pub struct MethodOverride<S> {
    inner: S,
}

impl<S, B> Service<Request<B>> for MethodOverride<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        if req.method() == Method::POST {
            if let Some(method) = override_method(req.uri()) {
                tracing::trace!(%method, uri = %req.uri(), "Method override");
                *req.method_mut() = method;
            }
        }
        self.inner.call(req)
    }
}

/// The overriding method requested in the query string, if allowed.
fn override_method(uri: &Uri) -> Option<Method> {
    let value = uri
        .query()?
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == METHOD_PARAM)
        .map(|(_, value)| value)?;

    match value.to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}
