//! Gateway handler trait and function-backed handler variants.

use crate::http::invocation::Invocation;
use crate::http::response::ResponseDescriptor;
use async_trait::async_trait;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// What a handler hands back: a full response descriptor, or a bare
/// JSON-serializable value that the writer treats as the `data` field.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerOutput {
    Descriptor(ResponseDescriptor),
    Value(Value),
}

impl From<ResponseDescriptor> for HandlerOutput {
    fn from(descriptor: ResponseDescriptor) -> Self {
        HandlerOutput::Descriptor(descriptor)
    }
}

impl From<Value> for HandlerOutput {
    fn from(value: Value) -> Self {
        HandlerOutput::Value(value)
    }
}

impl From<String> for HandlerOutput {
    fn from(value: String) -> Self {
        HandlerOutput::Value(Value::String(value))
    }
}

impl From<&str> for HandlerOutput {
    fn from(value: &str) -> Self {
        HandlerOutput::Value(Value::String(value.to_string()))
    }
}

/// A registered function invoked per matched route.
///
/// Handlers are trusted user code; the gateway imposes no timeout on them.
/// Most handlers are plain closures wrapped via [`from_fn`] or
/// [`from_async`], but stateful handlers can implement the trait directly.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn invoke(&self, invocation: Invocation) -> Result<HandlerOutput, HandlerError>;
}

type SyncFn = dyn Fn(Invocation) -> Result<HandlerOutput, HandlerError> + Send + Sync;

struct FnHandler {
    f: Box<SyncFn>,
}

#[async_trait]
impl Handler for FnHandler {
    async fn invoke(&self, invocation: Invocation) -> Result<HandlerOutput, HandlerError> {
        (self.f)(invocation)
    }
}

type HandlerFuture = Pin<Box<dyn Future<Output = Result<HandlerOutput, HandlerError>> + Send>>;

struct AsyncFnHandler {
    f: Box<dyn Fn(Invocation) -> HandlerFuture + Send + Sync>,
}

#[async_trait]
impl Handler for AsyncFnHandler {
    async fn invoke(&self, invocation: Invocation) -> Result<HandlerOutput, HandlerError> {
        (self.f)(invocation).await
    }
}

/// Wrap a synchronous function as a handler.
pub fn from_fn<F, O>(f: F) -> Arc<dyn Handler>
where
    F: Fn(Invocation) -> Result<O, HandlerError> + Send + Sync + 'static,
    O: Into<HandlerOutput>,
{
    Arc::new(FnHandler {
        f: Box::new(move |invocation| f(invocation).map(Into::into)),
    })
}

/// Wrap an asynchronous function as a handler.
pub fn from_async<F, Fut, O>(f: F) -> Arc<dyn Handler>
where
    F: Fn(Invocation) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<O, HandlerError>> + Send + 'static,
    O: Into<HandlerOutput>,
{
    Arc::new(AsyncFnHandler {
        f: Box::new(move |invocation| {
            let fut = f(invocation);
            Box::pin(async move { fut.await.map(Into::into) })
        }),
    })
}

/// Handler execution error.
///
/// Carries an HTTP status code (500 unless the handler says otherwise); the
/// message is serialized into the response body.
#[derive(Debug, Clone)]
pub struct HandlerError {
    pub message: String,
    pub status: u16,
}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: 500,
        }
    }

    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for HandlerError {}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::with_status(400, err.to_string())
    }
}

impl From<std::io::Error> for HandlerError {
    fn from(err: std::io::Error) -> Self {
        HandlerError::new(err.to_string())
    }
}
