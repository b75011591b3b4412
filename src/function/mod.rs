//! Handler functions, modules, and the route registry.

pub mod handler;
pub mod module;
pub mod registry;

pub use handler::{from_async, from_fn, Handler, HandlerError, HandlerOutput};
pub use module::HandlerModule;
pub use registry::{FunctionRegistry, LoadError};
