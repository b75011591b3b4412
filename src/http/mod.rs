//! HTTP-facing types: invocation records, payload normalization, and
//! response serialization.

pub mod invocation;
pub mod payload;
pub mod response;

pub use invocation::{Invocation, InvocationKind, Method, RawRequest};
pub use payload::{Payload, PayloadError, PayloadMode};
pub use response::{HeaderPolicy, ResponseDescriptor, WireResponse};
