//! Provider adapters: thin shims binding specific hosting environments to
//! the invocation router contract. Adapters only obtain the raw request and
//! flush the raw response; routing, payload parsing, and response
//! serialization live in the shared router.

pub mod cloud;

pub use cloud::{CloudFunctionAdapter, HostRequest, HostResponse};
