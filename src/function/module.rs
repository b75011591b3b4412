//! Handler modules: named sets of exported handlers.

use crate::function::handler::Handler;
use std::sync::Arc;

/// A named set of exported `(route, handler)` pairs.
///
/// A module is the unit the registry loads and merges: the static analog of
/// a single source file's exported bindings. The module name is matched
/// against file stems when loading from a source path.
#[derive(Clone)]
pub struct HandlerModule {
    name: String,
    exports: Vec<(String, Arc<dyn Handler>)>,
}

impl HandlerModule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exports: Vec::new(),
        }
    }

    /// Export a handler under a route name. Export order is preserved.
    pub fn export(mut self, route: impl Into<String>, handler: Arc<dyn Handler>) -> Self {
        self.exports.push((route.into(), handler));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn exports(&self) -> &[(String, Arc<dyn Handler>)] {
        &self.exports
    }
}

impl std::fmt::Debug for HandlerModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerModule")
            .field("name", &self.name)
            .field(
                "exports",
                &self.exports.iter().map(|(route, _)| route).collect::<Vec<_>>(),
            )
            .finish()
    }
}
