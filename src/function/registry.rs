//! The function registry: an immutable route-name to handler mapping.

use crate::function::handler::Handler;
use crate::function::module::HandlerModule;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Registry load failure. Fatal at startup; no partial registry is ever
/// produced.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("source path {path:?} does not exist")]
    SourceMissing { path: PathBuf },
    #[error("no loadable module for entry '{name}'")]
    Unresolved { name: String },
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Immutable mapping from route name to handler, built once at startup.
///
/// Handler code is compiled into the binary as [`HandlerModule`]s; a source
/// path selects which modules are live. A file path loads the single module
/// matching its stem; a directory loads every immediate code entry (no
/// recursion), skipping subdirectories, non-`.rs` entries, and the gateway's
/// own `funcgate*` implementation files. Entries merge in sorted name order,
/// later files overwriting earlier ones on route collision.
pub struct FunctionRegistry {
    functions: HashMap<String, Arc<dyn Handler>>,
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.functions.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl FunctionRegistry {
    /// Build a registry directly from modules, in order.
    pub fn from_modules<I>(modules: I) -> Self
    where
        I: IntoIterator<Item = HandlerModule>,
    {
        let mut functions = HashMap::new();
        for module in modules {
            merge(&mut functions, &module);
        }
        Self { functions }
    }

    /// Resolve a source path against the available modules and build the
    /// registry from the selected set.
    pub fn load(
        source: impl AsRef<Path>,
        available: &[HandlerModule],
    ) -> Result<Self, LoadError> {
        let source = source.as_ref();
        let metadata = fs::metadata(source).map_err(|_| LoadError::SourceMissing {
            path: source.to_path_buf(),
        })?;

        let mut functions = HashMap::new();
        if metadata.is_dir() {
            for stem in code_entries(source)? {
                merge(&mut functions, resolve(available, &stem)?);
            }
        } else {
            let stem = source
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            merge(&mut functions, resolve(available, &stem)?);
        }

        info!(
            "loaded {} route(s) from {}",
            functions.len(),
            source.display()
        );
        Ok(Self { functions })
    }

    /// Look up the handler for a route name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Handler>> {
        self.functions.get(name)
    }

    /// Registered route names, sorted.
    pub fn routes(&self) -> Vec<&str> {
        let mut routes: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        routes.sort_unstable();
        routes
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

/// Immediate loadable entries of a directory, as sorted file stems.
fn code_entries(dir: &Path) -> Result<Vec<String>, LoadError> {
    let read = fs::read_dir(dir).map_err(|source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut stems = Vec::new();
    for entry in read {
        let entry = entry.map_err(|source| LoadError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        if entry.path().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let Some(stem) = name.strip_suffix(".rs") else {
            continue;
        };
        // A flat project keeps the gateway's own files next to the handlers.
        if stem.starts_with("funcgate") {
            continue;
        }
        stems.push(stem.to_string());
    }
    stems.sort_unstable();
    Ok(stems)
}

fn resolve<'a>(available: &'a [HandlerModule], stem: &str) -> Result<&'a HandlerModule, LoadError> {
    available
        .iter()
        .find(|module| module.name() == stem)
        .ok_or_else(|| LoadError::Unresolved {
            name: stem.to_string(),
        })
}

fn merge(functions: &mut HashMap<String, Arc<dyn Handler>>, module: &HandlerModule) {
    for (route, handler) in module.exports() {
        if functions.insert(route.clone(), handler.clone()).is_some() {
            // Last-write-wins by contract; surfaced so collisions are at
            // least observable.
            warn!("route '{}' overwritten by module '{}'", route, module.name());
        }
    }
}
