//! Per-command options and target resolution.
//!
//! Resolution is pure and runs before any file is read or connection made,
//! so flag errors always win over I/O errors.

use std::path::PathBuf;

use crate::domain::error::ConfigError;
use crate::domain::spec::{DEFAULT_MICROVM_NAME, DEFAULT_MICROVM_NAMESPACE};

/// Options for `create`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOptions {
    pub name: String,
    pub namespace: String,
    /// A full JSON spec; when set, name/namespace/key are ignored.
    pub file: Option<PathBuf>,
    /// Public key placed in the root user's authorized keys.
    pub public_key_path: Option<PathBuf>,
}

impl Default for CreateOptions {
    fn default() -> Self {
        Self {
            name: DEFAULT_MICROVM_NAME.to_string(),
            namespace: DEFAULT_MICROVM_NAMESPACE.to_string(),
            file: None,
            public_key_path: None,
        }
    }
}

/// Options for `get`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetOptions {
    pub id: Option<String>,
    pub file: Option<PathBuf>,
}

/// Options for `delete`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteOptions {
    pub id: Option<String>,
    pub file: Option<PathBuf>,
    pub name: Option<String>,
    pub namespace: Option<String>,
    pub all: bool,
}

/// Name and namespace filter for `list` and bulk delete.
///
/// `namespace` is sent as given, including the empty string. An empty name
/// means no name filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub name: Option<String>,
    pub namespace: String,
}

impl ListFilter {
    #[must_use]
    pub fn new(name: Option<String>, namespace: Option<String>) -> Self {
        Self {
            name: non_empty(name),
            namespace: namespace.unwrap_or_default(),
        }
    }
}

/// A single microvm, addressed directly or through a spec file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Uid(String),
    SpecFile(PathBuf),
}

/// What a `delete` invocation removes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    Single(Target),
    Bulk(ListFilter),
}

impl GetOptions {
    /// The file wins over the id when both are given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingTarget`] when neither is given.
    pub fn resolve(&self) -> Result<Target, ConfigError> {
        single_target(self.id.as_deref(), self.file.as_ref())
    }
}

impl DeleteOptions {
    /// Decide between a single and a bulk delete.
    ///
    /// # Errors
    ///
    /// Returns an error when a name/namespace filter is given without
    /// `--all`, when `--all` is mixed with `--id`/`--file`, when a bulk name
    /// filter lacks a namespace, or when no target is given.
    pub fn resolve(&self) -> Result<DeleteTarget, ConfigError> {
        let name = non_empty(self.name.clone());
        let namespace = non_empty(self.namespace.clone());
        let has_single = non_empty(self.id.clone()).is_some() || self.file.is_some();

        if self.all {
            if has_single {
                return Err(ConfigError::ConflictingTargets);
            }
            if name.is_some() && namespace.is_none() {
                return Err(ConfigError::NameWithoutNamespace);
            }
            return Ok(DeleteTarget::Bulk(ListFilter::new(name, namespace)));
        }

        if name.is_some() || namespace.is_some() {
            return Err(ConfigError::FilterWithoutAll);
        }

        single_target(self.id.as_deref(), self.file.as_ref()).map(DeleteTarget::Single)
    }
}

fn single_target(id: Option<&str>, file: Option<&PathBuf>) -> Result<Target, ConfigError> {
    if let Some(file) = file {
        return Ok(Target::SpecFile(file.clone()));
    }
    match id {
        Some(id) if !id.is_empty() => Ok(Target::Uid(id.to_string())),
        _ => Err(ConfigError::MissingTarget),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
