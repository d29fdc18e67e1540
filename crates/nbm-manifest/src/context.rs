//! Project context handed over by the build host
//!
//! The descriptor model never holds a reference to the host. Everything it
//! needs (project name, version, where relative paths live) arrives through
//! [`ProjectContext`] at call time, and path resolution is expressed as the
//! [`FileResolver`] capability.

use crate::errors::ResolveError;
use chrono::{DateTime, Utc};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Resolves a user-supplied path reference into an absolute path
pub trait FileResolver {
    fn resolve(&self, reference: &Path) -> Result<PathBuf, ResolveError>;
}

impl<F> FileResolver for F
where
    F: Fn(&Path) -> Result<PathBuf, ResolveError>,
{
    fn resolve(&self, reference: &Path) -> Result<PathBuf, ResolveError> {
        self(reference)
    }
}

/// Snapshot of the host project a module is being packaged for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    pub name: String,
    pub version: Option<String>,
    pub project_dir: PathBuf,
    pub build_timestamp: Option<DateTime<Utc>>,
}

impl ProjectContext {
    pub fn new(name: impl Into<String>, project_dir: impl Into<PathBuf>) -> Self {
        ProjectContext {
            name: name.into(),
            version: None,
            project_dir: project_dir.into(),
            build_timestamp: None,
        }
    }

    /// Set the project version from anything with a string form
    pub fn with_version(mut self, version: impl fmt::Display) -> Self {
        self.version = Some(version.to_string());
        self
    }

    pub fn with_build_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.build_timestamp = Some(timestamp);
        self
    }

    /// String form of the project version, empty when the host has none
    pub fn version_string(&self) -> String {
        self.version.clone().unwrap_or_default()
    }
}

impl FileResolver for ProjectContext {
    /// Absolute references are kept, relative ones are joined onto the
    /// project directory. `.` and `..` are folded lexically; the file does
    /// not have to exist.
    fn resolve(&self, reference: &Path) -> Result<PathBuf, ResolveError> {
        if reference.as_os_str().is_empty() {
            return Err(ResolveError {
                reference: String::new(),
                reason: "empty path".to_string(),
            });
        }

        let joined = if reference.is_absolute() {
            reference.to_path_buf()
        } else {
            let base = if self.project_dir.is_absolute() {
                self.project_dir.clone()
            } else {
                std::env::current_dir()
                    .map_err(|e| ResolveError {
                        reference: reference.display().to_string(),
                        reason: format!("cannot determine working directory: {}", e),
                    })?
                    .join(&self.project_dir)
            };
            base.join(reference)
        };

        Ok(normalize(&joined))
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
