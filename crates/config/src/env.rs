//! Environment mappings.
//!
//! The loader never reads the process environment on its own. Callers hand it
//! an [`EnvSource`], usually an [`EnvMap`] snapshot taken once at startup.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::path::Path;

use crate::error::EnvFileError;

/// Read-only lookup of environment values by key.
pub trait EnvSource {
    /// Get the raw value for `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> Option<&str>;
}

impl<S: BuildHasher> EnvSource for HashMap<String, String, S> {
    fn get(&self, key: &str) -> Option<&str> {
        HashMap::get(self, key).map(String::as_str)
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<&str> {
        BTreeMap::get(self, key).map(String::as_str)
    }
}

/// An owned snapshot of environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvMap {
    vars: BTreeMap<String, String>,
}

impl EnvMap {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current process environment.
    ///
    /// Values that are not valid UTF-8 are converted lossily so the key still
    /// counts as present and fails validation as malformed instead of missing.
    pub fn from_process() -> Self {
        std::env::vars_os()
            .map(|(key, value)| {
                let key = key.to_string_lossy().into_owned();
                let value = value
                    .into_string()
                    .unwrap_or_else(|raw| raw.to_string_lossy().into_owned());
                (key, value)
            })
            .collect()
    }

    /// Read a dotenv-formatted file into a mapping.
    pub fn from_env_file<P: AsRef<Path>>(path: P) -> Result<Self, EnvFileError> {
        let path = path.as_ref();
        let to_error = |source: dotenvy::Error| EnvFileError {
            path: path.display().to_string(),
            source,
        };

        let mut vars = BTreeMap::new();
        for item in dotenvy::from_path_iter(path).map_err(to_error)? {
            let (key, value) = item.map_err(to_error)?;
            vars.insert(key, value);
        }
        Ok(Self { vars })
    }

    /// Insert or replace a single value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Remove a key, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.vars.remove(key)
    }

    /// Overlay `other` on top of this mapping; keys in `other` win.
    pub fn overlay(&mut self, other: EnvMap) {
        self.vars.extend(other.vars);
    }

    /// Iterate over key/value pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl EnvSource for EnvMap {
    fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
