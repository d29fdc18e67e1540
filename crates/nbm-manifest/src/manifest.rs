//! The assembled descriptor

use crate::keys;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Final set of descriptor entries. Keys are unique and a later `put`
/// overwrites an earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NbmManifest {
    entries: BTreeMap<String, String>,
}

impl NbmManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Entries in output order: reserved keys first in their canonical
    /// order, then every other key sorted by name.
    pub fn ordered_entries(&self) -> Vec<(&str, &str)> {
        let reserved = keys::RESERVED
            .iter()
            .filter_map(|key| self.get(key).map(|value| (*key, value)));
        let custom = self.iter().filter(|(key, _)| !keys::is_reserved(key));
        reserved.chain(custom).collect()
    }

    pub fn to_map(&self) -> HashMap<String, String> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Serialize this manifest to a JSON object string
    pub fn to_json_string(&self) -> String {
        serde_json::to_string_pretty(&self).unwrap_or_else(|_| "{}".to_string())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for NbmManifest {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut manifest = NbmManifest::new();
        for (key, value) in iter {
            manifest.put(key, value);
        }
        manifest
    }
}
