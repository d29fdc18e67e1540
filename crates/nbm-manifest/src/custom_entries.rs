//! User-supplied entries copied verbatim into the final descriptor

use crate::encoding::ListEncoding;
use crate::errors::DescriptorError;
use serde_json::Value;
use std::collections::BTreeMap;

/// Free-form entries with last-write-wins semantics per key. Values keep
/// their original type until the descriptor is assembled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomManifestEntries {
    entries: BTreeMap<String, Value>,
}

impl CustomManifestEntries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Merge many entries at once; existing keys are overwritten
    pub fn entries<I, K, V>(&mut self, new_entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (key, value) in new_entries {
            self.entry(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// String form of a custom value as written into the descriptor
pub(crate) fn stringify(
    key: &str,
    value: &Value,
    encoding: &ListEncoding,
) -> Result<String, DescriptorError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Err(DescriptorError::invalid_argument(key)),
        Value::Array(items) => {
            let parts = items
                .iter()
                .map(|item| stringify(key, item, encoding))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(encoding.join(&parts).unwrap_or_default())
        }
        Value::Object(_) => Ok(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_last_write_wins() {
        let mut custom = CustomManifestEntries::new();
        custom.entry("X-Vendor", "first");
        custom.entry("X-Vendor", "second");
        custom.entries([("X-Vendor", "third"), ("X-Other", "value")]);

        assert_eq!(custom.len(), 2);
        assert_eq!(custom.get("X-Vendor"), Some(&json!("third")));
    }

    #[test]
    fn test_stringify_scalars() {
        let encoding = ListEncoding::default();
        assert_eq!(stringify("k", &json!("text"), &encoding).ok(), Some("text".to_string()));
        assert_eq!(stringify("k", &json!(42), &encoding).ok(), Some("42".to_string()));
        assert_eq!(stringify("k", &json!(false), &encoding).ok(), Some("false".to_string()));
    }

    #[test]
    fn test_stringify_array_uses_encoding() {
        let encoding = ListEncoding::default();
        let value = json!(["a", 1, true]);
        assert_eq!(
            stringify("k", &value, &encoding).ok(),
            Some("a, 1, true".to_string())
        );
    }

    #[test]
    fn test_stringify_null_is_rejected() {
        let err = stringify("X-Empty", &Value::Null, &ListEncoding::default()).err();
        assert!(matches!(
            err,
            Some(DescriptorError::InvalidArgument { ref argument }) if argument == "X-Empty"
        ));
    }
}
