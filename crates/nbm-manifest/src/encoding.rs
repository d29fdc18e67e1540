/// Textual encoding for multi-value descriptor entries such as
/// `OpenIDE-Module-Requires`. Items are joined in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEncoding {
    separator: String,
}

impl ListEncoding {
    pub const DEFAULT_SEPARATOR: &'static str = ", ";

    pub fn with_separator(separator: impl Into<String>) -> Self {
        ListEncoding {
            separator: separator.into(),
        }
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Join items, `None` when there is nothing to write
    pub fn join<S: AsRef<str>>(&self, items: &[S]) -> Option<String> {
        if items.is_empty() {
            return None;
        }
        let parts: Vec<&str> = items.iter().map(AsRef::as_ref).collect();
        Some(parts.join(&self.separator))
    }
}

impl Default for ListEncoding {
    fn default() -> Self {
        Self::with_separator(Self::DEFAULT_SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_join() {
        let encoding = ListEncoding::default();
        assert_eq!(
            encoding.join(&["org.openide.modules.os.Unix", "cap.a"]),
            Some("org.openide.modules.os.Unix, cap.a".to_string())
        );
    }

    #[test]
    fn test_empty_join_is_none() {
        let empty: [&str; 0] = [];
        assert_eq!(ListEncoding::default().join(&empty), None);
    }

    #[test]
    fn test_custom_separator() {
        let encoding = ListEncoding::with_separator(",");
        assert_eq!(encoding.join(&["a", "b"]), Some("a,b".to_string()));
    }
}
