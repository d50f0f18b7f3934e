use serde::{Deserialize, Serialize};
use std::fmt;

/// Namespace-qualified name, split once at ingestion.
///
/// A raw name is namespaced only when it contains exactly two non-empty
/// `:`-separated segments (`parametric:width`). Anything else (`width`,
/// `a:b:c`, `:x`) is treated as a plain name whose local part is the raw
/// text, and is invisible to declaration and substitution scanning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QName {
    pub prefix: Option<String>,
    pub local: String,
}

impl QName {
    pub fn parse(raw: &str) -> Self {
        let mut segments = raw.split(':');
        match (segments.next(), segments.next(), segments.next()) {
            (Some(prefix), Some(local), None) if !prefix.is_empty() && !local.is_empty() => Self {
                prefix: Some(prefix.to_string()),
                local: local.to_string(),
            },
            _ => Self {
                prefix: None,
                local: raw.to_string(),
            },
        }
    }

    pub fn plain(local: impl Into<String>) -> Self {
        Self {
            prefix: None,
            local: local.into(),
        }
    }

    /// True when this name carries the given namespace prefix.
    pub fn in_namespace(&self, namespace: &str) -> bool {
        self.prefix.as_deref() == Some(namespace)
    }

    pub fn is_plain(&self) -> bool {
        self.prefix.is_none()
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.prefix {
            Some(prefix) => write!(f, "{}:{}", prefix, self.local),
            None => f.write_str(&self.local),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_name() {
        let name = QName::parse("width");
        assert_eq!(name.prefix, None);
        assert_eq!(name.local, "width");
        assert!(name.is_plain());
    }

    #[test]
    fn test_parse_namespaced_name() {
        let name = QName::parse("parametric:width");
        assert_eq!(name.prefix.as_deref(), Some("parametric"));
        assert_eq!(name.local, "width");
        assert!(name.in_namespace("parametric"));
        assert!(!name.in_namespace("svg"));
    }

    #[test]
    fn test_three_segments_are_not_namespaced() {
        let name = QName::parse("a:b:c");
        assert_eq!(name.prefix, None);
        assert_eq!(name.local, "a:b:c");
    }

    #[test]
    fn test_empty_segments_are_not_namespaced() {
        assert!(QName::parse(":width").is_plain());
        assert!(QName::parse("parametric:").is_plain());
    }

    #[test]
    fn test_display_round_trip() {
        assert_eq!(QName::parse("parametric:width").to_string(), "parametric:width");
        assert_eq!(QName::parse("width").to_string(), "width");
        assert_eq!(QName::parse("a:b:c").to_string(), "a:b:c");
    }
}
