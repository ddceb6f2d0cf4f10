//! Session-only API credential

use std::fmt;

/// OpenAI API key entered for the current session.
///
/// Never persisted. `Debug` and `Display` are redacted so the key cannot
/// leak through a log line.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key; blank input yields `None`
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The secret itself, for handing to the HTTP client only
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_key_rejected() {
        assert!(ApiKey::new("").is_none());
        assert!(ApiKey::new("   ").is_none());
    }

    #[test]
    fn test_key_trimmed() {
        let key = ApiKey::new("  sk-test \n").unwrap();
        assert_eq!(key.expose(), "sk-test");
    }

    #[test]
    fn test_key_redacted() {
        let key = ApiKey::new("sk-secret").unwrap();
        assert!(!format!("{key:?}").contains("sk-secret"));
        assert!(!format!("{key}").contains("sk-secret"));
    }
}
