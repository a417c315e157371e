//! Query value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A user query to be answered by one orchestration run (Value Object)
///
/// Holds the raw text exactly as received. Never mutated after creation;
/// the run's cancellation handle lives beside it in the application layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    text: String,
}

impl Query {
    /// Create a new query
    ///
    /// # Panics
    /// Panics if the text is empty or only whitespace
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        assert!(!text.trim().is_empty(), "Query cannot be empty");
        Self { text }
    }

    /// Try to create a new query, returning None if invalid
    pub fn try_new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            None
        } else {
            Some(Self { text })
        }
    }

    /// Get the raw query text
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl TryFrom<String> for Query {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Query::try_new(s).ok_or_else(|| DomainError::InvalidQuery("query cannot be empty".into()))
    }
}

impl TryFrom<&str> for Query {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Query::try_from(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_creation() {
        let q = Query::new("hay vuelos a londres?");
        assert_eq!(q.text(), "hay vuelos a londres?");
    }

    #[test]
    fn test_query_try_from_str() {
        let q = Query::try_from("Explain quantum teleportation").unwrap();
        assert_eq!(q.text(), "Explain quantum teleportation");
    }

    #[test]
    fn test_try_from_blank_is_error_not_panic() {
        let err = Query::try_from("   ").unwrap_err();
        assert!(matches!(err, DomainError::InvalidQuery(_)));
        assert!(Query::try_from(String::new()).is_err());
    }

    #[test]
    #[should_panic]
    fn test_empty_query_panics() {
        Query::new("");
    }

    #[test]
    fn test_try_new_empty() {
        assert!(Query::try_new("").is_none());
        assert!(Query::try_new("   ").is_none());
    }
}
