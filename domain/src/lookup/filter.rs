//! Filter fields extracted from a domain query

use serde::{Deserialize, Serialize};

/// Structured filter derived from a flight query.
///
/// Every field is optional. An absent `max_price` never filters; it is
/// distinct from `Some(0.0)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
}

impl ExtractedFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn with_max_price(mut self, max_price: f64) -> Self {
        self.max_price = Some(max_price);
        self
    }

    /// True when no field is set (the store returns everything).
    pub fn is_unfiltered(&self) -> bool {
        self.origin.is_none() && self.destination.is_none() && self.max_price.is_none()
    }

    /// True when only a destination is known, so the lookup is symmetric.
    pub fn is_single_city(&self) -> bool {
        self.origin.is_none() && self.destination.is_some()
    }
}

impl std::fmt::Display for ExtractedFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "origin={} destination={} max_price={}",
            self.origin.as_deref().unwrap_or("-"),
            self.destination.as_deref().unwrap_or("-"),
            self.max_price
                .map(|p| format!("{:.2}", p))
                .unwrap_or_else(|| "-".to_string())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unfiltered() {
        let filter = ExtractedFilter::default();
        assert!(filter.is_unfiltered());
        assert!(!filter.is_single_city());
    }

    #[test]
    fn test_zero_price_is_a_filter() {
        let filter = ExtractedFilter::new().with_max_price(0.0);
        assert!(!filter.is_unfiltered());
        assert_eq!(filter.max_price, Some(0.0));
    }

    #[test]
    fn test_single_city() {
        let filter = ExtractedFilter::new().with_destination("London");
        assert!(filter.is_single_city());

        let filter = filter.with_origin("Madrid");
        assert!(!filter.is_single_city());
    }

    #[test]
    fn test_display() {
        let filter = ExtractedFilter::new()
            .with_origin("Madrid")
            .with_max_price(200.0);
        assert_eq!(
            filter.to_string(),
            "origin=Madrid destination=- max_price=200.00"
        );
    }
}
