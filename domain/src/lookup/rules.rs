//! Extraction rule tables
//!
//! [`ExtractionRules`] is the immutable configuration the
//! [`EntityExtractor`](super::extractor::EntityExtractor) is built from:
//! domain keywords, the city synonym table, and the ordered marker lists for
//! origin, destination and price patterns. Built-in defaults cover English
//! and Spanish; callers may extend the synonym table before construction.

use std::collections::BTreeMap;

/// Keywords that mark a query as a flight lookup.
const DEFAULT_KEYWORDS: &[&str] = &["flight", "flights", "vuelo", "vuelos"];

/// Surface form (lowercase) → canonical city name as stored in records.
const DEFAULT_SYNONYMS: &[(&str, &str)] = &[
    ("madrid", "Madrid"),
    ("paris", "Paris"),
    ("parís", "Paris"),
    ("cdg", "Paris"),
    ("barcelona", "Barcelona"),
    ("london", "London"),
    ("londres", "London"),
    ("lhr", "London"),
    ("new york", "New York"),
    ("nueva york", "New York"),
    ("nyc", "New York"),
    ("jfk", "New York"),
    ("rome", "Rome"),
    ("roma", "Rome"),
    ("los angeles", "Los Angeles"),
    ("los ángeles", "Los Angeles"),
    ("lax", "Los Angeles"),
    ("berlin", "Berlin"),
    ("berlín", "Berlin"),
    ("tokyo", "Tokyo"),
    ("tokio", "Tokyo"),
    ("seville", "Seville"),
    ("sevilla", "Seville"),
    ("valencia", "Valencia"),
];

const DEFAULT_ORIGIN_MARKERS: &[&str] = &["from", "desde"];

const DEFAULT_DESTINATION_MARKERS: &[&str] = &["to", "a", "hacia"];

/// Price ceiling markers, in match priority order.
const DEFAULT_PRICE_MARKERS: &[&str] = &[
    "under",
    "less than",
    "below",
    "menos de",
    "bajo",
    "inferior a",
];

/// Immutable rule tables for entity extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRules {
    keywords: Vec<String>,
    synonyms: BTreeMap<String, String>,
    origin_markers: Vec<String>,
    destination_markers: Vec<String>,
    price_markers: Vec<String>,
}

impl Default for ExtractionRules {
    fn default() -> Self {
        Self {
            keywords: to_owned(DEFAULT_KEYWORDS),
            synonyms: DEFAULT_SYNONYMS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            origin_markers: to_owned(DEFAULT_ORIGIN_MARKERS),
            destination_markers: to_owned(DEFAULT_DESTINATION_MARKERS),
            price_markers: to_owned(DEFAULT_PRICE_MARKERS),
        }
    }
}

impl ExtractionRules {
    /// Add or replace a synonym. The surface form is matched case-insensitively.
    pub fn with_synonym(mut self, surface: impl AsRef<str>, canonical: impl Into<String>) -> Self {
        let surface = normalize_surface(surface.as_ref());
        if !surface.is_empty() {
            self.synonyms.insert(surface, canonical.into());
        }
        self
    }

    /// Extend the synonym table from `(surface, canonical)` pairs.
    pub fn with_synonyms<I, K, V>(self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .fold(self, |rules, (k, v)| rules.with_synonym(k, v))
    }

    /// Add a domain keyword.
    pub fn with_keyword(mut self, keyword: impl AsRef<str>) -> Self {
        let keyword = keyword.as_ref().trim().to_lowercase();
        if !keyword.is_empty() && !self.keywords.contains(&keyword) {
            self.keywords.push(keyword);
        }
        self
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn synonyms(&self) -> &BTreeMap<String, String> {
        &self.synonyms
    }

    pub fn origin_markers(&self) -> &[String] {
        &self.origin_markers
    }

    pub fn destination_markers(&self) -> &[String] {
        &self.destination_markers
    }

    pub fn price_markers(&self) -> &[String] {
        &self.price_markers
    }

    /// Look up the canonical name for a matched surface form.
    pub fn canonical(&self, surface: &str) -> Option<&str> {
        self.synonyms
            .get(&normalize_surface(surface))
            .map(String::as_str)
    }
}

/// Lowercase and collapse inner whitespace.
pub(crate) fn normalize_surface(surface: &str) -> String {
    surface
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
