//! Entity extraction for flight queries
//!
//! [`EntityExtractor`] answers two questions about raw query text:
//!
//! - [`classify`](EntityExtractor::classify): is this a flight lookup at all?
//! - [`extract`](EntityExtractor::extract): which origin, destination and
//!   price ceiling does it mention?
//!
//! Both are pure and deterministic. All patterns are compiled once from
//! [`ExtractionRules`] at construction.
//!
//! # Matching
//!
//! | Field | Pattern | Example |
//! |-------|---------|---------|
//! | origin | origin marker + city | `from madrid`, `desde sevilla` |
//! | destination | destination marker + city | `to london`, `a londres`, `hacia roma` |
//! | destination (fallback) | first city anywhere that is not the origin | `vuelos londres?` |
//! | max price | first price marker in rule order + number | `under $500`, `menos de 300` |
//!
//! Cities are matched on word boundaries. When several cities could match at
//! the same position, the longest surface form wins.
//!
//! The single-city fallback is intentionally permissive: a city mentioned as
//! context (not as a destination) is still taken as the destination. The
//! record lookup for a destination-only filter is symmetric, so such queries
//! still find the flights touching that city.

use super::filter::ExtractedFilter;
use super::rules::{ExtractionRules, normalize_surface};
use crate::core::error::DomainError;
use regex::Regex;

/// Compiled query analyzer.
#[derive(Debug, Clone)]
pub struct EntityExtractor {
    rules: ExtractionRules,
    origin_pattern: Regex,
    destination_pattern: Regex,
    city_pattern: Regex,
    price_patterns: Vec<Regex>,
}

impl EntityExtractor {
    /// Compile an extractor from rule tables.
    pub fn new(rules: ExtractionRules) -> Result<Self, DomainError> {
        let cities = city_alternation(&rules);
        let origin_pattern = compile(&format!(
            r"\b(?:{})\s+({})\b",
            marker_alternation(rules.origin_markers()),
            cities
        ))?;
        let destination_pattern = compile(&format!(
            r"\b(?:{})\s+({})\b",
            marker_alternation(rules.destination_markers()),
            cities
        ))?;
        let city_pattern = compile(&format!(r"\b({})\b", cities))?;
        let price_patterns = rules
            .price_markers()
            .iter()
            .map(|marker| {
                compile(&format!(
                    r"\b{}\s*[$€]?\s*{}",
                    phrase_pattern(marker),
                    AMOUNT_PATTERN
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            rules,
            origin_pattern,
            destination_pattern,
            city_pattern,
            price_patterns,
        })
    }

    /// Extractor over the built-in English/Spanish tables.
    pub fn with_default_rules() -> Self {
        Self::new(ExtractionRules::default()).expect("built-in extraction rules must compile")
    }

    /// True iff the lowercased text contains any domain keyword.
    pub fn classify(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.rules.keywords().iter().any(|k| lower.contains(k.as_str()))
    }

    /// Extract filter fields. Total: absent fields are valid results.
    pub fn extract(&self, text: &str) -> ExtractedFilter {
        let lower = text.to_lowercase();

        let origin = self.first_capture(&self.origin_pattern, &lower);
        let destination = self
            .first_capture(&self.destination_pattern, &lower)
            .or_else(|| self.first_city_other_than(&lower, origin.as_deref()));

        ExtractedFilter {
            origin,
            destination,
            max_price: self.max_price(&lower),
        }
    }

    fn first_capture(&self, pattern: &Regex, lower: &str) -> Option<String> {
        pattern
            .captures(lower)
            .and_then(|caps| caps.get(1))
            .and_then(|m| self.rules.canonical(m.as_str()))
            .map(str::to_string)
    }

    fn first_city_other_than(&self, lower: &str, origin: Option<&str>) -> Option<String> {
        self.city_pattern
            .find_iter(lower)
            .filter_map(|m| self.rules.canonical(m.as_str()))
            .find(|canonical| Some(*canonical) != origin)
            .map(str::to_string)
    }

    fn max_price(&self, lower: &str) -> Option<f64> {
        self.price_patterns.iter().find_map(|pattern| {
            let caps = pattern.captures(lower)?;
            parse_amount(caps.get(1)?.as_str(), caps.get(2).map(|m| m.as_str()))
        })
    }
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

/// Integer part, either digit-grouped (`1,200`, `1.500`) or plain, then an
/// optional fraction after `.` or `,`.
const AMOUNT_PATTERN: &str = r"((?:\d{1,3}(?:[.,]\d{3})+\b)|\d+)(?:[.,](\d+))?";

fn parse_amount(integer: &str, fraction: Option<&str>) -> Option<f64> {
    let digits: String = integer.chars().filter(char::is_ascii_digit).collect();
    match fraction {
        Some(fraction) => format!("{digits}.{fraction}").parse().ok(),
        None => digits.parse().ok(),
    }
}

fn compile(pattern: &str) -> Result<Regex, DomainError> {
    Regex::new(pattern).map_err(|e| DomainError::InvalidRule(e.to_string()))
}

/// Escape a phrase and let any run of whitespace separate its words.
fn phrase_pattern(phrase: &str) -> String {
    normalize_surface(phrase)
        .split(' ')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+")
}

fn marker_alternation(markers: &[String]) -> String {
    markers
        .iter()
        .map(|m| phrase_pattern(m))
        .collect::<Vec<_>>()
        .join("|")
}

/// Longest surface first so `los angeles` beats any shorter prefix at the same position.
fn city_alternation(rules: &ExtractionRules) -> String {
    let mut surfaces: Vec<&String> = rules.synonyms().keys().collect();
    surfaces.sort_by(|a, b| {
        b.chars()
            .count()
            .cmp(&a.chars().count())
            .then_with(|| a.cmp(b))
    });
    surfaces
        .into_iter()
        .map(|s| phrase_pattern(s))
        .collect::<Vec<_>>()
        .join("|")
}
