//! Language tag detected from the query text

use serde::{Deserialize, Serialize};

/// Whole words whose presence marks a query as Spanish.
///
/// Words that are also common English (`inferior`) are left out.
const SPANISH_INDICATORS: &[&str] = &[
    "hola", "como", "cómo", "estas", "estás", "que", "qué", "hay", "vuelos", "vuelo", "desde",
    "hacia", "menos", "bajo", "cuanto", "cuánto", "cuesta", "precio", "costo", "duracion",
    "duración", "tiempo",
];

/// Language used for prompt construction
///
/// Derived once per run and threaded through every prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Spanish,
}

impl Language {
    /// Detect the language of a query.
    ///
    /// Any Spanish indicator word selects Spanish; everything else is English.
    pub fn detect(text: &str) -> Self {
        let lower = text.to_lowercase();
        let mut words = lower.split(|c: char| !c.is_alphanumeric());
        if words.any(|w| SPANISH_INDICATORS.contains(&w)) {
            Language::Spanish
        } else {
            Language::English
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Spanish => "spanish",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
