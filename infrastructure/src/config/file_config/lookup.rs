//! Lookup configuration from TOML (`[lookup]` section)
//!
//! Extends the built-in extraction rules; it never removes them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tandem_domain::ExtractionRules;

/// Raw lookup configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLookupConfig {
    /// Extra domain keywords
    pub keywords: Vec<String>,
    /// Extra `surface = "Canonical"` synonyms
    pub synonyms: BTreeMap<String, String>,
}

impl FileLookupConfig {
    pub fn to_rules(&self) -> ExtractionRules {
        let rules = self
            .keywords
            .iter()
            .fold(ExtractionRules::default(), |rules, k| rules.with_keyword(k));
        rules.with_synonyms(self.synonyms.iter().map(|(k, v)| (k, v.clone())))
    }
}
