//! Localised labels for page chrome.
//!
//! Label tables are embedded YAML files keyed by label name, each holding a
//! `one` form and an optional `other` (plural) form.

use std::collections::HashMap;

use serde::Deserialize;

/// The language pages fall back to, served without a subdomain prefix.
pub const DEFAULT_LANGUAGE: &str = "en";

const EMBEDDED: &[(&str, &str)] = &[
    ("en", include_str!("../locales/core.en.yaml")),
    ("cy", include_str!("../locales/core.cy.yaml")),
];

#[derive(thiserror::Error, Debug)]
pub enum LocaleError {
    #[error("failed to parse '{0}' labels: {1}")]
    Parse(String, serde_yaml::Error),
}

#[derive(Debug, Clone, Deserialize)]
struct Label {
    one: String,
    other: Option<String>,
}

/// Per-language label lookup.
#[derive(Debug, Clone, Default)]
pub struct Localiser {
    languages: HashMap<String, HashMap<String, Label>>,
}

impl Localiser {
    /// Load the label tables compiled into the binary.
    pub fn embedded() -> Result<Self, LocaleError> {
        let mut localiser = Self::default();
        for (language, source) in EMBEDDED {
            localiser.add_language(language, source)?;
        }
        Ok(localiser)
    }

    /// Parse and register the labels for one language.
    pub fn add_language(&mut self, language: &str, source: &str) -> Result<(), LocaleError> {
        let labels: HashMap<String, Label> = serde_yaml::from_str(source)
            .map_err(|e| LocaleError::Parse(language.to_string(), e))?;
        self.languages.insert(language.to_string(), labels);
        Ok(())
    }

    /// Look up a label, falling back to the default language and then to the key.
    pub fn get(&self, language: &str, key: &str, count: usize) -> String {
        [language, DEFAULT_LANGUAGE]
            .iter()
            .filter_map(|lang| self.languages.get(*lang)?.get(key))
            .next()
            .map(|label| match (&label.other, count) {
                (Some(other), n) if n != 1 => other.clone(),
                _ => label.one.clone(),
            })
            .unwrap_or_else(|| key.to_string())
    }
}
