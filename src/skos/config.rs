//! Expansion configuration.
//!
//! ```
//! use skos_analysis::skos::config::{ExpansionConfig, ExpansionMode};
//! use skos_analysis::skos::concept::ExpansionKind;
//!
//! let config = ExpansionConfig::from_json(
//!     r#"{ "mode": "label", "expansionKinds": ["altLabel", "broader"], "windowSize": 3 }"#,
//! )
//! .unwrap();
//! assert_eq!(config.mode, ExpansionMode::Label);
//! assert_eq!(config.expansion_kinds, vec![ExpansionKind::AltLabel, ExpansionKind::Broader]);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SkosError};
use crate::skos::concept::{ExpansionKind, LabelKind};
use crate::skos::store::StoreConfig;

/// How a field's tokens are interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExpansionMode {
    /// Tokens are words; windows of them are matched against labels.
    #[default]
    #[serde(alias = "label-expansion")]
    Label,
    /// Each field value is a concept URI.
    #[serde(alias = "uri-expansion")]
    Uri,
}

/// Per-stream expansion options. Immutable once a filter is built from it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpansionConfig {
    #[serde(default)]
    pub mode: ExpansionMode,

    /// What to emit for a matched concept, in emission order.
    pub expansion_kinds: Vec<ExpansionKind>,

    /// Longest token window tried as one label.
    #[serde(default = "default_window_size")]
    pub window_size: usize,

    /// Language tags of retained labels; `None` keeps every language.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,

    /// Label kinds a window may match; defaults to all of them.
    #[serde(default = "default_match_label_kinds")]
    pub match_label_kinds: Vec<LabelKind>,
}

fn default_window_size() -> usize {
    1
}

fn default_match_label_kinds() -> Vec<LabelKind> {
    LabelKind::ALL.to_vec()
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        ExpansionConfig {
            mode: ExpansionMode::default(),
            expansion_kinds: vec![ExpansionKind::PrefLabel, ExpansionKind::AltLabel],
            window_size: default_window_size(),
            languages: None,
            match_label_kinds: default_match_label_kinds(),
        }
    }
}

impl ExpansionConfig {
    pub fn new(mode: ExpansionMode, expansion_kinds: Vec<ExpansionKind>) -> Self {
        ExpansionConfig {
            mode,
            expansion_kinds,
            ..Default::default()
        }
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = Some(languages.into_iter().map(Into::into).collect());
        self
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ExpansionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            SkosError::Io(std::io::Error::new(
                e.kind(),
                format!("cannot read configuration '{}': {e}", path.display()),
            ))
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(SkosError::invalid_config("windowSize must be at least 1"));
        }
        if self.expansion_kinds.is_empty() {
            return Err(SkosError::invalid_config(
                "expansionKinds must name at least one kind",
            ));
        }
        if self.match_label_kinds.is_empty() {
            return Err(SkosError::invalid_config(
                "matchLabelKinds must name at least one label kind",
            ));
        }
        if self.mode == ExpansionMode::Uri && self.window_size != 1 {
            return Err(SkosError::invalid_config(
                "windowSize is fixed at 1 in uri mode",
            ));
        }
        Ok(())
    }

    /// Store options derived from this configuration.
    pub fn store_config(&self) -> StoreConfig {
        match &self.languages {
            Some(languages) => StoreConfig::new().with_languages(languages.iter().cloned()),
            None => StoreConfig::new(),
        }
    }
}
