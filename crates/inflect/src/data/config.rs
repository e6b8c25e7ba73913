//! Serializable inflection configuration.
//!
//! A configuration maps kind keys to their token tables:
//!
//! ```toml
//! [gender]
//! f = "female"
//! m = "male"
//! n = "neuter"
//! neutral = "@n"
//! default = "n"
//!
//! ["@tense"]
//! past = "past"
//! now = "present"
//! default = "now"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::interpreter::LoadError;

/// Token table of one kind key, or whatever else was found there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KindEntry {
    /// Token or alias name -> description or `@target`.
    Tokens(BTreeMap<String, Option<String>>),
    /// Anything that is not a table of strings. Rejected when building data.
    Invalid(serde_json::Value),
}

/// Kind key (`gender` or `@gender`) -> token table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InflectionConfig {
    pub kinds: BTreeMap<String, KindEntry>,
}

impl InflectionConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }

    pub fn from_json_str(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    /// Load a configuration file. Files ending in `.json` are parsed as
    /// JSON, everything else as TOML.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&content).map_err(|source| LoadError::Json {
                path: path.to_path_buf(),
                source,
            })
        } else {
            Self::from_toml_str(&content).map_err(|source| LoadError::Toml {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Set a token, alias, or default. Replaces a non-table entry.
    pub fn insert_token(&mut self, kind: &str, token: &str, value: Option<&str>) {
        let entry = self
            .kinds
            .entry(kind.to_string())
            .or_insert_with(|| KindEntry::Tokens(BTreeMap::new()));
        if let KindEntry::Invalid(_) = entry {
            *entry = KindEntry::Tokens(BTreeMap::new());
        }
        if let KindEntry::Tokens(tokens) = entry {
            tokens.insert(token.to_string(), value.map(ToString::to_string));
        }
    }

    /// Merge `other` into `self`. Tokens of kinds present in both are
    /// combined with `other` winning; any other entry is replaced.
    pub fn merge(&mut self, other: &InflectionConfig) {
        for (kind, incoming) in &other.kinds {
            match (self.kinds.get_mut(kind), incoming) {
                (Some(KindEntry::Tokens(tokens)), KindEntry::Tokens(new_tokens)) => {
                    tokens.extend(new_tokens.iter().map(|(k, v)| (k.clone(), v.clone())));
                }
                _ => {
                    self.kinds.insert(kind.clone(), incoming.clone());
                }
            }
        }
    }

    /// Remove a token from a kind. Returns whether it was present.
    pub fn remove_token(&mut self, kind: &str, token: &str) -> bool {
        match self.kinds.get_mut(kind) {
            Some(KindEntry::Tokens(tokens)) => tokens.remove(token).is_some(),
            _ => false,
        }
    }

    /// Remove a whole kind. Returns whether it was present.
    pub fn remove_kind(&mut self, kind: &str) -> bool {
        self.kinds.remove(kind).is_some()
    }
}
