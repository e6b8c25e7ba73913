use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A translation value as stored by a host: text, or a collection of them.
///
/// Deserializes from any self-describing format. Strings become
/// [`Entry::Text`]; [`Entry::Symbol`] is only constructed directly, for hosts
/// that distinguish identifiers from text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Text(String),
    #[serde(skip_deserializing)]
    Symbol(String),
    List(Vec<Entry>),
    Map(BTreeMap<String, Entry>),
    /// Numbers, booleans, null: passed through untouched.
    Other(serde_json::Value),
}

impl Entry {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Entry::Text(text) => Some(text),
            Entry::Symbol(_) | Entry::List(_) | Entry::Map(_) | Entry::Other(_) => None,
        }
    }
}

impl From<&str> for Entry {
    fn from(text: &str) -> Self {
        Entry::Text(text.to_string())
    }
}

impl From<String> for Entry {
    fn from(text: String) -> Self {
        Entry::Text(text)
    }
}
