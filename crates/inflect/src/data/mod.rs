//! Per-locale inflection databases.
//!
//! An [`InflectionData`] holds the kinds, tokens, aliases and default tokens
//! of one locale in two namespaces:
//! - the loose namespace, filled from unprefixed kind keys, where every token
//!   and alias name is unique across all kinds
//! - the strict namespace, filled from `@kind` keys, where names only need to
//!   be unique within their kind
//!
//! Both are read through a [`View`].

mod config;
pub mod names;
mod registry;
mod view;

use std::collections::BTreeMap;

use crate::interpreter::ConfigError;

pub use config::{InflectionConfig, KindEntry};
use names::{ALIAS_MARKER, DEFAULT_KEY, is_valid_kind_name, is_valid_token_name};
pub use registry::InflectionRegistry;
pub use view::{RawToken, View};

/// Which namespace a kind lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Kinds defined without a prefix; token names are global.
    Loose,
    /// Kinds defined as `@kind`; token names are local to the kind.
    Strict,
}

impl Scope {
    /// Split a kind key into its scope and bare name (`@gender` -> strict `gender`).
    pub fn split(kind: &str) -> (Scope, &str) {
        match kind.strip_prefix(ALIAS_MARKER) {
            Some(name) => (Scope::Strict, name),
            None => (Scope::Loose, kind),
        }
    }
}

/// Tokens, aliases and the default token of one kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KindTable {
    /// True token name -> description.
    tokens: BTreeMap<String, String>,
    /// Alias name -> true token name.
    aliases: BTreeMap<String, String>,
    default: Option<String>,
}

impl KindTable {
    /// True if `name` is a true token or an alias of this kind.
    pub fn has_token(&self, name: &str) -> bool {
        self.tokens.contains_key(name) || self.aliases.contains_key(name)
    }

    pub fn has_true_token(&self, name: &str) -> bool {
        self.tokens.contains_key(name)
    }

    pub fn has_alias(&self, name: &str) -> bool {
        self.aliases.contains_key(name)
    }

    /// Resolve a token or alias name to the true token name.
    pub fn true_token(&self, name: &str) -> Option<&str> {
        if let Some((token, _)) = self.tokens.get_key_value(name) {
            return Some(token);
        }
        self.aliases.get(name).map(String::as_str)
    }

    pub fn default_token(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Description of a token or of the token an alias points to.
    pub fn description(&self, name: &str) -> Option<&str> {
        self.true_token(name)
            .and_then(|token| self.tokens.get(token))
            .map(String::as_str)
    }

    /// True tokens with their descriptions.
    pub fn true_tokens(&self) -> &BTreeMap<String, String> {
        &self.tokens
    }

    /// Aliases with the true tokens they point to.
    pub fn aliases(&self) -> &BTreeMap<String, String> {
        &self.aliases
    }

    /// All true token and alias names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .tokens
            .keys()
            .chain(self.aliases.keys())
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names
    }
}

/// Kinds of one namespace.
#[derive(Debug, Clone, Default)]
pub(crate) struct Namespace {
    pub(crate) kinds: BTreeMap<String, KindTable>,
    /// Owning kind of every token and alias name. Used for lookups without a
    /// kind and for uniqueness in the loose namespace.
    pub(crate) owners: BTreeMap<String, String>,
}

/// The inflection database of one locale.
///
/// # Example
///
/// ```
/// use inflect::InflectionData;
///
/// let mut data = InflectionData::new("en");
/// data.add_token("gender", "m", Some("male")).unwrap();
/// data.add_token("gender", "f", Some("female")).unwrap();
/// data.add_token("gender", "masculine", Some("@m")).unwrap();
/// data.add_token("gender", "default", Some("f")).unwrap();
///
/// let loose = data.loose();
/// assert_eq!(loose.kind_of("masculine", None), Some("gender"));
/// assert_eq!(loose.true_token_of("masculine", None), Some("m"));
/// assert_eq!(loose.default_token_of("gender"), Some("f"));
/// ```
#[derive(Debug, Clone)]
pub struct InflectionData {
    locale: String,
    loose: Namespace,
    strict: Namespace,
}

impl InflectionData {
    /// Create an empty database for a locale.
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            loose: Namespace::default(),
            strict: Namespace::default(),
        }
    }

    /// Build a database from a full configuration.
    ///
    /// For every kind, true tokens are added first, then aliases, then the
    /// default, so alias and default targets never depend on key order.
    pub fn from_config(
        locale: impl Into<String>,
        config: &InflectionConfig,
    ) -> Result<Self, ConfigError> {
        let mut data = Self::new(locale);

        for (kind, entry) in &config.kinds {
            let KindEntry::Tokens(tokens) = entry else {
                return Err(data.bad_kind(kind));
            };
            data.add_kind(kind)?;

            let (aliases, descriptions): (Vec<_>, Vec<_>) = tokens
                .iter()
                .filter(|(name, _)| name.as_str() != DEFAULT_KEY)
                .partition(|(_, value)| {
                    value
                        .as_deref()
                        .is_some_and(|v| v.starts_with(ALIAS_MARKER))
                });
            for (name, value) in descriptions.into_iter().chain(aliases) {
                data.add_token(kind, name, value.as_deref())?;
            }
            if let Some(value) = tokens.get(DEFAULT_KEY) {
                data.add_token(kind, DEFAULT_KEY, value.as_deref())?;
            }
        }

        Ok(data)
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// True if the database has no kinds in either namespace.
    pub fn is_empty(&self) -> bool {
        self.loose.kinds.is_empty() && self.strict.kinds.is_empty()
    }

    /// Read access to the loose namespace.
    ///
    /// Kind arguments written as `@kind` are looked up in the strict
    /// namespace.
    pub fn loose(&self) -> View<'_> {
        View::new(self, Scope::Loose)
    }

    /// Read access restricted to the strict namespace.
    pub fn strict(&self) -> View<'_> {
        View::new(self, Scope::Strict)
    }

    pub fn view(&self, scope: Scope) -> View<'_> {
        View::new(self, scope)
    }

    /// Find the table for a kind named in a pattern header.
    ///
    /// Strict kinds take precedence over loose kinds of the same name.
    pub fn named_kind(&self, kind: &str) -> Option<&KindTable> {
        self.strict
            .kinds
            .get(kind)
            .or_else(|| self.loose.kinds.get(kind))
    }

    pub(crate) fn namespace(&self, scope: Scope) -> &Namespace {
        match scope {
            Scope::Loose => &self.loose,
            Scope::Strict => &self.strict,
        }
    }

    fn namespace_mut(&mut self, scope: Scope) -> &mut Namespace {
        match scope {
            Scope::Loose => &mut self.loose,
            Scope::Strict => &mut self.strict,
        }
    }

    /// Register a kind. `@kind` registers a strict kind.
    ///
    /// Adding an existing kind is a no-op.
    pub fn add_kind(&mut self, kind: &str) -> Result<(), ConfigError> {
        let (scope, name) = Scope::split(kind);
        if !is_valid_kind_name(name) {
            return Err(self.bad_kind(kind));
        }
        self.namespace_mut(scope)
            .kinds
            .entry(name.to_string())
            .or_default();
        Ok(())
    }

    /// Add a token, alias, or default to a kind, creating the kind if needed.
    ///
    /// `value` is interpreted as:
    /// - a description, for a true token
    /// - `@target`, for an alias of the true token `target`
    /// - a token or alias name (optionally `@`-prefixed), when `name` is
    ///   `default`
    pub fn add_token(
        &mut self,
        kind: &str,
        name: &str,
        value: Option<&str>,
    ) -> Result<(), ConfigError> {
        self.add_kind(kind)?;
        let (scope, kind_name) = Scope::split(kind);

        if name == DEFAULT_KEY {
            return self.set_default(scope, kind_name, value.unwrap_or_default());
        }

        if !is_valid_token_name(name) {
            return Err(self.bad_token(kind_name, name, value));
        }
        self.check_unique(scope, kind_name, name)?;

        let value = match value {
            Some(v) if !v.is_empty() && v != "@" => v,
            _ => return Err(self.bad_token(kind_name, name, value)),
        };

        let locale = self.locale.clone();
        let namespace = self.namespace_mut(scope);
        let table = namespace.kinds.entry(kind_name.to_string()).or_default();

        if let Some(target) = value.strip_prefix(ALIAS_MARKER) {
            if !table.has_true_token(target) {
                return Err(ConfigError::BadInflectionAlias {
                    locale,
                    kind: kind_name.to_string(),
                    alias: name.to_string(),
                    target: target.to_string(),
                });
            }
            table.aliases.insert(name.to_string(), target.to_string());
        } else {
            table.tokens.insert(name.to_string(), value.to_string());
        }
        namespace
            .owners
            .entry(name.to_string())
            .or_insert_with(|| kind_name.to_string());

        Ok(())
    }

    fn set_default(&mut self, scope: Scope, kind: &str, value: &str) -> Result<(), ConfigError> {
        let target = value.strip_prefix(ALIAS_MARKER).unwrap_or(value);
        let locale = self.locale.clone();
        let table = self
            .namespace_mut(scope)
            .kinds
            .entry(kind.to_string())
            .or_default();

        let Some(token) = table.true_token(target).map(ToString::to_string) else {
            return Err(ConfigError::BadInflectionAlias {
                locale,
                kind: kind.to_string(),
                alias: DEFAULT_KEY.to_string(),
                target: target.to_string(),
            });
        };
        table.default = Some(token);
        Ok(())
    }

    fn check_unique(&self, scope: Scope, kind: &str, name: &str) -> Result<(), ConfigError> {
        let namespace = self.namespace(scope);
        let original = match scope {
            Scope::Loose => namespace.owners.get(name).cloned(),
            Scope::Strict => namespace
                .kinds
                .get(kind)
                .filter(|table| table.has_token(name))
                .map(|_| kind.to_string()),
        };
        match original {
            Some(original_kind) => Err(ConfigError::DuplicatedInflectionToken {
                locale: self.locale.clone(),
                kind: kind.to_string(),
                token: name.to_string(),
                original_kind,
            }),
            None => Ok(()),
        }
    }

    fn bad_kind(&self, kind: &str) -> ConfigError {
        ConfigError::BadInflectionKind {
            locale: self.locale.clone(),
            kind: kind.to_string(),
        }
    }

    fn bad_token(&self, kind: &str, token: &str, value: Option<&str>) -> ConfigError {
        ConfigError::BadInflectionToken {
            locale: self.locale.clone(),
            kind: kind.to_string(),
            token: token.to_string(),
            description: value.map(ToString::to_string),
        }
    }
}
