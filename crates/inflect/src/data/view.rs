use std::collections::BTreeMap;

use crate::data::{InflectionData, KindTable, Scope};

/// A stored token value as written in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawToken<'a> {
    /// A true token's description.
    Description(&'a str),
    /// An alias, holding the name of the true token it points to.
    Alias(&'a str),
}

/// Read access to one namespace of an [`InflectionData`].
///
/// Query methods take an optional kind. Without a kind, loose views search
/// every loose kind and strict views find nothing, since strict token names
/// are only unique within their kind. A kind written as `@kind` always
/// refers to the strict namespace.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    data: &'a InflectionData,
    scope: Scope,
}

impl<'a> View<'a> {
    pub(crate) fn new(data: &'a InflectionData, scope: Scope) -> Self {
        Self { data, scope }
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn locale(&self) -> &'a str {
        self.data.locale()
    }

    /// Kind names of this namespace, sorted.
    pub fn kinds(&self) -> Vec<&'a str> {
        self.data
            .namespace(self.scope)
            .kinds
            .keys()
            .map(String::as_str)
            .collect()
    }

    pub fn has_kind(&self, kind: &str) -> bool {
        self.table(kind).is_some()
    }

    /// Look up a kind's table.
    pub fn table(&self, kind: &str) -> Option<&'a KindTable> {
        self.entry(kind).map(|(_, table)| table)
    }

    fn entry(&self, kind: &str) -> Option<(&'a str, &'a KindTable)> {
        let (scope, name) = match Scope::split(kind) {
            (Scope::Strict, name) => (Scope::Strict, name),
            (Scope::Loose, name) => (self.scope, name),
        };
        self.data
            .namespace(scope)
            .kinds
            .get_key_value(name)
            .map(|(name, table)| (name.as_str(), table))
    }

    /// The kind owning `token`, restricted to `kind` when given.
    fn owner(&self, token: &str, kind: Option<&str>) -> Option<(&'a str, &'a KindTable)> {
        match kind {
            Some(kind) => self.entry(kind).filter(|(_, table)| table.has_token(token)),
            None if self.scope == Scope::Loose => {
                let namespace = self.data.namespace(Scope::Loose);
                let (name, table) = namespace.kinds.get_key_value(namespace.owners.get(token)?)?;
                Some((name.as_str(), table))
            }
            None => None,
        }
    }

    fn tables(&self, kind: Option<&str>) -> Vec<&'a KindTable> {
        match kind {
            Some(kind) => self.table(kind).into_iter().collect(),
            None if self.scope == Scope::Loose => self
                .data
                .namespace(Scope::Loose)
                .kinds
                .values()
                .collect(),
            None => Vec::new(),
        }
    }

    /// True if `token` is a true token or an alias.
    pub fn has_token(&self, token: &str, kind: Option<&str>) -> bool {
        self.owner(token, kind).is_some()
    }

    pub fn has_true_token(&self, token: &str, kind: Option<&str>) -> bool {
        self.owner(token, kind)
            .is_some_and(|(_, table)| table.has_true_token(token))
    }

    pub fn has_alias(&self, token: &str, kind: Option<&str>) -> bool {
        self.owner(token, kind)
            .is_some_and(|(_, table)| table.has_alias(token))
    }

    /// Name of the kind a token or alias belongs to.
    pub fn kind_of(&self, token: &str, kind: Option<&str>) -> Option<&'a str> {
        self.owner(token, kind).map(|(name, _)| name)
    }

    /// Resolve a token or alias to its true token.
    pub fn true_token_of(&self, token: &str, kind: Option<&str>) -> Option<&'a str> {
        self.owner(token, kind)
            .and_then(|(_, table)| table.true_token(token))
    }

    pub fn default_token_of(&self, kind: &str) -> Option<&'a str> {
        self.table(kind).and_then(KindTable::default_token)
    }

    pub fn description_of(&self, token: &str, kind: Option<&str>) -> Option<&'a str> {
        self.owner(token, kind)
            .and_then(|(_, table)| table.description(token))
    }

    /// Every token and alias name mapped to its description.
    pub fn tokens_of(&self, kind: Option<&str>) -> BTreeMap<&'a str, &'a str> {
        described_tokens(self.tables(kind))
    }

    /// True tokens mapped to their descriptions.
    pub fn true_tokens_of(&self, kind: Option<&str>) -> BTreeMap<&'a str, &'a str> {
        self.tables(kind)
            .into_iter()
            .flat_map(KindTable::true_tokens)
            .map(|(name, description)| (name.as_str(), description.as_str()))
            .collect()
    }

    /// Aliases mapped to the true tokens they point to.
    pub fn aliases_of(&self, kind: Option<&str>) -> BTreeMap<&'a str, &'a str> {
        self.tables(kind)
            .into_iter()
            .flat_map(KindTable::aliases)
            .map(|(name, target)| (name.as_str(), target.as_str()))
            .collect()
    }

    /// Tokens and aliases as stored, without resolving aliases.
    pub fn raw_tokens_of(&self, kind: Option<&str>) -> BTreeMap<&'a str, RawToken<'a>> {
        raw_tokens(self.tables(kind))
    }

    // =========================================================================
    // Whole-namespace listings
    // =========================================================================

    fn all_tables(&self) -> Vec<&'a KindTable> {
        self.data.namespace(self.scope).kinds.values().collect()
    }

    /// Tokens and aliases of every kind in this namespace.
    ///
    /// Strict kinds may share names, in which case the kind sorting last wins.
    pub fn all_tokens(&self) -> BTreeMap<&'a str, &'a str> {
        described_tokens(self.all_tables())
    }

    pub fn all_true_tokens(&self) -> BTreeMap<&'a str, &'a str> {
        self.all_tables()
            .into_iter()
            .flat_map(KindTable::true_tokens)
            .map(|(name, description)| (name.as_str(), description.as_str()))
            .collect()
    }

    pub fn all_aliases(&self) -> BTreeMap<&'a str, &'a str> {
        self.all_tables()
            .into_iter()
            .flat_map(KindTable::aliases)
            .map(|(name, target)| (name.as_str(), target.as_str()))
            .collect()
    }

    pub fn all_raw_tokens(&self) -> BTreeMap<&'a str, RawToken<'a>> {
        raw_tokens(self.all_tables())
    }
}

fn described_tokens(tables: Vec<&KindTable>) -> BTreeMap<&str, &str> {
    let mut out = BTreeMap::new();
    for table in tables {
        for name in table.names() {
            if let Some(description) = table.description(name) {
                out.insert(name, description);
            }
        }
    }
    out
}

fn raw_tokens(tables: Vec<&KindTable>) -> BTreeMap<&str, RawToken<'_>> {
    let mut out = BTreeMap::new();
    for table in tables {
        for (name, description) in table.true_tokens() {
            out.insert(name.as_str(), RawToken::Description(description));
        }
        for (name, target) in table.aliases() {
            out.insert(name.as_str(), RawToken::Alias(target));
        }
    }
    out
}
