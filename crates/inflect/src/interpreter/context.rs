//! Per-call resolution state.

use std::collections::BTreeMap;

use tracing::debug;

use crate::data::InflectionData;
use crate::data::names::ALIAS_MARKER;
use crate::interpreter::{InflectionError, InflectionOptions};
use crate::types::{InflectionArgs, Value};

/// What the caller supplied for a kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Lookup {
    /// Neither `@kind` nor `kind` was given.
    Missing,
    /// An explicit nil, or a lazy value that produced nothing.
    Nil,
    /// A token name as given, not yet validated.
    Token(String),
}

/// State carried through the resolution of one string.
///
/// Holds the locale's database, the caller's options and switches, and the
/// results of lazy option values, so each callable runs at most once per
/// call.
pub struct ResolveContext<'a> {
    data: Option<&'a InflectionData>,
    locale: &'a str,
    args: &'a InflectionArgs,
    options: InflectionOptions,
    /// Lazy results keyed by the option key they were found under.
    evaluated: BTreeMap<String, Option<String>>,
}

impl<'a> ResolveContext<'a> {
    /// Create a context. Without a database every block resolves to the
    /// empty string.
    pub fn new(
        data: Option<&'a InflectionData>,
        locale: &'a str,
        args: &'a InflectionArgs,
        options: InflectionOptions,
    ) -> Self {
        Self {
            data,
            locale,
            args,
            options,
            evaluated: BTreeMap::new(),
        }
    }

    pub fn data(&self) -> Option<&'a InflectionData> {
        self.data
    }

    pub fn locale(&self) -> &'a str {
        self.locale
    }

    pub fn options(&self) -> InflectionOptions {
        self.options
    }

    /// Look up the caller's value for a kind, preferring `@kind` over `kind`.
    ///
    /// The first key present wins even when its value is nil.
    pub(crate) fn option_for(&mut self, kind: &str) -> Lookup {
        let named = format!("{ALIAS_MARKER}{kind}");
        for key in [named.as_str(), kind] {
            let Some(value) = self.args.get(key) else {
                continue;
            };
            let token = match value {
                Value::Token(token) => Some(token.clone()),
                Value::Nil => None,
                Value::Lazy(f) => self
                    .evaluated
                    .entry(key.to_string())
                    .or_insert_with(|| f(key, self.locale))
                    .clone(),
            };
            return token.map_or(Lookup::Nil, Lookup::Token);
        }
        Lookup::Missing
    }

    /// Return the error when `raises` is on; otherwise log it and carry on.
    pub(crate) fn report(&self, error: InflectionError) -> Result<(), InflectionError> {
        if self.options.raises {
            return Err(error);
        }
        debug!(%error, locale = self.locale, "ignoring inflection error");
        Ok(())
    }
}
