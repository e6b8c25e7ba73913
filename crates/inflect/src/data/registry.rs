use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::data::{InflectionConfig, InflectionData, Scope};
use crate::interpreter::ConfigError;

/// Inflection databases keyed by locale.
///
/// Each locale's database is replaced as a whole: readers hold an
/// `Arc<InflectionData>` and keep seeing the database they fetched even while
/// a rebuild swaps in a new one.
#[derive(Debug, Default)]
pub struct InflectionRegistry {
    databases: RwLock<BTreeMap<String, Arc<InflectionData>>>,
}

impl InflectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The database of a locale, if one exists.
    pub fn database(&self, locale: &str) -> Option<Arc<InflectionData>> {
        self.databases
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(locale)
            .cloned()
    }

    /// Install an empty database for a locale, replacing any existing one.
    pub fn new_database(&self, locale: &str) -> Arc<InflectionData> {
        self.add_database(InflectionData::new(locale))
    }

    /// Install a database under its own locale, replacing any existing one.
    pub fn add_database(&self, data: InflectionData) -> Arc<InflectionData> {
        let data = Arc::new(data);
        let replaced = self
            .databases
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(data.locale().to_string(), Arc::clone(&data))
            .is_some();
        debug!(locale = data.locale(), replaced, "installed inflection database");
        data
    }

    /// Remove a locale's database. Returns whether one existed.
    pub fn delete_database(&self, locale: &str) -> bool {
        let removed = self
            .databases
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(locale)
            .is_some();
        if removed {
            debug!(locale, "deleted inflection database");
        }
        removed
    }

    /// Build a fresh database from the full configuration of a locale and
    /// swap it in.
    ///
    /// On error the previous database stays in place. An empty configuration
    /// removes the locale's database.
    pub fn rebuild(
        &self,
        locale: &str,
        config: &InflectionConfig,
    ) -> Result<Option<Arc<InflectionData>>, ConfigError> {
        if config.is_empty() {
            self.delete_database(locale);
            return Ok(None);
        }
        let data = InflectionData::from_config(locale, config)?;
        debug!(
            locale,
            kinds = data.loose().kinds().len(),
            strict_kinds = data.strict().kinds().len(),
            "rebuilt inflection database"
        );
        Ok(Some(self.add_database(data)))
    }

    /// Locales that have a database, optionally only those defining `kind`.
    ///
    /// A kind written `@kind` is looked up among strict kinds.
    pub fn inflected_locales(&self, kind: Option<&str>) -> Vec<String> {
        self.locales_matching(|data| kind.is_none_or(|kind| data.loose().has_kind(kind)))
    }

    /// Locales with strict kinds, optionally only those defining `kind`.
    pub fn strict_inflected_locales(&self, kind: Option<&str>) -> Vec<String> {
        self.locales_matching(|data| {
            let strict = data.view(Scope::Strict);
            match kind {
                Some(kind) => strict.has_kind(kind),
                None => !strict.kinds().is_empty(),
            }
        })
    }

    /// True if the locale has a database, even an empty one.
    pub fn locale_supported(&self, locale: &str) -> bool {
        !locale.is_empty() && self.database(locale).is_some()
    }

    /// True if the locale has a database with at least one strict kind.
    pub fn strict_locale_supported(&self, locale: &str) -> bool {
        self.database(locale)
            .is_some_and(|data| !data.strict().kinds().is_empty())
    }

    fn locales_matching(&self, predicate: impl Fn(&InflectionData) -> bool) -> Vec<String> {
        self.databases
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(_, data)| predicate(data))
            .map(|(locale, _)| locale.clone())
            .collect()
    }
}
