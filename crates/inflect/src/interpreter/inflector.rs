//! Host-facing entry point.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use bon::Builder;
use tracing::debug;

use crate::data::{InflectionConfig, InflectionData, InflectionRegistry};
use crate::interpreter::{
    ConfigError, InflectionError, InflectionOptions, LoadError, OptionOverrides, ResolveContext,
    resolve_template,
};
use crate::parser::{Template, scan};
use crate::types::{Entry, InflectionArgs, KeyedInflection};

/// Most scanned strings kept by [`Inflector::template`]. The cache is emptied
/// when it fills up.
const TEMPLATE_CACHE_LIMIT: usize = 1024;

/// Resolves inflection patterns in translation strings.
///
/// An inflector owns the stored inflection configuration of every locale,
/// the registry of databases built from it, process-wide default options,
/// and a cache of scanned strings.
///
/// # Example
///
/// ```
/// use inflect::{args, InflectionConfig, Inflector, OptionOverrides};
///
/// let config = InflectionConfig::from_toml_str(r#"
///     [gender]
///     f = "female"
///     m = "male"
///     n = "neuter"
///     default = "n"
/// "#).unwrap();
///
/// let mut inflector = Inflector::new();
/// inflector.store("en", &config).unwrap();
///
/// let args = args! { "gender" => "m" };
/// let text = inflector
///     .interpolate("Dear @{f:Lady|m:Sir|n:You|All}!", "en", &args, OptionOverrides::none())
///     .unwrap();
/// assert_eq!(text, "Dear Sir!");
/// ```
#[derive(Builder)]
pub struct Inflector {
    /// Options used where a call does not override them.
    #[builder(default)]
    defaults: InflectionOptions,

    /// Databases by locale. Can be shared with other readers.
    #[builder(default)]
    registry: Arc<InflectionRegistry>,

    /// Accumulated configuration per locale; databases are rebuilt from it.
    #[builder(skip)]
    configs: BTreeMap<String, InflectionConfig>,

    /// Configuration files by locale, for [`Inflector::reload`].
    #[builder(skip)]
    loaded_paths: BTreeMap<String, PathBuf>,

    /// Scanned strings keyed by their source, at most
    /// `TEMPLATE_CACHE_LIMIT` of them.
    #[builder(skip)]
    template_cache: RwLock<HashMap<String, Arc<Template>>>,
}

impl Default for Inflector {
    fn default() -> Self {
        Inflector::builder().build()
    }
}

impl Inflector {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Options
    // =========================================================================

    pub fn defaults(&self) -> InflectionOptions {
        self.defaults
    }

    /// Replace the process-wide default options.
    pub fn set_defaults(&mut self, defaults: InflectionOptions) {
        self.defaults = defaults;
    }

    // =========================================================================
    // Databases
    // =========================================================================

    pub fn registry(&self) -> &InflectionRegistry {
        &self.registry
    }

    /// The database of a locale, if any.
    pub fn database(&self, locale: &str) -> Option<Arc<InflectionData>> {
        self.registry.database(locale)
    }

    /// The configuration accumulated for a locale.
    pub fn config(&self, locale: &str) -> Option<&InflectionConfig> {
        self.configs.get(locale)
    }

    /// Merge configuration into a locale's stored configuration and rebuild
    /// its database from the result.
    ///
    /// On error nothing changes.
    pub fn store(
        &mut self,
        locale: &str,
        config: &InflectionConfig,
    ) -> Result<Option<Arc<InflectionData>>, ConfigError> {
        let mut merged = self.configs.get(locale).cloned().unwrap_or_default();
        merged.merge(config);
        self.replace(locale, merged)
    }

    /// Replace a locale's stored configuration and rebuild its database.
    ///
    /// An empty configuration removes the database. On error nothing changes.
    pub fn replace(
        &mut self,
        locale: &str,
        config: InflectionConfig,
    ) -> Result<Option<Arc<InflectionData>>, ConfigError> {
        let data = self.registry.rebuild(locale, &config)?;
        if config.is_empty() {
            self.configs.remove(locale);
        } else {
            self.configs.insert(locale.to_string(), config);
        }
        Ok(data)
    }

    /// Load a locale's configuration from a TOML or JSON file, replacing what
    /// was stored before. The path is kept for [`Inflector::reload`].
    pub fn load_path(
        &mut self,
        locale: &str,
        path: impl AsRef<Path>,
    ) -> Result<Option<Arc<InflectionData>>, LoadError> {
        let path = path.as_ref();
        let config = InflectionConfig::from_path(path)?;
        let data = self.replace(locale, config)?;
        self.loaded_paths
            .insert(locale.to_string(), path.to_path_buf());
        debug!(locale, path = %path.display(), "loaded inflection configuration");
        Ok(data)
    }

    /// Reload a locale from the file it was last loaded from.
    pub fn reload(&mut self, locale: &str) -> Result<Option<Arc<InflectionData>>, LoadError> {
        let path = self
            .loaded_paths
            .get(locale)
            .cloned()
            .ok_or_else(|| LoadError::NoPathForReload {
                locale: locale.to_string(),
            })?;
        self.load_path(locale, path)
    }

    /// Drop a locale's configuration and database.
    pub fn remove_locale(&mut self, locale: &str) -> bool {
        self.configs.remove(locale);
        self.loaded_paths.remove(locale);
        self.registry.delete_database(locale)
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// Scan a string, reusing an earlier scan of the same text.
    ///
    /// The cache holds a bounded number of strings, so hosts may pass
    /// arbitrary text without growing it forever.
    pub fn template(&self, text: &str) -> Arc<Template> {
        if let Some(template) = self
            .template_cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(text)
        {
            return Arc::clone(template);
        }
        let template = Arc::new(scan(text));
        let mut cache = self
            .template_cache
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if cache.len() >= TEMPLATE_CACHE_LIMIT {
            debug!(entries = cache.len(), "clearing template cache");
            cache.clear();
        }
        cache.insert(text.to_string(), Arc::clone(&template));
        template
    }

    /// Resolve every pattern block in `text`.
    ///
    /// # Errors
    ///
    /// Returns the first resolution error when `raises` is on after applying
    /// `overrides`.
    pub fn interpolate(
        &self,
        text: &str,
        locale: &str,
        args: &InflectionArgs,
        overrides: OptionOverrides,
    ) -> Result<String, InflectionError> {
        let options = overrides.apply_to(self.defaults);
        self.resolve(&self.template(text), locale, args, options)
    }

    /// Resolve a translation entry, keeping its shape.
    ///
    /// Text is always resolved, symbols only with `interpolate_symbols`.
    /// Lists and maps are descended into only with `traverses`.
    pub fn interpolate_entry(
        &self,
        entry: &Entry,
        locale: &str,
        args: &InflectionArgs,
        overrides: OptionOverrides,
    ) -> Result<Entry, InflectionError> {
        let options = overrides.apply_to(self.defaults);
        self.resolve_entry(entry, locale, args, options)
    }

    fn resolve_entry(
        &self,
        entry: &Entry,
        locale: &str,
        args: &InflectionArgs,
        options: InflectionOptions,
    ) -> Result<Entry, InflectionError> {
        let resolved = match entry {
            Entry::Text(text) => {
                Entry::Text(self.resolve(&self.template(text), locale, args, options)?)
            }
            Entry::Symbol(symbol) if options.interpolate_symbols => {
                Entry::Symbol(self.resolve(&self.template(symbol), locale, args, options)?)
            }
            Entry::List(items) if options.traverses => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(self.resolve_entry(item, locale, args, options)?);
                }
                Entry::List(out)
            }
            Entry::Map(map) if options.traverses => {
                let mut out = BTreeMap::new();
                for (key, value) in map {
                    out.insert(
                        key.clone(),
                        self.resolve_entry(value, locale, args, options)?,
                    );
                }
                Entry::Map(out)
            }
            Entry::Symbol(_) | Entry::List(_) | Entry::Map(_) | Entry::Other(_) => entry.clone(),
        };
        Ok(resolved)
    }

    /// Resolve a map-shaped inflection.
    pub fn interpolate_keyed(
        &self,
        keyed: &KeyedInflection,
        locale: &str,
        args: &InflectionArgs,
        overrides: OptionOverrides,
    ) -> Result<String, InflectionError> {
        let template = keyed.to_template();
        self.resolve(&template, locale, args, overrides.apply_to(self.defaults))
    }

    fn resolve(
        &self,
        template: &Template,
        locale: &str,
        args: &InflectionArgs,
        options: InflectionOptions,
    ) -> Result<String, InflectionError> {
        let data = self.registry.database(locale);
        let mut ctx = ResolveContext::new(data.as_deref(), locale, args, options);
        resolve_template(template, &mut ctx)
    }
}
