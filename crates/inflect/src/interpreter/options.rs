//! Resolution switches and per-call overrides.

use bon::Builder;

/// Switches controlling how pattern blocks are resolved.
///
/// # Example
///
/// ```
/// use inflect::InflectionOptions;
///
/// let options = InflectionOptions::builder().raises(true).build();
/// assert!(options.raises);
/// assert!(options.unknown_defaults);
/// assert!(!options.excluded_defaults);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder)]
pub struct InflectionOptions {
    /// Return errors instead of falling back to free text.
    #[builder(default)]
    pub raises: bool,

    /// Treat unknown option values as the kind's default token.
    #[builder(default = true)]
    pub unknown_defaults: bool,

    /// Skip typed alternatives for a kind with no option value, and replace
    /// values no alternative mentions with the default token.
    #[builder(default)]
    pub excluded_defaults: bool,

    /// Let alias names appear as token specs in pattern bodies.
    #[builder(default)]
    pub aliased_patterns: bool,

    /// Resolve patterns inside symbol entries.
    #[builder(default)]
    pub interpolate_symbols: bool,

    /// Descend into list and map entries.
    #[builder(default = true)]
    pub traverses: bool,
}

impl Default for InflectionOptions {
    fn default() -> Self {
        InflectionOptions::builder().build()
    }
}

/// Per-call overrides merged over an [`Inflector`](crate::Inflector)'s
/// defaults. Unset fields keep the default.
///
/// # Example
///
/// ```
/// use inflect::{InflectionOptions, OptionOverrides};
///
/// let overrides = OptionOverrides::builder().unknown_defaults(false).build();
/// let options = overrides.apply_to(InflectionOptions::default());
/// assert!(!options.unknown_defaults);
/// assert!(options.traverses);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Builder)]
pub struct OptionOverrides {
    pub raises: Option<bool>,
    pub unknown_defaults: Option<bool>,
    pub excluded_defaults: Option<bool>,
    pub aliased_patterns: Option<bool>,
    pub interpolate_symbols: Option<bool>,
    pub traverses: Option<bool>,
}

impl OptionOverrides {
    /// No overrides.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn apply_to(&self, base: InflectionOptions) -> InflectionOptions {
        InflectionOptions {
            raises: self.raises.unwrap_or(base.raises),
            unknown_defaults: self.unknown_defaults.unwrap_or(base.unknown_defaults),
            excluded_defaults: self.excluded_defaults.unwrap_or(base.excluded_defaults),
            aliased_patterns: self.aliased_patterns.unwrap_or(base.aliased_patterns),
            interpolate_symbols: self.interpolate_symbols.unwrap_or(base.interpolate_symbols),
            traverses: self.traverses.unwrap_or(base.traverses),
        }
    }
}

impl From<InflectionOptions> for OptionOverrides {
    /// Overrides that set every switch.
    fn from(options: InflectionOptions) -> Self {
        Self {
            raises: Some(options.raises),
            unknown_defaults: Some(options.unknown_defaults),
            excluded_defaults: Some(options.excluded_defaults),
            aliased_patterns: Some(options.aliased_patterns),
            interpolate_symbols: Some(options.interpolate_symbols),
            traverses: Some(options.traverses),
        }
    }
}
