pub mod data;
pub mod interpreter;
pub mod parser;
pub mod types;

pub use data::{
    InflectionConfig, InflectionData, InflectionRegistry, KindEntry, RawToken, Scope, View,
};
pub use interpreter::{
    ConfigError, InflectionError, InflectionOptions, Inflector, LoadError, OptionOverrides,
    ResolveContext, compute_suggestions, resolve_block, resolve_template,
};
pub use types::{Entry, InflectionArgs, KeyedInflection, Value};

/// Creates an [`InflectionArgs`] map from key-value pairs.
///
/// Values are converted via `Into<Value>`, so token names can be passed as
/// plain strings. Keys starting with `@` address strict (named) kinds.
///
/// # Example
///
/// ```
/// use inflect::{args, Value};
///
/// let a = args! { "gender" => "f", "@tense" => Value::Nil };
/// assert_eq!(a.len(), 2);
/// assert_eq!(a["gender"].as_token(), Some("f"));
/// assert!(a["@tense"].is_nil());
/// ```
#[macro_export]
macro_rules! args {
    {} => {
        $crate::InflectionArgs::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = $crate::InflectionArgs::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}
