use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

/// Signature of a lazily evaluated inflection option.
///
/// Receives the option key that was looked up (`gender` or `@gender`) and the
/// locale, and returns the token name to use, or `None` for "no value".
pub type TokenFn = dyn Fn(&str, &str) -> Option<String> + Send + Sync;

/// Call-time inflection options keyed by kind name (`gender`) or named kind
/// (`@gender`).
pub type InflectionArgs = BTreeMap<String, Value>;

/// A value supplied for an inflection kind.
///
/// # Example
///
/// ```
/// use inflect::Value;
///
/// let plain: Value = "m".into();
/// assert_eq!(plain.as_token(), Some("m"));
///
/// let lazy = Value::lazy(|kind, locale| {
///     (kind == "gender" && locale == "pl").then(|| "f".to_string())
/// });
/// assert!(lazy.as_token().is_none());
/// ```
#[derive(Clone)]
pub enum Value {
    /// A token or alias name.
    Token(String),

    /// An explicit "nothing" (distinct from the option being absent).
    Nil,

    /// A callable evaluated at most once per kind per resolution call.
    Lazy(Arc<TokenFn>),
}

impl Value {
    /// Wrap a closure as a lazily evaluated value.
    pub fn lazy(f: impl Fn(&str, &str) -> Option<String> + Send + Sync + 'static) -> Self {
        Value::Lazy(Arc::new(f))
    }

    /// Get the token name, if this is a literal token.
    pub fn as_token(&self) -> Option<&str> {
        match self {
            Value::Token(t) => Some(t),
            Value::Nil | Value::Lazy(_) => None,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self, Value::Lazy(_))
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Value::Token(t) => f.debug_tuple("Token").field(t).finish(),
            Value::Nil => f.write_str("Nil"),
            Value::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Token(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Token(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Token(s.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Nil, Into::into)
    }
}
