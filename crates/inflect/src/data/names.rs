//! Name rules for kinds and tokens.

/// Characters with syntactic meaning in patterns or configuration.
pub const RESERVED_CHARS: [char; 11] = ['@', ',', '+', '!', ':', '~', '*', '|', '{', '}', '\\'];

/// Prefix reserved for option keys (`inflector_raises`, ...).
pub const RESERVED_PREFIX: &str = "inflector_";

/// Configuration key that sets a kind's default token. Also accepted as an
/// option value meaning "use the default".
pub const DEFAULT_KEY: &str = "default";

/// Marker for aliases in configuration values and strict kinds in keys.
pub const ALIAS_MARKER: char = '@';

fn has_valid_chars(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c.is_whitespace() || RESERVED_CHARS.contains(&c))
}

/// Check whether `name` may be used as a kind name.
pub fn is_valid_kind_name(name: &str) -> bool {
    has_valid_chars(name) && !name.starts_with(RESERVED_PREFIX) && name != DEFAULT_KEY
}

/// Check whether `name` may be used as a token or alias name.
pub fn is_valid_token_name(name: &str) -> bool {
    has_valid_chars(name) && name != DEFAULT_KEY
}

/// Check whether `value` is acceptable as a call-time option value.
pub fn is_valid_option_value(value: &str) -> bool {
    value == DEFAULT_KEY || is_valid_token_name(value)
}
