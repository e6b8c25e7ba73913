//! Pattern resolution.
//!
//! Takes scanned templates, the locale's inflection database and the
//! caller's options, and produces the final text. The [`Inflector`] ties the
//! pieces together for hosts; [`resolve_template`] and [`resolve_block`] are
//! the lower-level entry points.

mod context;
mod error;
mod inflector;
mod options;
mod resolver;

pub use context::ResolveContext;
pub use error::{ConfigError, InflectionError, LoadError, compute_suggestions};
pub use inflector::Inflector;
pub use options::{InflectionOptions, OptionOverrides};
pub use resolver::{resolve_block, resolve_template};
