//! Rendering of command results.

pub mod diagnostic;
pub mod table;

pub use diagnostic::ConfigDiagnostic;
