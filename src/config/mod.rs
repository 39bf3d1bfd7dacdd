//! Puzzle configuration: JSON model, defaults and built-in problem sets.

/// Serde config model, validation and placeholder substitution.
pub mod model;
/// Built-in base/target character pairs.
pub mod presets;
