/// Font file loading and system fallback.
pub mod fonts;
/// Parley-backed shaping and measurement.
pub mod engine;
