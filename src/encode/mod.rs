//! Image encoding of rendered puzzles.

/// JPEG and PNG output via the `image` crate.
pub mod jpeg;
