//! CPU rendering of puzzle images.
//!
//! [`compositor::Compositor`] resolves the layout and paints it onto a `vello_cpu` surface.
//! [`pair::PuzzleSession`] caches the question/answer pair of the current puzzle.

/// Draw-order compositing of one puzzle image.
pub mod compositor;
pub(crate) mod cpu;
/// Question/answer pair and per-session cache.
pub mod pair;
