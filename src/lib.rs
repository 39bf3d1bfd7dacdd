//! Spotgrid composes "spot the odd one out" quiz images for short-form video.
//!
//! A [`PuzzleConfig`] describes a header band, a grid of repeated base characters with one
//! target character hidden in it, and an optional footer. Rendering is split in two:
//!
//! - Create a [`PuzzleInstance`] (the random target position lives here, nowhere else)
//! - Render the question and answer images from it with a [`Compositor`] or [`render_pair`]
//!
//! Both images of one instance are pixel-identical outside the answer highlight.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Puzzle configuration model and presets.
pub mod config;
/// Image encoders.
pub mod encode;
mod foundation;
/// Layout resolution.
pub mod layout;
/// Target selection and puzzle instances.
pub mod placement;
/// CPU rendering.
pub mod render;
/// Text shaping and font resolution.
pub mod text;

pub use crate::foundation::core::{Affine, Canvas, Point, Rect, Rgb8, Size, Vec2};
pub use crate::foundation::error::{SpotgridError, SpotgridResult};

pub use crate::config::model::{
    BASE_TOKEN, FooterConfig, GridConfig, HeaderConfig, PuzzleConfig, TARGET_TOKEN, TextAlign,
    TextLine, substitute_placeholders,
};
pub use crate::config::presets::{PROBLEM_SETS, ProblemSet, find_preset};
pub use crate::encode::jpeg::{DEFAULT_JPEG_QUALITY, encode_jpeg, encode_png, save};
pub use crate::layout::resolver::{
    GridCell, GridGeometry, HIGHLIGHT_HALF_EXTENT_FACTOR, HIGHLIGHT_STROKE_PX, PlacedText,
    ResolvedLayout, grid_cells, highlight_rect, resolve_layout,
};
pub use crate::placement::target::{
    AnswerPosition, PuzzleId, PuzzleInstance, choose_target, choose_target_with,
};
pub use crate::render::compositor::{Compositor, RenderResult, render, render_pair};
pub use crate::render::pair::{PuzzleSession, RenderPair};
pub use crate::text::engine::{ShapedLine, TextBlock, TextLayoutEngine};
pub use crate::text::fonts::{
    DEFAULT_FONT_FILE, FontSource, ResolvedFont, load_font_file, resolve_font,
    system_default_font,
};
