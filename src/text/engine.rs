use std::{
    borrow::Cow,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    config::model::TextAlign,
    foundation::core::{Rgb8, Size, Vec2},
    foundation::error::{SpotgridError, SpotgridResult},
    text::fonts::{self, FontSource, ResolvedFont},
};

/// One shaped line of a [`TextBlock`].
#[derive(Clone)]
pub struct ShapedLine {
    /// Parley layout, `None` for blank lines that only take up vertical space.
    pub layout: Option<Arc<parley::Layout<Rgb8>>>,
    /// Top-left of the line relative to the block's top-left.
    pub offset: Vec2,
    /// Advance width in pixels.
    pub width: f64,
    /// Line box height (ascent + descent + leading) in pixels.
    pub height: f64,
}

/// A measured, possibly multi-line, text element.
#[derive(Clone)]
pub struct TextBlock {
    /// Lines in top-to-bottom order.
    pub lines: Vec<ShapedLine>,
    /// Widest line advance.
    pub width: f64,
    /// Sum of line heights plus inter-line spacing.
    pub height: f64,
}

impl TextBlock {
    /// Bounding box size of the whole block.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl std::fmt::Debug for TextBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBlock")
            .field("lines", &self.lines.len())
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

struct ActiveFont {
    font: ResolvedFont,
    family_name: String,
}

/// Stateful helper that owns the Parley contexts and the active font.
///
/// The font is resolved lazily on [`TextLayoutEngine::use_font`] and kept until a
/// different font path is requested, so repeated renders reuse registrations.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgb8>,
    requested: Option<Option<PathBuf>>,
    active: Option<ActiveFont>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    /// Construct a new engine with fresh Parley contexts and no font.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            requested: None,
            active: None,
        }
    }

    /// Select the font for subsequent shaping; see [`fonts::resolve_font`] for fallbacks.
    pub fn use_font(&mut self, requested: Option<&Path>) {
        let key = requested.map(Path::to_path_buf);
        if self.requested.as_ref() == Some(&key) {
            return;
        }
        self.requested = Some(key);
        self.active = None;

        let Some(font) = fonts::resolve_font(requested) else {
            return;
        };
        let is_file = matches!(font.source, FontSource::File(_));
        match self.register(font) {
            Ok(()) => {}
            Err(err) if is_file => {
                tracing::warn!(%err, "font file could not be registered, using default font");
                if let Some(fallback) = fonts::system_default_font()
                    && let Err(err) = self.register(fallback)
                {
                    tracing::warn!(%err, "default font could not be registered");
                }
            }
            Err(err) => tracing::warn!(%err, "default font could not be registered"),
        }
    }

    /// Font currently used for shaping, if any.
    pub fn font(&self) -> Option<&ResolvedFont> {
        self.active.as_ref().map(|a| &a.font)
    }

    /// Family name Parley resolved for the active font.
    pub fn family_name(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.family_name.as_str())
    }

    fn register(&mut self, font: ResolvedFont) -> SpotgridResult<()> {
        let families = self.font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(font.bytes.as_ref().clone()),
            None,
        );
        let family_id = families
            .iter()
            .find(|(_, infos)| infos.iter().any(|info| info.index() == font.index))
            .or_else(|| families.first())
            .map(|(id, _)| *id)
            .ok_or_else(|| SpotgridError::font("no font families registered from font bytes"))?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| SpotgridError::font("registered font family has no name"))?
            .to_string();

        self.active = Some(ActiveFont { font, family_name });
        Ok(())
    }

    /// Shape a single line of text with no wrapping.
    pub fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: Rgb8,
    ) -> SpotgridResult<parley::Layout<Rgb8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(SpotgridError::layout(
                "text size_px must be finite and > 0",
            ));
        }
        let family_name = self
            .active
            .as_ref()
            .map(|a| a.family_name.clone())
            .ok_or_else(|| SpotgridError::font("no font available"))?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<Rgb8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    /// Shape and measure text that may contain `\n` line breaks.
    ///
    /// Lines are stacked with `line_spacing` extra pixels between them and aligned
    /// inside the block according to `align`. The block width is the widest line.
    pub fn layout_block(
        &mut self,
        text: &str,
        size_px: f32,
        brush: Rgb8,
        line_spacing: f64,
        align: TextAlign,
    ) -> SpotgridResult<TextBlock> {
        if !line_spacing.is_finite() {
            return Err(SpotgridError::layout("line spacing must be finite"));
        }

        let mut lines = Vec::new();
        for raw in text.split('\n') {
            let raw = raw.strip_suffix('\r').unwrap_or(raw);
            lines.push(self.measure_line(raw, size_px, brush)?);
        }

        let width = lines.iter().map(|l| l.width).fold(0.0, f64::max);
        let mut y = 0.0;
        for (idx, line) in lines.iter_mut().enumerate() {
            if idx > 0 {
                y += line_spacing;
            }
            let x = match align {
                TextAlign::Left => 0.0,
                TextAlign::Center => (width - line.width) * 0.5,
                TextAlign::Right => width - line.width,
            };
            line.offset = Vec2::new(x, y);
            y += line.height;
        }

        Ok(TextBlock {
            lines,
            width,
            height: y,
        })
    }

    fn measure_line(&mut self, text: &str, size_px: f32, brush: Rgb8) -> SpotgridResult<ShapedLine> {
        let blank = text.trim().is_empty();
        // Blank lines are measured with a space so they keep the font's line height.
        let layout = self.layout_line(if blank { " " } else { text }, size_px, brush)?;

        let mut width = 0.0f64;
        let mut height = 0.0f64;
        for line in layout.lines() {
            let m = line.metrics();
            width = width.max(f64::from(m.advance));
            height += f64::from(m.ascent + m.descent + m.leading);
        }
        if !width.is_finite() || !height.is_finite() {
            return Err(SpotgridError::layout(format!(
                "non-finite metrics for text {text:?}"
            )));
        }

        Ok(ShapedLine {
            layout: (!blank).then(|| Arc::new(layout)),
            offset: Vec2::ZERO,
            width: if blank { 0.0 } else { width },
            height,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/engine.rs"]
mod tests;
