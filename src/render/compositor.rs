use std::sync::Arc;

use crate::{
    config::model::PuzzleConfig,
    foundation::core::{Rect, Rgb8},
    foundation::error::SpotgridResult,
    layout::resolver::{
        HIGHLIGHT_STROKE_PX, centered_on, grid_cells, highlight_rect, resolve_layout,
    },
    placement::target::{AnswerPosition, PuzzleInstance},
    render::cpu::{self, CpuSurface},
    render::pair::RenderPair,
    text::engine::TextLayoutEngine,
};

/// One rendered puzzle image.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderResult {
    image: image::RgbImage,
    target: AnswerPosition,
    highlight: Option<Rect>,
}

impl RenderResult {
    /// Rendered pixels.
    pub fn image(&self) -> &image::RgbImage {
        &self.image
    }

    /// Take ownership of the rendered pixels.
    pub fn into_image(self) -> image::RgbImage {
        self.image
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Target cell this image was rendered with.
    pub fn target(&self) -> AnswerPosition {
        self.target
    }

    /// Answer highlight bounds in canvas pixels; `None` for question images.
    pub fn highlight(&self) -> Option<Rect> {
        self.highlight
    }

    /// Whether this is the answer (reveal) variant.
    pub fn is_answer(&self) -> bool {
        self.highlight.is_some()
    }
}

struct GlyphFont {
    bytes: Arc<Vec<u8>>,
    data: vello_cpu::peniko::FontData,
}

/// Puzzle compositor: owns shaping state reused across renders.
///
/// Rendering is deterministic; all randomness lives in [`PuzzleInstance`].
pub struct Compositor {
    engine: TextLayoutEngine,
    glyph_font: Option<GlyphFont>,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compositor {
    /// Construct a compositor; fonts are resolved on first render.
    pub fn new() -> Self {
        Self {
            engine: TextLayoutEngine::new(),
            glyph_font: None,
        }
    }

    /// Text engine used for measurement.
    pub fn engine(&self) -> &TextLayoutEngine {
        &self.engine
    }

    /// Render the question (`reveal == false`) or answer image of `instance`.
    #[tracing::instrument(skip_all, fields(puzzle = instance.id().0, reveal = reveal))]
    pub fn render(
        &mut self,
        config: &PuzzleConfig,
        instance: &PuzzleInstance,
        reveal: bool,
    ) -> SpotgridResult<RenderResult> {
        self.render_at(config, instance.target(), reveal)
    }

    /// Render both variants of `instance` with shared layout state.
    pub fn render_pair(
        &mut self,
        config: &PuzzleConfig,
        instance: &PuzzleInstance,
    ) -> SpotgridResult<RenderPair> {
        let question = self.render(config, instance, false)?;
        let answer = self.render(config, instance, true)?;
        Ok(RenderPair::new(*instance, question, answer))
    }

    /// Render with an explicit target cell.
    ///
    /// Draw order: background, header band, header text, grid cells row-major
    /// (with the highlight right after the target glyph when revealing), footer.
    /// When revealing, the target glyph takes `grid.answer_color` if one is set.
    pub fn render_at(
        &mut self,
        config: &PuzzleConfig,
        target: AnswerPosition,
        reveal: bool,
    ) -> SpotgridResult<RenderResult> {
        if !target.fits(config.grid.rows, config.grid.cols) {
            tracing::warn!(?target, "target lies outside the grid; no cell will be marked");
        }

        let layout = resolve_layout(config, &mut self.engine);
        let font = self.glyph_font();
        let mut surface = CpuSurface::new(config.canvas)?;

        surface.fill_rect(config.canvas.bounds(), config.background);
        surface.fill_rect(layout.header_box, config.header.background);

        if let Some(font) = &font {
            for text in &layout.header_lines {
                surface.draw_text(&text.block, text.origin, font, None);
            }
        }

        let mut highlight = None;
        for cell in grid_cells(config, target) {
            if let Some(font) = &font
                && let Some(glyph) = layout.cell_glyph(&cell)
            {
                let recolor = if reveal && cell.is_target {
                    config.grid.answer_color
                } else {
                    None
                };
                surface.draw_text(glyph, centered_on(cell.center, glyph.size()), font, recolor);
            }
            if reveal && cell.is_target {
                let rect = highlight_rect(cell.center, config.grid.font_size);
                surface.stroke_frame(rect, HIGHLIGHT_STROKE_PX, Rgb8::RED);
                highlight = Some(rect);
            }
        }

        if let Some(font) = &font
            && let Some(footer) = &layout.footer
        {
            surface.draw_text(&footer.block, footer.origin, font, None);
        }

        Ok(RenderResult {
            image: surface.finish()?,
            target,
            highlight,
        })
    }

    fn glyph_font(&mut self) -> Option<vello_cpu::peniko::FontData> {
        let active = self.engine.font()?;
        let stale = self
            .glyph_font
            .as_ref()
            .is_none_or(|g| !Arc::ptr_eq(&g.bytes, &active.bytes));
        if stale {
            self.glyph_font = Some(GlyphFont {
                bytes: active.bytes.clone(),
                data: cpu::font_data(&active.bytes, active.index),
            });
        }
        self.glyph_font.as_ref().map(|g| g.data.clone())
    }
}

/// Render one variant with a fresh [`Compositor`].
pub fn render(
    config: &PuzzleConfig,
    instance: &PuzzleInstance,
    reveal: bool,
) -> SpotgridResult<RenderResult> {
    Compositor::new().render(config, instance, reveal)
}

/// Render the question/answer pair with a fresh [`Compositor`].
pub fn render_pair(config: &PuzzleConfig, instance: &PuzzleInstance) -> SpotgridResult<RenderPair> {
    Compositor::new().render_pair(config, instance)
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
