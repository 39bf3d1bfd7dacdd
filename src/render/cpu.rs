use crate::{
    foundation::core::{Affine, Canvas, Point, Rect, Rgb8},
    foundation::error::{SpotgridError, SpotgridResult},
    text::engine::TextBlock,
};

/// Exclusively owned raster target for one render call.
pub(crate) struct CpuSurface {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
}

impl CpuSurface {
    pub(crate) fn new(canvas: Canvas) -> SpotgridResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| SpotgridError::render("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| SpotgridError::render("canvas height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(SpotgridError::render("canvas must be non-empty"));
        }
        Ok(Self {
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
        })
    }

    pub(crate) fn fill_rect(&mut self, rect: Rect, color: Rgb8) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(paint(color));
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    /// Outline drawn inside `rect` so nothing paints outside its bounds.
    pub(crate) fn stroke_frame(&mut self, rect: Rect, stroke: f64, color: Rgb8) {
        let s = stroke.min(rect.width() * 0.5).min(rect.height() * 0.5);
        if s <= 0.0 {
            return;
        }
        let Rect { x0, y0, x1, y1 } = rect;
        for edge in [
            Rect::new(x0, y0, x1, y0 + s),
            Rect::new(x0, y1 - s, x1, y1),
            Rect::new(x0, y0 + s, x0 + s, y1 - s),
            Rect::new(x1 - s, y0 + s, x1, y1 - s),
        ] {
            self.fill_rect(edge, color);
        }
    }

    /// Draw every shaped line of `block` with its top-left at `origin`.
    ///
    /// Glyphs use the brush they were shaped with unless `color` overrides it.
    pub(crate) fn draw_text(
        &mut self,
        block: &TextBlock,
        origin: Point,
        font: &vello_cpu::peniko::FontData,
        color: Option<Rgb8>,
    ) {
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        for line in &block.lines {
            let Some(layout) = &line.layout else {
                continue;
            };
            let at = origin + line.offset;
            self.ctx
                .set_transform(affine_to_cpu(Affine::translate(at.to_vec2())));

            for pl in layout.lines() {
                for item in pl.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };

                    self.ctx.set_paint(paint(color.unwrap_or(run.style().brush)));

                    // Absolute pen positions: run offset plus advances, on the line baseline.
                    let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    self.ctx
                        .glyph_run(font)
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
        }
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }

    /// Rasterize all recorded draws and read back straight RGB8 pixels.
    pub(crate) fn finish(mut self) -> SpotgridResult<image::RgbImage> {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);

        let rgb = premul_rgba8_to_rgb8(pixmap.data_as_u8_slice());
        image::RgbImage::from_raw(u32::from(self.width), u32::from(self.height), rgb)
            .ok_or_else(|| SpotgridError::render("pixmap size does not match canvas"))
    }
}

/// Build a glyph-run font handle from raw font bytes.
pub(crate) fn font_data(bytes: &[u8], index: u32) -> vello_cpu::peniko::FontData {
    vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes.to_vec()), index)
}

fn paint(c: Rgb8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, 255)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

/// Drop alpha after un-premultiplying; fully opaque pixels pass through unchanged.
fn premul_rgba8_to_rgb8(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len() / 4 * 3);
    for px in data.chunks_exact(4) {
        let a = px[3];
        if a == 255 || a == 0 {
            out.extend_from_slice(&px[..3]);
        } else {
            let unpremul = |c: u8| ((u16::from(c) * 255 + u16::from(a) / 2) / u16::from(a)).min(255) as u8;
            out.extend_from_slice(&[unpremul(px[0]), unpremul(px[1]), unpremul(px[2])]);
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
