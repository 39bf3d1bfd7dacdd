use crate::{
    config::model::{GridConfig, PuzzleConfig, TextAlign},
    foundation::core::{Canvas, Point, Rect, Rgb8, Size, Vec2},
    placement::target::AnswerPosition,
    text::engine::{TextBlock, TextLayoutEngine},
};

/// Highlight half-extent as a multiple of the grid font size (side = 1.5x font size).
pub const HIGHLIGHT_HALF_EXTENT_FACTOR: f64 = 0.75;
/// Highlight outline thickness in pixels.
pub const HIGHLIGHT_STROKE_PX: f64 = 5.0;

/// A measured text element with its absolute top-left position.
#[derive(Clone, Debug)]
pub struct PlacedText {
    /// Shaped lines and their block-relative offsets.
    pub block: TextBlock,
    /// Top-left of the block in canvas pixels.
    pub origin: Point,
    /// Fill color.
    pub color: Rgb8,
}

impl PlacedText {
    /// Bounding box in canvas pixels.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.block.size())
    }
}

/// Cell-center geometry of the character grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridGeometry {
    /// Row count.
    pub rows: u32,
    /// Column count.
    pub cols: u32,
    /// Center of cell `(0, 0)`.
    pub start: Point,
    /// Distance between neighbouring cell centers.
    pub spacing: Vec2,
}

impl GridGeometry {
    /// Geometry described by a grid config.
    pub fn from_config(grid: &GridConfig) -> Self {
        Self {
            rows: grid.rows,
            cols: grid.cols,
            start: Point::new(grid.start_x, grid.start_y),
            spacing: Vec2::new(grid.spacing_x, grid.spacing_y),
        }
    }

    /// Center of cell `(row, col)`. Not bounds-checked against the canvas.
    pub fn cell_center(&self, row: u32, col: u32) -> Point {
        Point::new(
            self.start.x + f64::from(col) * self.spacing.x,
            self.start.y + f64::from(row) * self.spacing.y,
        )
    }
}

/// One grid cell with the content it displays.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridCell<'a> {
    /// Row index.
    pub row: u32,
    /// Column index.
    pub col: u32,
    /// Center in canvas pixels.
    pub center: Point,
    /// Target character for the answer cell, base character otherwise.
    pub content: &'a str,
    /// Whether this is the answer cell.
    pub is_target: bool,
}

/// Enumerate all `rows x cols` cells in row-major order.
pub fn grid_cells(config: &PuzzleConfig, target: AnswerPosition) -> Vec<GridCell<'_>> {
    let geom = GridGeometry::from_config(&config.grid);
    let mut cells = Vec::with_capacity(geom.rows as usize * geom.cols as usize);
    for row in 0..geom.rows {
        for col in 0..geom.cols {
            let is_target = AnswerPosition::new(row, col) == target;
            cells.push(GridCell {
                row,
                col,
                center: geom.cell_center(row, col),
                content: if is_target {
                    &config.target_char
                } else {
                    &config.base_char
                },
                is_target,
            });
        }
    }
    cells
}

/// Left edge that centers a block of `content_width` within `container_width`.
pub fn centered_x(container_width: f64, content_width: f64) -> f64 {
    (container_width - content_width) * 0.5
}

/// Top-left that centers a box of `size` on `center`.
pub fn centered_on(center: Point, size: Size) -> Point {
    Point::new(center.x - size.width * 0.5, center.y - size.height * 0.5)
}

/// Answer highlight square around `center`, snapped outward to whole pixels.
pub fn highlight_rect(center: Point, grid_font_size: f32) -> Rect {
    let half = f64::from(grid_font_size) * HIGHLIGHT_HALF_EXTENT_FACTOR;
    Rect::new(
        center.x - half,
        center.y - half,
        center.x + half,
        center.y + half,
    )
    .expand()
}

/// Absolute geometry for every drawable element of one config.
#[derive(Clone, Debug)]
pub struct ResolvedLayout {
    /// Canvas size.
    pub canvas: Canvas,
    /// Header band from `(0, 0)` to `(canvas_width, header_height)`.
    pub header_box: Rect,
    /// Header text elements that measured successfully, in config order.
    pub header_lines: Vec<PlacedText>,
    /// Grid cell geometry.
    pub grid: GridGeometry,
    /// Measured base character, `None` when measurement failed.
    pub base_glyph: Option<TextBlock>,
    /// Measured target character, `None` when measurement failed.
    pub target_glyph: Option<TextBlock>,
    /// Footer text if configured and measured.
    pub footer: Option<PlacedText>,
}

impl ResolvedLayout {
    /// Measured content block shown in `cell`.
    pub fn cell_glyph(&self, cell: &GridCell<'_>) -> Option<&TextBlock> {
        if cell.is_target {
            self.target_glyph.as_ref()
        } else {
            self.base_glyph.as_ref()
        }
    }

    /// Top-left at which a cell's content block is drawn (center-anchored).
    pub fn cell_origin(&self, cell: &GridCell<'_>) -> Option<Point> {
        self.cell_glyph(cell)
            .map(|glyph| centered_on(cell.center, glyph.size()))
    }
}

/// Measure all text and compute absolute positions before any drawing.
///
/// Placeholders are substituted before measuring. An element whose measurement
/// fails is left out of the layout and logged; the rest is unaffected.
#[tracing::instrument(skip_all, fields(rows = config.grid.rows, cols = config.grid.cols))]
pub fn resolve_layout(config: &PuzzleConfig, engine: &mut TextLayoutEngine) -> ResolvedLayout {
    engine.use_font(config.font_path.as_deref());
    let canvas_w = f64::from(config.canvas.width);

    let mut header_lines = Vec::with_capacity(config.header.lines.len());
    for (idx, line) in config.header.lines.iter().enumerate() {
        let text = config.expand(&line.content);
        let block = match engine.layout_block(
            &text,
            line.font_size,
            line.color,
            line.line_spacing.unwrap_or(0.0),
            line.align.unwrap_or_default(),
        ) {
            Ok(b) => b,
            Err(err) => {
                tracing::warn!(%err, line = idx, "skipping header text");
                continue;
            }
        };
        let x = line.x.unwrap_or_else(|| centered_x(canvas_w, block.width));
        header_lines.push(PlacedText {
            block,
            origin: Point::new(x, line.y),
            color: line.color,
        });
    }

    let grid = &config.grid;
    let mut glyph = |content: &str, what: &str| {
        engine
            .layout_block(content, grid.font_size, grid.color, 0.0, TextAlign::Center)
            .inspect_err(|err| tracing::warn!(%err, "skipping {what} grid glyph"))
            .ok()
    };
    let base_glyph = glyph(&config.base_char, "base");
    let target_glyph = glyph(&config.target_char, "target");

    let footer = config.footer.as_ref().and_then(|f| {
        let text = config.expand(&f.content);
        match engine.layout_block(
            &text,
            f.font_size,
            f.color,
            f.line_spacing.unwrap_or(0.0),
            f.align.unwrap_or_default(),
        ) {
            Ok(block) => Some(PlacedText {
                origin: Point::new(centered_x(canvas_w, block.width), f.y),
                block,
                color: f.color,
            }),
            Err(err) => {
                tracing::warn!(%err, "skipping footer text");
                None
            }
        }
    });

    tracing::debug!(
        header_lines = header_lines.len(),
        footer = footer.is_some(),
        "layout resolved"
    );

    ResolvedLayout {
        canvas: config.canvas,
        header_box: Rect::new(0.0, 0.0, canvas_w, config.header.height),
        header_lines,
        grid: GridGeometry::from_config(grid),
        base_glyph,
        target_glyph,
        footer,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/resolver.rs"]
mod tests;
