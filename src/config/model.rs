use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{
    config::presets::ProblemSet,
    foundation::core::{Canvas, Rgb8},
    foundation::error::{SpotgridError, SpotgridResult},
};

/// Token replaced with the target label inside text templates.
pub const TARGET_TOKEN: &str = "{target}";
/// Token replaced with the base character inside text templates.
pub const BASE_TOKEN: &str = "{base}";

/// Horizontal alignment of lines inside a multi-line text block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Flush left within the block.
    Left,
    /// Centered within the block.
    #[default]
    Center,
    /// Flush right within the block.
    Right,
}

/// One header text element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextLine {
    /// Text template; may contain `{target}` / `{base}` and `\n` line breaks.
    pub content: String,
    /// Font size in pixels.
    pub font_size: f32,
    /// Top edge of the text block in canvas pixels.
    pub y: f64,
    /// Fill color.
    pub color: Rgb8,
    /// Absolute left edge; when absent the block is centered on the canvas width.
    pub x: Option<f64>,
    /// Extra pixels between consecutive lines.
    pub line_spacing: Option<f64>,
    /// Alignment of lines within the block.
    pub align: Option<TextAlign>,
}

impl Default for TextLine {
    fn default() -> Self {
        Self {
            content: String::new(),
            font_size: 40.0,
            y: 0.0,
            color: Rgb8::WHITE,
            x: None,
            line_spacing: None,
            align: None,
        }
    }
}

/// Header band at the top of the canvas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    /// Band height in pixels, measured from the top edge.
    pub height: f64,
    /// Band fill color.
    pub background: Rgb8,
    /// One or two text elements drawn over the band.
    pub lines: Vec<TextLine>,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            height: 310.0,
            background: Rgb8::new(0x1E, 0x2A, 0x47),
            lines: vec![
                TextLine {
                    content: "숫자 찾기 도전".to_string(),
                    font_size: 60.0,
                    y: 90.0,
                    color: Rgb8::WHITE,
                    ..TextLine::default()
                },
                TextLine {
                    content: "3초 안에 {target} 찾기".to_string(),
                    font_size: 80.0,
                    y: 180.0,
                    color: Rgb8::new(0xFF, 0xD7, 0x00),
                    ..TextLine::default()
                },
            ],
        }
    }
}

/// Character grid geometry and styling.
///
/// Coordinates are cell centers: cell `(r, c)` sits at
/// `(start_x + c * spacing_x, start_y + r * spacing_y)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Row count, at least 1.
    pub rows: u32,
    /// Column count, at least 1.
    pub cols: u32,
    /// Glyph size in pixels.
    pub font_size: f32,
    /// Glyph color.
    pub color: Rgb8,
    /// Center x of column 0.
    pub start_x: f64,
    /// Center y of row 0.
    pub start_y: f64,
    /// Horizontal distance between column centers.
    pub spacing_x: f64,
    /// Vertical distance between row centers.
    pub spacing_y: f64,
    /// Target glyph color in the answer image; `None` keeps `color`.
    pub answer_color: Option<Rgb8>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            font_size: 70.0,
            color: Rgb8::BLACK,
            start_x: 79.0,
            start_y: 400.0,
            spacing_x: 100.0,
            spacing_y: 100.0,
            answer_color: None,
        }
    }
}

/// Footer text centered horizontally below the grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    /// Text template; may contain placeholders and `\n` line breaks.
    pub content: String,
    /// Font size in pixels.
    pub font_size: f32,
    /// Fill color.
    pub color: Rgb8,
    /// Top edge of the text block in canvas pixels.
    pub y: f64,
    /// Extra pixels between consecutive lines.
    pub line_spacing: Option<f64>,
    /// Alignment of lines within the block.
    pub align: Option<TextAlign>,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            content: String::new(),
            font_size: 48.0,
            color: Rgb8::BLACK,
            y: 1440.0,
            line_spacing: None,
            align: None,
        }
    }
}

/// Complete, immutable input of one render call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleConfig {
    /// Output canvas size.
    pub canvas: Canvas,
    /// Canvas fill color.
    pub background: Rgb8,
    /// Header band and its text.
    pub header: HeaderConfig,
    /// Character grid.
    pub grid: GridConfig,
    /// Optional footer text.
    pub footer: Option<FooterConfig>,
    /// Filler string shown in every non-target cell.
    pub base_char: String,
    /// String shown in exactly one cell.
    pub target_char: String,
    /// Label substituted for `{target}`; falls back to `target_char`.
    pub target_name: Option<String>,
    /// TrueType/OpenType font file; a system font is used when missing.
    pub font_path: Option<PathBuf>,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::PORTRAIT_4_5,
            background: Rgb8::WHITE,
            header: HeaderConfig::default(),
            grid: GridConfig::default(),
            footer: None,
            base_char: "60".to_string(),
            target_char: "06".to_string(),
            target_name: None,
            font_path: None,
        }
    }
}

impl PuzzleConfig {
    /// Parse a config from JSON text. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> SpotgridResult<Self> {
        serde_json::from_str(s).map_err(|e| SpotgridError::config(format!("invalid config: {e}")))
    }

    /// Read and parse a JSON config file.
    pub fn from_path(path: &Path) -> SpotgridResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Pretty-printed JSON representation.
    pub fn to_json_pretty(&self) -> SpotgridResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SpotgridError::config(format!("serialize config: {e}")))
    }

    /// Check the documented input ranges.
    ///
    /// Rendering itself never calls this; callers validate once at the boundary.
    pub fn validate(&self) -> SpotgridResult<()> {
        let max = u32::from(u16::MAX);
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(SpotgridError::config("canvas dimensions must be > 0"));
        }
        if self.canvas.width > max || self.canvas.height > max {
            return Err(SpotgridError::config(format!(
                "canvas dimensions must be <= {max}"
            )));
        }
        if !self.header.height.is_finite() || self.header.height < 0.0 {
            return Err(SpotgridError::config(
                "header height must be finite and >= 0",
            ));
        }
        if self.header.lines.len() > 2 {
            return Err(SpotgridError::config(
                "header supports at most two text lines",
            ));
        }
        for (idx, line) in self.header.lines.iter().enumerate() {
            check_font_size(line.font_size, &format!("header line {idx}"))?;
            check_finite(line.y, &format!("header line {idx} y"))?;
            if let Some(x) = line.x {
                check_finite(x, &format!("header line {idx} x"))?;
            }
            check_spacing(line.line_spacing, &format!("header line {idx}"))?;
        }

        let g = &self.grid;
        if g.rows == 0 || g.cols == 0 {
            return Err(SpotgridError::config("grid rows and cols must be >= 1"));
        }
        check_font_size(g.font_size, "grid")?;
        for (v, what) in [
            (g.start_x, "grid start_x"),
            (g.start_y, "grid start_y"),
            (g.spacing_x, "grid spacing_x"),
            (g.spacing_y, "grid spacing_y"),
        ] {
            check_finite(v, what)?;
        }

        if let Some(footer) = &self.footer {
            check_font_size(footer.font_size, "footer")?;
            check_finite(footer.y, "footer y")?;
            check_spacing(footer.line_spacing, "footer")?;
        }

        if self.base_char.is_empty() || self.target_char.is_empty() {
            return Err(SpotgridError::config(
                "base_char and target_char must be non-empty",
            ));
        }
        Ok(())
    }

    /// Text substituted for `{target}`.
    pub fn target_label(&self) -> &str {
        self.target_name.as_deref().unwrap_or(&self.target_char)
    }

    /// Apply placeholder substitution to one template field.
    pub fn expand(&self, template: &str) -> String {
        substitute_placeholders(template, self.target_label(), &self.base_char)
    }

    /// Overwrite the base/target characters with a built-in problem set.
    pub fn apply_preset(&mut self, preset: &ProblemSet) {
        self.base_char = preset.base.to_string();
        self.target_char = preset.target.to_string();
        self.target_name = Some(preset.target_name.to_string());
    }
}

/// Replace `{target}` and `{base}` in a single left-to-right pass.
///
/// Replacement text is never re-scanned, so a target containing `{base}` stays literal.
pub fn substitute_placeholders(template: &str, target: &str, base: &str) -> String {
    let mut out = String::with_capacity(template.len() + target.len());
    let mut rest = template;
    while let Some(idx) = rest.find('{') {
        out.push_str(&rest[..idx]);
        let tail = &rest[idx..];
        if let Some(after) = tail.strip_prefix(TARGET_TOKEN) {
            out.push_str(target);
            rest = after;
        } else if let Some(after) = tail.strip_prefix(BASE_TOKEN) {
            out.push_str(base);
            rest = after;
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

fn check_font_size(size: f32, what: &str) -> SpotgridResult<()> {
    if !size.is_finite() || size <= 0.0 {
        return Err(SpotgridError::config(format!(
            "{what} font_size must be finite and > 0"
        )));
    }
    Ok(())
}

fn check_finite(v: f64, what: &str) -> SpotgridResult<()> {
    if !v.is_finite() {
        return Err(SpotgridError::config(format!("{what} must be finite")));
    }
    Ok(())
}

fn check_spacing(spacing: Option<f64>, what: &str) -> SpotgridResult<()> {
    match spacing {
        Some(s) if !s.is_finite() => Err(SpotgridError::config(format!(
            "{what} line_spacing must be finite"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
