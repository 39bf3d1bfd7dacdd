use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::foundation::error::{SpotgridError, SpotgridResult};

/// Font file looked up in the working directory when no font is configured.
pub const DEFAULT_FONT_FILE: &str = "NanumGothic-ExtraBold.ttf";

/// Families tried, in order, when falling back to installed fonts.
const FALLBACK_FAMILIES: &[&str] = &[
    "NanumGothic",
    "Noto Sans CJK KR",
    "Noto Sans KR",
    "Noto Sans",
    "DejaVu Sans",
    "Liberation Sans",
    "Arial",
];

/// Where a resolved font came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontSource {
    /// Loaded from a font file on disk.
    File(PathBuf),
    /// Installed system font chosen as the default fallback.
    System {
        /// Primary family name of the chosen face.
        family: String,
    },
}

/// Raw font data ready for registration with the shaper and rasterizer.
#[derive(Clone)]
pub struct ResolvedFont {
    /// Complete font file bytes (may be a collection).
    pub bytes: Arc<Vec<u8>>,
    /// Face index inside a font collection.
    pub index: u32,
    /// Origin of the bytes.
    pub source: FontSource,
}

impl std::fmt::Debug for ResolvedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedFont")
            .field("bytes_len", &self.bytes.len())
            .field("index", &self.index)
            .field("source", &self.source)
            .finish()
    }
}

/// Read a font file from disk.
pub fn load_font_file(path: &Path) -> SpotgridResult<ResolvedFont> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read font file '{}'", path.display()))?;
    if bytes.is_empty() {
        return Err(SpotgridError::font(format!(
            "font file '{}' is empty",
            path.display()
        )));
    }
    Ok(ResolvedFont {
        bytes: Arc::new(bytes),
        index: 0,
        source: FontSource::File(path.to_path_buf()),
    })
}

/// Pick a default face from the installed system fonts.
///
/// Prefers Hangul-capable families, then common sans families, then whatever face exists.
pub fn system_default_font() -> Option<ResolvedFont> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();

    let id = fallback_face(&db)?;

    let family = db
        .face(id)
        .and_then(|face| face.families.first().map(|(name, _)| name.clone()))
        .unwrap_or_else(|| "unknown".to_string());
    let (bytes, index) = db.with_face_data(id, |data, index| (data.to_vec(), index))?;

    Some(ResolvedFont {
        bytes: Arc::new(bytes),
        index,
        source: FontSource::System { family },
    })
}

/// Best fallback face in `db`: a listed family, then generic sans-serif, then any
/// proportional face, then any face at all.
fn fallback_face(db: &usvg::fontdb::Database) -> Option<usvg::fontdb::ID> {
    let mut families: Vec<usvg::fontdb::Family<'_>> = FALLBACK_FAMILIES
        .iter()
        .copied()
        .map(usvg::fontdb::Family::Name)
        .collect();
    families.push(usvg::fontdb::Family::SansSerif);

    let query = usvg::fontdb::Query {
        families: &families,
        ..Default::default()
    };
    db.query(&query)
        .or_else(|| db.faces().find(|f| !f.monospaced).map(|f| f.id))
        .or_else(|| db.faces().next().map(|f| f.id))
}

/// Resolve the font for a render, degrading instead of failing.
///
/// An explicitly requested file that cannot be read is logged and replaced by the
/// system default. Without a request, [`DEFAULT_FONT_FILE`] is tried quietly first.
/// Returns `None` only when no font exists at all; text is then skipped.
pub fn resolve_font(requested: Option<&Path>) -> Option<ResolvedFont> {
    match requested {
        Some(path) => match load_font_file(path) {
            Ok(font) => return Some(font),
            Err(err) => {
                tracing::warn!(%err, path = %path.display(), "font unavailable, using default font");
            }
        },
        None => {
            let path = Path::new(DEFAULT_FONT_FILE);
            if path.is_file() {
                match load_font_file(path) {
                    Ok(font) => return Some(font),
                    Err(err) => tracing::debug!(%err, "default font file unreadable"),
                }
            }
        }
    }

    let font = system_default_font();
    match &font {
        Some(f) => tracing::debug!(source = ?f.source, "using system fallback font"),
        None => tracing::warn!("no usable font found; text elements will be skipped"),
    }
    font
}

#[cfg(test)]
#[path = "../../tests/unit/text/fonts.rs"]
mod tests;
