use std::{path::Path, sync::Arc};

use anyhow::Context as _;

use crate::foundation::error::{HanoiError, HanoiResult};

/// Raw font face used for both shaping and glyph rasterization.
#[derive(Clone)]
pub struct CounterFont {
    /// Family name reported by the face.
    pub family: String,
    /// Font file bytes.
    pub bytes: Arc<Vec<u8>>,
    /// Face index within a collection file.
    pub index: u32,
}

impl std::fmt::Debug for CounterFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CounterFont")
            .field("family", &self.family)
            .field("bytes_len", &self.bytes.len())
            .field("index", &self.index)
            .finish()
    }
}

/// Where the counter font comes from.
#[derive(Clone, Debug)]
pub enum FontSource {
    /// Resolve a family name against installed system fonts.
    System(String),
    /// Load the first face of a font file.
    File(std::path::PathBuf),
}

impl CounterFont {
    /// Load the font described by `source`.
    pub fn load(source: &FontSource) -> HanoiResult<Self> {
        match source {
            FontSource::System(family) => Self::from_system(family),
            FontSource::File(path) => Self::from_file(path),
        }
    }

    /// Resolve `family` against system fonts, falling back to sans-serif and then to any
    /// installed face.
    pub fn from_system(family: &str) -> HanoiResult<Self> {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        Self::from_database(&db, family)
    }

    /// Load the first face of the font file at `path`.
    pub fn from_file(path: &Path) -> HanoiResult<Self> {
        let mut db = usvg::fontdb::Database::new();
        db.load_font_file(path)
            .with_context(|| format!("load font file '{}'", path.display()))?;
        let face = db
            .faces()
            .next()
            .ok_or_else(|| HanoiError::font(format!("no faces in '{}'", path.display())))?;
        let id = face.id;
        face_from_db(&db, id)
    }

    fn from_database(db: &usvg::fontdb::Database, family: &str) -> HanoiResult<Self> {
        let families = [
            usvg::fontdb::Family::Name(family),
            usvg::fontdb::Family::SansSerif,
        ];
        let query = usvg::fontdb::Query {
            families: &families,
            weight: usvg::fontdb::Weight::NORMAL,
            stretch: usvg::fontdb::Stretch::Normal,
            style: usvg::fontdb::Style::Normal,
        };

        let id = match db.query(&query) {
            Some(id) => id,
            None => db
                .faces()
                .next()
                .map(|f| f.id)
                .ok_or_else(|| HanoiError::font("no system fonts available"))?,
        };

        let font = face_from_db(db, id)?;
        if !font.family.eq_ignore_ascii_case(family) {
            tracing::warn!(
                requested = family,
                resolved = %font.family,
                "counter font family not found, using fallback"
            );
        }
        Ok(font)
    }
}

fn face_from_db(db: &usvg::fontdb::Database, id: usvg::fontdb::ID) -> HanoiResult<CounterFont> {
    let family = db
        .face(id)
        .and_then(|f| f.families.first().map(|(name, _)| name.clone()))
        .unwrap_or_default();
    let (bytes, index) = db
        .with_face_data(id, |data, index| (data.to_vec(), index))
        .ok_or_else(|| HanoiError::font("font face data unavailable"))?;
    tracing::debug!(family = %family, bytes = bytes.len(), index, "resolved counter font");
    Ok(CounterFont {
        family,
        bytes: Arc::new(bytes),
        index,
    })
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush colour carried through Parley layouts.
pub struct TextBrush {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

/// Size of a shaped single-line run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// Advance width.
    pub width: f32,
    /// Ascent above the baseline.
    pub ascent: f32,
    /// Descent below the baseline.
    pub descent: f32,
    /// Baseline offset from the layout top.
    pub baseline: f32,
}

/// Shapes counter labels with one fixed font and size.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    family_name: String,
    size_px: f32,
    font_data: vello_cpu::peniko::FontData,
}

impl TextLayoutEngine {
    /// Register `font` and fix the text size.
    pub fn new(font: &CounterFont, size_px: f32) -> HanoiResult<Self> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(HanoiError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| HanoiError::font("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| HanoiError::font("registered font family has no name"))?
            .to_string();

        let font_data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font.bytes.to_vec()),
            font.index,
        );

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            size_px,
            font_data,
        })
    }

    /// Text size in pixels.
    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    /// Font handle for glyph rasterization.
    pub fn font_data(&self) -> &vello_cpu::peniko::FontData {
        &self.font_data
    }

    /// Shape `text` on a single unbounded line.
    pub fn layout(&mut self, text: &str, brush: TextBrush) -> parley::Layout<TextBrush> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(self.size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }

    /// Measure `text` without drawing it.
    pub fn measure(&mut self, text: &str) -> TextMetrics {
        let layout = self.layout(text, TextBrush::default());
        layout_metrics(&layout)
    }
}

/// Metrics of the first line of `layout` (zeroes for an empty layout).
pub fn layout_metrics(layout: &parley::Layout<TextBrush>) -> TextMetrics {
    let (ascent, descent, baseline) = layout
        .lines()
        .next()
        .map(|line| {
            let m = line.metrics();
            (m.ascent, m.descent, m.baseline)
        })
        .unwrap_or((0.0, 0.0, 0.0));
    TextMetrics {
        width: layout.width(),
        ascent,
        descent,
        baseline,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
