use std::{
    path::{Path, PathBuf},
    sync::{Arc, OnceLock},
};

use anyhow::Context;

use crate::foundation::{
    error::{QuoteCardError, QuoteCardResult},
    math,
};

/// Logical font slot used by the card layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontRole {
    /// Quote body and watermark.
    Primary,
    /// Author line.
    Secondary,
    /// Reserved decorative slot; not used by the default layout.
    Accent,
}

impl FontRole {
    /// All roles, in resolution order.
    pub const ALL: [FontRole; 3] = [FontRole::Primary, FontRole::Secondary, FontRole::Accent];

    /// File expected in the fonts directory for this role.
    pub fn file_name(self) -> &'static str {
        match self {
            FontRole::Primary => "opensans.ttf",
            FontRole::Secondary => "playfair.ttf",
            FontRole::Accent => "handwritten.ttf",
        }
    }
}

/// Parsed outline font (TrueType/OpenType) ready for shaping and rasterization.
pub struct OutlineFont {
    id: u64,
    bytes: Arc<Vec<u8>>,
    family: String,
    origin: String,
}

impl std::fmt::Debug for OutlineFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutlineFont")
            .field("id", &format_args!("{:016x}", self.id))
            .field("bytes_len", &self.bytes.len())
            .field("family", &self.family)
            .field("origin", &self.origin)
            .finish()
    }
}

impl OutlineFont {
    /// Validate raw font bytes and wrap them. `origin` is a human-readable description used in
    /// logs (file path or system family).
    pub fn from_bytes(bytes: Vec<u8>, index: u32, origin: impl Into<String>) -> QuoteCardResult<Self> {
        let origin = origin.into();
        let family = read_family_name(&bytes, index)
            .ok_or_else(|| QuoteCardError::asset(format!("'{origin}' is not a usable font")))?;

        let id = math::fingerprint(&bytes);
        Ok(Self {
            id,
            bytes: Arc::new(bytes),
            family,
            origin,
        })
    }

    /// Content fingerprint, stable across loads of the same bytes.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Raw font file bytes.
    pub fn bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// Family name reported by the font's name table.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Where the font came from.
    pub fn origin(&self) -> &str {
        &self.origin
    }
}

fn read_family_name(bytes: &[u8], index: u32) -> Option<String> {
    let mut db = usvg::fontdb::Database::new();
    db.load_font_data(bytes.to_vec());
    db.faces()
        .find(|face| face.index == index)
        .or_else(|| db.faces().next())
        .and_then(|face| face.families.first().map(|(name, _)| name.clone()))
}

/// A resolved font face: an outline font or the built-in bitmap font.
#[derive(Clone, Debug)]
pub enum FontFace {
    /// Scalable outline font.
    Outline(Arc<OutlineFont>),
    /// Built-in 5x7 bitmap font.
    Builtin,
}

impl FontFace {
    /// Short description for logs.
    pub fn describe(&self) -> String {
        match self {
            FontFace::Outline(font) => format!("{} ({})", font.family(), font.origin()),
            FontFace::Builtin => "builtin bitmap".to_string(),
        }
    }

    /// Whether this is the built-in bitmap font.
    pub fn is_builtin(&self) -> bool {
        matches!(self, FontFace::Builtin)
    }
}

/// A font face at a requested pixel size.
#[derive(Clone, Debug)]
pub struct SizedFont {
    /// Face to draw with.
    pub face: FontFace,
    /// Requested size in pixels.
    pub size_px: f32,
}

impl SizedFont {
    /// Pair a face with a size.
    pub fn new(face: FontFace, size_px: f32) -> Self {
        Self { face, size_px }
    }
}

/// One step of the font fallback chain.
pub trait FontSource: Send + Sync {
    /// Name for logs.
    fn name(&self) -> &str;

    /// Try to produce a face for `role`. `Ok(None)` means "not available here, try next".
    fn load(&self, role: FontRole) -> QuoteCardResult<Option<FontFace>>;
}

/// Loads `<dir>/<role file>` from the fonts directory.
#[derive(Clone, Debug)]
pub struct FileFontSource {
    dir: PathBuf,
}

impl FileFontSource {
    /// Source over the given fonts directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl FontSource for FileFontSource {
    fn name(&self) -> &str {
        "fonts-dir"
    }

    fn load(&self, role: FontRole) -> QuoteCardResult<Option<FontFace>> {
        let path = self.dir.join(role.file_name());
        if !path.is_file() {
            return Ok(None);
        }
        let font = load_font_file(&path)?;
        Ok(Some(FontFace::Outline(Arc::new(font))))
    }
}

/// Read and validate a font file.
pub fn load_font_file(path: &Path) -> QuoteCardResult<OutlineFont> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read font '{}'", path.display()))
        .map_err(|e| QuoteCardError::asset(format!("{e:#}")))?;
    OutlineFont::from_bytes(bytes, 0, path.display().to_string())
}

/// Looks up named families among the fonts installed on the host.
pub struct SystemFontSource {
    families: Vec<String>,
    db: OnceLock<usvg::fontdb::Database>,
}

impl std::fmt::Debug for SystemFontSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemFontSource")
            .field("families", &self.families)
            .field("loaded", &self.db.get().is_some())
            .finish()
    }
}

impl SystemFontSource {
    /// Families tried when no list is configured.
    pub const DEFAULT_FAMILIES: [&'static str; 3] = ["Arial", "DejaVu Sans", "Liberation Sans"];

    /// Source trying `families` in order.
    pub fn new<I, S>(families: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            families: families.into_iter().map(Into::into).collect(),
            db: OnceLock::new(),
        }
    }

    fn database(&self) -> &usvg::fontdb::Database {
        self.db.get_or_init(|| {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            tracing::debug!(faces = db.len(), "loaded system font database");
            db
        })
    }
}

impl Default for SystemFontSource {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FAMILIES)
    }
}

impl FontSource for SystemFontSource {
    fn name(&self) -> &str {
        "system"
    }

    fn load(&self, _role: FontRole) -> QuoteCardResult<Option<FontFace>> {
        use usvg::fontdb::{Family, Query, Stretch, Style, Weight};

        let db = self.database();
        for family in &self.families {
            let families = [Family::Name(family.as_str())];
            let query = Query {
                families: &families,
                weight: Weight::NORMAL,
                stretch: Stretch::Normal,
                style: Style::Normal,
            };
            let Some(id) = db.query(&query) else {
                continue;
            };
            let Some((bytes, index)) = db.with_face_data(id, |data, index| (data.to_vec(), index))
            else {
                continue;
            };
            let font = OutlineFont::from_bytes(bytes, index, format!("system:{family}"))?;
            return Ok(Some(FontFace::Outline(Arc::new(font))));
        }
        Ok(None)
    }
}

/// Terminal step that always yields the built-in bitmap font.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinFontSource;

impl FontSource for BuiltinFontSource {
    fn name(&self) -> &str {
        "builtin"
    }

    fn load(&self, _role: FontRole) -> QuoteCardResult<Option<FontFace>> {
        Ok(Some(FontFace::Builtin))
    }
}

/// Ordered font fallback chain.
pub struct FontResolver {
    sources: Vec<Box<dyn FontSource>>,
}

impl FontResolver {
    /// Chain over explicit sources. The built-in font is still used if every source declines.
    pub fn new(sources: Vec<Box<dyn FontSource>>) -> Self {
        Self { sources }
    }

    /// Fonts directory, then common system families, then the built-in font.
    pub fn standard(fonts_dir: impl Into<PathBuf>) -> Self {
        Self::new(vec![
            Box::new(FileFontSource::new(fonts_dir)),
            Box::new(SystemFontSource::default()),
            Box::new(BuiltinFontSource),
        ])
    }

    /// Fonts directory, then the built-in font. Skips the host font scan.
    pub fn without_system(fonts_dir: impl Into<PathBuf>) -> Self {
        Self::new(vec![
            Box::new(FileFontSource::new(fonts_dir)),
            Box::new(BuiltinFontSource),
        ])
    }

    /// Resolve a face for `role`, logging every step that fails.
    pub fn resolve(&self, role: FontRole) -> FontFace {
        for source in &self.sources {
            match source.load(role) {
                Ok(Some(face)) => {
                    tracing::debug!(?role, source = source.name(), face = %face.describe(), "font resolved");
                    return face;
                }
                Ok(None) => {
                    tracing::debug!(?role, source = source.name(), "font source declined");
                }
                Err(err) => {
                    tracing::warn!(?role, source = source.name(), error = %err, "font source failed");
                }
            }
        }
        tracing::warn!(?role, "every font source failed, using builtin bitmap font");
        FontFace::Builtin
    }

    /// Resolve all three roles.
    pub fn resolve_book(&self) -> FontBook {
        FontBook {
            primary: self.resolve(FontRole::Primary),
            secondary: self.resolve(FontRole::Secondary),
            accent: self.resolve(FontRole::Accent),
        }
    }
}

/// Faces resolved once per role and shared read-only across renders.
#[derive(Clone, Debug)]
pub struct FontBook {
    /// Quote and watermark face.
    pub primary: FontFace,
    /// Author face.
    pub secondary: FontFace,
    /// Reserved accent face.
    pub accent: FontFace,
}

impl FontBook {
    /// Book using the built-in font for every role.
    pub fn builtin() -> Self {
        Self {
            primary: FontFace::Builtin,
            secondary: FontFace::Builtin,
            accent: FontFace::Builtin,
        }
    }

    /// Face for `role`.
    pub fn face(&self, role: FontRole) -> &FontFace {
        match role {
            FontRole::Primary => &self.primary,
            FontRole::Secondary => &self.secondary,
            FontRole::Accent => &self.accent,
        }
    }

    /// Face for `role` at `size_px`.
    pub fn sized(&self, role: FontRole, size_px: f32) -> SizedFont {
        SizedFont::new(self.face(role).clone(), size_px)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
