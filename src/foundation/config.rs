use std::path::PathBuf;

/// Environment variable naming a regular-weight font file to try first.
pub const FONT_ENV: &str = "SLIDEFORGE_FONT";
/// Environment variable naming a bold font file to try first.
pub const FONT_BOLD_ENV: &str = "SLIDEFORGE_FONT_BOLD";

/// Where the raster backend looks for font files.
///
/// Paths are tried in order; the first readable file wins. When nothing is readable the
/// raster backend draws with its built-in bitmap font instead of failing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontConfig {
    pub(crate) regular: Vec<PathBuf>,
    pub(crate) bold: Vec<PathBuf>,
}

impl Default for FontConfig {
    fn default() -> Self {
        let regular = [
            "/Library/Fonts/NeueHaasDisplay-Roman.ttf",
            "/System/Library/Fonts/Helvetica.ttc",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "C:\\Windows\\Fonts\\arial.ttf",
        ];
        let bold = [
            "/Library/Fonts/NeueHaasDisplay-Bold.ttf",
            "/System/Library/Fonts/Helvetica.ttc",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
            "C:\\Windows\\Fonts\\arialbd.ttf",
        ];
        Self {
            regular: regular.iter().map(PathBuf::from).collect(),
            bold: bold.iter().map(PathBuf::from).collect(),
        }
    }
}

impl FontConfig {
    /// Defaults with `SLIDEFORGE_FONT` / `SLIDEFORGE_FONT_BOLD` prepended when set.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Some(p) = std::env::var_os(FONT_ENV) {
            cfg.regular.insert(0, PathBuf::from(p));
        }
        if let Some(p) = std::env::var_os(FONT_BOLD_ENV) {
            cfg.bold.insert(0, PathBuf::from(p));
        }
        cfg
    }

    /// Config with no search paths at all; always renders with the built-in font.
    pub fn builtin_only() -> Self {
        Self {
            regular: Vec::new(),
            bold: Vec::new(),
        }
    }

    /// Try `path` before every other regular-weight candidate.
    pub fn with_regular(mut self, path: impl Into<PathBuf>) -> Self {
        self.regular.insert(0, path.into());
        self
    }

    /// Try `path` before every other bold candidate.
    pub fn with_bold(mut self, path: impl Into<PathBuf>) -> Self {
        self.bold.insert(0, path.into());
        self
    }

    /// Candidate paths for a weight, bold first falling back to the regular list.
    pub(crate) fn candidates(&self, bold: bool) -> impl Iterator<Item = &PathBuf> {
        let head: &[PathBuf] = if bold { &self.bold } else { &[] };
        head.iter().chain(self.regular.iter())
    }
}

/// Options for the PNG/JPEG backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterOpts {
    pub(crate) fonts: FontConfig,
    pub(crate) jpeg_quality: u8,
}

impl Default for RasterOpts {
    fn default() -> Self {
        Self {
            fonts: FontConfig::from_env(),
            jpeg_quality: 95,
        }
    }
}

impl RasterOpts {
    /// Return options with a replaced font configuration.
    pub fn with_fonts(mut self, fonts: FontConfig) -> Self {
        self.fonts = fonts;
        self
    }

    /// Return options with a replaced JPEG quality (clamped to `1..=100`).
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }
}

/// Options for the presentation backend.
///
/// `fonts` is only used to measure text so wrapped lines break where the raster backend breaks
/// them; the document itself names `font_family`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentOpts {
    pub(crate) font_family: String,
    pub(crate) fonts: FontConfig,
}

impl Default for DocumentOpts {
    fn default() -> Self {
        Self {
            font_family: "Neue Haas Grotesk Display Pro".to_owned(),
            fonts: FontConfig::from_env(),
        }
    }
}

impl DocumentOpts {
    /// Return options with a replaced typeface name written into every text run.
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    /// Return options with a replaced font configuration for line measurement.
    pub fn with_fonts(mut self, fonts: FontConfig) -> Self {
        self.fonts = fonts;
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
