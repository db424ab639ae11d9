//! Backend-agnostic font settings and the factory capability.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Color used whenever a configured color cannot be parsed.
pub const FALLBACK_COLOR: &str = "000000";

/// Size used whenever a configured size is not a positive number.
pub const FALLBACK_FONT_SIZE: f64 = 12.0;

/// Paragraph justification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Justification {
    /// Left alignment (default)
    #[default]
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
    /// Justified alignment
    Justify,
}

impl Justification {
    /// Parse a justification name, case-insensitively.
    ///
    /// Unknown values fall back to [`Justification::Left`] instead of failing.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "left" | "start" => Justification::Left,
            "center" | "centre" => Justification::Center,
            "right" | "end" => Justification::Right,
            "justify" | "justified" | "both" => Justification::Justify,
            other => {
                log::warn!("Unknown justification '{}', using left", other);
                Justification::Left
            }
        }
    }

    /// Lowercase name of the justification.
    pub fn as_str(&self) -> &'static str {
        match self {
            Justification::Left => "left",
            Justification::Center => "center",
            Justification::Right => "right",
            Justification::Justify => "justify",
        }
    }
}

fn hex_color_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^#?(?:[0-9A-Fa-f]{6}|[0-9A-Fa-f]{3})$").expect("static color pattern")
    })
}

/// Normalize a hex color to six uppercase digits without the leading `#`.
///
/// Accepts `#RRGGBB`, `RRGGBB` and the short `#RGB` form. Anything else
/// yields [`FALLBACK_COLOR`].
pub fn normalize_hex_color(color: &str) -> String {
    let color = color.trim();
    if !hex_color_regex().is_match(color) {
        log::warn!("Malformed color '{}', using #{}", color, FALLBACK_COLOR);
        return FALLBACK_COLOR.to_string();
    }

    let hex = color.trim_start_matches('#');
    if hex.len() == 3 {
        hex.chars()
            .flat_map(|c| [c, c])
            .collect::<String>()
            .to_uppercase()
    } else {
        hex.to_uppercase()
    }
}

/// Whether `color` is a well-formed hex color.
pub fn is_valid_hex_color(color: &str) -> bool {
    hex_color_regex().is_match(color.trim())
}

/// Visual text styling shared by every backend.
///
/// Values are stored as given. Readers go through [`FontSettings::color_hex`],
/// [`FontSettings::rgb`] and [`FontSettings::effective_size`], which default
/// malformed values instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSettings {
    /// Text color as an RGB hex string, e.g. `#001133`
    pub color: String,

    /// Font size in points
    pub size: f64,

    /// Bold weight
    pub bold: bool,

    /// Italic slant
    pub italic: bool,

    /// Single underline
    pub underline: bool,

    /// Paragraph justification
    pub justification: Justification,
}

impl FontSettings {
    /// Create font settings with black 12pt left-aligned text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the color and return self.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Set the size in points and return self.
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// Set bold and return self.
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Set italic and return self.
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Set underline and return self.
    pub fn with_underline(mut self, underline: bool) -> Self {
        self.underline = underline;
        self
    }

    /// Set justification and return self.
    pub fn with_justification(mut self, justification: Justification) -> Self {
        self.justification = justification;
        self
    }

    /// Color as six uppercase hex digits, defaulting to black when malformed.
    pub fn color_hex(&self) -> String {
        normalize_hex_color(&self.color)
    }

    /// Color as an RGB triple.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let hex = self.color_hex();
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).unwrap_or(0)
        };
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// Size in points, defaulting to [`FALLBACK_FONT_SIZE`] when not positive.
    pub fn effective_size(&self) -> f64 {
        if self.size.is_finite() && self.size > 0.0 {
            self.size
        } else {
            FALLBACK_FONT_SIZE
        }
    }

    /// Whether the stored values satisfy the color and size invariants.
    pub fn is_well_formed(&self) -> bool {
        is_valid_hex_color(&self.color) && self.size.is_finite() && self.size > 0.0
    }
}

impl Default for FontSettings {
    fn default() -> Self {
        Self {
            color: format!("#{}", FALLBACK_COLOR),
            size: FALLBACK_FONT_SIZE,
            bold: false,
            italic: false,
            underline: false,
            justification: Justification::Left,
        }
    }
}

/// Process-wide seed values handed to a font settings factory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontDefaults {
    /// Default text color
    pub color: String,
    /// Default size in points
    pub size: f64,
    /// Default bold weight
    pub bold: bool,
    /// Default italic slant
    pub italic: bool,
    /// Default underline
    pub underline: bool,
    /// Default justification
    pub justification: Justification,
}

impl FontDefaults {
    /// Create the built-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Set the default size in points.
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// Set the default bold weight.
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Set the default italic slant.
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Set the default underline.
    pub fn with_underline(mut self, underline: bool) -> Self {
        self.underline = underline;
        self
    }

    /// Set the default justification.
    pub fn with_justification(mut self, justification: Justification) -> Self {
        self.justification = justification;
        self
    }

    /// Load defaults from a JSON string. Missing keys keep their built-in value.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let defaults: FontDefaults = serde_json::from_str(json)?;
        Ok(defaults.sanitized())
    }

    /// Load defaults from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    /// Replace malformed color and size values with the fallbacks.
    pub fn sanitized(mut self) -> Self {
        if !is_valid_hex_color(&self.color) {
            log::warn!(
                "Font defaults color '{}' is malformed, using #{}",
                self.color,
                FALLBACK_COLOR
            );
            self.color = format!("#{}", FALLBACK_COLOR);
        }
        if !(self.size.is_finite() && self.size > 0.0) {
            log::warn!(
                "Font defaults size {} is not positive, using {}",
                self.size,
                FALLBACK_FONT_SIZE
            );
            self.size = FALLBACK_FONT_SIZE;
        }
        self
    }

    /// Produce a fresh [`FontSettings`] seeded from these defaults.
    pub fn to_font_settings(&self) -> FontSettings {
        FontSettings {
            color: self.color.clone(),
            size: self.size,
            bold: self.bold,
            italic: self.italic,
            underline: self.underline,
            justification: self.justification,
        }
    }
}

impl Default for FontDefaults {
    fn default() -> Self {
        let base = FontSettings::default();
        Self {
            color: base.color,
            size: base.size,
            bold: base.bold,
            italic: base.italic,
            underline: base.underline,
            justification: base.justification,
        }
    }
}

impl From<FontSettings> for FontDefaults {
    fn from(fs: FontSettings) -> Self {
        Self {
            color: fs.color,
            size: fs.size,
            bold: fs.bold,
            italic: fs.italic,
            underline: fs.underline,
            justification: fs.justification,
        }
    }
}

/// Identity of the backend a factory produces styling for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// No particular output library
    Plain,
    /// Page-description output (PDF)
    Pdf,
    /// Word-processing output (DOCX)
    Word,
}

impl Backend {
    /// Lowercase backend name.
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Plain => "plain",
            Backend::Pdf => "pdf",
            Backend::Word => "word",
        }
    }
}

/// Creates default font settings for one backend.
///
/// A single factory is threaded through a whole document build so every section
/// without explicit overrides starts from the same defaults.
pub trait FontSettingsFactory {
    /// The backend this factory belongs to.
    fn backend(&self) -> Backend;

    /// Create a new, independently owned [`FontSettings`] seeded with the defaults.
    fn create_font_settings(&self) -> FontSettings;
}

/// Converts universal font settings into a backend's native styling value.
pub trait FontSettingsConverter: FontSettingsFactory {
    /// Native styling representation of the backend.
    type Native;

    /// Map `fs` to the native representation. Never mutates `fs` and never fails.
    fn convert_to_library_specific_format(&self, fs: &FontSettings) -> Self::Native;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_justification_parse() {
        assert_eq!(Justification::parse("Center"), Justification::Center);
        assert_eq!(Justification::parse(" right "), Justification::Right);
        assert_eq!(Justification::parse("both"), Justification::Justify);
        assert_eq!(Justification::parse("diagonal"), Justification::Left);
    }

    #[test]
    fn test_normalize_hex_color() {
        assert_eq!(normalize_hex_color("#001133"), "001133");
        assert_eq!(normalize_hex_color("aa0000"), "AA0000");
        assert_eq!(normalize_hex_color("#abc"), "AABBCC");
        assert_eq!(normalize_hex_color("red"), FALLBACK_COLOR);
        assert_eq!(normalize_hex_color("#12345"), FALLBACK_COLOR);
        assert_eq!(normalize_hex_color(""), FALLBACK_COLOR);
    }

    #[test]
    fn test_font_settings_rgb() {
        let fs = FontSettings::new().with_color("#AA0010");
        assert_eq!(fs.rgb(), (0xAA, 0x00, 0x10));

        let broken = FontSettings::new().with_color("not-a-color");
        assert_eq!(broken.rgb(), (0, 0, 0));
        assert!(!broken.is_well_formed());
    }

    #[test]
    fn test_effective_size() {
        assert_eq!(FontSettings::new().with_size(10.5).effective_size(), 10.5);
        assert_eq!(
            FontSettings::new().with_size(0.0).effective_size(),
            FALLBACK_FONT_SIZE
        );
        assert_eq!(
            FontSettings::new().with_size(-3.0).effective_size(),
            FALLBACK_FONT_SIZE
        );
    }

    #[test]
    fn test_font_defaults_from_json() {
        let defaults =
            FontDefaults::from_json_str(r##"{"color": "#001133", "size": 11, "justification": "center"}"##)
                .unwrap();
        assert_eq!(defaults.color, "#001133");
        assert_eq!(defaults.size, 11.0);
        assert_eq!(defaults.justification, Justification::Center);
        assert!(!defaults.bold);
    }

    #[test]
    fn test_font_defaults_sanitized() {
        let defaults = FontDefaults::from_json_str(r#"{"color": "blue", "size": -1}"#).unwrap();
        assert_eq!(defaults.color, "#000000");
        assert_eq!(defaults.size, FALLBACK_FONT_SIZE);
    }

    #[test]
    fn test_font_defaults_bad_json() {
        let result = FontDefaults::from_json_str("{size: }");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_font_defaults_to_settings() {
        let defaults = FontDefaults::new().with_bold(true).with_size(14.0);
        let fs = defaults.to_font_settings();
        assert!(fs.bold);
        assert_eq!(fs.size, 14.0);
        assert_eq!(FontDefaults::from(fs), defaults);
    }
}
