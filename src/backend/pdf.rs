//! Page-description (PDF) styling.

use crate::model::{
    Backend, FontDefaults, FontSettings, FontSettingsConverter, FontSettingsFactory,
    Justification,
};

/// Standard Type 1 fonts used for text, picked by weight and slant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PdfBaseFont {
    /// Helvetica
    Helvetica,
    /// Helvetica-Bold
    HelveticaBold,
    /// Helvetica-Oblique
    HelveticaOblique,
    /// Helvetica-BoldOblique
    HelveticaBoldOblique,
}

impl PdfBaseFont {
    /// Pick the font variant for a weight/slant combination.
    pub fn for_style(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (true, true) => PdfBaseFont::HelveticaBoldOblique,
            (true, false) => PdfBaseFont::HelveticaBold,
            (false, true) => PdfBaseFont::HelveticaOblique,
            (false, false) => PdfBaseFont::Helvetica,
        }
    }

    /// PostScript name of the font.
    pub fn name(&self) -> &'static str {
        match self {
            PdfBaseFont::Helvetica => "Helvetica",
            PdfBaseFont::HelveticaBold => "Helvetica-Bold",
            PdfBaseFont::HelveticaOblique => "Helvetica-Oblique",
            PdfBaseFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
        }
    }
}

/// Native PDF text style.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfFontStyle {
    /// Base font
    pub base_font: PdfBaseFont,
    /// Font size in points
    pub size: f32,
    /// Fill color components in 0.0..=1.0
    pub rgb: [f32; 3],
    /// Draw an underline
    pub underline: bool,
    /// Text alignment
    pub alignment: Justification,
}

impl PdfFontStyle {
    /// Content-stream operator setting the fill color, e.g. `0.667 0 0 rg`.
    pub fn fill_color_operator(&self) -> String {
        let [r, g, b] = self.rgb.map(format_component);
        format!("{} {} {} rg", r, g, b)
    }

    /// Content-stream operator selecting the font resource `resource` at this size.
    pub fn font_operator(&self, resource: &str) -> String {
        format!("/{} {} Tf", resource, format_component(self.size))
    }
}

fn format_component(value: f32) -> String {
    let s = format!("{:.3}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Factory for the PDF backend.
#[derive(Debug, Clone, Default)]
pub struct PdfFontSettingsFactory {
    defaults: FontDefaults,
}

impl PdfFontSettingsFactory {
    /// Create a factory seeded with `defaults`.
    pub fn new(defaults: FontDefaults) -> Self {
        Self {
            defaults: defaults.sanitized(),
        }
    }
}

impl FontSettingsFactory for PdfFontSettingsFactory {
    fn backend(&self) -> Backend {
        Backend::Pdf
    }

    fn create_font_settings(&self) -> FontSettings {
        self.defaults.to_font_settings()
    }
}

impl FontSettingsConverter for PdfFontSettingsFactory {
    type Native = PdfFontStyle;

    fn convert_to_library_specific_format(&self, fs: &FontSettings) -> PdfFontStyle {
        let (r, g, b) = fs.rgb();
        PdfFontStyle {
            base_font: PdfBaseFont::for_style(fs.bold, fs.italic),
            size: fs.effective_size() as f32,
            rgb: [r, g, b].map(|c| f32::from(c) / 255.0),
            underline: fs.underline,
            alignment: fs.justification,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_font_selection() {
        assert_eq!(PdfBaseFont::for_style(false, false).name(), "Helvetica");
        assert_eq!(PdfBaseFont::for_style(true, false).name(), "Helvetica-Bold");
        assert_eq!(PdfBaseFont::for_style(false, true).name(), "Helvetica-Oblique");
        assert_eq!(
            PdfBaseFont::for_style(true, true).name(),
            "Helvetica-BoldOblique"
        );
    }

    #[test]
    fn test_convert() {
        let factory = PdfFontSettingsFactory::default();
        let fs = FontSettings::new()
            .with_color("#FF0000")
            .with_size(10.0)
            .with_bold(true)
            .with_justification(Justification::Right);
        let native = factory.convert_to_library_specific_format(&fs);

        assert_eq!(native.base_font, PdfBaseFont::HelveticaBold);
        assert_eq!(native.size, 10.0);
        assert_eq!(native.rgb, [1.0, 0.0, 0.0]);
        assert_eq!(native.alignment, Justification::Right);
        assert_eq!(native.fill_color_operator(), "1 0 0 rg");
        assert_eq!(native.font_operator("F1"), "/F1 10 Tf");
    }

    #[test]
    fn test_convert_malformed_color_is_black() {
        let factory = PdfFontSettingsFactory::default();
        let native =
            factory.convert_to_library_specific_format(&FontSettings::new().with_color("#GG0000"));
        assert_eq!(native.rgb, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_convert_is_deterministic() {
        let factory = PdfFontSettingsFactory::new(FontDefaults::new().with_italic(true));
        let fs = factory.create_font_settings();
        let before = fs.clone();
        let a = factory.convert_to_library_specific_format(&fs);
        let b = factory.convert_to_library_specific_format(&fs);
        assert_eq!(a, b);
        assert_eq!(fs, before);
        assert_eq!(a.base_font, PdfBaseFont::HelveticaOblique);
    }
}
