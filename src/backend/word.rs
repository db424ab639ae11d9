//! Word-processing (WordprocessingML) styling.

use crate::model::{
    Backend, FontDefaults, FontSettings, FontSettingsConverter, FontSettingsFactory,
    Justification,
};

/// Run font used for all text.
pub const WORD_RUN_FONT: &str = "Arial";

/// Values of the `w:jc` paragraph property.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum WordJustification {
    /// `left`
    #[default]
    Left,
    /// `center`
    Center,
    /// `right`
    Right,
    /// `both`
    Both,
}

impl WordJustification {
    /// Attribute value.
    pub fn as_str(&self) -> &'static str {
        match self {
            WordJustification::Left => "left",
            WordJustification::Center => "center",
            WordJustification::Right => "right",
            WordJustification::Both => "both",
        }
    }
}

impl From<Justification> for WordJustification {
    fn from(justification: Justification) -> Self {
        match justification {
            Justification::Left => WordJustification::Left,
            Justification::Center => WordJustification::Center,
            Justification::Right => WordJustification::Right,
            Justification::Justify => WordJustification::Both,
        }
    }
}

/// Native run and paragraph properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordRunProperties {
    /// ASCII run font
    pub font: &'static str,
    /// Color as six hex digits without `#`
    pub color: String,
    /// Size in half-points
    pub half_points: u32,
    /// Bold
    pub bold: bool,
    /// Italic
    pub italic: bool,
    /// Single underline
    pub underline: bool,
    /// Paragraph justification
    pub justification: WordJustification,
}

impl WordRunProperties {
    /// The `w:rPr` element.
    pub fn to_run_xml(&self) -> String {
        let mut xml = String::from("<w:rPr>");
        xml.push_str(&format!(
            "<w:rFonts w:ascii=\"{0}\" w:hAnsi=\"{0}\"/>",
            self.font
        ));
        if self.bold {
            xml.push_str("<w:b/>");
        }
        if self.italic {
            xml.push_str("<w:i/>");
        }
        if self.underline {
            xml.push_str("<w:u w:val=\"single\"/>");
        }
        xml.push_str(&format!("<w:color w:val=\"{}\"/>", self.color));
        xml.push_str(&format!("<w:sz w:val=\"{}\"/>", self.half_points));
        xml.push_str("</w:rPr>");
        xml
    }

    /// The `w:pPr` element.
    pub fn to_paragraph_xml(&self) -> String {
        format!("<w:pPr><w:jc w:val=\"{}\"/></w:pPr>", self.justification.as_str())
    }
}

/// Factory for the Word backend.
#[derive(Debug, Clone, Default)]
pub struct WordFontSettingsFactory {
    defaults: FontDefaults,
}

impl WordFontSettingsFactory {
    /// Create a factory seeded with `defaults`.
    pub fn new(defaults: FontDefaults) -> Self {
        Self {
            defaults: defaults.sanitized(),
        }
    }
}

impl FontSettingsFactory for WordFontSettingsFactory {
    fn backend(&self) -> Backend {
        Backend::Word
    }

    fn create_font_settings(&self) -> FontSettings {
        self.defaults.to_font_settings()
    }
}

impl FontSettingsConverter for WordFontSettingsFactory {
    type Native = WordRunProperties;

    fn convert_to_library_specific_format(&self, fs: &FontSettings) -> WordRunProperties {
        WordRunProperties {
            font: WORD_RUN_FONT,
            color: fs.color_hex(),
            half_points: (fs.effective_size() * 2.0).round() as u32,
            bold: fs.bold,
            italic: fs.italic,
            underline: fs.underline,
            justification: fs.justification.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert() {
        let factory = WordFontSettingsFactory::default();
        let fs = FontSettings::new()
            .with_color("#aa0000")
            .with_size(10.5)
            .with_underline(true)
            .with_justification(Justification::Justify);
        let native = factory.convert_to_library_specific_format(&fs);

        assert_eq!(native.color, "AA0000");
        assert_eq!(native.half_points, 21);
        assert!(native.underline);
        assert_eq!(native.justification, WordJustification::Both);
        assert_eq!(native.font, "Arial");
    }

    #[test]
    fn test_run_xml() {
        let factory = WordFontSettingsFactory::default();
        let native = factory
            .convert_to_library_specific_format(&FontSettings::new().with_bold(true).with_size(11.0));
        assert_eq!(
            native.to_run_xml(),
            "<w:rPr><w:rFonts w:ascii=\"Arial\" w:hAnsi=\"Arial\"/><w:b/><w:color w:val=\"000000\"/><w:sz w:val=\"22\"/></w:rPr>"
        );
        assert_eq!(native.to_paragraph_xml(), "<w:pPr><w:jc w:val=\"left\"/></w:pPr>");
    }

    #[test]
    fn test_factory_defaults() {
        let factory = WordFontSettingsFactory::new(FontDefaults::new().with_size(14.0));
        let fs = factory.create_font_settings();
        assert_eq!(fs.size, 14.0);
        assert_eq!(factory.backend().name(), "word");
    }
}
