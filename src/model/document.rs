//! Document-level types.

use super::{BodyContent, FooterSection, FontSettings, HeaderSection, SignatureSection};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A built document: header, body, footer, signature and default styling.
///
/// Produced by [`DocumentBuilder::build`](crate::builder::DocumentBuilder::build).
/// The structure is fixed once built, but the row and section lists inside are
/// shared handles: edits made through any holder are visible to all of them.
#[derive(Debug, Clone)]
pub struct DocumentContent {
    body: BodyContent,
    header: HeaderSection,
    footer: FooterSection,
    signature: SignatureSection,
    default_font_settings: FontSettings,
}

impl DocumentContent {
    /// Assemble a document from its sections.
    pub fn new(
        body: BodyContent,
        header: HeaderSection,
        footer: FooterSection,
        signature: SignatureSection,
        default_font_settings: FontSettings,
    ) -> Self {
        Self {
            body,
            header,
            footer,
            signature,
            default_font_settings,
        }
    }

    /// The document body.
    pub fn body(&self) -> &BodyContent {
        &self.body
    }

    /// The page header.
    pub fn header(&self) -> &HeaderSection {
        &self.header
    }

    /// The page footer.
    pub fn footer(&self) -> &FooterSection {
        &self.footer
    }

    /// The signature block.
    pub fn signature(&self) -> &SignatureSection {
        &self.signature
    }

    /// Styling used where no section or cell settings apply.
    pub fn default_font_settings(&self) -> &FontSettings {
        &self.default_font_settings
    }

    /// Check if the document carries no rows and no body sections.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
            && self.header.rows.is_empty()
            && self.footer.rows.is_empty()
            && self.signature.rows.is_empty()
    }

    /// Copy the document into one that shares no lists with `self`.
    pub fn detached(&self) -> Self {
        Self {
            body: BodyContent {
                sections: self.body.sections.deep_clone(),
                ..self.body.clone()
            },
            header: HeaderSection {
                rows: self.header.rows.deep_clone(),
                ..self.header.clone()
            },
            footer: FooterSection {
                rows: self.footer.rows.deep_clone(),
                ..self.footer.clone()
            },
            signature: SignatureSection {
                rows: self.signature.rows.deep_clone(),
                ..self.signature.clone()
            },
            default_font_settings: self.default_font_settings.clone(),
        }
    }

    /// Get plain text content of the whole document.
    pub fn plain_text(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        parts.extend(self.header.rows.borrow().iter().map(|r| r.plain_text()));
        for top in self.body.sections.borrow().iter() {
            for item in top.walk() {
                parts.push(item.section.title.clone());
                if !item.section.rich_text_content.is_empty() {
                    parts.push(item.section.rich_text_content.clone());
                }
            }
        }
        parts.extend(self.footer.rows.borrow().iter().map(|r| r.plain_text()));
        parts.extend(self.signature.rows.borrow().iter().map(|r| r.plain_text()));
        parts.join("\n")
    }
}

/// Advisory options passed to a document creator.
///
/// Creators ignore fields their format cannot honor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentCreateOptions {
    /// Draw a background image behind the content
    pub add_background_image: bool,

    /// Path of the background image
    pub background_image_path: Option<PathBuf>,

    /// Landscape page orientation
    pub is_landscape: bool,
}

impl DocumentCreateOptions {
    /// Create options with everything disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable a background image at `path`.
    pub fn with_background_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.add_background_image = true;
        self.background_image_path = Some(path.into());
        self
    }

    /// Set landscape orientation.
    pub fn with_landscape(mut self, landscape: bool) -> Self {
        self.is_landscape = landscape;
        self
    }

    /// Background image path, only when the image is enabled and a path is set.
    pub fn background_image(&self) -> Option<&PathBuf> {
        if self.add_background_image {
            self.background_image_path
                .as_ref()
                .filter(|p| !p.as_os_str().is_empty())
        } else {
            None
        }
    }
}

/// Page-level settings for creators that lay out pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSettings {
    /// Landscape page orientation
    pub is_landscape: bool,
    /// Draw a background image
    pub add_background_image: bool,
    /// Path of the background image
    pub background_image_path: Option<PathBuf>,
    /// Left margin in points
    pub margin_left: f64,
    /// Right margin in points
    pub margin_right: f64,
    /// Top margin in points
    pub margin_top: f64,
    /// Bottom margin in points
    pub margin_bottom: f64,
}

impl PageSettings {
    /// Default margin on every side, in points.
    pub const DEFAULT_MARGIN: f64 = 36.0;

    /// Create portrait settings with default margins.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set all four margins.
    pub fn with_margins(mut self, margin: f64) -> Self {
        self.margin_left = margin;
        self.margin_right = margin;
        self.margin_top = margin;
        self.margin_bottom = margin;
        self
    }
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            is_landscape: false,
            add_background_image: false,
            background_image_path: None,
            margin_left: Self::DEFAULT_MARGIN,
            margin_right: Self::DEFAULT_MARGIN,
            margin_top: Self::DEFAULT_MARGIN,
            margin_bottom: Self::DEFAULT_MARGIN,
        }
    }
}

impl From<&DocumentCreateOptions> for PageSettings {
    fn from(options: &DocumentCreateOptions) -> Self {
        Self {
            is_landscape: options.is_landscape,
            add_background_image: options.add_background_image,
            background_image_path: options.background_image_path.clone(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BodySection, RowList, SectionList, TablesRow};

    fn sample() -> DocumentContent {
        let header = HeaderSection::new(RowList::new(), None);
        header.add_row(TablesRow::from_strings(["Logo", "Title"]));
        let sections = SectionList::new();
        sections.push(BodySection::new("Intro", "Hello **world**", FontSettings::default()));
        DocumentContent::new(
            BodyContent::new(sections, FontSettings::default(), FontSettings::default()),
            header,
            FooterSection::default(),
            SignatureSection::default(),
            FontSettings::default(),
        )
    }

    #[test]
    fn test_document_accessors() {
        let doc = sample();
        assert_eq!(doc.header().rows.len(), 1);
        assert_eq!(doc.body().len(), 1);
        assert!(doc.footer().rows.is_empty());
        assert!(doc.signature().place_at_bottom);
        assert!(!doc.is_empty());
    }

    #[test]
    fn test_plain_text() {
        let text = sample().plain_text();
        assert_eq!(text, "Logo\tTitle\nIntro\nHello **world**");
    }

    #[test]
    fn test_detached_does_not_alias() {
        let doc = sample();
        let copy = doc.detached();
        copy.header().add_row(TablesRow::from_strings(["extra"]));

        assert_eq!(doc.header().rows.len(), 1);
        assert_eq!(copy.header().rows.len(), 2);
    }

    #[test]
    fn test_create_options_background() {
        let options = DocumentCreateOptions::new();
        assert!(options.background_image().is_none());

        let options = DocumentCreateOptions::new().with_background_image("bg.png");
        assert_eq!(options.background_image(), Some(&PathBuf::from("bg.png")));

        let mut options = options;
        options.add_background_image = false;
        assert!(options.background_image().is_none());
    }

    #[test]
    fn test_page_settings_from_options() {
        let options = DocumentCreateOptions::new().with_landscape(true);
        let page = PageSettings::from(&options);
        assert!(page.is_landscape);
        assert_eq!(page.margin_top, PageSettings::DEFAULT_MARGIN);
        assert_eq!(PageSettings::new().with_margins(10.0).margin_right, 10.0);
    }
}
