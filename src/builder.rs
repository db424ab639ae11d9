//! Fluent document construction.

use crate::backend::PlainFontSettingsFactory;
use crate::model::{
    BodyContent, BodySection, DocumentContent, FontSettings, FontSettingsFactory, FooterSection,
    HeaderSection, NumberingType, SectionList, SignatureSection,
};

/// Optional attributes of a body section added through the builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodySectionOptions {
    /// Nesting level (not validated here)
    pub hierarchy_level: i32,
    /// Notes printed under the title
    pub title_notes: Vec<String>,
    /// Notes printed after the content
    pub section_notes: Vec<String>,
    /// Heading numbering style
    pub numbering_type: NumberingType,
}

impl Default for BodySectionOptions {
    fn default() -> Self {
        Self {
            hierarchy_level: 1,
            title_notes: Vec::new(),
            section_notes: Vec::new(),
            numbering_type: NumberingType::Numeric,
        }
    }
}

impl BodySectionOptions {
    /// Create options for a level-1, numerically numbered section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hierarchy level.
    pub fn with_level(mut self, hierarchy_level: i32) -> Self {
        self.hierarchy_level = hierarchy_level;
        self
    }

    /// Set the title notes.
    pub fn with_title_notes<S: Into<String>>(mut self, notes: impl IntoIterator<Item = S>) -> Self {
        self.title_notes = notes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the section notes.
    pub fn with_section_notes<S: Into<String>>(
        mut self,
        notes: impl IntoIterator<Item = S>,
    ) -> Self {
        self.section_notes = notes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the numbering type.
    pub fn with_numbering(mut self, numbering_type: NumberingType) -> Self {
        self.numbering_type = numbering_type;
        self
    }
}

/// Incrementally builds a [`DocumentContent`].
///
/// Header, footer and signature rows and the body section list live in shared
/// lists. Every document returned by [`build`](Self::build) holds handles to
/// those same lists, so building twice yields two documents that see each
/// other's row edits. Use [`DocumentContent::detached`] for an independent copy.
///
/// # Example
///
/// ```
/// use docgen::builder::DocumentBuilder;
/// use docgen::model::TablesRow;
///
/// let mut builder = DocumentBuilder::default();
/// builder
///     .header(|h| h.add_row(TablesRow::from_strings(["Logo", "Title"]).widths([40, 60])))
///     .body_section("Introduction", "Some **bold** text.");
///
/// let doc = builder.build();
/// assert_eq!(doc.header().rows.len(), 1);
/// assert_eq!(doc.body().len(), 1);
/// ```
#[derive(Debug)]
pub struct DocumentBuilder<F: FontSettingsFactory> {
    factory: F,
    default_font_settings: Option<FontSettings>,
    header: HeaderSection,
    footer: FooterSection,
    signature: SignatureSection,
    sections: SectionList,
}

impl<F: FontSettingsFactory> DocumentBuilder<F> {
    /// Create a builder that styles sections with `factory`.
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            default_font_settings: None,
            header: HeaderSection::default(),
            footer: FooterSection::default(),
            signature: SignatureSection::default(),
            sections: SectionList::new(),
        }
    }

    /// The factory threaded through this build.
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Override the document's default font settings.
    pub fn set_default_font_settings(&mut self, font_settings: FontSettings) -> &mut Self {
        self.default_font_settings = Some(font_settings);
        self
    }

    /// Configure the page header.
    pub fn header(&mut self, configure: impl FnOnce(&mut HeaderSection)) -> &mut Self {
        configure(&mut self.header);
        self
    }

    /// Configure the page footer.
    pub fn footer(&mut self, configure: impl FnOnce(&mut FooterSection)) -> &mut Self {
        configure(&mut self.footer);
        self
    }

    /// Configure the signature block.
    pub fn signature(&mut self, configure: impl FnOnce(&mut SignatureSection)) -> &mut Self {
        configure(&mut self.signature);
        self
    }

    /// Set whether renderers should put the signature at the end of the output.
    pub fn place_signature_at_bottom(&mut self, place_at_bottom: bool) -> &mut Self {
        self.signature.place_at_bottom = place_at_bottom;
        self
    }

    /// Append a level-1 body section.
    pub fn body_section(
        &mut self,
        title: impl Into<String>,
        rich_text: impl Into<String>,
    ) -> &mut Self {
        self.body_section_with(title, rich_text, BodySectionOptions::default(), |_| {})
    }

    /// Append a body section with explicit options.
    pub fn body_section_with_options(
        &mut self,
        title: impl Into<String>,
        rich_text: impl Into<String>,
        options: BodySectionOptions,
    ) -> &mut Self {
        self.body_section_with(title, rich_text, options, |_| {})
    }

    /// Append a body section with explicit options, then run `configure` on it
    /// before it is stored.
    pub fn body_section_with(
        &mut self,
        title: impl Into<String>,
        rich_text: impl Into<String>,
        options: BodySectionOptions,
        configure: impl FnOnce(&mut BodySection),
    ) -> &mut Self {
        let mut section = BodySection::with_factory(&self.factory, title, rich_text)
            .level(options.hierarchy_level)
            .title_notes(options.title_notes)
            .section_notes(options.section_notes)
            .numbering(options.numbering_type);
        configure(&mut section);
        self.sections.push(section);
        self
    }

    /// Number of top-level body sections added so far.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Assemble the document.
    ///
    /// The returned document shares its row and section lists with this builder.
    /// Header, footer and signature sections without their own font settings get
    /// the factory's defaults.
    pub fn build(&self) -> DocumentContent {
        let default_font_settings = self
            .default_font_settings
            .clone()
            .unwrap_or_else(|| self.factory.create_font_settings());

        log::debug!(
            "Building {} document: {} header row(s), {} body section(s), {} footer row(s), {} signature row(s)",
            self.factory.backend().name(),
            self.header.rows.len(),
            self.sections.len(),
            self.footer.rows.len(),
            self.signature.rows.len()
        );

        let header = HeaderSection {
            font_settings: self.section_font_settings(self.header.font_settings.as_ref()),
            ..self.header.clone()
        };
        let footer = FooterSection {
            font_settings: self.section_font_settings(self.footer.font_settings.as_ref()),
            ..self.footer.clone()
        };
        let signature = SignatureSection {
            font_settings: self.section_font_settings(self.signature.font_settings.as_ref()),
            ..self.signature.clone()
        };

        DocumentContent::new(
            BodyContent::with_factory(&self.factory, self.sections.clone()),
            header,
            footer,
            signature,
            default_font_settings,
        )
    }

    fn section_font_settings(&self, explicit: Option<&FontSettings>) -> Option<FontSettings> {
        Some(
            explicit
                .cloned()
                .unwrap_or_else(|| self.factory.create_font_settings()),
        )
    }
}

impl Default for DocumentBuilder<PlainFontSettingsFactory> {
    fn default() -> Self {
        Self::new(PlainFontSettingsFactory::default())
    }
}
