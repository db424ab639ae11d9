//! # docgen
//!
//! Describe a structured document once and render it into several formats.
//!
//! A document has a header, a footer and a signature block made of table rows,
//! and a body made of titled, nestable sections whose text uses a small rich
//! text markup (`**bold**`, `_italic_`, `__underline__`).
//!
//! ## Quick Start
//!
//! ```
//! use docgen::{DocumentBuilder, SectionValidator, TablesRow};
//! use docgen::render::{DocumentCreator, MarkdownCreator};
//!
//! fn main() -> docgen::Result<()> {
//!     let mut builder = DocumentBuilder::default();
//!     builder
//!         .header(|h| h.add_row(TablesRow::from_strings(["ACME", "Report"]).widths([40, 60])))
//!         .body_section("Summary", "Everything is **fine**.")
//!         .footer(|f| f.add_row(TablesRow::from_strings(["Confidential"])));
//!
//!     let doc = builder.build();
//!     SectionValidator::new().validate_all(doc.body()).into_result()?;
//!
//!     let markdown = MarkdownCreator::default().create_document(&doc)?;
//!     assert!(markdown.starts_with("| ACME | Report |"));
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`model`]: font settings, table rows, sections and the built document
//! - [`builder`]: fluent construction of a document
//! - [`backend`]: font settings factories for plain, PDF and Word output
//! - [`validate`]: rule-based body section validation
//! - [`rich_text`]: markup parsing into styled runs
//! - [`provider`]: read access and post-build enrichment
//! - [`render`]: Markdown, HTML and plain text creators

pub mod backend;
pub mod builder;
pub mod error;
pub mod model;
pub mod provider;
pub mod render;
pub mod rich_text;
pub mod validate;

// Re-export commonly used types
pub use backend::{PdfFontSettingsFactory, PlainFontSettingsFactory, WordFontSettingsFactory};
pub use builder::{BodySectionOptions, DocumentBuilder};
pub use error::{Error, Result};
pub use model::{
    BodyContent, BodySection, DocumentContent, DocumentCreateOptions, DocumentSection,
    FontDefaults, FontSettings, FontSettingsConverter, FontSettingsFactory, FooterSection,
    HeaderSection, Justification, NumberingType, SignatureSection, TableCell, TablesRow,
};
pub use provider::{DocumentContentInfoProvider, DocumentInfoProvider, SectionEnricher};
pub use render::{DocumentCreator, OutputFormat, RenderOptions};
pub use rich_text::{RichTextParser, StyledRun};
pub use validate::{SectionValidator, ValidationFailure, ValidationResult};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reexports_build_a_document() {
        let mut builder = DocumentBuilder::new(PdfFontSettingsFactory::default());
        builder.body_section("Intro", "text");
        let doc = builder.build();

        let provider = DocumentContentInfoProvider::new(&doc);
        assert_eq!(provider.all_sections().count(), 3);
        assert!(SectionValidator::new().validate_all(doc.body()).is_valid());
    }
}
