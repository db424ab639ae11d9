//! Document creators that turn a built [`DocumentContent`] into an output format.
//!
//! Creators only read the document. Options a format cannot honor are ignored.
//!
//! # Example
//!
//! ```
//! use docgen::builder::DocumentBuilder;
//! use docgen::render::{creator_for, OutputFormat, RenderOptions};
//!
//! let mut builder = DocumentBuilder::default();
//! builder.body_section("Summary", "All **good**.");
//! let doc = builder.build();
//!
//! let creator = creator_for(OutputFormat::Markdown, RenderOptions::default());
//! let markdown = creator.create_document(&doc).unwrap();
//! assert_eq!(markdown, "# 1 Summary\n\nAll **good**.");
//! ```

mod html;
mod markdown;
mod options;
mod result;
mod text;
pub mod visitor;

pub use html::{escape_css_string, escape_html, font_css, to_html, HtmlCreator};
pub use markdown::{to_markdown, MarkdownCreator};
pub use options::{OutputFormat, RenderOptions, DEFAULT_UNSUPPORTED_PLACEHOLDER};
pub use result::{RenderResult, RenderStats};
pub use text::{to_text, TextCreator};

use crate::error::Result;
use crate::model::{DocumentContent, DocumentCreateOptions};
use std::path::Path;

/// A creator for one output format.
pub trait DocumentCreator {
    /// The format this creator writes.
    fn format(&self) -> OutputFormat;

    /// Render `content` and collect statistics.
    fn render(
        &self,
        content: &DocumentContent,
        options: &DocumentCreateOptions,
    ) -> Result<RenderResult>;

    /// Render `content` with default create options.
    fn create_document(&self, content: &DocumentContent) -> Result<String> {
        self.create_document_with_options(content, &DocumentCreateOptions::default())
    }

    /// Render `content` with explicit create options.
    fn create_document_with_options(
        &self,
        content: &DocumentContent,
        options: &DocumentCreateOptions,
    ) -> Result<String> {
        Ok(self.render(content, options)?.content)
    }

    /// Render `content` and write it to `path`.
    fn write_to_path(
        &self,
        content: &DocumentContent,
        options: &DocumentCreateOptions,
        path: &Path,
    ) -> Result<()> {
        let output = self.create_document_with_options(content, options)?;
        std::fs::write(path, output)?;
        log::debug!("Wrote {} output to {}", self.format(), path.display());
        Ok(())
    }
}

/// Create the built-in creator for `format`.
pub fn creator_for(format: OutputFormat, options: RenderOptions) -> Box<dyn DocumentCreator> {
    match format {
        OutputFormat::Markdown => Box::new(MarkdownCreator::new(options)),
        OutputFormat::Html => Box::new(HtmlCreator::new(options)),
        OutputFormat::Text => Box::new(TextCreator::new(options)),
    }
}

/// Create the built-in creator for a format name such as `"md"` or `"html"`.
///
/// Fails with [`Error::UnsupportedFormat`](crate::Error::UnsupportedFormat) for
/// unknown names.
pub fn creator_for_name(name: &str, options: RenderOptions) -> Result<Box<dyn DocumentCreator>> {
    let format: OutputFormat = name.parse()?;
    Ok(creator_for(format, options))
}
