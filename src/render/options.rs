//! Rendering options and configuration.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Placeholder written for cells a renderer cannot draw. `{kind}` is replaced
/// with the cell kind.
pub const DEFAULT_UNSUPPORTED_PLACEHOLDER: &str = "[unsupported: {kind}]";

/// Options shared by all document creators.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Prefix headings with their numbering label
    pub number_headings: bool,

    /// Emit title notes and section notes
    pub include_notes: bool,

    /// Keep line breaks inside rich text and cells
    pub preserve_line_breaks: bool,

    /// Escape characters that are special in the output format
    pub escape_special_chars: bool,

    /// Maximum heading level (1-6)
    pub max_heading_level: u8,

    /// Text for unsupported cells; `{kind}` is replaced with the cell kind
    pub unsupported_placeholder: String,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable heading numbering.
    pub fn with_heading_numbers(mut self, number: bool) -> Self {
        self.number_headings = number;
        self
    }

    /// Enable or disable title and section notes.
    pub fn with_notes(mut self, include: bool) -> Self {
        self.include_notes = include;
        self
    }

    /// Enable or disable line break preservation.
    pub fn with_line_breaks(mut self, preserve: bool) -> Self {
        self.preserve_line_breaks = preserve;
        self
    }

    /// Enable or disable escaping of special characters.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }

    /// Set the maximum heading level.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.max_heading_level = level.clamp(1, 6);
        self
    }

    /// Set the placeholder for unsupported cells.
    pub fn with_unsupported_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.unsupported_placeholder = placeholder.into();
        self
    }

    /// Placeholder text for a cell of `kind`.
    pub fn placeholder_for(&self, kind: &str) -> String {
        self.unsupported_placeholder.replace("{kind}", kind)
    }

    /// Heading level to emit for a section at `hierarchy_level`.
    pub fn heading_level(&self, hierarchy_level: i32) -> u8 {
        let max = i32::from(self.max_heading_level.clamp(1, 6));
        hierarchy_level.clamp(1, max) as u8
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            number_headings: true,
            include_notes: true,
            preserve_line_breaks: true,
            escape_special_chars: true,
            max_heading_level: 6,
            unsupported_placeholder: DEFAULT_UNSUPPORTED_PLACEHOLDER.to_string(),
        }
    }
}

/// Output format of a document creator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Markdown format
    #[default]
    Markdown,

    /// Standalone HTML
    Html,

    /// Plain text
    Text,
}

impl OutputFormat {
    /// All formats with a built-in creator.
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Markdown, OutputFormat::Html, OutputFormat::Text];

    /// Lowercase format name.
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "markdown",
            OutputFormat::Html => "html",
            OutputFormat::Text => "text",
        }
    }

    /// Conventional file extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Html => "html",
            OutputFormat::Text => "txt",
        }
    }

    /// MIME type of the output.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "text/markdown",
            OutputFormat::Html => "text/html",
            OutputFormat::Text => "text/plain",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    /// Parse a format name or file extension, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "html" | "htm" => Ok(OutputFormat::Html),
            "text" | "txt" | "plain" => Ok(OutputFormat::Text),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}
