//! Rendering result with statistics.

use serde::{Deserialize, Serialize};

use super::OutputFormat;

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content
    pub content: String,

    /// MIME type of the content
    pub mime_type: String,

    /// Rendering statistics
    pub stats: RenderStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, format: OutputFormat, stats: RenderStats) -> Self {
        Self {
            content,
            mime_type: format.mime_type().to_string(),
            stats,
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Statistics collected while rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Header rows emitted
    pub header_rows: u32,

    /// Footer rows emitted
    pub footer_rows: u32,

    /// Signature rows emitted
    pub signature_rows: u32,

    /// Body sections emitted, at any depth
    pub body_sections: u32,

    /// Cells replaced by a placeholder
    pub placeholder_cells: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment body section count.
    pub fn add_body_section(&mut self) {
        self.body_sections += 1;
    }

    /// Increment placeholder count.
    pub fn add_placeholder(&mut self) {
        self.placeholder_cells += 1;
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &RenderStats) {
        self.header_rows += other.header_rows;
        self.footer_rows += other.footer_rows;
        self.signature_rows += other.signature_rows;
        self.body_sections += other.body_sections;
        self.placeholder_cells += other.placeholder_cells;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_stats_count_text() {
        let mut stats = RenderStats::new();
        stats.count_text("Hello, world! This is a test.");

        assert_eq!(stats.word_count, 6);
        assert_eq!(stats.char_count, 24);
    }

    #[test]
    fn test_render_stats_merge() {
        let mut stats1 = RenderStats::new();
        stats1.body_sections = 5;
        stats1.header_rows = 2;

        let stats2 = RenderStats {
            body_sections: 3,
            header_rows: 1,
            placeholder_cells: 4,
            ..Default::default()
        };

        stats1.merge(&stats2);

        assert_eq!(stats1.body_sections, 8);
        assert_eq!(stats1.header_rows, 3);
        assert_eq!(stats1.placeholder_cells, 4);
    }

    #[test]
    fn test_render_result_mime_type() {
        let result = RenderResult::new("# Hello".to_string(), OutputFormat::Markdown, RenderStats::new());
        assert_eq!(result.mime_type, "text/markdown");
        assert_eq!(result.content_len(), 7);
    }
}
