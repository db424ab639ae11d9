//! Plain text document creator.

use crate::error::Result;
use crate::model::{
    DocumentContent, DocumentCreateOptions, FontSettings, SectionKind, TableCell, TablesRow,
};
use crate::rich_text::RichTextParser;

use super::visitor::{walk_document, SectionVisitor, VisitedSection};
use super::{DocumentCreator, OutputFormat, RenderOptions, RenderResult, RenderStats};

/// Convert a document to plain text.
pub fn to_text(content: &DocumentContent, options: &RenderOptions) -> Result<String> {
    TextCreator::new(options.clone()).create_document(content)
}

/// Plain text creator. Table rows become tab-separated lines and markup is
/// dropped.
#[derive(Debug, Clone, Default)]
pub struct TextCreator {
    options: RenderOptions,
    parser: RichTextParser,
}

impl TextCreator {
    /// Create a new plain text creator.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            parser: RichTextParser::new(),
        }
    }
}

impl DocumentCreator for TextCreator {
    fn format(&self) -> OutputFormat {
        OutputFormat::Text
    }

    fn render(
        &self,
        content: &DocumentContent,
        _options: &DocumentCreateOptions,
    ) -> Result<RenderResult> {
        let mut writer = TextWriter {
            creator: self,
            blocks: Vec::new(),
            stats: RenderStats::new(),
        };
        walk_document(content, &mut writer, self.options.number_headings)?;

        let output = writer.blocks.join("\n\n");
        writer.stats.count_text(&output);
        Ok(RenderResult::new(output, OutputFormat::Text, writer.stats))
    }
}

struct TextWriter<'a> {
    creator: &'a TextCreator,
    blocks: Vec<String>,
    stats: RenderStats,
}

impl SectionVisitor for TextWriter<'_> {
    fn visit_rows(
        &mut self,
        kind: SectionKind,
        rows: &[TablesRow],
        _font_settings: Option<&FontSettings>,
    ) {
        let count = rows.len() as u32;
        match kind {
            SectionKind::Header => self.stats.header_rows += count,
            SectionKind::Footer => self.stats.footer_rows += count,
            SectionKind::Signature => self.stats.signature_rows += count,
            SectionKind::Body | SectionKind::BodySection => {}
        }

        let mut lines = Vec::with_capacity(rows.len());
        for row in rows {
            let cells: Vec<String> = row.cells.iter().map(|cell| self.cell_text(cell)).collect();
            lines.push(cells.join("\t"));
        }
        self.blocks.push(lines.join("\n"));
    }

    fn visit_body_section(&mut self, visited: &VisitedSection<'_>) {
        self.stats.add_body_section();
        let options = &self.creator.options;
        let section = visited.section;

        let mut lines = Vec::new();
        if visited.label.is_empty() {
            lines.push(section.title.clone());
        } else {
            lines.push(format!("{} {}", visited.label, section.title));
        }
        if options.include_notes {
            lines.extend(section.title_notes.iter().cloned());
        }
        if !section.rich_text_content.is_empty() {
            let text = self.creator.parser.plain_text(&section.rich_text_content);
            lines.push(if options.preserve_line_breaks {
                text
            } else {
                text.replace('\n', " ")
            });
        }
        if options.include_notes {
            lines.extend(section.section_notes.iter().cloned());
        }
        self.blocks.push(lines.join("\n"));
    }
}

impl TextWriter<'_> {
    fn cell_text(&mut self, cell: &TableCell) -> String {
        match cell {
            TableCell::Text(text) if self.creator.options.preserve_line_breaks => {
                text.content.clone()
            }
            TableCell::Text(text) => text.content.replace('\n', " "),
            TableCell::Unsupported { kind } => {
                log::warn!("Plain text cannot render '{}' cells, writing placeholder", kind);
                self.stats.add_placeholder();
                self.creator.options.placeholder_for(kind)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{BodySectionOptions, DocumentBuilder};

    #[test]
    fn test_to_text() {
        let mut builder = DocumentBuilder::default();
        builder
            .header(|h| h.add_row(TablesRow::from_strings(["Logo", "Title"])))
            .body_section_with_options(
                "Intro",
                "Hello, **world**!",
                BodySectionOptions::new().with_section_notes(["Note"]),
            )
            .signature(|s| s.add_row(TablesRow::from_strings(["Signed", "Date"])));

        let result = to_text(&builder.build(), &RenderOptions::default()).unwrap();
        assert_eq!(
            result,
            "Logo\tTitle\n\n1 Intro\nHello, world!\nNote\n\nSigned\tDate"
        );
    }

    #[test]
    fn test_cell_line_breaks() {
        let mut builder = DocumentBuilder::default();
        builder.signature(|s| {
            s.add_row(TablesRow::from_strings(["Prepared by\n(Signature)", "Date"]))
        });
        let doc = builder.build();

        let kept = to_text(&doc, &RenderOptions::default()).unwrap();
        assert_eq!(kept, "Prepared by\n(Signature)\tDate");

        let joined = to_text(&doc, &RenderOptions::new().with_line_breaks(false)).unwrap();
        assert_eq!(joined, "Prepared by (Signature)\tDate");
    }

    #[test]
    fn test_placeholder_counted() {
        let mut builder = DocumentBuilder::default();
        builder.header(|h| {
            h.add_row(TablesRow::with_cells(vec![
                TableCell::text("a"),
                TableCell::unsupported("image"),
            ]))
        });

        let result = TextCreator::default()
            .render(&builder.build(), &DocumentCreateOptions::default())
            .unwrap();
        assert_eq!(result.content, "a\t[unsupported: image]");
        assert_eq!(result.stats.placeholder_cells, 1);
    }
}
