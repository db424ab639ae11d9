//! Markdown document creator.

use crate::error::Result;
use crate::model::{
    DocumentContent, DocumentCreateOptions, FontSettings, Justification, SectionKind, TableCell,
    TablesRow,
};
use crate::rich_text::{RichTextParser, StyledRun};

use super::visitor::{walk_document, SectionVisitor, VisitedSection};
use super::{DocumentCreator, OutputFormat, RenderOptions, RenderResult, RenderStats};

/// Convert a document to Markdown.
pub fn to_markdown(content: &DocumentContent, options: &RenderOptions) -> Result<String> {
    MarkdownCreator::new(options.clone()).create_document(content)
}

/// Markdown creator.
///
/// Header, footer and signature rows become pipe tables whose first row is the
/// table header. Page orientation and background images have no Markdown
/// equivalent and are ignored.
#[derive(Debug, Clone, Default)]
pub struct MarkdownCreator {
    options: RenderOptions,
    parser: RichTextParser,
}

impl MarkdownCreator {
    /// Create a new Markdown creator.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            parser: RichTextParser::new(),
        }
    }

    /// The render options in use.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }
}

impl DocumentCreator for MarkdownCreator {
    fn format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }

    fn render(
        &self,
        content: &DocumentContent,
        _options: &DocumentCreateOptions,
    ) -> Result<RenderResult> {
        let mut writer = MarkdownWriter {
            options: &self.options,
            parser: &self.parser,
            output: String::new(),
            stats: RenderStats::new(),
        };
        walk_document(content, &mut writer, self.options.number_headings)?;

        let output = writer.output.trim().to_string();
        writer.stats.count_text(&output);
        Ok(RenderResult::new(output, OutputFormat::Markdown, writer.stats))
    }
}

struct MarkdownWriter<'a> {
    options: &'a RenderOptions,
    parser: &'a RichTextParser,
    output: String,
    stats: RenderStats,
}

impl SectionVisitor for MarkdownWriter<'_> {
    fn visit_rows(
        &mut self,
        kind: SectionKind,
        rows: &[TablesRow],
        font_settings: Option<&FontSettings>,
    ) {
        let count = rows.len() as u32;
        match kind {
            SectionKind::Header => self.stats.header_rows += count,
            SectionKind::Footer => self.stats.footer_rows += count,
            SectionKind::Signature => self.stats.signature_rows += count,
            SectionKind::Body | SectionKind::BodySection => {}
        }
        self.render_table(rows, font_settings);
    }

    fn visit_body_section(&mut self, visited: &VisitedSection<'_>) {
        self.stats.add_body_section();
        let section = visited.section;

        let level = self.options.heading_level(section.hierarchy_level);
        self.output.push_str(&"#".repeat(level as usize));
        self.output.push(' ');
        if !visited.label.is_empty() {
            self.output.push_str(&visited.label);
            self.output.push(' ');
        }
        self.output.push_str(&self.escape(&section.title));
        self.output.push_str("\n\n");

        if self.options.include_notes {
            for note in &section.title_notes {
                self.output.push_str(&format!("*{}*\n\n", self.escape(note)));
            }
        }

        if !section.rich_text_content.is_empty() {
            self.render_rich_text(&section.rich_text_content);
            self.output.push_str("\n\n");
        }

        if self.options.include_notes {
            for note in &section.section_notes {
                self.output.push_str(&format!("> {}\n\n", self.escape(note)));
            }
        }
    }
}

impl MarkdownWriter<'_> {
    fn escape(&self, text: &str) -> String {
        if self.options.escape_special_chars {
            escape_markdown(text)
        } else {
            text.to_string()
        }
    }

    fn render_rich_text(&mut self, markup: &str) {
        let runs: Vec<StyledRun> = self.parser.parse(markup).collect();
        let rendered = self.write_styled(&runs, &STYLE_MARKERS);
        self.output.push_str(&rendered);
    }

    /// Group consecutive runs sharing one style and wrap each styled group
    /// once, so neighbouring runs never produce fused delimiters. The style
    /// with the fewest groups becomes the outermost delimiter.
    fn write_styled(&self, runs: &[StyledRun], markers: &[StyleMarker]) -> String {
        let outer = (0..markers.len()).min_by_key(|&i| group_count(runs, markers[i].0));
        let Some(outer) = outer else {
            return runs.iter().map(|run| self.run_text(&run.text)).collect();
        };
        let (flag, open, close) = markers[outer];
        let inner_markers: Vec<StyleMarker> = markers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != outer)
            .map(|(_, marker)| *marker)
            .collect();

        let mut result = String::new();
        let mut start = 0;
        while start < runs.len() {
            let styled = flag(&runs[start]);
            let end = runs[start..]
                .iter()
                .position(|run| flag(run) != styled)
                .map_or(runs.len(), |n| start + n);
            let inner = self.write_styled(&runs[start..end], &inner_markers);
            if styled {
                result.push_str(&wrap_trimmed(&inner, open, close));
            } else {
                result.push_str(&inner);
            }
            start = end;
        }
        result
    }

    fn run_text(&self, text: &str) -> String {
        let text = self.escape(text);
        if self.options.preserve_line_breaks {
            text.replace('\n', "  \n")
        } else {
            text.replace('\n', " ")
        }
    }

    fn render_table(&mut self, rows: &[TablesRow], font_settings: Option<&FontSettings>) {
        let col_count = rows.iter().map(TablesRow::cell_count).max().unwrap_or(0);
        if col_count == 0 {
            return;
        }

        for (i, row) in rows.iter().enumerate() {
            self.output.push('|');
            for col in 0..col_count {
                let content = match row.cells.get(col) {
                    Some(cell) => self.cell_text(cell),
                    None => String::new(),
                };
                self.output.push_str(&format!(" {} |", content.trim()));
            }
            self.output.push('\n');

            // Separator after the first row
            if i == 0 {
                self.output.push('|');
                for col in 0..col_count {
                    let justification = row
                        .cells
                        .get(col)
                        .and_then(TableCell::font_settings)
                        .or(font_settings)
                        .map(|fs| fs.justification)
                        .unwrap_or_default();
                    let align_marker = match justification {
                        Justification::Left | Justification::Justify => " --- |",
                        Justification::Center => " :---: |",
                        Justification::Right => " ---: |",
                    };
                    self.output.push_str(align_marker);
                }
                self.output.push('\n');
            }
        }

        self.output.push('\n');
    }

    fn cell_text(&mut self, cell: &TableCell) -> String {
        match cell {
            TableCell::Text(text) => {
                let escaped = self.escape(&text.content);
                if self.options.preserve_line_breaks {
                    escaped.replace('\n', "<br>")
                } else {
                    escaped.replace('\n', " ")
                }
            }
            TableCell::Unsupported { kind } => {
                log::warn!("Markdown cannot render '{}' cells, writing placeholder", kind);
                self.stats.add_placeholder();
                self.options.placeholder_for(kind)
            }
        }
    }
}

type StyleMarker = (fn(&StyledRun) -> bool, &'static str, &'static str);

// Italic uses `_` so the output reads back as the same markup.
const STYLE_MARKERS: [StyleMarker; 3] = [
    (is_bold, "**", "**"),
    (is_italic, "_", "_"),
    (is_underline, "<u>", "</u>"),
];

fn is_bold(run: &StyledRun) -> bool {
    run.is_bold
}

fn is_italic(run: &StyledRun) -> bool {
    run.is_italic
}

fn is_underline(run: &StyledRun) -> bool {
    run.is_underline
}

fn group_count(runs: &[StyledRun], flag: fn(&StyledRun) -> bool) -> usize {
    runs.windows(2).filter(|w| flag(&w[0]) != flag(&w[1])).count() + 1
}

/// Wrap `text` in delimiters, leaving leading and trailing whitespace outside.
fn wrap_trimmed(text: &str, open: &str, close: &str) -> String {
    let start = text.trim_start();
    let core = start.trim_end();
    if core.is_empty() {
        return text.to_string();
    }
    let leading = &text[..text.len() - start.len()];
    let trailing = &start[core.len()..];
    format!("{}{}{}{}{}", leading, open, core, close, trailing)
}

/// Escape special Markdown characters.
///
/// Only characters that could be read as inline syntax or table structure are
/// escaped.
pub(crate) fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}
