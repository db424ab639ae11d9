//! Standalone HTML document creator.

use crate::error::Result;
use crate::model::{
    heading_font_size, BodyContent, DocumentContent, DocumentCreateOptions, FontSettings,
    PageSettings, SectionKind, TableCell, TablesRow,
};
use crate::rich_text::RichTextParser;

use super::visitor::{walk_document, SectionVisitor, VisitedSection};
use super::{DocumentCreator, OutputFormat, RenderOptions, RenderResult, RenderStats};

/// Convert a document to HTML.
pub fn to_html(
    content: &DocumentContent,
    render_options: &RenderOptions,
    create_options: &DocumentCreateOptions,
) -> Result<String> {
    HtmlCreator::new(render_options.clone()).create_document_with_options(content, create_options)
}

/// HTML creator.
///
/// Produces a single page with inline CSS. Column weights become percentage
/// widths, landscape orientation becomes an `@page` rule and a background image
/// is set on `body`.
#[derive(Debug, Clone, Default)]
pub struct HtmlCreator {
    options: RenderOptions,
    parser: RichTextParser,
}

impl HtmlCreator {
    /// Create a new HTML creator.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            parser: RichTextParser::new(),
        }
    }
}

impl DocumentCreator for HtmlCreator {
    fn format(&self) -> OutputFormat {
        OutputFormat::Html
    }

    fn render(
        &self,
        content: &DocumentContent,
        options: &DocumentCreateOptions,
    ) -> Result<RenderResult> {
        let default_font_settings = content.default_font_settings();
        let mut writer = HtmlWriter {
            options: &self.options,
            parser: &self.parser,
            default_font_settings,
            heading_font_settings: default_font_settings.clone(),
            output: String::new(),
            stats: RenderStats::new(),
        };

        writer.write_head(options);
        walk_document(content, &mut writer, self.options.number_headings)?;
        writer.output.push_str("</body>\n</html>\n");

        let mut stats = writer.stats;
        stats.count_text(&strip_tags(&writer.output));
        Ok(RenderResult::new(writer.output, OutputFormat::Html, stats))
    }
}

struct HtmlWriter<'a> {
    options: &'a RenderOptions,
    parser: &'a RichTextParser,
    default_font_settings: &'a FontSettings,
    heading_font_settings: FontSettings,
    output: String,
    stats: RenderStats,
}

impl SectionVisitor for HtmlWriter<'_> {
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

        self.output
            .push_str(&format!("<div class=\"{}\">\n", kind.name()));
        for row in rows {
            self.render_row(row, font_settings);
        }
        self.output.push_str("</div>\n");
    }

    fn on_body_start(&mut self, body: &BodyContent) {
        self.heading_font_settings = body.header_font_settings.clone();
        self.output.push_str("<div class=\"body\">\n");
    }

    fn visit_body_section(&mut self, visited: &VisitedSection<'_>) {
        self.stats.add_body_section();
        let section = visited.section;

        let level = self.options.heading_level(section.hierarchy_level);
        let heading_style = self
            .heading_font_settings
            .clone()
            .with_size(heading_font_size(section.hierarchy_level))
            .with_bold(true);
        let title = if visited.label.is_empty() {
            escape_html(&section.title)
        } else {
            format!("{} {}", escape_html(&visited.label), escape_html(&section.title))
        };
        self.output.push_str(&format!(
            "<h{level} style=\"{}\">{}</h{level}>\n",
            font_css(&heading_style),
            title,
            level = level
        ));

        if self.options.include_notes {
            for note in &section.title_notes {
                self.output.push_str(&format!(
                    "<p class=\"title-note\"><em>{}</em></p>\n",
                    escape_html(note)
                ));
            }
        }

        if !section.rich_text_content.is_empty() {
            self.output
                .push_str(&format!("<p style=\"{}\">", font_css(&section.font_settings)));
            self.render_rich_text(&section.rich_text_content);
            self.output.push_str("</p>\n");
        }

        if self.options.include_notes {
            for note in &section.section_notes {
                self.output.push_str(&format!(
                    "<blockquote class=\"section-note\">{}</blockquote>\n",
                    escape_html(note)
                ));
            }
        }
    }

    fn on_body_end(&mut self, _body: &BodyContent) {
        self.output.push_str("</div>\n");
    }
}

impl HtmlWriter<'_> {
    fn write_head(&mut self, options: &DocumentCreateOptions) {
        let page = PageSettings::from(options);
        self.output.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<style>\n");
        if page.is_landscape {
            self.output.push_str("@page { size: landscape; }\n");
        }
        self.output.push_str(&format!(
            "body {{ margin: {}pt {}pt {}pt {}pt; }}\n",
            page.margin_top, page.margin_right, page.margin_bottom, page.margin_left
        ));
        if let Some(path) = options.background_image() {
            self.output.push_str(&format!(
                "body {{ background-image: url('{}'); background-size: cover; }}\n",
                escape_css_string(&path.display().to_string())
            ));
        }
        self.output
            .push_str("table { border-collapse: collapse; width: 100%; }\n</style>\n</head>\n");
        self.output.push_str(&format!(
            "<body style=\"{}\">\n",
            font_css(self.default_font_settings)
        ));
    }

    fn render_row(&mut self, row: &TablesRow, font_settings: Option<&FontSettings>) {
        if row.is_empty() {
            return;
        }

        self.output.push_str("<table>\n<colgroup>");
        for pct in row.width_percentages() {
            self.output
                .push_str(&format!("<col style=\"width: {:.2}%\">", pct));
        }
        self.output.push_str("</colgroup>\n<tr>");

        for cell in &row.cells {
            let style = cell
                .font_settings()
                .or(font_settings)
                .unwrap_or(self.default_font_settings);
            let content = self.cell_html(cell);
            self.output
                .push_str(&format!("<td style=\"{}\">{}</td>", font_css(style), content));
        }

        self.output.push_str("</tr>\n</table>\n");
    }

    fn cell_html(&mut self, cell: &TableCell) -> String {
        match cell {
            TableCell::Text(text) => self.with_line_breaks(&escape_html(&text.content)),
            TableCell::Unsupported { kind } => {
                log::warn!("HTML cannot render '{}' cells, writing placeholder", kind);
                self.stats.add_placeholder();
                escape_html(&self.options.placeholder_for(kind))
            }
        }
    }

    fn render_rich_text(&mut self, markup: &str) {
        for run in self.parser.parse(markup) {
            let mut html = self.with_line_breaks(&escape_html(&run.text));
            if run.is_italic {
                html = format!("<em>{}</em>", html);
            }
            if run.is_bold {
                html = format!("<strong>{}</strong>", html);
            }
            if run.is_underline {
                html = format!("<u>{}</u>", html);
            }
            self.output.push_str(&html);
        }
    }

    fn with_line_breaks(&self, html: &str) -> String {
        if self.options.preserve_line_breaks {
            html.replace('\n', "<br>\n")
        } else {
            html.replace('\n', " ")
        }
    }
}

/// Inline CSS declarations for `fs`.
pub fn font_css(fs: &FontSettings) -> String {
    format!(
        "color: #{}; font-size: {}pt; font-weight: {}; font-style: {}; text-decoration: {}; text-align: {};",
        fs.color_hex(),
        fs.effective_size(),
        if fs.bold { "bold" } else { "normal" },
        if fs.italic { "italic" } else { "normal" },
        if fs.underline { "underline" } else { "none" },
        fs.justification.as_str()
    )
}

/// Escape text for a single-quoted CSS string inside a `<style>` element.
///
/// Angle brackets and control characters become hex escapes so the value can
/// never close the element.
pub fn escape_css_string(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '\'' | '"' => {
                result.push('\\');
                result.push(c);
            }
            '<' | '>' => result.push_str(&format!("\\{:X} ", u32::from(c))),
            c if c.is_control() => result.push_str(&format!("\\{:X} ", u32::from(c))),
            _ => result.push(c),
        }
    }
    result
}

/// Escape text for use in HTML content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

fn strip_tags(html: &str) -> String {
    // Skip the head; the body tag itself is still open after the split.
    let (body, mut in_tag) = match html.split_once("<body") {
        Some((_, rest)) => (rest, true),
        None => (html, false),
    };
    let mut text = String::with_capacity(body.len());
    for c in body.chars() {
        match c {
            '<' => {
                in_tag = true;
                text.push(' ');
            }
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DocumentBuilder;
    use crate::model::Justification;

    #[test]
    fn test_font_css() {
        let fs = FontSettings::new()
            .with_color("#ff0000")
            .with_size(10.5)
            .with_bold(true)
            .with_justification(Justification::Center);
        assert_eq!(
            font_css(&fs),
            "color: #FF0000; font-size: 10.5pt; font-weight: bold; font-style: normal; text-decoration: none; text-align: center;"
        );
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a href=\"x\">&</a>"), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(
            strip_tags("<html><body><p>Hi</p></body></html>").split_whitespace().collect::<Vec<_>>(),
            vec!["Hi"]
        );
    }

    #[test]
    fn test_column_percentages() {
        let mut builder = DocumentBuilder::default();
        builder.header(|h| h.add_row(TablesRow::from_strings(["Logo", "Title"]).widths([40, 60])));
        let html = HtmlCreator::default().create_document(&builder.build()).unwrap();

        assert!(html.contains("<col style=\"width: 40.00%\"><col style=\"width: 60.00%\">"));
        assert!(html.contains(">Logo</td>"));
    }

    #[test]
    fn test_escape_css_string() {
        assert_eq!(escape_css_string("plain.png"), "plain.png");
        assert_eq!(escape_css_string(r"C:\img\it's.png"), r"C:\\img\\it\'s.png");
        assert_eq!(escape_css_string("a\nb"), r"a\A b");
        assert_eq!(escape_css_string("<x>"), r"\3C x\3E ");
    }

    #[test]
    fn test_landscape_and_background() {
        let doc = DocumentBuilder::default().build();
        let options = DocumentCreateOptions::new()
            .with_landscape(true)
            .with_background_image("bg.png");
        let html = HtmlCreator::default()
            .create_document_with_options(&doc, &options)
            .unwrap();

        assert!(html.contains("@page { size: landscape; }"));
        assert!(html.contains("background-image: url('bg.png')"));

        let awkward = DocumentCreateOptions::new().with_background_image("a&b's</style>.png");
        let html = HtmlCreator::default()
            .create_document_with_options(&doc, &awkward)
            .unwrap();
        assert!(html.contains(r"url('a&b\'s\3C /style\3E .png')"));
        assert!(!html.contains("</style>.png"));

        let portrait = HtmlCreator::default().create_document(&doc).unwrap();
        assert!(!portrait.contains("@page"));
        assert!(portrait.contains("body { margin: 36pt 36pt 36pt 36pt; }"));
        assert!(!portrait.contains("background-image"));
    }

    #[test]
    fn test_rich_text_and_heading() {
        let mut builder = DocumentBuilder::default();
        builder.body_section("Intro", "a **b** <c>");
        let html = HtmlCreator::default().create_document(&builder.build()).unwrap();

        assert!(html.contains("font-size: 18pt; font-weight: bold;"));
        assert!(html.contains(">1 Intro</h1>"));
        assert!(html.contains("a <strong>b</strong> &lt;c&gt;</p>"));
    }
}
