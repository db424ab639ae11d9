//! Traversal of a built document in rendering order.
//!
//! Every creator walks the document the same way: header rows, the body
//! sections depth-first, footer rows and the signature rows. A signature with
//! `place_at_bottom == false` is emitted right after the body instead of after
//! the footer.
//!
//! # Example
//!
//! ```
//! use docgen::builder::DocumentBuilder;
//! use docgen::render::visitor::{walk_document, SectionVisitor, VisitedSection};
//!
//! #[derive(Default)]
//! struct Outline(Vec<String>);
//!
//! impl SectionVisitor for Outline {
//!     fn visit_body_section(&mut self, visited: &VisitedSection<'_>) {
//!         self.0.push(format!("{} {}", visited.label, visited.section.title));
//!     }
//! }
//!
//! let mut builder = DocumentBuilder::default();
//! builder.body_section("Intro", "").body_section("Scope", "");
//!
//! let mut outline = Outline::default();
//! walk_document(&builder.build(), &mut outline, true).unwrap();
//! assert_eq!(outline.0, vec!["1 Intro", "2 Scope"]);
//! ```

use crate::error::{Error, Result};
use crate::model::{
    BodyContent, BodySection, DocumentContent, FontSettings, RowList, SectionKind, TablesRow,
    Walk,
};

/// A body section reached during traversal.
#[derive(Debug, Clone)]
pub struct VisitedSection<'a> {
    /// The section
    pub section: &'a BodySection,

    /// 1-based position of each ancestor and of the section itself
    pub path: Vec<usize>,

    /// Numbering label (empty when numbering is off or the style has none)
    pub label: String,
}

impl VisitedSection<'_> {
    /// Depth below the top level (top level = 0).
    pub fn depth(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Callbacks invoked by [`walk_document`].
///
/// All methods do nothing by default.
pub trait SectionVisitor {
    /// Called for the rows of the header, footer or signature.
    ///
    /// Not called when the section has no rows.
    fn visit_rows(
        &mut self,
        kind: SectionKind,
        rows: &[TablesRow],
        font_settings: Option<&FontSettings>,
    ) {
        let _ = (kind, rows, font_settings);
    }

    /// Called before the first body section.
    fn on_body_start(&mut self, body: &BodyContent) {
        let _ = body;
    }

    /// Called for every body section, parents before children.
    fn visit_body_section(&mut self, visited: &VisitedSection<'_>) {
        let _ = visited;
    }

    /// Called after the last body section.
    fn on_body_end(&mut self, body: &BodyContent) {
        let _ = body;
    }
}

/// Walk `content` in rendering order.
///
/// Fails with [`Error::Render`] if one of the shared lists is being modified
/// while the document is walked.
pub fn walk_document<V: SectionVisitor + ?Sized>(
    content: &DocumentContent,
    visitor: &mut V,
    number_headings: bool,
) -> Result<()> {
    let signature = content.signature();

    visit_row_list(
        visitor,
        SectionKind::Header,
        &content.header().rows,
        content.header().font_settings.as_ref(),
    )?;

    let body = content.body();
    let sections = body
        .sections
        .try_borrow()
        .map_err(|_| busy(SectionKind::Body))?;
    visitor.on_body_start(body);
    for (i, top) in sections.iter().enumerate() {
        for item in Walk::with_root_index(top, i + 1) {
            let label = if number_headings {
                item.section.numbering_type.format_path(&item.path)
            } else {
                String::new()
            };
            visitor.visit_body_section(&VisitedSection {
                section: item.section,
                path: item.path,
                label,
            });
        }
    }
    visitor.on_body_end(body);
    drop(sections);

    if !signature.place_at_bottom {
        visit_row_list(
            visitor,
            SectionKind::Signature,
            &signature.rows,
            signature.font_settings.as_ref(),
        )?;
    }

    visit_row_list(
        visitor,
        SectionKind::Footer,
        &content.footer().rows,
        content.footer().font_settings.as_ref(),
    )?;

    if signature.place_at_bottom {
        visit_row_list(
            visitor,
            SectionKind::Signature,
            &signature.rows,
            signature.font_settings.as_ref(),
        )?;
    }

    Ok(())
}

fn visit_row_list<V: SectionVisitor + ?Sized>(
    visitor: &mut V,
    kind: SectionKind,
    rows: &RowList,
    font_settings: Option<&FontSettings>,
) -> Result<()> {
    let rows = rows.try_borrow().map_err(|_| busy(kind))?;
    if !rows.is_empty() {
        visitor.visit_rows(kind, &rows, font_settings);
    }
    Ok(())
}

fn busy(kind: SectionKind) -> Error {
    Error::Render(format!(
        "{} is being modified while the document is rendered",
        kind.name()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DocumentBuilder;
    use crate::model::NumberingType;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl SectionVisitor for Recorder {
        fn visit_rows(
            &mut self,
            kind: SectionKind,
            rows: &[TablesRow],
            _font_settings: Option<&FontSettings>,
        ) {
            self.events.push(format!("{}:{}", kind.name(), rows.len()));
        }

        fn visit_body_section(&mut self, visited: &VisitedSection<'_>) {
            self.events.push(format!("[{}] {}", visited.label, visited.section.title));
        }
    }

    fn builder() -> DocumentBuilder<crate::backend::PlainFontSettingsFactory> {
        let mut builder = DocumentBuilder::default();
        builder
            .header(|h| h.add_row(TablesRow::from_strings(["h"])))
            .footer(|f| f.add_row(TablesRow::from_strings(["f"])))
            .signature(|s| s.add_row(TablesRow::from_strings(["s"])))
            .body_section_with(
                "A",
                "",
                Default::default(),
                |s| {
                    s.add_sub_section(BodySection::new("A.1", "", FontSettings::default()).level(2));
                },
            )
            .body_section("B", "");
        builder
    }

    #[test]
    fn test_walk_order_signature_at_bottom() {
        let mut recorder = Recorder::default();
        walk_document(&builder().build(), &mut recorder, true).unwrap();
        assert_eq!(
            recorder.events,
            vec!["header:1", "[1] A", "[1.1] A.1", "[2] B", "footer:1", "signature:1"]
        );
    }

    #[test]
    fn test_walk_order_signature_inline() {
        let mut builder = builder();
        builder.place_signature_at_bottom(false);

        let mut recorder = Recorder::default();
        walk_document(&builder.build(), &mut recorder, false).unwrap();
        assert_eq!(
            recorder.events,
            vec!["header:1", "[] A", "[] A.1", "[] B", "signature:1", "footer:1"]
        );
    }

    #[test]
    fn test_empty_row_sections_skipped() {
        let mut builder = DocumentBuilder::default();
        builder.body_section_with("Only", "", Default::default(), |s| {
            s.numbering_type = NumberingType::Roman;
        });

        let mut recorder = Recorder::default();
        walk_document(&builder.build(), &mut recorder, true).unwrap();
        assert_eq!(recorder.events, vec!["[I] Only"]);
    }

    #[test]
    fn test_walk_fails_while_rows_borrowed() {
        let doc = builder().build();
        let _guard = doc.header().rows.borrow_mut();

        let err = walk_document(&doc, &mut Recorder::default(), true).unwrap_err();
        assert!(matches!(err, Error::Render(ref msg) if msg.starts_with("header")));
    }
}
