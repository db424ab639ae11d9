//! Read-only access to a built document, plus post-build enrichment helpers.

use chrono::{Local, NaiveDate};

use crate::model::{
    BodyContent, BodySection, DocumentContent, DocumentSection, FontSettingsFactory,
    FooterSection, HeaderSection, SignatureSection, TableCell, TablesRow,
};

/// Format-agnostic access to the sections of a document.
///
/// Sections are returned by reference. Their row and section lists are shared
/// handles, so rows appended through a provider are visible to every holder of
/// the document.
pub trait DocumentInfoProvider {
    /// The page header.
    fn header(&self) -> &HeaderSection;

    /// The page footer.
    fn footer(&self) -> &FooterSection;

    /// The document body.
    fn body(&self) -> &BodyContent;

    /// The signature block.
    fn signature(&self) -> &SignatureSection;

    /// Header, body and footer, in that order.
    ///
    /// The signature is not included; renderers place it separately.
    fn all_sections(&self) -> AllSections<'_> {
        AllSections {
            sections: [self.header(), self.body(), self.footer()],
            front: 0,
            back: 3,
        }
    }
}

/// Provider over a [`DocumentContent`].
#[derive(Debug, Clone, Copy)]
pub struct DocumentContentInfoProvider<'a> {
    content: &'a DocumentContent,
}

impl<'a> DocumentContentInfoProvider<'a> {
    /// Create a provider for `content`.
    pub fn new(content: &'a DocumentContent) -> Self {
        Self { content }
    }

    /// The underlying document.
    pub fn content(&self) -> &'a DocumentContent {
        self.content
    }
}

impl DocumentInfoProvider for DocumentContentInfoProvider<'_> {
    fn header(&self) -> &HeaderSection {
        self.content.header()
    }

    fn footer(&self) -> &FooterSection {
        self.content.footer()
    }

    fn body(&self) -> &BodyContent {
        self.content.body()
    }

    fn signature(&self) -> &SignatureSection {
        self.content.signature()
    }
}

/// Iterator returned by [`DocumentInfoProvider::all_sections`].
#[derive(Clone)]
pub struct AllSections<'a> {
    sections: [&'a dyn DocumentSection; 3],
    front: usize,
    back: usize,
}

impl<'a> Iterator for AllSections<'a> {
    type Item = &'a dyn DocumentSection;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let section = self.sections[self.front];
        self.front += 1;
        Some(section)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl DoubleEndedIterator for AllSections<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.sections[self.back])
    }
}

impl ExactSizeIterator for AllSections<'_> {}

impl std::iter::FusedIterator for AllSections<'_> {}

/// Text of the footer row added by [`SectionEnricher::stamp_footer_date`].
pub fn footer_date_text(date: NaiveDate) -> String {
    format!("Page 1 - {}", date.format("%Y-%m-%d"))
}

/// Adds content to an already built document through its provider.
#[derive(Debug)]
pub struct SectionEnricher<'a, P: DocumentInfoProvider, F: FontSettingsFactory> {
    provider: &'a P,
    factory: &'a F,
}

impl<'a, P: DocumentInfoProvider, F: FontSettingsFactory> SectionEnricher<'a, P, F> {
    /// Create an enricher that styles new sections with `factory`.
    pub fn new(provider: &'a P, factory: &'a F) -> Self {
        Self { provider, factory }
    }

    /// Append a single full-width row holding `text` to the header.
    pub fn add_header_banner(&self, text: impl Into<String>) {
        let row = TablesRow::with_cells(vec![TableCell::text(text)]).widths([100]);
        self.provider.header().add_row(row);
        log::debug!("Added banner row to header");
    }

    /// Append a full-width "Page 1 - <date>" row to the footer.
    pub fn stamp_footer_date(&self, date: NaiveDate) {
        let row = TablesRow::with_cells(vec![TableCell::text(footer_date_text(date))]).widths([100]);
        self.provider.footer().add_row(row);
        log::debug!("Stamped footer with {}", date);
    }

    /// Stamp the footer with the local date.
    pub fn stamp_footer_today(&self) {
        self.stamp_footer_date(Local::now().date_naive());
    }

    /// Append a top-level body section styled with the factory's defaults.
    pub fn append_body_section(
        &self,
        title: impl Into<String>,
        rich_text: impl Into<String>,
        hierarchy_level: i32,
    ) {
        let section =
            BodySection::with_factory(self.factory, title, rich_text).level(hierarchy_level);
        log::debug!(
            "Appending body section '{}' at level {}",
            section.title,
            section.hierarchy_level
        );
        self.provider.body().add_section(section);
    }

    /// One line per top-level body section: `'<title>' [Level: <n>]`.
    pub fn section_summaries(&self) -> Vec<String> {
        self.provider
            .body()
            .sections
            .borrow()
            .iter()
            .map(|s| format!("'{}' [Level: {}]", s.title, s.hierarchy_level))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::PlainFontSettingsFactory;
    use crate::builder::DocumentBuilder;
    use crate::model::SectionKind;

    #[test]
    fn test_all_sections_order() {
        let doc = DocumentBuilder::default().build();
        let provider = DocumentContentInfoProvider::new(&doc);

        let kinds: Vec<_> = provider.all_sections().map(|s| s.kind()).collect();
        assert_eq!(
            kinds,
            vec![SectionKind::Header, SectionKind::Body, SectionKind::Footer]
        );
        assert_eq!(provider.all_sections().len(), 3);
    }

    #[test]
    fn test_all_sections_reversible() {
        let doc = DocumentBuilder::default().build();
        let provider = DocumentContentInfoProvider::new(&doc);
        let last = provider.all_sections().next_back().map(|s| s.kind());
        assert_eq!(last, Some(SectionKind::Footer));
    }

    #[test]
    fn test_enricher_banner_and_date() {
        let doc = DocumentBuilder::default().build();
        let provider = DocumentContentInfoProvider::new(&doc);
        let factory = PlainFontSettingsFactory::default();
        let enricher = SectionEnricher::new(&provider, &factory);

        enricher.add_header_banner("LOGO");
        enricher.stamp_footer_date(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());

        assert_eq!(doc.header().rows.borrow()[0].plain_text(), "LOGO");
        assert_eq!(doc.footer().rows.borrow()[0].plain_text(), "Page 1 - 2024-03-09");
        assert_eq!(doc.footer().rows.borrow()[0].effective_widths(), vec![100]);
    }

    #[test]
    fn test_enricher_append_body_section() {
        let mut builder = DocumentBuilder::default();
        builder.body_section("Intro", "text");
        let doc = builder.build();
        let provider = DocumentContentInfoProvider::new(&doc);
        let factory = PlainFontSettingsFactory::default();
        let enricher = SectionEnricher::new(&provider, &factory);

        enricher.append_body_section("Extra", "More text.", 2);

        assert_eq!(
            enricher.section_summaries(),
            vec!["'Intro' [Level: 1]".to_string(), "'Extra' [Level: 2]".to_string()]
        );
        assert_eq!(builder.section_count(), 2);
    }
}
