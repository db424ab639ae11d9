//! Document sections: header, footer, signature and the body tree.

use super::{FontSettings, FontSettingsFactory, RowList, SectionList, TablesRow};
use std::cell::Ref;
use std::ops::Deref;

/// Which structural region a section represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    /// Page header rows
    Header,
    /// The body as a whole
    Body,
    /// A single titled body section
    BodySection,
    /// Page footer rows
    Footer,
    /// Signature block rows
    Signature,
}

impl SectionKind {
    /// Lowercase name of the kind.
    pub fn name(&self) -> &'static str {
        match self {
            SectionKind::Header => "header",
            SectionKind::Body => "body",
            SectionKind::BodySection => "body_section",
            SectionKind::Footer => "footer",
            SectionKind::Signature => "signature",
        }
    }
}

/// Borrowed view of a section's table rows.
pub enum Rows<'a> {
    /// The section carries no rows
    Empty,
    /// Rows borrowed from a shared list
    Shared(Ref<'a, Vec<TablesRow>>),
}

impl Deref for Rows<'_> {
    type Target = [TablesRow];

    fn deref(&self) -> &[TablesRow] {
        match self {
            Rows::Empty => &[],
            Rows::Shared(rows) => rows.as_slice(),
        }
    }
}

/// Borrowed view of a section's sub-sections.
pub enum SubSections<'a> {
    /// The section has no sub-sections
    Empty,
    /// Sub-sections owned by a body section
    Owned(&'a [BodySection]),
    /// Top-level sections borrowed from a shared list
    Shared(Ref<'a, Vec<BodySection>>),
}

impl Deref for SubSections<'_> {
    type Target = [BodySection];

    fn deref(&self) -> &[BodySection] {
        match self {
            SubSections::Empty => &[],
            SubSections::Owned(sections) => sections,
            SubSections::Shared(sections) => sections.as_slice(),
        }
    }
}

/// Common capability of every section.
pub trait DocumentSection {
    /// The structural region this section represents.
    fn kind(&self) -> SectionKind;

    /// Table rows carried by the section (empty for body content).
    fn tables_rows(&self) -> Rows<'_>;

    /// Section-level font settings, if any.
    fn font_settings(&self) -> Option<&FontSettings>;

    /// Ordered sub-sections (possibly empty).
    fn sub_sections(&self) -> SubSections<'_>;
}

/// Page header: table rows only.
#[derive(Debug, Clone, Default)]
pub struct HeaderSection {
    /// Rows shared with the builder that produced this section
    pub rows: RowList,
    /// Section-level font settings
    pub font_settings: Option<FontSettings>,
}

/// Page footer: table rows only.
#[derive(Debug, Clone, Default)]
pub struct FooterSection {
    /// Rows shared with the builder that produced this section
    pub rows: RowList,
    /// Section-level font settings
    pub font_settings: Option<FontSettings>,
}

/// Signature block: table rows plus a placement hint.
#[derive(Debug, Clone)]
pub struct SignatureSection {
    /// Rows shared with the builder that produced this section
    pub rows: RowList,
    /// Section-level font settings
    pub font_settings: Option<FontSettings>,
    /// Ask renderers to put the block at the physical end of the output.
    /// Does not change iteration order inside the model.
    pub place_at_bottom: bool,
}

impl HeaderSection {
    /// Create a header over an existing row list.
    pub fn new(rows: RowList, font_settings: Option<FontSettings>) -> Self {
        Self {
            rows,
            font_settings,
        }
    }

    /// Append a row.
    pub fn add_row(&self, row: TablesRow) {
        self.rows.push(row);
    }
}

impl FooterSection {
    /// Create a footer over an existing row list.
    pub fn new(rows: RowList, font_settings: Option<FontSettings>) -> Self {
        Self {
            rows,
            font_settings,
        }
    }

    /// Append a row.
    pub fn add_row(&self, row: TablesRow) {
        self.rows.push(row);
    }
}

impl SignatureSection {
    /// Create a signature block over an existing row list, placed at the bottom.
    pub fn new(rows: RowList, font_settings: Option<FontSettings>) -> Self {
        Self {
            rows,
            font_settings,
            place_at_bottom: true,
        }
    }

    /// Append a row.
    pub fn add_row(&self, row: TablesRow) {
        self.rows.push(row);
    }

    /// Set the placement hint and return self.
    pub fn at_bottom(mut self, place_at_bottom: bool) -> Self {
        self.place_at_bottom = place_at_bottom;
        self
    }
}

impl Default for SignatureSection {
    fn default() -> Self {
        Self::new(RowList::new(), None)
    }
}

impl DocumentSection for HeaderSection {
    fn kind(&self) -> SectionKind {
        SectionKind::Header
    }

    fn tables_rows(&self) -> Rows<'_> {
        Rows::Shared(self.rows.borrow())
    }

    fn font_settings(&self) -> Option<&FontSettings> {
        self.font_settings.as_ref()
    }

    fn sub_sections(&self) -> SubSections<'_> {
        SubSections::Empty
    }
}

impl DocumentSection for FooterSection {
    fn kind(&self) -> SectionKind {
        SectionKind::Footer
    }

    fn tables_rows(&self) -> Rows<'_> {
        Rows::Shared(self.rows.borrow())
    }

    fn font_settings(&self) -> Option<&FontSettings> {
        self.font_settings.as_ref()
    }

    fn sub_sections(&self) -> SubSections<'_> {
        SubSections::Empty
    }
}

impl DocumentSection for SignatureSection {
    fn kind(&self) -> SectionKind {
        SectionKind::Signature
    }

    fn tables_rows(&self) -> Rows<'_> {
        Rows::Shared(self.rows.borrow())
    }

    fn font_settings(&self) -> Option<&FontSettings> {
        self.font_settings.as_ref()
    }

    fn sub_sections(&self) -> SubSections<'_> {
        SubSections::Empty
    }
}

/// Heading numbering style of a body section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NumberingType {
    /// 1, 1.1, 1.1.1, ...
    #[default]
    Numeric,
    /// a, b, c, ..., z, aa, ab, ...
    Alphabetic,
    /// I, II, III, ...
    Roman,
    /// No label
    None,
}

impl NumberingType {
    /// Label for the 1-based `index` among siblings.
    pub fn label(&self, index: usize) -> String {
        match self {
            NumberingType::Numeric => index.to_string(),
            NumberingType::Alphabetic => to_alphabetic(index),
            NumberingType::Roman => to_roman(index),
            NumberingType::None => String::new(),
        }
    }

    /// Label for a section at `path` (1-based indices from the root).
    ///
    /// Numeric labels are dotted (`1.2.3`); other styles only label the last level.
    pub fn format_path(&self, path: &[usize]) -> String {
        match self {
            NumberingType::Numeric => path
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join("."),
            _ => path.last().map(|i| self.label(*i)).unwrap_or_default(),
        }
    }
}

fn to_alphabetic(mut index: usize) -> String {
    if index == 0 {
        return String::new();
    }
    let mut letters = Vec::new();
    while index > 0 {
        index -= 1;
        letters.push((b'a' + (index % 26) as u8) as char);
        index /= 26;
    }
    letters.iter().rev().collect()
}

/// Convert number to Roman numerals.
fn to_roman(mut num: usize) -> String {
    let numerals = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];

    let mut result = String::new();
    for (value, symbol) in numerals {
        while num >= value {
            result.push_str(symbol);
            num -= value;
        }
    }
    result
}

/// Title font size in points for a hierarchy level.
pub fn heading_font_size(level: i32) -> f64 {
    match level {
        1 => 18.0,
        2 => 16.0,
        3 => 14.0,
        _ => 12.0,
    }
}

/// A titled, nestable unit of body content.
///
/// `title` and `hierarchy_level` are not checked on construction; run a
/// [`SectionValidator`](crate::validate::SectionValidator) to check them.
#[derive(Debug, Clone, PartialEq)]
pub struct BodySection {
    /// Section title
    pub title: String,

    /// Notes printed right under the title
    pub title_notes: Vec<String>,

    /// Notes printed after the content
    pub section_notes: Vec<String>,

    /// Content in rich text markup
    pub rich_text_content: String,

    /// Nesting level, valid in 1..=10
    pub hierarchy_level: i32,

    /// Heading numbering style
    pub numbering_type: NumberingType,

    /// Owned child sections
    pub sub_body_sections: Vec<BodySection>,

    /// Styling of the content text
    pub font_settings: FontSettings,
}

impl BodySection {
    /// Create a level-1 section with the given font settings.
    pub fn new(
        title: impl Into<String>,
        rich_text_content: impl Into<String>,
        font_settings: FontSettings,
    ) -> Self {
        Self {
            title: title.into(),
            title_notes: Vec::new(),
            section_notes: Vec::new(),
            rich_text_content: rich_text_content.into(),
            hierarchy_level: 1,
            numbering_type: NumberingType::Numeric,
            sub_body_sections: Vec::new(),
            font_settings,
        }
    }

    /// Create a level-1 section styled with the factory's defaults.
    pub fn with_factory(
        factory: &dyn FontSettingsFactory,
        title: impl Into<String>,
        rich_text_content: impl Into<String>,
    ) -> Self {
        Self::new(title, rich_text_content, factory.create_font_settings())
    }

    /// Set the hierarchy level and return self.
    pub fn level(mut self, hierarchy_level: i32) -> Self {
        self.hierarchy_level = hierarchy_level;
        self
    }

    /// Set the title notes and return self.
    pub fn title_notes<S: Into<String>>(mut self, notes: impl IntoIterator<Item = S>) -> Self {
        self.title_notes = notes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the section notes and return self.
    pub fn section_notes<S: Into<String>>(mut self, notes: impl IntoIterator<Item = S>) -> Self {
        self.section_notes = notes.into_iter().map(Into::into).collect();
        self
    }

    /// Set the numbering type and return self.
    pub fn numbering(mut self, numbering_type: NumberingType) -> Self {
        self.numbering_type = numbering_type;
        self
    }

    /// Append a sub-section and return self.
    pub fn with_sub_section(mut self, section: BodySection) -> Self {
        self.sub_body_sections.push(section);
        self
    }

    /// Append a sub-section.
    pub fn add_sub_section(&mut self, section: BodySection) {
        self.sub_body_sections.push(section);
    }

    /// Number of sections in this tree, including `self`.
    pub fn section_count(&self) -> usize {
        1 + self
            .sub_body_sections
            .iter()
            .map(BodySection::section_count)
            .sum::<usize>()
    }

    /// Depth-first, pre-order walk over this tree.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(vec![1], self)],
        }
    }
}

impl DocumentSection for BodySection {
    fn kind(&self) -> SectionKind {
        SectionKind::BodySection
    }

    fn tables_rows(&self) -> Rows<'_> {
        Rows::Empty
    }

    fn font_settings(&self) -> Option<&FontSettings> {
        Some(&self.font_settings)
    }

    fn sub_sections(&self) -> SubSections<'_> {
        SubSections::Owned(&self.sub_body_sections)
    }
}

/// Item yielded by [`BodySection::walk`].
#[derive(Debug, Clone)]
pub struct WalkItem<'a> {
    /// 1-based position of each ancestor and of the section itself
    pub path: Vec<usize>,
    /// The visited section
    pub section: &'a BodySection,
}

impl WalkItem<'_> {
    /// Depth below the walk root (root = 0).
    pub fn depth(&self) -> usize {
        self.path.len() - 1
    }
}

/// Pre-order iterator over a body section tree.
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    stack: Vec<(Vec<usize>, &'a BodySection)>,
}

impl<'a> Walk<'a> {
    pub(crate) fn with_root_index(section: &'a BodySection, index: usize) -> Self {
        Self {
            stack: vec![(vec![index], section)],
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = WalkItem<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (path, section) = self.stack.pop()?;
        for (i, child) in section.sub_body_sections.iter().enumerate().rev() {
            let mut child_path = path.clone();
            child_path.push(i + 1);
            self.stack.push((child_path, child));
        }
        Some(WalkItem { path, section })
    }
}

/// The document body: top-level sections plus structural default styling.
#[derive(Debug, Clone, Default)]
pub struct BodyContent {
    /// Top-level sections, shared with the builder that produced them
    pub sections: SectionList,

    /// Styling for section titles
    pub header_font_settings: FontSettings,

    /// Styling for body text
    pub text_font_settings: FontSettings,
}

impl BodyContent {
    /// Create body content over an existing section list.
    pub fn new(
        sections: SectionList,
        header_font_settings: FontSettings,
        text_font_settings: FontSettings,
    ) -> Self {
        Self {
            sections,
            header_font_settings,
            text_font_settings,
        }
    }

    /// Create body content styled with the factory's defaults.
    pub fn with_factory(factory: &dyn FontSettingsFactory, sections: SectionList) -> Self {
        Self::new(
            sections,
            factory.create_font_settings(),
            factory.create_font_settings(),
        )
    }

    /// Append a top-level section.
    pub fn add_section(&self, section: BodySection) {
        self.sections.push(section);
    }

    /// Number of top-level sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Check if there are no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total number of sections across all trees.
    pub fn total_sections(&self) -> usize {
        self.sections
            .borrow()
            .iter()
            .map(BodySection::section_count)
            .sum()
    }
}

impl DocumentSection for BodyContent {
    fn kind(&self) -> SectionKind {
        SectionKind::Body
    }

    fn tables_rows(&self) -> Rows<'_> {
        Rows::Empty
    }

    fn font_settings(&self) -> Option<&FontSettings> {
        Some(&self.text_font_settings)
    }

    fn sub_sections(&self) -> SubSections<'_> {
        SubSections::Shared(self.sections.borrow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(title: &str, level: i32) -> BodySection {
        BodySection::new(title, "", FontSettings::default()).level(level)
    }

    #[test]
    fn test_signature_defaults_to_bottom() {
        let signature = SignatureSection::default();
        assert!(signature.place_at_bottom);
        assert!(!signature.at_bottom(false).place_at_bottom);
    }

    #[test]
    fn test_row_sections_share_rows() {
        let rows = RowList::new();
        let header = HeaderSection::new(rows.clone(), None);
        header.add_row(TablesRow::from_strings(["Logo"]));

        assert_eq!(rows.len(), 1);
        assert_eq!(header.tables_rows().len(), 1);
        assert!(header.sub_sections().is_empty());
        assert_eq!(header.kind(), SectionKind::Header);
    }

    #[test]
    fn test_numbering_labels() {
        assert_eq!(NumberingType::Numeric.label(3), "3");
        assert_eq!(NumberingType::Alphabetic.label(1), "a");
        assert_eq!(NumberingType::Alphabetic.label(27), "aa");
        assert_eq!(NumberingType::Roman.label(14), "XIV");
        assert_eq!(NumberingType::None.label(5), "");
    }

    #[test]
    fn test_numbering_format_path() {
        assert_eq!(NumberingType::Numeric.format_path(&[1, 2, 3]), "1.2.3");
        assert_eq!(NumberingType::Roman.format_path(&[2, 4]), "IV");
        assert_eq!(NumberingType::Numeric.format_path(&[]), "");
    }

    #[test]
    fn test_to_roman() {
        assert_eq!(to_roman(1), "I");
        assert_eq!(to_roman(4), "IV");
        assert_eq!(to_roman(9), "IX");
        assert_eq!(to_roman(2024), "MMXXIV");
    }

    #[test]
    fn test_heading_font_size() {
        assert_eq!(heading_font_size(1), 18.0);
        assert_eq!(heading_font_size(3), 14.0);
        assert_eq!(heading_font_size(7), 12.0);
    }

    #[test]
    fn test_walk_pre_order() {
        let tree = section("A", 1)
            .with_sub_section(section("A.1", 2).with_sub_section(section("A.1.1", 3)))
            .with_sub_section(section("A.2", 2));

        let visited: Vec<(String, String)> = tree
            .walk()
            .map(|item| {
                (
                    item.section.title.clone(),
                    NumberingType::Numeric.format_path(&item.path),
                )
            })
            .collect();

        assert_eq!(
            visited,
            vec![
                ("A".to_string(), "1".to_string()),
                ("A.1".to_string(), "1.1".to_string()),
                ("A.1.1".to_string(), "1.1.1".to_string()),
                ("A.2".to_string(), "1.2".to_string()),
            ]
        );
        assert_eq!(tree.section_count(), 4);
    }

    #[test]
    fn test_body_content_sub_sections() {
        let body = BodyContent::default();
        body.add_section(section("One", 1));
        body.add_section(section("Two", 1).with_sub_section(section("Two.1", 2)));

        assert_eq!(body.len(), 2);
        assert_eq!(body.total_sections(), 3);
        let subs = body.sub_sections();
        assert_eq!(subs[1].title, "Two");
        assert!(body.tables_rows().is_empty());
    }
}
