//! Document content model.
//!
//! This module defines the format-agnostic representation that every renderer
//! consumes: font settings, table rows, the section types and the built
//! [`DocumentContent`] aggregate.

mod document;
mod font;
mod section;
mod shared;
mod table;

pub use document::{DocumentContent, DocumentCreateOptions, PageSettings};
pub use font::{
    is_valid_hex_color, normalize_hex_color, Backend, FontDefaults, FontSettings,
    FontSettingsConverter, FontSettingsFactory, Justification, FALLBACK_COLOR,
    FALLBACK_FONT_SIZE,
};
pub use section::{
    heading_font_size, BodyContent, BodySection, DocumentSection, FooterSection, HeaderSection,
    NumberingType, Rows, SectionKind, SignatureSection, SubSections, Walk, WalkItem,
};
pub use shared::{RowList, SectionList, SharedList};
pub use table::{TableCell, TablesRow, TextCell};
