//! Font settings factories for concrete output libraries.
//!
//! Each backend seeds new [`FontSettings`](crate::model::FontSettings) from a
//! [`FontDefaults`](crate::model::FontDefaults) value and converts settings into
//! its own native styling type. The core never inspects the native values.

mod pdf;
mod plain;
mod word;

pub use pdf::{PdfBaseFont, PdfFontSettingsFactory, PdfFontStyle};
pub use plain::PlainFontSettingsFactory;
pub use word::{WordFontSettingsFactory, WordJustification, WordRunProperties};
