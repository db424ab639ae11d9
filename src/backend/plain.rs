//! Backend-neutral factory.

use crate::model::{
    Backend, FontDefaults, FontSettings, FontSettingsConverter, FontSettingsFactory,
};

/// Factory for callers that have not picked an output library.
///
/// Its native form is a sanitized copy of the settings.
#[derive(Debug, Clone, Default)]
pub struct PlainFontSettingsFactory {
    defaults: FontDefaults,
}

impl PlainFontSettingsFactory {
    /// Create a factory seeded with `defaults`.
    pub fn new(defaults: FontDefaults) -> Self {
        Self {
            defaults: defaults.sanitized(),
        }
    }

    /// The seed values.
    pub fn defaults(&self) -> &FontDefaults {
        &self.defaults
    }
}

impl FontSettingsFactory for PlainFontSettingsFactory {
    fn backend(&self) -> Backend {
        Backend::Plain
    }

    fn create_font_settings(&self) -> FontSettings {
        self.defaults.to_font_settings()
    }
}

impl FontSettingsConverter for PlainFontSettingsFactory {
    type Native = FontSettings;

    fn convert_to_library_specific_format(&self, fs: &FontSettings) -> FontSettings {
        FontSettings {
            color: format!("#{}", fs.color_hex()),
            size: fs.effective_size(),
            ..fs.clone()
        }
    }
}
