//! Table primitives shared by header, footer and signature sections.

use super::FontSettings;

/// A table cell, tagged by content kind.
///
/// Renderers match on the kind. Kinds a renderer cannot draw are replaced by a
/// placeholder rather than aborting the document.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TableCell {
    /// A cell holding styled text
    Text(TextCell),

    /// A cell of a kind this version cannot carry yet (e.g. `"image"`).
    Unsupported {
        /// Name of the declared kind
        kind: String,
    },
}

impl TableCell {
    /// Create a text cell without explicit font settings.
    pub fn text(content: impl Into<String>) -> Self {
        TableCell::Text(TextCell::new(content))
    }

    /// Create a text cell with explicit font settings.
    pub fn styled_text(content: impl Into<String>, font_settings: FontSettings) -> Self {
        TableCell::Text(TextCell::new(content).with_font_settings(font_settings))
    }

    /// Create a placeholder for a cell kind that cannot be represented yet.
    pub fn unsupported(kind: impl Into<String>) -> Self {
        TableCell::Unsupported { kind: kind.into() }
    }

    /// Short name of the cell kind.
    pub fn kind(&self) -> &str {
        match self {
            TableCell::Text(_) => "text",
            TableCell::Unsupported { kind } => kind,
        }
    }

    /// Check whether renderers can draw this cell.
    pub fn is_supported(&self) -> bool {
        !matches!(self, TableCell::Unsupported { .. })
    }

    /// Get plain text content (empty for unsupported kinds).
    pub fn plain_text(&self) -> String {
        match self {
            TableCell::Text(cell) => cell.content.clone(),
            TableCell::Unsupported { .. } => String::new(),
        }
    }

    /// Explicit font settings of the cell, if any.
    pub fn font_settings(&self) -> Option<&FontSettings> {
        match self {
            TableCell::Text(cell) => cell.font_settings.as_ref(),
            TableCell::Unsupported { .. } => None,
        }
    }
}

/// Text content of a cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextCell {
    /// Cell text; may contain line breaks
    pub content: String,

    /// Cell-specific styling (falls back to the section's settings when absent)
    pub font_settings: Option<FontSettings>,
}

impl TextCell {
    /// Create a text cell.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            font_settings: None,
        }
    }

    /// Set font settings and return self.
    pub fn with_font_settings(mut self, font_settings: FontSettings) -> Self {
        self.font_settings = Some(font_settings);
        self
    }
}

/// A row of cells with proportional column widths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TablesRow {
    /// Proportional column weights (not points or pixels)
    pub column_widths: Option<Vec<u32>>,

    /// Cells in the row
    pub cells: Vec<TableCell>,
}

impl TablesRow {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a row with cells and no explicit widths.
    pub fn with_cells(cells: Vec<TableCell>) -> Self {
        Self {
            column_widths: None,
            cells,
        }
    }

    /// Create a row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::with_cells(values.into_iter().map(TableCell::text).collect())
    }

    /// Set the column weights and return self.
    pub fn widths(mut self, widths: impl Into<Vec<u32>>) -> Self {
        self.column_widths = Some(widths.into());
        self
    }

    /// Append a cell and return self.
    pub fn cell(mut self, cell: TableCell) -> Self {
        self.cells.push(cell);
        self
    }

    /// Add a cell to the row.
    pub fn add_cell(&mut self, cell: TableCell) {
        self.cells.push(cell);
    }

    /// Get the number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Check if the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Column weights to use when drawing the row.
    ///
    /// Explicit widths are returned when there is exactly one positive weight per
    /// cell. Otherwise every cell gets weight 1.
    pub fn effective_widths(&self) -> Vec<u32> {
        match &self.column_widths {
            Some(widths)
                if widths.len() == self.cells.len() && widths.iter().all(|w| *w > 0) =>
            {
                widths.clone()
            }
            _ => {
                if self.column_widths.is_some() {
                    log::debug!(
                        "Row widths {:?} do not fit {} cell(s), using uniform widths",
                        self.column_widths,
                        self.cells.len()
                    );
                }
                vec![1; self.cells.len()]
            }
        }
    }

    /// Effective widths as percentages of the row (summing to roughly 100).
    pub fn width_percentages(&self) -> Vec<f64> {
        let widths = self.effective_widths();
        let total: u64 = widths.iter().map(|w| u64::from(*w)).sum();
        if total == 0 {
            return Vec::new();
        }
        widths
            .iter()
            .map(|w| f64::from(*w) * 100.0 / total as f64)
            .collect()
    }

    /// Replace explicit widths that do not fit the cells with uniform weights.
    pub fn normalize_widths(&mut self) {
        self.column_widths = Some(self.effective_widths());
    }

    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.plain_text())
            .collect::<Vec<_>>()
            .join("\t")
    }
}
