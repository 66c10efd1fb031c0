//! Column descriptors.

use super::cell::{CellValue, TableRow};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A shared, pure function from a row to a cell value.
#[derive(Clone)]
pub struct CellFn(Arc<dyn Fn(&TableRow) -> CellValue + Send + Sync>);

impl CellFn {
    /// Wrap a closure.
    pub fn new(f: impl Fn(&TableRow) -> CellValue + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Apply to a row.
    #[must_use]
    pub fn call(&self, row: &TableRow) -> CellValue {
        (self.0)(row)
    }
}

impl fmt::Debug for CellFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CellFn(..)")
    }
}

/// How a column reads its value out of a row.
#[derive(Debug, Clone)]
pub enum Accessor {
    /// Look up a field by name
    Key(String),
    /// Compute the value from the whole row
    Function(CellFn),
}

impl Accessor {
    /// Resolve the accessor against a row.
    #[must_use]
    pub fn resolve(&self, row: &TableRow) -> CellValue {
        match self {
            Self::Key(key) => row.value(key).clone(),
            Self::Function(f) => f.call(row),
        }
    }
}

/// Text alignment within a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Column definition for a data table.
#[derive(Debug, Clone)]
pub struct TableColumn {
    /// Column id: render key and default sort key
    pub id: String,
    /// Display header
    pub label: String,
    /// Column width (None = auto)
    pub width: Option<f32>,
    /// Text alignment
    pub align: TextAlign,
    /// Value accessor (None = field named by `id`)
    pub accessor: Option<Accessor>,
    /// Formatter applied in place of the raw value
    pub formatter: Option<CellFn>,
    /// Value shown in the column footer row
    pub footer: Option<CellValue>,
    /// Draw cells emphasized
    pub emphasis: bool,
}

impl TableColumn {
    /// Create a new column.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            width: None,
            align: TextAlign::Left,
            accessor: None,
            formatter: None,
            footer: None,
            emphasis: false,
        }
    }

    /// Set column width.
    #[must_use]
    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width.max(20.0));
        self
    }

    /// Set text alignment.
    #[must_use]
    pub const fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    /// Read the value from another field.
    #[must_use]
    pub fn accessor_key(mut self, key: impl Into<String>) -> Self {
        self.accessor = Some(Accessor::Key(key.into()));
        self
    }

    /// Compute the value from the row.
    #[must_use]
    pub fn accessor(mut self, f: impl Fn(&TableRow) -> CellValue + Send + Sync + 'static) -> Self {
        self.accessor = Some(Accessor::Function(CellFn::new(f)));
        self
    }

    /// Set the formatter.
    #[must_use]
    pub fn format(mut self, f: impl Fn(&TableRow) -> CellValue + Send + Sync + 'static) -> Self {
        self.formatter = Some(CellFn::new(f));
        self
    }

    /// Set the footer value.
    #[must_use]
    pub fn footer(mut self, value: impl Into<CellValue>) -> Self {
        self.footer = Some(value.into());
        self
    }

    /// Draw cells emphasized.
    #[must_use]
    pub const fn emphasis(mut self, emphasis: bool) -> Self {
        self.emphasis = emphasis;
        self
    }

    /// Raw value of this column for a row.
    #[must_use]
    pub fn value(&self, row: &TableRow) -> CellValue {
        match &self.accessor {
            Some(accessor) => accessor.resolve(row),
            None => row.value(&self.id).clone(),
        }
    }

    /// Value to render: the formatter if present, else the raw value.
    #[must_use]
    pub fn render(&self, row: &TableRow) -> CellValue {
        match &self.formatter {
            Some(f) => f.call(row),
            None => self.value(row),
        }
    }

    /// Value used for ordering rows by this column.
    ///
    /// The row field named by `id` wins; a function accessor is only
    /// consulted when that field is missing.
    #[must_use]
    pub fn sort_key(&self, row: &TableRow) -> CellValue {
        match (row.get(&self.id), &self.accessor) {
            (Some(value), _) => value.clone(),
            (None, Some(Accessor::Function(f))) => f.call(row),
            (None, _) => CellValue::Empty,
        }
    }
}
