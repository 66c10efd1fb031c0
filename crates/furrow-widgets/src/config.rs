//! Building tables from YAML manifests.
//!
//! ```
//! use furrow_widgets::DataTable;
//!
//! let yaml = r#"
//! table:
//!   id: crop-sales
//!   columns:
//!     - id: crop
//!       label: Crop
//!     - id: revenue
//!       label: Revenue
//!       align: right
//!       format: { currency: {} }
//! "#;
//! let table = DataTable::from_yaml(yaml).expect("valid manifest");
//! assert_eq!(table.column_count(), 2);
//! ```

use crate::data_table::{
    CellValue, DataTable, SortDirection, TableColumn, TableLabels, TableRow, TextAlign,
};
use furrow_core::Color;
use furrow_yaml::{
    parse_json_records, parse_records, Align, CellFormat, ColumnConfig, ConfigError, LabelConfig,
    PaletteConfig, SortOrder, TableConfig, TableManifest,
};
use log::debug;

impl From<Align> for TextAlign {
    fn from(align: Align) -> Self {
        match align {
            Align::Left => Self::Left,
            Align::Center => Self::Center,
            Align::Right => Self::Right,
        }
    }
}

impl From<SortOrder> for SortDirection {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Ascending => Self::Ascending,
            SortOrder::Descending => Self::Descending,
        }
    }
}

/// Apply a named format to a raw value.
///
/// Numbers and dates are formatted; other values pass through.
#[must_use]
pub fn apply_format(format: &CellFormat, value: &CellValue) -> CellValue {
    match value {
        CellValue::Number(n) => CellValue::Text(format.format_number(*n)),
        CellValue::Date(d) => CellValue::Text(format.format_date(*d)),
        other => other.clone(),
    }
}

impl TableColumn {
    /// Build a column from its manifest entry.
    #[must_use]
    pub fn from_config(config: &ColumnConfig) -> Self {
        let mut column =
            Self::new(config.id.clone(), config.label_or_id()).align(config.align.into());
        if let Some(width) = config.width {
            column = column.width(width);
        }
        if let Some(key) = &config.accessor {
            column = column.accessor_key(key.clone());
        }
        if let Some(format) = &config.format {
            if format.is_emphasis() {
                column = column.emphasis(true);
            } else {
                let key = config.accessor.clone().unwrap_or_else(|| config.id.clone());
                let format = format.clone();
                column = column.format(move |row| apply_format(&format, row.value(&key)));
            }
        }
        if let Some(footer) = &config.footer {
            column = column.footer(footer.as_str());
        }
        column
    }
}

impl From<&LabelConfig> for TableLabels {
    fn from(config: &LabelConfig) -> Self {
        let defaults = Self::default();
        Self {
            load_more: config.load_more.clone().unwrap_or(defaults.load_more),
            more: config.more.clone().unwrap_or(defaults.more),
            rows_per_page: config
                .rows_per_page
                .clone()
                .unwrap_or(defaults.rows_per_page),
            displayed_rows: config
                .displayed_rows
                .clone()
                .unwrap_or(defaults.displayed_rows),
        }
    }
}

fn palette_color(field: &str, hex: Option<&String>) -> Result<Option<Color>, ConfigError> {
    hex.map(|hex| {
        Color::from_hex(hex).map_err(|e| ConfigError::invalid(format!("palette.{field}"), e.to_string()))
    })
    .transpose()
}

fn apply_palette(mut table: DataTable, palette: &PaletteConfig) -> Result<DataTable, ConfigError> {
    if let Some(color) = palette_color("header_bg", palette.header_bg.as_ref())? {
        table = table.header_bg(color);
    }
    if let Some(color) = palette_color("row_bg", palette.row_bg.as_ref())? {
        table = table.row_bg(color);
    }
    if let Some(color) = palette_color("row_alt_bg", palette.row_alt_bg.as_ref())? {
        table = table.row_alt_bg(color);
    }
    if let Some(color) = palette_color("footer_bg", palette.footer_bg.as_ref())? {
        table = table.footer_bg(color);
    }
    if let Some(color) = palette_color("text", palette.text.as_ref())? {
        table = table.text_color(color);
    }
    Ok(table)
}

impl DataTable {
    /// Build a table (without rows) from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_config(config: &TableConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut table = Self::new()
            .show_pagination(config.show_pagination)
            .min_rows(config.min_rows)
            .page_size_options(config.page_size_options.iter().copied())
            .dense(config.dense)
            .fixed_layout(config.fixed_layout)
            .delegate_more(config.delegate_more)
            .columns(config.columns.iter().map(TableColumn::from_config));

        if let Some(id) = &config.id {
            table = table.test_id(id.clone());
        }
        if let Some(sort) = &config.sort {
            table = table.default_sort(sort.column.clone(), sort.direction.into());
        }
        if let Some(text) = &config.footer {
            let text = text.clone();
            table = table.footer(move || CellValue::Text(text.clone()));
        }
        if let Some(labels) = &config.labels {
            table = table.labels(labels.into());
        }
        if let Some(palette) = &config.palette {
            table = apply_palette(table, palette)?;
        }

        debug!(
            "table {}: built from config, {} columns",
            config.id.as_deref().unwrap_or("-"),
            table.column_count()
        );
        Ok(table)
    }

    /// Parse a YAML manifest and build the table it describes.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or fails validation.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Self::from_config(&TableManifest::from_yaml(yaml)?.table)
    }
}

/// Parse rows from a JSON array of objects.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or not an array of objects.
pub fn rows_from_json(json: &str) -> Result<Vec<TableRow>, ConfigError> {
    parse_json_records(json)
}

/// Parse rows from a YAML sequence of mappings.
///
/// # Errors
///
/// Returns an error if the YAML is invalid or not a sequence of mappings.
pub fn rows_from_yaml(yaml: &str) -> Result<Vec<TableRow>, ConfigError> {
    parse_records(yaml)
}
