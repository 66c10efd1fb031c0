//! YAML manifest types for table views.

use crate::error::ConfigError;
use crate::format::CellFormat;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Table manifest loaded from a `*.table.yaml` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableManifest {
    /// The table view configuration
    pub table: TableConfig,
}

/// Configuration of one table view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    /// Table ID (used as the test id)
    #[serde(default)]
    pub id: Option<String>,
    /// Paginate instead of windowing with "load more"
    #[serde(default)]
    pub show_pagination: bool,
    /// Page sizes offered by the pagination bar
    #[serde(default = "default_page_sizes")]
    pub page_size_options: Vec<usize>,
    /// Initial window size / default page size
    #[serde(default = "default_min_rows")]
    pub min_rows: usize,
    /// Compact row height
    #[serde(default = "default_dense")]
    pub dense: bool,
    /// Equal column widths
    #[serde(default)]
    pub fixed_layout: bool,
    /// Emit a "more" request instead of growing the window locally
    #[serde(default)]
    pub delegate_more: bool,
    /// Initial sort
    #[serde(default)]
    pub sort: Option<SortConfig>,
    /// Column definitions
    #[serde(default)]
    pub columns: Vec<ColumnConfig>,
    /// Static text for the whole-table footer row
    #[serde(default)]
    pub footer: Option<String>,
    /// Localized strings
    #[serde(default)]
    pub labels: Option<LabelConfig>,
    /// Hex colors
    #[serde(default)]
    pub palette: Option<PaletteConfig>,
}

fn default_page_sizes() -> Vec<usize> {
    vec![5, 10, 20, 50]
}

const fn default_min_rows() -> usize {
    5
}

const fn default_dense() -> bool {
    true
}

/// Column definition from YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// Column ID, unique within the table
    pub id: String,
    /// Header label (defaults to the id)
    #[serde(default)]
    pub label: Option<String>,
    /// Cell alignment
    #[serde(default)]
    pub align: Align,
    /// Field to read instead of `id`
    #[serde(default)]
    pub accessor: Option<String>,
    /// Named cell format, written as a one-key map (`currency: {}`) or a
    /// bare name (`bold`)
    #[serde(default, with = "serde_yaml_ng::with::singleton_map")]
    pub format: Option<CellFormat>,
    /// Pre-computed footer value
    #[serde(default)]
    pub footer: Option<String>,
    /// Fixed width in pixels
    #[serde(default)]
    pub width: Option<f32>,
}

impl ColumnConfig {
    /// Header label, falling back to the id.
    #[must_use]
    pub fn label_or_id(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

/// Cell alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Left aligned
    #[default]
    Left,
    /// Centered
    Center,
    /// Right aligned
    Right,
}

/// Initial sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    /// Column ID to sort by
    pub column: String,
    /// Sort direction
    #[serde(default)]
    pub direction: SortOrder,
}

/// Sort direction as written in YAML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest first
    #[default]
    #[serde(alias = "asc")]
    Ascending,
    /// Largest first
    #[serde(alias = "desc")]
    Descending,
}

/// Localized strings for the table chrome.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabelConfig {
    /// Text of the "load more" button
    #[serde(default)]
    pub load_more: Option<String>,
    /// Template of the delegated "more" button, `{n}` is the hidden count
    #[serde(default)]
    pub more: Option<String>,
    /// Caption of the rows-per-page selector
    #[serde(default)]
    pub rows_per_page: Option<String>,
    /// Template of the range label: `{from}`, `{to}`, `{count}`
    #[serde(default)]
    pub displayed_rows: Option<String>,
}

/// Hex colors for the table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaletteConfig {
    /// Header background
    #[serde(default)]
    pub header_bg: Option<String>,
    /// Row background
    #[serde(default)]
    pub row_bg: Option<String>,
    /// Alternate row background
    #[serde(default)]
    pub row_alt_bg: Option<String>,
    /// Footer background
    #[serde(default)]
    pub footer_bg: Option<String>,
    /// Body text
    #[serde(default)]
    pub text: Option<String>,
}

impl TableManifest {
    /// Parse and validate a manifest from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or the table fails validation.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let manifest: Self = serde_yaml_ng::from_str(yaml)?;
        manifest.table.validate()?;
        Ok(manifest)
    }

    /// Serialize manifest to YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }
}

impl TableConfig {
    /// Check the invariants the table relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns.is_empty() {
            return Err(ConfigError::MissingField("columns".to_string()));
        }

        let mut seen = HashSet::new();
        for (i, col) in self.columns.iter().enumerate() {
            if col.id.trim().is_empty() {
                return Err(ConfigError::invalid(
                    format!("columns[{i}].id"),
                    "must not be empty",
                ));
            }
            if !seen.insert(col.id.as_str()) {
                return Err(ConfigError::DuplicateColumn(col.id.clone()));
            }
            if let Some(format) = &col.format {
                format
                    .validate()
                    .map_err(|msg| ConfigError::invalid(format!("columns[{i}].format"), msg))?;
            }
            if col.width.is_some_and(|w| !(w.is_finite() && w > 0.0)) {
                return Err(ConfigError::invalid(
                    format!("columns[{i}].width"),
                    "must be a positive number",
                ));
            }
        }

        if self.min_rows == 0 {
            return Err(ConfigError::invalid("min_rows", "must be at least 1"));
        }

        if self.show_pagination && self.page_size_options.is_empty() {
            return Err(ConfigError::invalid(
                "page_size_options",
                "must not be empty when paginating",
            ));
        }
        if self.page_size_options.contains(&0) {
            return Err(ConfigError::invalid(
                "page_size_options",
                "page sizes must be at least 1",
            ));
        }

        if let Some(sort) = &self.sort {
            if !seen.contains(sort.column.as_str()) {
                return Err(ConfigError::UnknownColumn(sort.column.clone()));
            }
        }

        Ok(())
    }
}

/// Parse a YAML sequence of records.
///
/// # Errors
///
/// Returns an error if the YAML is invalid or does not match `T`.
pub fn parse_records<T: DeserializeOwned>(yaml: &str) -> Result<Vec<T>, ConfigError> {
    Ok(serde_yaml_ng::from_str(yaml)?)
}

/// Parse a JSON array of records.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or does not match `T`.
pub fn parse_json_records<T: DeserializeOwned>(json: &str) -> Result<Vec<T>, ConfigError> {
    Ok(serde_json::from_str(json)?)
}
