//! YAML configuration for Furrow table views.
//!
//! A manifest declares columns, named cell formats, paging options and the
//! initial sort. Widgets turn it into a live table; this crate only parses
//! and validates.

mod error;
pub mod format;
mod manifest;

pub use error::ConfigError;
pub use format::CellFormat;
pub use manifest::{
    parse_json_records, parse_records, Align, ColumnConfig, LabelConfig, PaletteConfig,
    SortConfig, SortOrder, TableConfig, TableManifest,
};
