//! Table widgets for Furrow.
//!
//! [`DataTable`] shows records as a sortable table that either paginates or
//! reveals rows a few at a time. It can be built in code or from a YAML
//! manifest (see [`DataTable::from_yaml`]).

mod config;
pub mod data_table;

pub use config::{apply_format, rows_from_json, rows_from_yaml};
pub use data_table::{
    Accessor, CellValue, DataTable, HeaderRow, MoreAffordance, PageInfo, Paging, RenderedTable,
    SortDirection, SortState, TableColumn, TableLabels, TableMoreRequested, TablePageChanged,
    TableRow, TableRowClicked, TableRowsPerPageChanged, TableSortChanged, TableWindowGrown,
    TextAlign,
};
