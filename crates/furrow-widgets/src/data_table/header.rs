//! Clickable column headers.

use super::column::{TableColumn, TextAlign};
use super::sort::{SortDirection, SortState};
use serde::{Deserialize, Serialize};

/// One header cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderCell {
    /// Column id
    pub id: String,
    /// Display label
    pub label: String,
    /// Alignment
    pub align: TextAlign,
    /// This column is the sort column
    pub active: bool,
    /// Direction shown by the sort indicator
    pub direction: SortDirection,
}

impl HeaderCell {
    /// Sort indicator, drawn only on the active column.
    #[must_use]
    pub const fn glyph(&self) -> Option<char> {
        if !self.active {
            return None;
        }
        match self.direction {
            SortDirection::Ascending => Some('▲'),
            SortDirection::Descending => Some('▼'),
        }
    }

    /// Label followed by the sort indicator, if any.
    #[must_use]
    pub fn caption(&self) -> String {
        match self.glyph() {
            Some(glyph) => format!("{} {glyph}", self.label),
            None => self.label.clone(),
        }
    }

    /// `aria-sort` value.
    #[must_use]
    pub const fn aria_sort(&self) -> &'static str {
        match (self.active, self.direction) {
            (false, _) => "none",
            (true, SortDirection::Ascending) => "ascending",
            (true, SortDirection::Descending) => "descending",
        }
    }
}

/// The header row of a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderRow {
    /// Cells in column order
    pub cells: Vec<HeaderCell>,
}

impl HeaderRow {
    /// Build the header for `columns` under `sort`.
    #[must_use]
    pub fn new(columns: &[TableColumn], sort: Option<&SortState>) -> Self {
        let cells = columns
            .iter()
            .map(|col| {
                let active = sort.is_some_and(|s| s.order_by == col.id);
                HeaderCell {
                    id: col.id.clone(),
                    label: col.label.clone(),
                    align: col.align,
                    active,
                    direction: match sort {
                        Some(s) if active => s.direction,
                        _ => SortDirection::Ascending,
                    },
                }
            })
            .collect();
        Self { cells }
    }

    /// Column id a click on cell `index` asks to sort by.
    #[must_use]
    pub fn request_sort(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(|cell| cell.id.as_str())
    }

    /// The active cell, if any.
    #[must_use]
    pub fn active(&self) -> Option<&HeaderCell> {
        self.cells.iter().find(|cell| cell.active)
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check for an empty header.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<TableColumn> {
        vec![
            TableColumn::new("transaction", "Transaction"),
            TableColumn::new("date", "Date"),
            TableColumn::new("amount", "Amount").align(TextAlign::Right),
        ]
    }

    #[test]
    fn test_header_marks_active_column() {
        let sort = SortState::new("date", SortDirection::Descending);
        let header = HeaderRow::new(&columns(), Some(&sort));
        assert_eq!(header.len(), 3);
        let active = header.active().unwrap();
        assert_eq!(active.id, "date");
        assert_eq!(active.direction, SortDirection::Descending);
        assert_eq!(active.glyph(), Some('▼'));
        assert_eq!(active.caption(), "Date ▼");
        assert_eq!(active.aria_sort(), "descending");
    }

    #[test]
    fn test_inactive_cells_show_ascending_without_glyph() {
        let sort = SortState::new("date", SortDirection::Descending);
        let header = HeaderRow::new(&columns(), Some(&sort));
        let amount = &header.cells[2];
        assert!(!amount.active);
        assert_eq!(amount.direction, SortDirection::Ascending);
        assert_eq!(amount.glyph(), None);
        assert_eq!(amount.caption(), "Amount");
        assert_eq!(amount.aria_sort(), "none");
        assert_eq!(amount.align, TextAlign::Right);
    }

    #[test]
    fn test_header_without_sort() {
        let header = HeaderRow::new(&columns(), None);
        assert!(header.active().is_none());
    }

    #[test]
    fn test_request_sort() {
        let header = HeaderRow::new(&columns(), None);
        assert_eq!(header.request_sort(1), Some("date"));
        assert_eq!(header.request_sort(3), None);
    }

    #[test]
    fn test_empty_header() {
        let header = HeaderRow::new(&[], None);
        assert!(header.is_empty());
    }
}
