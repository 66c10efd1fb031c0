//! Row ordering.

use super::cell::TableRow;
use super::column::TableColumn;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Orient an ascending comparison result.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Current sort column and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    /// Column id rows are ordered by
    pub order_by: String,
    /// Direction
    pub direction: SortDirection,
}

impl SortState {
    /// Create a sort state.
    #[must_use]
    pub fn new(order_by: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            order_by: order_by.into(),
            direction,
        }
    }

    /// Ascending on a column.
    #[must_use]
    pub fn ascending(order_by: impl Into<String>) -> Self {
        Self::new(order_by, SortDirection::Ascending)
    }

    /// State after a header click on `column`.
    ///
    /// The active column flips direction; any other column becomes active
    /// ascending.
    #[must_use]
    pub fn toggled(&self, column: &str) -> Self {
        if self.order_by == column {
            Self::new(column, self.direction.flipped())
        } else {
            Self::ascending(column)
        }
    }
}

/// Indices of `rows` in sorted order.
///
/// The sort is stable and keys are computed once per row. Without a sort
/// column (`column` is `None`) rows keep their input order.
#[must_use]
pub fn sorted_indices(
    rows: &[TableRow],
    column: Option<&TableColumn>,
    direction: SortDirection,
) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..rows.len()).collect();
    let Some(column) = column else {
        return indices;
    };
    let keys: Vec<_> = rows.iter().map(|row| column.sort_key(row)).collect();
    indices.sort_by(|&a, &b| direction.apply(keys[a].compare(&keys[b])));
    indices
}
