//! `DataTable` widget for displaying tabular data.
//!
//! The table orders its rows by the active column, shows one page (or a
//! growing window) of them, and reports interaction as messages returned
//! from [`Widget::event`]. Rows and columns belong to the caller; sort and
//! page state belong to the table.

mod cell;
mod column;
mod header;
mod paging;
mod render;
mod sort;

pub use cell::{CellValue, TableRow, DATE_DISPLAY_PATTERN};
pub use column::{Accessor, CellFn, TableColumn, TextAlign};
pub use header::{HeaderCell, HeaderRow};
pub use paging::{PageInfo, Paging, DEFAULT_PAGE_SIZES, LOAD_MORE_STEP};
pub use render::{
    escape_html, MoreAffordance, Padding, PaginationBar, RenderedCell, RenderedRow,
    RenderedTable, TableLabels,
};
pub use sort::{sorted_indices, SortDirection, SortState};

use furrow_core::{
    widget::{AccessibleRole, FontWeight, LayoutResult, TextStyle},
    Canvas, Color, Constraints, Event, Key, Message, MouseButton, Point, Rect, Size, TypeId,
    Widget,
};
use log::{debug, trace};
use std::fmt;
use std::sync::Arc;

/// Row height of a dense table.
pub const DENSE_ROW_HEIGHT: f32 = 40.0;

/// Row height of a regular table.
pub const ROW_HEIGHT: f32 = 56.0;

const HEADER_HEIGHT: f32 = 44.0;
const PAGINATION_HEIGHT: f32 = 52.0;
const AUTO_COLUMN_WIDTH: f32 = 100.0;
const CELL_PADDING: f32 = 8.0;
const NAV_BUTTON_WIDTH: f32 = 40.0;
const RANGE_LABEL_WIDTH: f32 = 120.0;
const PAGE_SIZE_OPTION_WIDTH: f32 = 36.0;
const PAGE_SIZE_CAPTION_WIDTH: f32 = 110.0;

/// Produces the full-width footer row.
pub type FooterFn = Arc<dyn Fn() -> CellValue + Send + Sync>;

/// Message emitted when a body row is clicked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableRowClicked {
    /// Index within the visible rows
    pub index: usize,
    /// Pointer position
    pub position: Point,
}

/// Message emitted when table sorting changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSortChanged {
    /// Column being sorted
    pub column: String,
    /// Sort direction
    pub direction: SortDirection,
}

/// Message emitted when the page changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TablePageChanged {
    /// New zero-based page
    pub page: usize,
}

/// Message emitted when the page size changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRowsPerPageChanged {
    /// New page size
    pub rows_per_page: usize,
}

/// Message emitted when the owner should provide more rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableMoreRequested {
    /// Rows hidden below the window
    pub hidden: usize,
}

/// Message emitted when the table grew its own window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableWindowGrown {
    /// New window length
    pub rows_per_page: usize,
}

/// Vertical bands of a laid-out table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line {
    Header,
    Body(usize),
    Padding,
    More,
    ColumnFooter,
    Footer,
    Pagination,
}

/// Clickable parts of the pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PaginationTarget {
    PageSize(usize),
    Previous,
    Next,
}

/// `DataTable` widget.
#[derive(Clone)]
pub struct DataTable {
    /// Column definitions
    columns: Vec<TableColumn>,
    /// Row data
    rows: Vec<TableRow>,
    /// Sort state; `None` until set, meaning the first column ascending
    sort: Option<SortState>,
    /// Page or window state
    paging: Paging,
    /// Pagination mode instead of windowing
    show_pagination: bool,
    /// Page sizes offered by the pagination bar
    page_size_options: Vec<usize>,
    /// Initial window or page size
    min_rows: usize,
    /// Dense rows
    dense: bool,
    /// Equal column widths
    fixed_layout: bool,
    /// "More" is handled by the owner
    delegate_more: bool,
    /// Full-width footer
    footer: Option<FooterFn>,
    /// Localizable strings
    labels: TableLabels,
    /// Header height
    header_height: f32,
    /// Striped rows
    striped: bool,
    /// Show border
    bordered: bool,
    /// Header background
    header_bg: Color,
    /// Row background
    row_bg: Color,
    /// Alternate row background
    row_alt_bg: Color,
    /// Footer background
    footer_bg: Color,
    /// Border color
    border_color: Color,
    /// Text color
    text_color: Color,
    /// Header text color
    header_text_color: Color,
    /// Disabled control color
    muted_text_color: Color,
    /// Accessible name
    accessible_name: Option<String>,
    /// Test ID
    test_id: Option<String>,
    /// Cached bounds
    bounds: Rect,
}

impl fmt::Debug for DataTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("columns", &self.columns.len())
            .field("rows", &self.rows.len())
            .field("sort", &self.sort)
            .field("paging", &self.paging)
            .field("dense", &self.dense)
            .field("delegate_more", &self.delegate_more)
            .field("test_id", &self.test_id)
            .finish_non_exhaustive()
    }
}

impl Default for DataTable {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            sort: None,
            paging: Paging::windowed(DEFAULT_PAGE_SIZES[0]),
            show_pagination: false,
            page_size_options: DEFAULT_PAGE_SIZES.to_vec(),
            min_rows: DEFAULT_PAGE_SIZES[0],
            dense: true,
            fixed_layout: false,
            delegate_more: false,
            footer: None,
            labels: TableLabels::default(),
            header_height: HEADER_HEIGHT,
            striped: true,
            bordered: true,
            header_bg: Color::from_rgb8(0xf6, 0xfb, 0xfa),
            row_bg: Color::WHITE,
            row_alt_bg: Color::from_rgb8(0xf9, 0xfa, 0xfb),
            footer_bg: Color::from_rgb8(0xf3, 0xf6, 0xfb),
            border_color: Color::from_rgb8(0xe5, 0xe7, 0xeb),
            text_color: Color::BLACK,
            header_text_color: Color::from_rgb8(0x1f, 0x29, 0x37),
            muted_text_color: Color::from_rgb8(0x9c, 0xa3, 0xaf),
            accessible_name: None,
            test_id: None,
            bounds: Rect::default(),
        }
    }
}

impl DataTable {
    /// Create a new empty data table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column.
    #[must_use]
    pub fn column(mut self, column: TableColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Add multiple columns.
    #[must_use]
    pub fn columns(mut self, columns: impl IntoIterator<Item = TableColumn>) -> Self {
        self.columns.extend(columns);
        self
    }

    /// Add a row.
    #[must_use]
    pub fn row(mut self, row: TableRow) -> Self {
        self.rows.push(row);
        self
    }

    /// Add multiple rows.
    #[must_use]
    pub fn rows(mut self, rows: impl IntoIterator<Item = TableRow>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// Choose pagination (true) or windowing (false).
    #[must_use]
    pub fn show_pagination(mut self, show: bool) -> Self {
        self.show_pagination = show;
        self.reset_paging();
        self
    }

    /// Set the page sizes offered by the pagination bar.
    #[must_use]
    pub fn page_size_options(mut self, options: impl IntoIterator<Item = usize>) -> Self {
        self.page_size_options = options.into_iter().filter(|&n| n > 0).collect();
        self
    }

    /// Set the initial window or page size.
    #[must_use]
    pub fn min_rows(mut self, min_rows: usize) -> Self {
        self.min_rows = min_rows.max(1);
        self.reset_paging();
        self
    }

    /// Set row density.
    #[must_use]
    pub const fn dense(mut self, dense: bool) -> Self {
        self.dense = dense;
        self
    }

    /// Give every column the same width.
    #[must_use]
    pub const fn fixed_layout(mut self, fixed: bool) -> Self {
        self.fixed_layout = fixed;
        self
    }

    /// Let the owner handle "more" through [`TableMoreRequested`].
    #[must_use]
    pub const fn delegate_more(mut self, delegate: bool) -> Self {
        self.delegate_more = delegate;
        self
    }

    /// Add a full-width footer row.
    #[must_use]
    pub fn footer(mut self, f: impl Fn() -> CellValue + Send + Sync + 'static) -> Self {
        self.footer = Some(Arc::new(f));
        self
    }

    /// Set the initial sort.
    #[must_use]
    pub fn default_sort(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(SortState::new(column, direction));
        self
    }

    /// Set localizable strings.
    #[must_use]
    pub fn labels(mut self, labels: TableLabels) -> Self {
        self.labels = labels;
        self
    }

    /// Set header height.
    #[must_use]
    pub fn header_height(mut self, height: f32) -> Self {
        self.header_height = height.max(20.0);
        self
    }

    /// Enable striped rows.
    #[must_use]
    pub const fn striped(mut self, striped: bool) -> Self {
        self.striped = striped;
        self
    }

    /// Enable border.
    #[must_use]
    pub const fn bordered(mut self, bordered: bool) -> Self {
        self.bordered = bordered;
        self
    }

    /// Set header background.
    #[must_use]
    pub const fn header_bg(mut self, color: Color) -> Self {
        self.header_bg = color;
        self
    }

    /// Set row background.
    #[must_use]
    pub const fn row_bg(mut self, color: Color) -> Self {
        self.row_bg = color;
        self
    }

    /// Set alternate row background.
    #[must_use]
    pub const fn row_alt_bg(mut self, color: Color) -> Self {
        self.row_alt_bg = color;
        self
    }

    /// Set footer background.
    #[must_use]
    pub const fn footer_bg(mut self, color: Color) -> Self {
        self.footer_bg = color;
        self
    }

    /// Set text color.
    #[must_use]
    pub const fn text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    /// Set accessible name.
    #[must_use]
    pub fn accessible_name(mut self, name: impl Into<String>) -> Self {
        self.accessible_name = Some(name.into());
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id = Some(id.into());
        self
    }

    /// Get column count.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get row count.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get columns.
    #[must_use]
    pub fn get_columns(&self) -> &[TableColumn] {
        &self.columns
    }

    /// Get rows in caller order.
    #[must_use]
    pub fn get_rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Get the effective sort: the configured one, else the first column
    /// ascending.
    #[must_use]
    pub fn current_sort(&self) -> Option<SortState> {
        self.sort.clone().or_else(|| {
            self.columns
                .first()
                .map(|col| SortState::ascending(col.id.clone()))
        })
    }

    /// Get paging state.
    #[must_use]
    pub const fn paging(&self) -> Paging {
        self.paging
    }

    /// Get the current page.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.paging.page()
    }

    /// Get rows per page (or window length).
    #[must_use]
    pub const fn rows_per_page(&self) -> usize {
        self.paging.rows_per_page()
    }

    /// Get row height for the current density.
    #[must_use]
    pub const fn row_height(&self) -> f32 {
        if self.dense {
            DENSE_ROW_HEIGHT
        } else {
            ROW_HEIGHT
        }
    }

    /// Get localizable strings.
    #[must_use]
    pub const fn get_labels(&self) -> &TableLabels {
        &self.labels
    }

    /// Check if table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Replace the rows, keeping sort and page state.
    pub fn set_rows(&mut self, rows: impl IntoIterator<Item = TableRow>) {
        self.rows = rows.into_iter().collect();
        debug!(
            "table {}: rows replaced, {} rows",
            self.log_name(),
            self.rows.len()
        );
    }

    /// Apply a header click on `column`.
    ///
    /// The active column flips direction; another column becomes active
    /// ascending.
    pub fn request_sort(&mut self, column: &str) -> TableSortChanged {
        let next = match self.current_sort() {
            Some(state) => state.toggled(column),
            None => SortState::ascending(column),
        };
        debug!(
            "table {}: sort {} {:?}",
            self.log_name(),
            next.order_by,
            next.direction
        );
        let message = TableSortChanged {
            column: next.order_by.clone(),
            direction: next.direction,
        };
        self.sort = Some(next);
        message
    }

    /// Go to `page`. The page is not clamped to the row count.
    pub fn set_page(&mut self, page: usize) -> TablePageChanged {
        self.paging = self.paging.with_page(page);
        debug!("table {}: page {}", self.log_name(), self.paging.page());
        TablePageChanged {
            page: self.paging.page(),
        }
    }

    /// Change rows per page (minimum 1) and return to the first page.
    pub fn set_rows_per_page(&mut self, rows_per_page: usize) -> TableRowsPerPageChanged {
        self.paging = self.paging.with_rows_per_page(rows_per_page);
        debug!(
            "table {}: {} rows per page",
            self.log_name(),
            self.paging.rows_per_page()
        );
        TableRowsPerPageChanged {
            rows_per_page: self.paging.rows_per_page(),
        }
    }

    /// Grow the window by [`LOAD_MORE_STEP`] rows, capped at the row count.
    pub fn load_more(&mut self) -> TableWindowGrown {
        self.paging = self.paging.load_more(self.rows.len());
        debug!(
            "table {}: window grown to {}",
            self.log_name(),
            self.paging.rows_per_page()
        );
        TableWindowGrown {
            rows_per_page: self.paging.rows_per_page(),
        }
    }

    /// Compute everything the table shows for the current state.
    #[must_use]
    pub fn render(&self) -> RenderedTable {
        let sort = self.current_sort();
        let (sort_column, direction) = match &sort {
            Some(state) => (
                self.columns.iter().find(|col| col.id == state.order_by),
                state.direction,
            ),
            None => (None, SortDirection::Ascending),
        };
        let order = sorted_indices(&self.rows, sort_column, direction);
        let total = self.rows.len();

        let rows: Vec<RenderedRow> = order[self.paging.visible_range(total)]
            .iter()
            .enumerate()
            .map(|(index, &source)| RenderedRow {
                index,
                source,
                cells: self
                    .columns
                    .iter()
                    .map(|col| RenderedCell {
                        column: col.id.clone(),
                        align: col.align,
                        value: col.render(&self.rows[source]),
                        emphasis: col.emphasis,
                    })
                    .collect(),
            })
            .collect();

        let empty_rows = self.paging.empty_rows(total);
        let padding = (empty_rows > 0).then(|| Padding {
            rows: empty_rows,
            height: self.row_height() * empty_rows as f32,
        });

        let hidden = self.paging.hidden_rows(total);
        let more = (hidden > 0).then(|| {
            if self.delegate_more {
                MoreAffordance::Delegated {
                    hidden,
                    label: self.labels.more_label(hidden),
                }
            } else {
                MoreAffordance::LoadMore {
                    hidden,
                    label: self.labels.load_more.clone(),
                }
            }
        });

        let column_footer = self
            .columns
            .iter()
            .any(|col| col.footer.is_some())
            .then(|| {
                self.columns
                    .iter()
                    .map(|col| RenderedCell {
                        column: col.id.clone(),
                        align: col.align,
                        value: col.footer.clone().unwrap_or_default(),
                        emphasis: true,
                    })
                    .collect()
            });

        let pagination = self.paging.is_paginated().then(|| {
            let info = self.paging.page_info(total);
            PaginationBar {
                info,
                page_size_options: self.page_size_options.clone(),
                rows_per_page_label: self.labels.rows_per_page.clone(),
                range_label: self.labels.range_label(&info),
            }
        });

        trace!(
            "table {}: rendered {} of {} rows",
            self.log_name(),
            rows.len(),
            total
        );

        RenderedTable {
            header: HeaderRow::new(&self.columns, sort.as_ref()),
            rows,
            padding,
            more,
            column_footer,
            footer: self.footer.as_ref().map(|f| f()),
            pagination,
            dense: self.dense,
            fixed_layout: self.fixed_layout,
        }
    }

    /// Render as an HTML fragment.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.render().to_html(self.test_id.as_deref())
    }

    fn reset_paging(&mut self) {
        self.paging = if self.show_pagination {
            Paging::paginated(self.min_rows)
        } else {
            Paging::windowed(self.min_rows)
        };
    }

    fn log_name(&self) -> &str {
        self.test_id.as_deref().unwrap_or("-")
    }

    /// Vertical bands and their heights, top to bottom.
    fn lines(&self, rendered: &RenderedTable) -> Vec<(Line, f32)> {
        let row_height = self.row_height();
        let mut lines = vec![(Line::Header, self.header_height)];
        lines.extend((0..rendered.rows.len()).map(|i| (Line::Body(i), row_height)));
        if let Some(padding) = rendered.padding {
            lines.push((Line::Padding, padding.height));
        }
        if rendered.more.is_some() {
            lines.push((Line::More, row_height));
        }
        if rendered.column_footer.is_some() {
            lines.push((Line::ColumnFooter, row_height));
        }
        if rendered.footer.is_some() {
            lines.push((Line::Footer, row_height));
        }
        if rendered.pagination.is_some() {
            lines.push((Line::Pagination, PAGINATION_HEIGHT));
        }
        lines
    }

    /// Horizontal `(x, width)` of each column within the bounds.
    fn column_spans(&self) -> Vec<(f32, f32)> {
        let count = self.columns.len();
        if count == 0 {
            return Vec::new();
        }
        let widths: Vec<f32> = if self.fixed_layout {
            vec![self.bounds.width / count as f32; count]
        } else {
            let fixed: f32 = self.columns.iter().filter_map(|col| col.width).sum();
            let auto_count = self.columns.iter().filter(|col| col.width.is_none()).count();
            let remaining = self.bounds.width - fixed;
            let auto_width = if auto_count > 0 && remaining > 0.0 {
                remaining / auto_count as f32
            } else {
                AUTO_COLUMN_WIDTH
            };
            self.columns
                .iter()
                .map(|col| col.width.unwrap_or(auto_width))
                .collect()
        };
        let mut x = self.bounds.x;
        widths
            .into_iter()
            .map(|width| {
                let span = (x, width);
                x += width;
                span
            })
            .collect()
    }

    fn pagination_regions(&self, bar: Rect, options: &[usize]) -> Vec<(Rect, PaginationTarget)> {
        let right = bar.right();
        let mut regions = vec![
            (
                Rect::new(right - NAV_BUTTON_WIDTH, bar.y, NAV_BUTTON_WIDTH, bar.height),
                PaginationTarget::Next,
            ),
            (
                Rect::new(
                    NAV_BUTTON_WIDTH.mul_add(-2.0, right),
                    bar.y,
                    NAV_BUTTON_WIDTH,
                    bar.height,
                ),
                PaginationTarget::Previous,
            ),
        ];
        let options_right = NAV_BUTTON_WIDTH.mul_add(-2.0, right) - RANGE_LABEL_WIDTH;
        let count = options.len();
        for (i, &option) in options.iter().enumerate() {
            let x = PAGE_SIZE_OPTION_WIDTH.mul_add(-((count - i) as f32), options_right);
            regions.push((
                Rect::new(x, bar.y, PAGE_SIZE_OPTION_WIDTH, bar.height),
                PaginationTarget::PageSize(option),
            ));
        }
        regions
    }

    fn step_page(&mut self, forward: bool) -> Option<Message> {
        if !self.paging.is_paginated() {
            return None;
        }
        let info = self.paging.page_info(self.rows.len());
        match (forward, info.has_next, info.has_previous) {
            (true, true, _) => Some(Box::new(self.set_page(info.page + 1))),
            (false, _, true) => Some(Box::new(self.set_page(info.page - 1))),
            _ => None,
        }
    }

    fn click(&mut self, position: Point) -> Option<Message> {
        if !self.bounds.contains_point(&position) {
            return None;
        }
        let rendered = self.render();
        let mut y = self.bounds.y;
        for (line, height) in self.lines(&rendered) {
            if position.y >= y && position.y < y + height {
                let rect = Rect::new(self.bounds.x, y, self.bounds.width, height);
                return self.click_line(line, rect, position, &rendered);
            }
            y += height;
        }
        None
    }

    fn click_line(
        &mut self,
        line: Line,
        rect: Rect,
        position: Point,
        rendered: &RenderedTable,
    ) -> Option<Message> {
        match line {
            Line::Header => {
                let index = self
                    .column_spans()
                    .iter()
                    .position(|&(x, width)| position.x >= x && position.x < x + width)?;
                let column = rendered.header.request_sort(index)?.to_string();
                Some(Box::new(self.request_sort(&column)))
            }
            Line::Body(index) => Some(Box::new(TableRowClicked { index, position })),
            Line::More => match rendered.more.as_ref()? {
                MoreAffordance::Delegated { hidden, .. } => {
                    debug!("table {}: more requested", self.log_name());
                    Some(Box::new(TableMoreRequested { hidden: *hidden }))
                }
                MoreAffordance::LoadMore { .. } => Some(Box::new(self.load_more())),
            },
            Line::Pagination => {
                let bar = rendered.pagination.as_ref()?;
                let target = self
                    .pagination_regions(rect, &bar.page_size_options)
                    .into_iter()
                    .find(|(region, _)| region.contains_point(&position))
                    .map(|(_, target)| target)?;
                match target {
                    PaginationTarget::Previous if bar.info.has_previous => {
                        Some(Box::new(self.set_page(bar.info.page - 1)))
                    }
                    PaginationTarget::Next if bar.info.has_next => {
                        Some(Box::new(self.set_page(bar.info.page + 1)))
                    }
                    PaginationTarget::PageSize(n) => Some(Box::new(self.set_rows_per_page(n))),
                    _ => None,
                }
            }
            Line::Padding | Line::ColumnFooter | Line::Footer => None,
        }
    }

    fn text_style(&self, color: Color, emphasis: bool) -> TextStyle {
        TextStyle {
            size: if self.dense { 13.0 } else { 14.0 },
            color,
            weight: if emphasis {
                FontWeight::Bold
            } else {
                FontWeight::Normal
            },
            ..TextStyle::default()
        }
    }

    fn paint_cells<'a>(
        &self,
        canvas: &mut dyn Canvas,
        rect: Rect,
        spans: &[(f32, f32)],
        cells: impl Iterator<Item = (&'a str, TextAlign, bool)>,
    ) {
        for ((text, align, emphasis), &(x, width)) in cells.zip(spans) {
            if text.is_empty() {
                continue;
            }
            let style = self.text_style(self.text_color, emphasis);
            canvas.draw_text(text, text_anchor(x, width, align, rect), &style);
        }
    }

    fn paint_pagination(&self, canvas: &mut dyn Canvas, rect: Rect, bar: &PaginationBar) {
        canvas.fill_rect(rect, self.row_bg);
        let regions = self.pagination_regions(rect, &bar.page_size_options);
        let options_left = regions
            .iter()
            .filter(|(_, target)| matches!(target, PaginationTarget::PageSize(_)))
            .map(|(region, _)| region.x)
            .fold(NAV_BUTTON_WIDTH.mul_add(-2.0, rect.right()) - RANGE_LABEL_WIDTH, f32::min);
        let mid = rect.y + rect.height / 2.0;

        canvas.draw_text(
            &bar.rows_per_page_label,
            Point::new(options_left - PAGE_SIZE_CAPTION_WIDTH, mid),
            &self.text_style(self.text_color, false),
        );
        canvas.draw_text(
            &bar.range_label,
            Point::new(
                NAV_BUTTON_WIDTH.mul_add(-2.0, rect.right()) - RANGE_LABEL_WIDTH + CELL_PADDING,
                mid,
            ),
            &self.text_style(self.text_color, false),
        );

        for (region, target) in regions {
            let (text, enabled, selected) = match target {
                PaginationTarget::Previous => ("‹".to_string(), bar.info.has_previous, false),
                PaginationTarget::Next => ("›".to_string(), bar.info.has_next, false),
                PaginationTarget::PageSize(n) => {
                    (n.to_string(), true, n == bar.info.rows_per_page)
                }
            };
            let color = if enabled {
                self.text_color
            } else {
                self.muted_text_color
            };
            canvas.draw_text(
                &text,
                Point::new(region.x + region.width / 2.0, mid),
                &self.text_style(color, selected),
            );
        }
    }
}

fn text_anchor(x: f32, width: f32, align: TextAlign, rect: Rect) -> Point {
    let y = rect.y + rect.height / 2.0;
    match align {
        TextAlign::Left => Point::new(x + CELL_PADDING, y),
        TextAlign::Center => Point::new(x + width / 2.0, y),
        TextAlign::Right => Point::new(x + width - CELL_PADDING, y),
    }
}

impl Widget for DataTable {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let width: f32 = self
            .columns
            .iter()
            .map(|col| col.width.unwrap_or(AUTO_COLUMN_WIDTH))
            .sum();
        let height: f32 = self
            .lines(&self.render())
            .iter()
            .map(|&(_, height)| height)
            .sum();
        constraints.constrain(Size::new(width.max(AUTO_COLUMN_WIDTH), height))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        let rendered = self.render();
        let spans = self.column_spans();
        canvas.push_clip(self.bounds);

        let mut y = self.bounds.y;
        for (line, height) in self.lines(&rendered) {
            let rect = Rect::new(self.bounds.x, y, self.bounds.width, height);
            match line {
                Line::Header => {
                    canvas.fill_rect(rect, self.header_bg);
                    for (cell, &(x, width)) in rendered.header.cells.iter().zip(&spans) {
                        let style = self.text_style(self.header_text_color, true);
                        canvas.draw_text(
                            &cell.caption(),
                            text_anchor(x, width, cell.align, rect),
                            &style,
                        );
                    }
                }
                Line::Body(index) => {
                    let bg = if self.striped && index % 2 == 1 {
                        self.row_alt_bg
                    } else {
                        self.row_bg
                    };
                    canvas.fill_rect(rect, bg);
                    let texts: Vec<(String, TextAlign, bool)> = rendered.rows[index]
                        .cells
                        .iter()
                        .map(|cell| (cell.value.display(), cell.align, cell.emphasis))
                        .collect();
                    self.paint_cells(
                        canvas,
                        rect,
                        &spans,
                        texts.iter().map(|(t, a, e)| (t.as_str(), *a, *e)),
                    );
                }
                Line::Padding => canvas.fill_rect(rect, self.row_bg),
                Line::More => {
                    canvas.fill_rect(rect, self.row_bg);
                    if let Some(more) = &rendered.more {
                        canvas.draw_text(
                            more.label(),
                            Point::new(rect.x + CELL_PADDING, rect.y + rect.height / 2.0),
                            &TextStyle {
                                weight: FontWeight::Semibold,
                                ..self.text_style(self.text_color, false)
                            },
                        );
                    }
                }
                Line::ColumnFooter => {
                    canvas.fill_rect(rect, self.footer_bg);
                    if let Some(cells) = &rendered.column_footer {
                        let texts: Vec<(String, TextAlign, bool)> = cells
                            .iter()
                            .map(|cell| (cell.value.display(), cell.align, cell.emphasis))
                            .collect();
                        self.paint_cells(
                            canvas,
                            rect,
                            &spans,
                            texts.iter().map(|(t, a, e)| (t.as_str(), *a, *e)),
                        );
                    }
                }
                Line::Footer => {
                    canvas.fill_rect(rect, self.footer_bg);
                    if let Some(footer) = &rendered.footer {
                        canvas.draw_text(
                            &footer.display(),
                            Point::new(rect.x + CELL_PADDING, rect.y + rect.height / 2.0),
                            &self.text_style(self.text_color, true),
                        );
                    }
                }
                Line::Pagination => {
                    if let Some(bar) = &rendered.pagination {
                        self.paint_pagination(canvas, rect, bar);
                    }
                }
            }
            y += height;
        }

        if self.bordered {
            let border_rect = Rect::new(
                self.bounds.x,
                self.bounds.y,
                self.bounds.width,
                (y - self.bounds.y).min(self.bounds.height),
            );
            canvas.stroke_rect(border_rect, self.border_color, 1.0);
        }
        canvas.pop_clip();
    }

    fn event(&mut self, event: &Event) -> Option<Message> {
        match event {
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } => self.click(*position),
            Event::KeyDown { key: Key::PageDown } => self.step_page(true),
            Event::KeyDown { key: Key::PageUp } => self.step_page(false),
            _ => None,
        }
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn is_focusable(&self) -> bool {
        true
    }

    fn accessible_name(&self) -> Option<&str> {
        self.accessible_name.as_deref()
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Table
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use furrow_core::{DrawCommand, RecordingCanvas};

    fn transactions() -> Vec<TableRow> {
        [
            ("Laptop", -852.0),
            ("Wine tour", 526.0),
            ("Gas", -5.0),
            ("Seeds", -120.0),
            ("Crop sale", 8796.0),
            ("Fertilizer", -300.0),
            ("Bench x4", -692.5),
        ]
        .into_iter()
        .map(|(name, amount)| {
            TableRow::new()
                .cell("transaction", name)
                .cell("amount", amount)
        })
        .collect()
    }

    fn table() -> DataTable {
        DataTable::new()
            .column(TableColumn::new("transaction", "Transaction"))
            .column(TableColumn::new("amount", "Amount").align(TextAlign::Right))
            .rows(transactions())
    }

    fn laid_out(mut table: DataTable) -> DataTable {
        table.layout(Rect::new(0.0, 0.0, 400.0, 800.0));
        table
    }

    fn names(table: &DataTable) -> Vec<String> {
        table
            .render()
            .column_values("transaction")
            .into_iter()
            .map(CellValue::display)
            .collect()
    }

    // ===== Construction Tests =====

    #[test]
    fn test_data_table_new() {
        let table = DataTable::new();
        assert_eq!(table.column_count(), 0);
        assert_eq!(table.row_count(), 0);
        assert!(table.is_empty());
        assert!(table.current_sort().is_none());
        assert_eq!(table.paging(), Paging::windowed(5));
        assert_eq!(table.row_height(), DENSE_ROW_HEIGHT);
    }

    #[test]
    fn test_data_table_builder() {
        let table = table().dense(false).accessible_name("Transactions");
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 7);
        assert_eq!(table.row_height(), ROW_HEIGHT);
        assert_eq!(Widget::accessible_name(&table), Some("Transactions"));
    }

    #[test]
    fn test_paging_builder_order_independent() {
        let a = DataTable::new().min_rows(10).show_pagination(true);
        let b = DataTable::new().show_pagination(true).min_rows(10);
        assert_eq!(a.paging(), Paging::paginated(10));
        assert_eq!(a.paging(), b.paging());
    }

    #[test]
    fn test_page_size_options_drop_zero() {
        let table = DataTable::new()
            .show_pagination(true)
            .page_size_options([0, 5, 10]);
        let bar = table.render().pagination.unwrap();
        assert_eq!(bar.page_size_options, vec![5, 10]);
    }

    #[test]
    fn test_debug_does_not_require_footer_debug() {
        let table = table().footer(|| CellValue::from("x")).test_id("t");
        let text = format!("{table:?}");
        assert!(text.contains("DataTable"));
        assert!(text.contains("rows: 7"));
    }

    // ===== Sort Tests =====

    #[test]
    fn test_default_sort_is_first_column_ascending() {
        let table = table().min_rows(10);
        assert_eq!(table.current_sort(), Some(SortState::ascending("transaction")));
        assert_eq!(names(&table)[0], "Bench x4");
    }

    #[test]
    fn test_configured_default_sort() {
        let table = table().default_sort("amount", SortDirection::Descending);
        assert_eq!(names(&table)[0], "Crop sale");
    }

    #[test]
    fn test_request_sort_toggles() {
        let mut table = table();
        let msg = table.request_sort("amount");
        assert_eq!(msg.column, "amount");
        assert_eq!(msg.direction, SortDirection::Ascending);
        let msg = table.request_sort("amount");
        assert_eq!(msg.direction, SortDirection::Descending);
        let msg = table.request_sort("transaction");
        assert_eq!(msg.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_first_click_on_default_column_flips() {
        let mut table = table();
        let msg = table.request_sort("transaction");
        assert_eq!(msg.direction, SortDirection::Descending);
    }

    #[test]
    fn test_unknown_sort_column_keeps_input_order() {
        let mut table = table().min_rows(10);
        let _ = table.request_sort("missing");
        assert_eq!(names(&table)[0], "Laptop");
    }

    // ===== Paging Tests =====

    #[test]
    fn test_window_shows_min_rows() {
        let rendered = table().render();
        assert_eq!(rendered.rows.len(), 5);
        assert_eq!(
            rendered.more,
            Some(MoreAffordance::LoadMore {
                hidden: 2,
                label: "+ Load more".to_string()
            })
        );
        assert!(rendered.pagination.is_none());
    }

    #[test]
    fn test_delegated_more() {
        let rendered = table().delegate_more(true).render();
        assert_eq!(
            rendered.more,
            Some(MoreAffordance::Delegated {
                hidden: 2,
                label: "+ 2 more".to_string()
            })
        );
    }

    #[test]
    fn test_no_more_when_all_rows_visible() {
        let rendered = table().min_rows(7).render();
        assert!(rendered.more.is_none());
    }

    #[test]
    fn test_load_more_caps_at_row_count() {
        let mut table = table();
        assert_eq!(table.load_more().rows_per_page, 7);
        assert_eq!(table.render().rows.len(), 7);
        assert!(table.render().more.is_none());
    }

    #[test]
    fn test_pagination_padding() {
        let mut table = table().show_pagination(true).min_rows(5);
        assert_eq!(table.set_page(1).page, 1);
        let rendered = table.render();
        assert_eq!(rendered.rows.len(), 2);
        assert_eq!(
            rendered.padding,
            Some(Padding {
                rows: 3,
                height: 120.0
            })
        );
        assert_eq!(rendered.pagination.unwrap().range_label, "6–7 of 7");
    }

    #[test]
    fn test_rows_per_page_resets_page() {
        let mut table = table().show_pagination(true);
        let _ = table.set_page(1);
        let msg = table.set_rows_per_page(10);
        assert_eq!(msg.rows_per_page, 10);
        assert_eq!(table.page(), 0);
    }

    #[test]
    fn test_set_rows_keeps_state() {
        let mut table = table().show_pagination(true);
        let _ = table.request_sort("amount");
        let _ = table.set_page(1);
        table.set_rows(transactions().into_iter().take(3));
        assert_eq!(table.page(), 1);
        assert_eq!(table.current_sort(), Some(SortState::ascending("amount")));
        assert!(table.render().rows.is_empty());
    }

    // ===== Footer Tests =====

    #[test]
    fn test_column_footer_only_when_declared() {
        assert!(table().render().column_footer.is_none());
        let rendered = DataTable::new()
            .column(TableColumn::new("employee", "Employee").footer("DAILY TOTAL"))
            .column(TableColumn::new("time", "Time"))
            .render();
        let cells = rendered.column_footer.unwrap();
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].value, CellValue::from("DAILY TOTAL"));
        assert!(cells[1].value.is_empty());
    }

    #[test]
    fn test_footer_fn() {
        let rendered = table().footer(|| CellValue::from("Total: $8352.50")).render();
        assert_eq!(rendered.footer, Some(CellValue::from("Total: $8352.50")));
    }

    // ===== Widget Tests =====

    #[test]
    fn test_data_table_type_id() {
        let table = DataTable::new();
        assert_eq!(Widget::type_id(&table), TypeId::of::<DataTable>());
    }

    #[test]
    fn test_data_table_measure() {
        let table = DataTable::new()
            .column(TableColumn::new("a", "A").width(100.0))
            .column(TableColumn::new("b", "B").width(150.0))
            .row(TableRow::new())
            .row(TableRow::new());
        let size = table.measure(Constraints::loose(Size::new(1000.0, 1000.0)));
        assert_eq!(size.width, 250.0);
        assert_eq!(size.height, 44.0 + 2.0 * 40.0);
    }

    #[test]
    fn test_data_table_measure_includes_pagination() {
        let table = table().show_pagination(true);
        let size = table.measure(Constraints::loose(Size::new(1000.0, 1000.0)));
        assert_eq!(size.height, 44.0 + 5.0 * 40.0 + 52.0);
    }

    #[test]
    fn test_data_table_layout() {
        let mut table = table();
        let result = table.layout(Rect::new(10.0, 20.0, 500.0, 300.0));
        assert_eq!(result.size, Size::new(500.0, 300.0));
        assert_eq!(Widget::bounds(&table), Rect::new(10.0, 20.0, 500.0, 300.0));
    }

    #[test]
    fn test_data_table_accessibility() {
        let table = table().test_id("transactions");
        assert_eq!(table.accessible_role(), AccessibleRole::Table);
        assert!(table.is_interactive());
        assert!(table.is_focusable());
        assert_eq!(Widget::test_id(&table), Some("transactions"));
    }

    #[test]
    fn test_column_spans_fixed_layout() {
        let table = laid_out(
            DataTable::new()
                .column(TableColumn::new("a", "A").width(300.0))
                .column(TableColumn::new("b", "B"))
                .fixed_layout(true),
        );
        assert_eq!(table.column_spans(), vec![(0.0, 200.0), (200.0, 200.0)]);
    }

    #[test]
    fn test_column_spans_auto_share_remaining() {
        let table = laid_out(
            DataTable::new()
                .column(TableColumn::new("a", "A").width(100.0))
                .column(TableColumn::new("b", "B"))
                .column(TableColumn::new("c", "C")),
        );
        assert_eq!(
            table.column_spans(),
            vec![(0.0, 100.0), (100.0, 150.0), (250.0, 150.0)]
        );
    }

    // ===== Event Tests =====

    #[test]
    fn test_click_header_sorts() {
        let mut table = laid_out(table());
        let msg = table
            .event(&Event::click(Point::new(300.0, 20.0)))
            .unwrap();
        let sort = msg.downcast_ref::<TableSortChanged>().unwrap();
        assert_eq!(sort.column, "amount");
        assert_eq!(sort.direction, SortDirection::Ascending);
        assert_eq!(names(&table)[0], "Laptop");
    }

    #[test]
    fn test_click_row_reports_visible_index() {
        let mut table = laid_out(table());
        let msg = table
            .event(&Event::click(Point::new(50.0, 44.0 + 40.0 + 5.0)))
            .unwrap();
        let clicked = msg.downcast_ref::<TableRowClicked>().unwrap();
        assert_eq!(clicked.index, 1);
        assert_eq!(clicked.position, Point::new(50.0, 89.0));
    }

    #[test]
    fn test_click_load_more() {
        let mut table = laid_out(table());
        let more_y = 44.0 + 5.0 * 40.0 + 10.0;
        let msg = table.event(&Event::click(Point::new(50.0, more_y))).unwrap();
        let grown = msg.downcast_ref::<TableWindowGrown>().unwrap();
        assert_eq!(grown.rows_per_page, 7);
    }

    #[test]
    fn test_click_delegated_more() {
        let mut table = laid_out(table().delegate_more(true));
        let more_y = 44.0 + 5.0 * 40.0 + 10.0;
        let msg = table.event(&Event::click(Point::new(50.0, more_y))).unwrap();
        let more = msg.downcast_ref::<TableMoreRequested>().unwrap();
        assert_eq!(more.hidden, 2);
        assert_eq!(table.rows_per_page(), 5);
    }

    #[test]
    fn test_click_next_and_previous_page() {
        let mut table = laid_out(table().show_pagination(true));
        let bar_y = 44.0 + 5.0 * 40.0 + 10.0;

        let msg = table.event(&Event::click(Point::new(390.0, bar_y))).unwrap();
        assert_eq!(msg.downcast_ref::<TablePageChanged>().unwrap().page, 1);

        // page 1 has 2 rows plus a 3-row spacer, so the bar stays put
        assert!(table.event(&Event::click(Point::new(390.0, bar_y))).is_none());
        assert_eq!(table.page(), 1);

        let msg = table.event(&Event::click(Point::new(350.0, bar_y))).unwrap();
        assert_eq!(msg.downcast_ref::<TablePageChanged>().unwrap().page, 0);
    }

    #[test]
    fn test_disabled_previous_is_ignored() {
        let mut table = laid_out(table().show_pagination(true));
        let bar_y = 44.0 + 5.0 * 40.0 + 10.0;
        assert!(table.event(&Event::click(Point::new(350.0, bar_y))).is_none());
        assert_eq!(table.page(), 0);
    }

    #[test]
    fn test_click_page_size_option() {
        let mut table = laid_out(table().show_pagination(true).page_size_options([5, 10]));
        let bar_y = 44.0 + 5.0 * 40.0 + 10.0;
        // options end where the range label starts: 400 - 80 - 120 = 200
        let msg = table.event(&Event::click(Point::new(190.0, bar_y))).unwrap();
        let changed = msg.downcast_ref::<TableRowsPerPageChanged>().unwrap();
        assert_eq!(changed.rows_per_page, 10);
    }

    #[test]
    fn test_page_keys() {
        let mut table = table().show_pagination(true);
        let msg = table
            .event(&Event::KeyDown { key: Key::PageDown })
            .unwrap();
        assert_eq!(msg.downcast_ref::<TablePageChanged>().unwrap().page, 1);
        assert!(table.event(&Event::KeyDown { key: Key::PageDown }).is_none());
        let msg = table.event(&Event::KeyDown { key: Key::PageUp }).unwrap();
        assert_eq!(msg.downcast_ref::<TablePageChanged>().unwrap().page, 0);
        assert!(table.event(&Event::KeyDown { key: Key::PageUp }).is_none());
    }

    #[test]
    fn test_page_keys_ignored_when_windowed() {
        let mut table = table();
        assert!(table.event(&Event::KeyDown { key: Key::PageDown }).is_none());
    }

    #[test]
    fn test_click_outside_bounds() {
        let mut table = laid_out(table());
        assert!(table
            .event(&Event::click(Point::new(500.0, 20.0)))
            .is_none());
    }

    #[test]
    fn test_right_click_ignored() {
        let mut table = laid_out(table());
        let event = Event::MouseDown {
            position: Point::new(50.0, 60.0),
            button: MouseButton::Right,
        };
        assert!(table.event(&event).is_none());
    }

    // ===== Paint Tests =====

    #[test]
    fn test_data_table_paint_empty() {
        let table = laid_out(DataTable::new());
        let mut canvas = RecordingCanvas::new();
        table.paint(&mut canvas);
        assert_eq!(canvas.clip_depth(), 0);
    }

    #[test]
    fn test_data_table_paint_with_data() {
        let table = laid_out(table());
        let mut canvas = RecordingCanvas::new();
        table.paint(&mut canvas);
        assert!(canvas.contains_text("Transaction ▲"));
        assert!(canvas.contains_text("Amount"));
        assert!(canvas.contains_text("Bench x4"));
        assert!(canvas.contains_text("+ Load more"));
        assert!(!canvas.contains_text("Wine tour"));
    }

    #[test]
    fn test_paint_right_aligned_anchor() {
        let table = laid_out(table());
        let mut canvas = RecordingCanvas::new();
        table.paint(&mut canvas);
        let anchor = canvas.commands().iter().find_map(|cmd| match cmd {
            DrawCommand::Text {
                content, position, ..
            } if content == "-692.5" => Some(*position),
            _ => None,
        });
        assert_eq!(anchor, Some(Point::new(392.0, 64.0)));
    }

    #[test]
    fn test_paint_pagination_bar() {
        let table = laid_out(table().show_pagination(true));
        let mut canvas = RecordingCanvas::new();
        table.paint(&mut canvas);
        assert!(canvas.contains_text("Rows per page:"));
        assert!(canvas.contains_text("1–5 of 7"));
        assert!(canvas.contains_text("‹"));
        assert!(canvas.contains_text("›"));
    }

    #[test]
    fn test_paint_footers() {
        let table = laid_out(
            DataTable::new()
                .column(TableColumn::new("employee", "Employee").footer("DAILY TOTAL"))
                .row(TableRow::new().cell("employee", "Sue D."))
                .footer(|| CellValue::from("Signed off")),
        );
        let mut canvas = RecordingCanvas::new();
        table.paint(&mut canvas);
        assert!(canvas.contains_text("DAILY TOTAL"));
        assert!(canvas.contains_text("Signed off"));
    }

    // ===== HTML Tests =====

    #[test]
    fn test_to_html_uses_test_id() {
        let html = table().test_id("transactions").to_html();
        assert!(html.contains("data-testid=\"transactions\""));
        assert!(html.contains("aria-sort=\"ascending\""));
        assert!(html.contains("+ Load more"));
    }
}
