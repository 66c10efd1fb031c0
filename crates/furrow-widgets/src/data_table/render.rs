//! Render output of a table.
//!
//! [`RenderedTable`] is a plain description of what is on screen: header,
//! visible rows, padding, the "more" row, footers and the pagination bar.
//! Painting and HTML both read from it.

use super::cell::CellValue;
use super::column::TextAlign;
use super::header::HeaderRow;
use super::paging::PageInfo;
use serde::{Deserialize, Serialize};

/// Localizable strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLabels {
    /// Load-more button
    pub load_more: String,
    /// Delegated "more" button; `{n}` is replaced by the hidden row count
    pub more: String,
    /// Caption before the page size options
    pub rows_per_page: String,
    /// Range label; `{from}`, `{to}` and `{count}` are replaced
    pub displayed_rows: String,
}

impl Default for TableLabels {
    fn default() -> Self {
        Self {
            load_more: "+ Load more".to_string(),
            more: "+ {n} more".to_string(),
            rows_per_page: "Rows per page:".to_string(),
            displayed_rows: "{from}–{to} of {count}".to_string(),
        }
    }
}

impl TableLabels {
    /// Label for the delegated "more" button.
    #[must_use]
    pub fn more_label(&self, hidden: usize) -> String {
        self.more.replace("{n}", &hidden.to_string())
    }

    /// Label for the current page range.
    #[must_use]
    pub fn range_label(&self, info: &PageInfo) -> String {
        self.displayed_rows
            .replace("{from}", &info.from.to_string())
            .replace("{to}", &info.to.to_string())
            .replace("{count}", &info.count.to_string())
    }
}

/// A rendered cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedCell {
    /// Column id
    pub column: String,
    /// Alignment
    pub align: TextAlign,
    /// Rendered value
    pub value: CellValue,
    /// Draw emphasized
    pub emphasis: bool,
}

/// A rendered body row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedRow {
    /// Position within the visible slice
    pub index: usize,
    /// Position in the caller's row list
    pub source: usize,
    /// Cells in column order
    pub cells: Vec<RenderedCell>,
}

/// Spacer keeping a short page as tall as a full one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Padding {
    /// Rows replaced by the spacer
    pub rows: usize,
    /// Spacer height
    pub height: f32,
}

/// Row offered below a window that hides rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MoreAffordance {
    /// The owner decides what "more" means.
    Delegated {
        /// Rows below the window
        hidden: usize,
        /// Button label
        label: String,
    },
    /// The table grows its own window.
    LoadMore {
        /// Rows below the window
        hidden: usize,
        /// Button label
        label: String,
    },
}

impl MoreAffordance {
    /// Button label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Delegated { label, .. } | Self::LoadMore { label, .. } => label,
        }
    }

    /// Rows below the window.
    #[must_use]
    pub const fn hidden(&self) -> usize {
        match self {
            Self::Delegated { hidden, .. } | Self::LoadMore { hidden, .. } => *hidden,
        }
    }
}

/// Pagination controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationBar {
    /// Position summary
    pub info: PageInfo,
    /// Selectable page sizes
    pub page_size_options: Vec<usize>,
    /// Caption before the options
    pub rows_per_page_label: String,
    /// `from–to of count` label
    pub range_label: String,
}

/// Everything a table shows for one state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedTable {
    /// Header cells
    pub header: HeaderRow,
    /// Visible body rows
    pub rows: Vec<RenderedRow>,
    /// Spacer after the rows
    pub padding: Option<Padding>,
    /// "More" row
    pub more: Option<MoreAffordance>,
    /// Per-column footer values
    pub column_footer: Option<Vec<RenderedCell>>,
    /// Full-width footer value
    pub footer: Option<CellValue>,
    /// Pagination controls
    pub pagination: Option<PaginationBar>,
    /// Dense rows
    pub dense: bool,
    /// Equal column widths
    pub fixed_layout: bool,
}

impl RenderedTable {
    /// Rendered values of one column, top to bottom.
    #[must_use]
    pub fn column_values(&self, column: &str) -> Vec<&CellValue> {
        self.rows
            .iter()
            .filter_map(|row| row.cells.iter().find(|c| c.column == column))
            .map(|cell| &cell.value)
            .collect()
    }

    /// Render as an HTML fragment.
    #[must_use]
    pub fn to_html(&self, test_id: Option<&str>) -> String {
        let span = self.header.len().max(1);
        let mut html = String::from("<div class=\"furrow-table-container\">");

        let mut class = String::from("furrow-table");
        if self.dense {
            class.push_str(" furrow-table--dense");
        }
        if self.fixed_layout {
            class.push_str(" furrow-table--fixed");
        }
        html.push_str(&format!("<table class=\"{class}\" role=\"table\""));
        if let Some(id) = test_id {
            html.push_str(&format!(" data-testid=\"{}\"", escape_html(id)));
        }
        html.push('>');

        html.push_str("<thead><tr>");
        for cell in &self.header.cells {
            let button_class = if cell.active {
                "furrow-sort furrow-sort--active"
            } else {
                "furrow-sort"
            };
            html.push_str(&format!(
                "<th data-column=\"{}\" aria-sort=\"{}\" style=\"text-align: {}\">\
                 <button type=\"button\" class=\"{button_class}\">{}</button></th>",
                escape_html(&cell.id),
                cell.aria_sort(),
                align_css(cell.align),
                escape_html(&cell.caption()),
            ));
        }
        html.push_str("</tr></thead><tbody>");

        for row in &self.rows {
            html.push_str(&format!("<tr data-index=\"{}\">", row.index));
            push_cells(&mut html, &row.cells);
            html.push_str("</tr>");
        }

        if let Some(padding) = self.padding {
            html.push_str(&format!(
                "<tr class=\"furrow-padding\" style=\"height: {}px\"><td colspan=\"{span}\"></td></tr>",
                padding.height
            ));
        }

        if let Some(more) = &self.more {
            html.push_str(&format!(
                "<tr class=\"furrow-more\"><td colspan=\"{span}\">\
                 <button type=\"button\">{}</button></td></tr>",
                escape_html(more.label())
            ));
        }

        if let Some(cells) = &self.column_footer {
            html.push_str("<tr class=\"furrow-column-footer\">");
            push_cells(&mut html, cells);
            html.push_str("</tr>");
        }

        if let Some(footer) = &self.footer {
            html.push_str(&format!(
                "<tr class=\"furrow-footer\"><td colspan=\"{span}\">{}</td></tr>",
                escape_html(&footer.display())
            ));
        }
        html.push_str("</tbody></table>");

        if let Some(bar) = &self.pagination {
            html.push_str("<div class=\"furrow-pagination\">");
            html.push_str(&format!(
                "<span>{}</span><select>",
                escape_html(&bar.rows_per_page_label)
            ));
            for option in &bar.page_size_options {
                let selected = if *option == bar.info.rows_per_page {
                    " selected"
                } else {
                    ""
                };
                html.push_str(&format!("<option value=\"{option}\"{selected}>{option}</option>"));
            }
            html.push_str(&format!(
                "</select><span class=\"furrow-pagination__range\">{}</span>",
                escape_html(&bar.range_label)
            ));
            html.push_str(&format!(
                "<button type=\"button\" aria-label=\"Go to previous page\"{}>‹</button>",
                if bar.info.has_previous { "" } else { " disabled" }
            ));
            html.push_str(&format!(
                "<button type=\"button\" aria-label=\"Go to next page\"{}>›</button>",
                if bar.info.has_next { "" } else { " disabled" }
            ));
            html.push_str("</div>");
        }

        html.push_str("</div>");
        html
    }
}

fn push_cells(html: &mut String, cells: &[RenderedCell]) {
    for cell in cells {
        let text = escape_html(&cell.value.display());
        let text = if cell.emphasis {
            format!("<strong>{text}</strong>")
        } else {
            text
        };
        html.push_str(&format!(
            "<td style=\"text-align: {}\">{text}</td>",
            align_css(cell.align)
        ));
    }
}

const fn align_css(align: TextAlign) -> &'static str {
    match align {
        TextAlign::Left => "left",
        TextAlign::Center => "center",
        TextAlign::Right => "right",
    }
}

/// Escape text for HTML content and attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
