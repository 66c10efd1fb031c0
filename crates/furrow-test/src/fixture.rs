//! Sample farm records and the tables built from them.
//!
//! Each `*_rows(n)` function returns at most `n` records; each `*_table()`
//! function returns a configured [`DataTable`] holding all of them.

use chrono::NaiveDate;
use furrow_widgets::{CellValue, DataTable, TableColumn, TableRow, TextAlign};

fn date(year: i32, month: u32, day: u32) -> CellValue {
    NaiveDate::from_ymd_opt(year, month, day).map_or(CellValue::Empty, CellValue::Date)
}

fn number(row: &TableRow, key: &str) -> Option<f64> {
    row.value(key).as_number()
}

fn money(row: &TableRow, key: &str) -> CellValue {
    number(row, key).map_or(CellValue::Empty, |n| {
        CellValue::from(format!("${:.2}", n.abs()))
    })
}

fn hours(row: &TableRow) -> CellValue {
    number(row, "time").map_or(CellValue::Empty, |n| CellValue::from(format!("{n} h")))
}

/// Bank transactions: `transaction`, `date`, `amount`.
#[must_use]
pub fn transaction_rows(n: usize) -> Vec<TableRow> {
    [
        ("Laptop", date(2023, 9, 17), -852),
        ("Wine tour", date(2023, 8, 17), 526),
        ("Organic something", date(2023, 8, 7), -50_120),
        ("Gas", date(2023, 7, 15), -521),
        ("Crop Sale", date(2023, 6, 1), 320),
        ("Farm dog", date(2023, 5, 5), -300),
        ("CSA box", date(2023, 5, 4), 525),
        ("Ice cream", date(2023, 5, 4), 110),
        ("Rain boots", date(2023, 4, 28), -300),
        ("Bench x4", date(2023, 4, 17), -250),
        ("Jam", date(2023, 4, 4), 300),
        ("Machine", date(2023, 4, 28), -400),
    ]
    .into_iter()
    .take(n)
    .map(|(name, when, amount)| {
        TableRow::new()
            .cell("transaction", name)
            .cell("date", when)
            .cell("amount", amount)
    })
    .collect()
}

/// Crop sales: `crop`, `quantity` (kg), `revenue`.
#[must_use]
pub fn crop_sale_rows(n: usize) -> Vec<TableRow> {
    [
        ("White corn, Corn", 2124, 8796.0),
        ("Koto, Buckwheat", 724, 692.5),
        ("Lutz green leaf, Beetroot", 58, 210.0),
        ("Cox’s orange pippin, Apple", 48, 340.0),
        ("Macoun, Apples", 124, 1234.0),
        ("Butter Boy Hybrid, Butternut", 24, 785.5),
        ("King Edward, Potato", 58, 237.0),
        ("Blanco Veneto, Celeriac", 56, 895.0),
        ("Hollow Crown, Parsnips", 23, 354.0),
        ("Early White Hybrid, Cauliflower", 87, 789.5),
    ]
    .into_iter()
    .take(n)
    .map(|(crop, quantity, revenue)| {
        TableRow::new()
            .cell("crop", crop)
            .cell("quantity", quantity)
            .cell("revenue", revenue)
    })
    .collect()
}

/// Hours and cost per employee: `employee`, `time`, `labourCost`.
#[must_use]
pub fn employee_labour_rows(n: usize) -> Vec<TableRow> {
    [
        ("Sue D.", 1.25, 0.0),
        ("L.F. C.", 77.5, 3692.5),
        ("Joey.", 2.75, 0.0),
        ("Farmie.", 7.5, 40.0),
    ]
    .into_iter()
    .take(n)
    .map(|(employee, time, cost)| {
        TableRow::new()
            .cell("employee", employee)
            .cell("time", time)
            .cell("labourCost", cost)
    })
    .collect()
}

/// Hours and cost per task: `task`, `time`, `labourCost`.
#[must_use]
pub fn task_labour_rows(n: usize) -> Vec<TableRow> {
    [
        ("Harvest", 51.25, 2500.0),
        ("Weeding", 13.5, 450.5),
        ("Packing", 6.75, 200.0),
        ("Cleaning", 6.5, 232.0),
        ("Transport", 6.0, 200.0),
        ("Livestock feeding", 5.0, 150.0),
    ]
    .into_iter()
    .take(n)
    .map(|(task, time, cost)| {
        TableRow::new()
            .cell("task", task)
            .cell("time", time)
            .cell("labourCost", cost)
    })
    .collect()
}

/// Transactions with bold names and signed amounts.
#[must_use]
pub fn transactions_table() -> DataTable {
    DataTable::new()
        .column(TableColumn::new("transaction", "Transaction").emphasis(true))
        .column(TableColumn::new("date", "Date"))
        .column(
            TableColumn::new("amount", "Amount")
                .align(TextAlign::Right)
                .format(|row| {
                    number(row, "amount").map_or(CellValue::Empty, |n| {
                        let sign = if n > 0.0 { "+ $" } else { "- $" };
                        CellValue::from(format!("{sign}{:.2}", n.abs()))
                    })
                }),
        )
        .rows(transaction_rows(12))
        .test_id("transactions")
}

/// Crop sales on a fixed layout showing ten rows.
#[must_use]
pub fn crop_sales_table() -> DataTable {
    DataTable::new()
        .column(TableColumn::new("crop", "Crops").emphasis(true))
        .column(
            TableColumn::new("quantity", "Quantity")
                .align(TextAlign::Right)
                .format(|row| {
                    number(row, "quantity").map_or(CellValue::Empty, |n| {
                        CellValue::from(format!("{:.2} kg", n.abs()))
                    })
                }),
        )
        .column(
            TableColumn::new("revenue", "Revenue")
                .align(TextAlign::Right)
                .format(|row| money(row, "revenue")),
        )
        .rows(crop_sale_rows(10))
        .min_rows(10)
        .fixed_layout(true)
        .test_id("crop-sales")
}

/// Employee labour with daily totals; "more" goes to the labour page.
#[must_use]
pub fn employee_labour_table() -> DataTable {
    DataTable::new()
        .column(TableColumn::new("employee", "Employee").footer("DAILY TOTAL"))
        .column(
            TableColumn::new("time", "Time")
                .align(TextAlign::Right)
                .format(hours)
                .footer("89 h"),
        )
        .column(
            TableColumn::new("labourCost", "Labour cost")
                .align(TextAlign::Right)
                .format(|row| money(row, "labourCost"))
                .footer("$3732.50"),
        )
        .rows(employee_labour_rows(10))
        .min_rows(10)
        .delegate_more(true)
        .test_id("employee-labour")
}

/// Task labour with daily totals, five rows at a time.
#[must_use]
pub fn task_labour_table() -> DataTable {
    DataTable::new()
        .column(TableColumn::new("task", "Tasks").footer("DAILY TOTAL"))
        .column(
            TableColumn::new("time", "Time")
                .align(TextAlign::Right)
                .width(80.0)
                .format(hours)
                .footer("89 h"),
        )
        .column(
            TableColumn::new("labourCost", "Labour cost")
                .align(TextAlign::Right)
                .format(|row| money(row, "labourCost"))
                .footer("$3732.50"),
        )
        .rows(task_labour_rows(10))
        .min_rows(5)
        .delegate_more(true)
        .test_id("task-labour")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_counts() {
        assert_eq!(transaction_rows(12).len(), 12);
        assert_eq!(transaction_rows(4).len(), 4);
        assert_eq!(crop_sale_rows(100).len(), 10);
        assert_eq!(employee_labour_rows(10).len(), 4);
        assert_eq!(task_labour_rows(10).len(), 6);
    }

    #[test]
    fn test_transaction_dates() {
        let rows = transaction_rows(1);
        assert_eq!(rows[0].value("date").display(), "9/17/2023");
    }

    #[test]
    fn test_money_and_hours() {
        let row = TableRow::new().cell("labourCost", 3692.5).cell("time", 77.5);
        assert_eq!(money(&row, "labourCost"), CellValue::from("$3692.50"));
        assert_eq!(hours(&row), CellValue::from("77.5 h"));
        assert!(money(&TableRow::new(), "labourCost").is_empty());
    }
}
