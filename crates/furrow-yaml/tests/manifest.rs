//! Manifest parsing as a table author writes it.

use furrow_yaml::{Align, CellFormat, ConfigError, SortOrder, TableManifest};
use proptest::prelude::*;

const TRANSACTIONS: &str = r#"
table:
  id: transactions
  show_pagination: true
  page_size_options: [5, 10, 20]
  min_rows: 5
  dense: false
  sort: { column: date, direction: descending }
  columns:
    - id: transaction
      label: Transaction
      format: bold
    - id: date
      label: Date
      format: { date: { pattern: "%-m/%-d/%Y" } }
    - id: amount
      label: Amount
      align: right
      accessor: amount
      format: { signed_currency: { symbol: "$", decimals: 2 } }
      footer: "$17571.5"
"#;

#[test]
fn transactions_manifest_parses() {
    let table = TableManifest::from_yaml(TRANSACTIONS).unwrap().table;
    assert_eq!(table.id.as_deref(), Some("transactions"));
    assert!(table.show_pagination);
    assert!(!table.dense);
    assert_eq!(table.page_size_options, vec![5, 10, 20]);
    assert_eq!(table.sort.as_ref().unwrap().direction, SortOrder::Descending);

    let amount = &table.columns[2];
    assert_eq!(amount.align, Align::Right);
    assert_eq!(amount.footer.as_deref(), Some("$17571.5"));
    assert_eq!(
        amount.format,
        Some(CellFormat::SignedCurrency {
            symbol: "$".to_string(),
            decimals: 2
        })
    );
    assert!(table.columns[0].format.as_ref().unwrap().is_emphasis());
}

#[test]
fn manifest_survives_reserialization() {
    let manifest = TableManifest::from_yaml(TRANSACTIONS).unwrap();
    let again = TableManifest::from_yaml(&manifest.to_yaml().unwrap()).unwrap();
    assert_eq!(again.table.columns.len(), 3);
    assert_eq!(again.table.sort, manifest.table.sort);
}

#[test]
fn bad_date_pattern_names_the_column() {
    let yaml = TRANSACTIONS.replace("%-m/%-d/%Y", "%Q");
    let err = TableManifest::from_yaml(&yaml).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidValue { ref field, .. } if field == "columns[1].format"
    ));
}

#[test]
fn sort_on_missing_column_is_rejected() {
    let yaml = TRANSACTIONS.replace("column: date", "column: revenue");
    assert!(matches!(
        TableManifest::from_yaml(&yaml),
        Err(ConfigError::UnknownColumn(ref c)) if c == "revenue"
    ));
}

proptest! {
    #[test]
    fn signed_currency_sign_matches_value(n in -1.0e6f64..1.0e6) {
        let format = CellFormat::SignedCurrency { symbol: "$".to_string(), decimals: 2 };
        let text = format.format_number(n);
        let expected = if n > 0.0 { "+ $" } else { "- $" };
        prop_assert!(text.starts_with(expected));
    }

    #[test]
    fn duplicate_ids_are_rejected(suffix in "[a-z]{1,8}") {
        let id = format!("col_{suffix}");
        let yaml = format!("table:\n  columns:\n    - id: {id}\n    - id: {id}\n");
        prop_assert!(matches!(
            TableManifest::from_yaml(&yaml),
            Err(ConfigError::DuplicateColumn(ref c)) if *c == id
        ));
    }
}
