//! Named cell formats.
//!
//! A manifest cannot carry closures, so column formatters are declared by
//! name and turned into functions by the widget layer.

use crate::error::ConfigError;
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Default date pattern, `9/17/2023` style.
pub const DEFAULT_DATE_PATTERN: &str = "%-m/%-d/%Y";

/// A named, declarative cell format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellFormat {
    /// Fixed number of decimals: `12.50`
    Fixed {
        /// Digits after the decimal point
        decimals: usize,
    },
    /// Number followed by a unit: `77.5 h`, `2124.00 kg`
    Suffix {
        /// Unit appended after a space
        unit: String,
        /// Fixed decimals of the absolute value, or the plain number if unset
        #[serde(default)]
        decimals: Option<usize>,
    },
    /// Absolute value with a currency symbol: `$8796.00`
    Currency {
        /// Currency symbol
        #[serde(default = "default_symbol")]
        symbol: String,
        /// Digits after the decimal point
        #[serde(default = "default_decimals")]
        decimals: usize,
    },
    /// Signed amount: `+ $526.00` / `- $852.00`
    SignedCurrency {
        /// Currency symbol
        #[serde(default = "default_symbol")]
        symbol: String,
        /// Digits after the decimal point
        #[serde(default = "default_decimals")]
        decimals: usize,
    },
    /// Calendar date rendered with a strftime pattern
    Date {
        /// strftime pattern
        #[serde(default = "default_date_pattern")]
        pattern: String,
    },
    /// Raw value drawn with emphasis
    Bold,
}

fn default_symbol() -> String {
    "$".to_string()
}

const fn default_decimals() -> usize {
    2
}

fn default_date_pattern() -> String {
    DEFAULT_DATE_PATTERN.to_string()
}

impl CellFormat {
    /// Parse a format as written in a manifest: `fixed: { decimals: 1 }`,
    /// `currency: {}` or `bold`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the text is not a known format.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let deserializer = serde_yaml_ng::Deserializer::from_str(yaml);
        Ok(serde_yaml_ng::with::singleton_map::deserialize(deserializer)?)
    }

    /// Format a numeric value.
    #[must_use]
    pub fn format_number(&self, n: f64) -> String {
        match self {
            Self::Fixed { decimals } => format!("{n:.prec$}", prec = *decimals),
            Self::Suffix { unit, decimals } => match *decimals {
                Some(prec) => format!("{:.prec$} {unit}", n.abs()),
                None => format!("{n} {unit}"),
            },
            Self::Currency { symbol, decimals } => {
                format!("{symbol}{:.prec$}", n.abs(), prec = *decimals)
            }
            Self::SignedCurrency { symbol, decimals } => {
                let sign = if n > 0.0 { '+' } else { '-' };
                format!("{sign} {symbol}{:.prec$}", n.abs(), prec = *decimals)
            }
            Self::Date { .. } | Self::Bold => format!("{n}"),
        }
    }

    /// Whether cells with this format are drawn emphasized.
    #[must_use]
    pub const fn is_emphasis(&self) -> bool {
        matches!(self, Self::Bold)
    }

    /// Format a calendar date.
    ///
    /// Non-date formats, and patterns a date cannot fill (`%H`), fall back
    /// to ISO-8601.
    #[must_use]
    pub fn format_date(&self, date: NaiveDate) -> String {
        match self {
            Self::Date { pattern } => {
                try_format_date(date, pattern).unwrap_or_else(|| date.to_string())
            }
            _ => date.to_string(),
        }
    }

    /// Check that the format is usable.
    ///
    /// # Errors
    ///
    /// Returns a message describing the problem.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::Date { pattern } => {
                if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
                    Err(format!("invalid date pattern '{pattern}'"))
                } else if try_format_date(NaiveDate::MIN, pattern).is_none() {
                    Err(format!("date pattern '{pattern}' needs a time or zone"))
                } else {
                    Ok(())
                }
            }
            Self::Suffix { unit, .. } if unit.is_empty() => Err("unit is empty".to_string()),
            _ => Ok(()),
        }
    }
}

/// `None` when the pattern asks for fields a calendar date lacks.
fn try_format_date(date: NaiveDate, pattern: &str) -> Option<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(pattern)).ok()?;
    Some(out)
}
