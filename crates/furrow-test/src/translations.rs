//! Localized string lookup.

use crate::store::{StoreError, StoreProbe};
use serde_json::Value;

/// A locale's `translation.json`, looked up by dotted key such as
/// `SLIDE_MENU.CROPS`.
#[derive(Debug, Clone, PartialEq)]
pub struct Translations {
    strings: StoreProbe,
}

impl Translations {
    /// Parse a translation file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Json`] if the text is not JSON.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(Self {
            strings: StoreProbe::from_json(json)?,
        })
    }

    /// String at `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        match self.strings.get(key) {
            Ok(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// String at `key`, or the key itself when missing.
    #[must_use]
    pub fn t(&self, key: &str) -> String {
        self.get(key).unwrap_or(key).to_string()
    }

    /// String at `key` with `{{name}}` placeholders filled in.
    #[must_use]
    pub fn t_with(&self, key: &str, vars: &[(&str, &str)]) -> String {
        vars.iter().fold(self.t(key), |text, (name, value)| {
            text.replace(&format!("{{{{{name}}}}}"), value)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EN: &str = r#"{
        "SLIDE_MENU": { "CROPS": "Crops", "TASKS": "Tasks" },
        "FARM_MAP": { "MAP_FILTER": { "GARDEN": "Garden" } },
        "TASK": { "ADD_TASK": "Add task", "COUNT": "{{count}} tasks" }
    }"#;

    #[test]
    fn test_lookup() {
        let tr = Translations::from_json(EN).unwrap();
        assert_eq!(tr.get("SLIDE_MENU.CROPS"), Some("Crops"));
        assert_eq!(tr.t("FARM_MAP.MAP_FILTER.GARDEN"), "Garden");
    }

    #[test]
    fn test_missing_key_falls_back_to_key() {
        let tr = Translations::from_json(EN).unwrap();
        assert_eq!(tr.get("TASK.EDIT"), None);
        assert_eq!(tr.t("TASK.EDIT"), "TASK.EDIT");
        assert_eq!(tr.t("SLIDE_MENU"), "SLIDE_MENU");
    }

    #[test]
    fn test_interpolation() {
        let tr = Translations::from_json(EN).unwrap();
        assert_eq!(tr.t_with("TASK.COUNT", &[("count", "3")]), "3 tasks");
    }
}
