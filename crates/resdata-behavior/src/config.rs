// crates/resdata-behavior/src/config.rs

use std::collections::HashMap;
use std::path::Path;

use resdata_core::{AttributeMap, Result};
use serde::Deserialize;
use tracing::info;

/// Per-type attribute overrides, keyed by normalized behavior key.
///
/// ```json
/// { "combobox": { "editable": true, "dropDownSize": 12 } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct BehaviorConfig {
    overrides: HashMap<String, AttributeMap>,
}

impl BehaviorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        info!("Loaded behavior overrides for {} types from {}", config.overrides.len(), path.display());
        Ok(config)
    }

    pub fn insert(&mut self, normalized_type: &str, attributes: AttributeMap) {
        self.overrides.insert(normalized_type.to_string(), attributes);
    }

    pub fn overrides_for(&self, normalized_type: &str) -> Option<&AttributeMap> {
        self.overrides.get(normalized_type)
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resdata_core::{AttributeValue, ResdataError};

    #[test]
    fn test_parse_overrides() {
        let config = BehaviorConfig::from_json_str(
            r#"{ "combobox": { "editable": true, "dropDownSize": 12 }, "label": {} }"#,
        )
        .unwrap();

        let combobox = config.overrides_for("combobox").unwrap();
        assert_eq!(combobox["editable"], AttributeValue::Bool(true));
        assert_eq!(combobox["dropDownSize"], AttributeValue::Int(12));
        assert!(config.overrides_for("label").unwrap().is_empty());
        assert!(config.overrides_for("edit").is_none());
    }

    #[test]
    fn test_rejects_non_object_document() {
        assert!(matches!(BehaviorConfig::from_json_str("[]"), Err(ResdataError::Json(_))));
        assert!(BehaviorConfig::new().is_empty());
    }
}
