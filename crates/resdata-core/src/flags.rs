// crates/resdata-core/src/flags.rs

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;
use tracing::{info, warn};

use crate::{ResdataError, Result};

pub const LOW_WORD_MASK: u32 = 0x0000_FFFF;
pub const MID_BYTE_MASK: u32 = 0x00FF_0000;
pub const HIGH_BYTE_MASK: u32 = 0xFF00_0000;

/// Window masks below this value cannot be legitimate high-word styles.
pub const WINDOW_AUTO_FIX_LIMIT: u32 = 0x10000;

/// Trims and uppercases flag text, dropping a leading `0X` and a trailing `L`.
pub fn normalize_flag_text(text: &str) -> String {
    let mut clean = text.trim().to_ascii_uppercase();
    if clean.starts_with("0X") {
        clean.drain(..2);
    }
    if clean.ends_with('L') {
        clean.pop();
    }
    clean
}

/// Parses `0x1F0000L` style text as base-16. `None` when the text is not hex.
pub fn parse_flag_text(text: &str) -> Option<u32> {
    let clean = normalize_flag_text(text);
    if clean.is_empty() {
        return None;
    }
    u32::from_str_radix(&clean, 16).ok()
}

/// Textual form written back after a mask was edited.
pub fn format_flags(mask: u32) -> String {
    format!("0x{:X}", mask)
}

/// Bits 0-15.
pub fn low_flags(mask: u32) -> u32 {
    mask & LOW_WORD_MASK
}

/// Bits 16-23, shifted down.
pub fn mid_flags(mask: u32) -> u32 {
    (mask >> 16) & 0xFF
}

/// Bits 24-31, shifted down.
pub fn high_flags(mask: u32) -> u32 {
    (mask >> 24) & 0xFF
}

/// Symbolic flag name -> bit value, iterated in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagTable {
    entries: BTreeMap<String, u32>,
}

impl FlagTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: u32) {
        self.entries.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<u32> {
        self.entries.get(name).copied()
    }

    /// Bit value of `name`, zero when the table does not know it.
    pub fn value(&self, name: &str) -> u32 {
        self.get(name).unwrap_or(0)
    }

    /// True when `mask` shares a bit with the named flag.
    pub fn is_set(&self, mask: u32, name: &str) -> bool {
        mask & self.value(name) != 0
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Union of every known bit.
    pub fn known_mask(&self) -> u32 {
        self.entries.values().fold(0, |acc, v| acc | v)
    }

    /// Names of every entry that shares a bit with `mask`, in table order.
    pub fn names_set_in(&self, mask: u32) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, value)| mask & **value != 0)
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds a table from a JSON object of `"NAME": "0x..."` entries.
    ///
    /// Entries whose value is neither flag text nor an unsigned number are
    /// skipped with a warning.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(json)?;
        let object = document.as_object().ok_or_else(|| {
            ResdataError::InvalidFlagTable("expected a JSON object of name -> value".to_string())
        })?;

        let mut table = FlagTable::new();
        for (name, value) in object {
            let parsed = match value {
                Value::String(text) => parse_flag_text(text),
                Value::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
                _ => None,
            };

            match parsed {
                Some(bits) => table.insert(name.clone(), bits),
                None => warn!("Invalid flag table value: {} = {}", name, value),
            }
        }

        Ok(table)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let table = Self::from_json_str(&text)?;
        info!("Loaded {} flags from {}", table.len(), path.display());
        Ok(table)
    }
}

impl FromIterator<(String, u32)> for FlagTable {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<(&'a str, u32)> for FlagTable {
    fn from_iter<I: IntoIterator<Item = (&'a str, u32)>>(iter: I) -> Self {
        iter.into_iter().map(|(name, value)| (name.to_string(), value)).collect()
    }
}

/// The window-scope and control-scope tables, read-only for a resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagTables {
    pub window: FlagTable,
    pub control: FlagTable,
}

impl FlagTables {
    pub fn new(window: FlagTable, control: FlagTable) -> Self {
        Self { window, control }
    }

    pub fn load(window_path: impl AsRef<Path>, control_path: impl AsRef<Path>) -> Result<Self> {
        let tables = Self {
            window: FlagTable::load(window_path)?,
            control: FlagTable::load(control_path)?,
        };
        info!(
            "Flag tables loaded: windows = {}, controls = {}",
            tables.window.len(),
            tables.control.len()
        );
        Ok(tables)
    }
}
