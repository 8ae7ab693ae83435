// crates/resdata-core/src/records.rs
use glam::IVec2;
use serde::Serialize;

use crate::{format_flags, high_flags, low_flags, mid_flags, BehaviorDescriptor, Color, ControlType};

/// Number of columns a complete window header carries.
pub const WINDOW_HEADER_COLUMNS: usize = 8;
/// Position of the flag column in a window header.
pub const WINDOW_FLAGS_COLUMN: usize = 6;
/// Control header columns up to and including `mod4`.
pub const CONTROL_BASE_COLUMNS: usize = 13;
/// Control header columns including the RGB triple.
pub const CONTROL_COLOR_COLUMNS: usize = 16;

/// Strips one matching pair of surrounding double quotes.
pub fn unquote(text: &str) -> &str {
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

/// Reuses the original texture column when it still decodes to `texture`.
fn texture_column(raw: Option<&String>, texture: &str) -> String {
    match raw {
        Some(original) if unquote(original) == texture => original.clone(),
        _ => format!("\"{}\"", texture),
    }
}

/// Empty text would vanish between separators; it is written as `""`.
fn text_column(text: &str) -> String {
    if text.is_empty() {
        "\"\"".to_string()
    } else {
        text.to_string()
    }
}

fn flags_column(flags_hex: &str, flags_mask: u32) -> String {
    if flags_hex.is_empty() {
        format_flags(flags_mask)
    } else {
        flags_hex.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowRecord {
    pub name: String,
    pub texture: String,
    /// Third header column, kept verbatim (may be a text-identifier reference).
    pub title_text: String,
    pub modus: i32,
    /// Declared width. The historic column name is "x".
    pub x: i32,
    /// Declared height. The historic column name is "y".
    pub y: i32,
    /// Flag column as written in the source.
    pub flags_hex: String,
    /// Normalized mask, after the low-word auto-fix.
    pub flags_mask: u32,
    pub r#mod: i32,

    pub title_id: String,
    pub help_id: String,

    pub controls: Vec<ControlRecord>,

    /// Cached semantic tags, rebuilt by `update_window_flags`.
    pub resolved_mask: Vec<String>,
    pub behavior: BehaviorDescriptor,

    /// Header carries at least a name and a texture.
    pub valid: bool,
    /// Set when the header carried fewer columns than the layout expects.
    pub is_corrupted: bool,

    pub source_line: usize,
    pub raw_header: String,
    pub header_fields: Vec<String>,
}

impl Default for WindowRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            texture: String::new(),
            title_text: String::new(),
            modus: 0,
            x: 0,
            y: 0,
            flags_hex: String::new(),
            flags_mask: 0,
            r#mod: 0,
            title_id: String::new(),
            help_id: String::new(),
            controls: Vec::new(),
            resolved_mask: Vec::new(),
            behavior: BehaviorDescriptor::default(),
            valid: false,
            is_corrupted: false,
            source_line: 0,
            raw_header: String::new(),
            header_fields: Vec::new(),
        }
    }
}

impl WindowRecord {
    /// Width and height of the window rectangle.
    pub fn size(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    /// Case-insensitive name comparison used for lookups.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Replaces the mask after an edit; `resolved_mask` is stale until updated.
    pub fn set_flags_mask(&mut self, mask: u32) {
        self.flags_mask = mask;
        self.flags_hex = format_flags(mask);
    }

    pub fn find_control(&self, id: &str) -> Option<&ControlRecord> {
        self.controls.iter().find(|c| c.id == id)
    }

    pub fn find_control_mut(&mut self, id: &str) -> Option<&mut ControlRecord> {
        self.controls.iter_mut().find(|c| c.id == id)
    }

    /// Header columns rebuilt from the record in source column order.
    ///
    /// Columns past `mod` are kept. A short header stays short unless the
    /// flags were edited, in which case it is completed to eight columns.
    pub fn header_columns(&self) -> Vec<String> {
        let complete = self.header_fields.is_empty()
            || (self.header_fields.len() <= WINDOW_FLAGS_COLUMN && !self.flags_hex.is_empty());
        let count = if complete {
            self.header_fields.len().max(WINDOW_HEADER_COLUMNS)
        } else {
            self.header_fields.len()
        };

        let mut columns = self.header_fields.clone();
        columns.resize(count, String::new());
        for (index, column) in columns.iter_mut().enumerate().take(WINDOW_HEADER_COLUMNS) {
            *column = match index {
                0 => self.name.clone(),
                1 => texture_column(self.header_fields.get(1), &self.texture),
                2 => text_column(&self.title_text),
                3 => self.modus.to_string(),
                4 => self.x.to_string(),
                5 => self.y.to_string(),
                6 => flags_column(&self.flags_hex, self.flags_mask),
                _ => self.r#mod.to_string(),
            };
        }
        columns
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlRecord {
    /// Raw engine type tag, e.g. `WTYPE_BUTTON`.
    pub r#type: String,
    /// Unique within the owning window only.
    pub id: String,
    pub texture: String,

    pub mod0: i32,
    pub x: i32,
    pub y: i32,
    pub x1: i32,
    pub y1: i32,

    pub flags_hex: String,
    pub flags_mask: u32,
    pub low_flags: u32,
    pub mid_flags: u32,
    pub high_flags: u32,

    pub mod1: i32,
    pub mod2: i32,
    pub mod3: i32,
    pub mod4: i32,

    pub color: Color,

    pub title_id: String,
    pub tooltip_id: String,

    pub mapped_type: ControlType,
    pub resolved_mask: Vec<String>,
    pub behavior: BehaviorDescriptor,

    pub valid: bool,
    pub source_line: usize,
    pub raw_header: String,
    pub header_fields: Vec<String>,
}

impl Default for ControlRecord {
    fn default() -> Self {
        Self {
            r#type: String::new(),
            id: String::new(),
            texture: String::new(),
            mod0: 0,
            x: 0,
            y: 0,
            x1: 0,
            y1: 0,
            flags_hex: String::new(),
            flags_mask: 0,
            low_flags: 0,
            mid_flags: 0,
            high_flags: 0,
            mod1: 0,
            mod2: 0,
            mod3: 0,
            mod4: 0,
            color: Color::WHITE,
            title_id: String::new(),
            tooltip_id: String::new(),
            mapped_type: ControlType::Unknown,
            resolved_mask: Vec::new(),
            behavior: BehaviorDescriptor::default(),
            valid: false,
            source_line: 0,
            raw_header: String::new(),
            header_fields: Vec::new(),
        }
    }
}

impl ControlRecord {
    /// Left/top and right/bottom corners. Not normalized.
    pub fn rect(&self) -> (IVec2, IVec2) {
        (IVec2::new(self.x, self.y), IVec2::new(self.x1, self.y1))
    }

    pub fn size(&self) -> IVec2 {
        IVec2::new(self.x1 - self.x, self.y1 - self.y)
    }

    /// Sets the mask and its three slices together.
    pub fn apply_mask(&mut self, mask: u32) {
        self.flags_mask = mask;
        self.low_flags = low_flags(mask);
        self.mid_flags = mid_flags(mask);
        self.high_flags = high_flags(mask);
    }

    /// Replaces the mask after an edit; `resolved_mask` is stale until updated.
    pub fn set_flags_mask(&mut self, mask: u32) {
        self.apply_mask(mask);
        self.flags_hex = format_flags(mask);
    }

    /// Header columns rebuilt from the record.
    ///
    /// Missing columns before the color are padded with `0` so the RGB
    /// triple always lands in columns 13-15; columns past 15 are kept.
    /// Without an id nothing after the type can be placed, so only the
    /// type is written.
    pub fn header_columns(&self) -> Vec<String> {
        if self.id.is_empty() {
            return vec![self.r#type.clone()];
        }

        let mut columns = self.header_fields.clone();
        if columns.len() < CONTROL_COLOR_COLUMNS {
            columns.resize(CONTROL_COLOR_COLUMNS, "0".to_string());
        }

        columns[0] = self.r#type.clone();
        columns[1] = self.id.clone();
        columns[2] = texture_column(self.header_fields.get(2), &self.texture);
        columns[3] = self.mod0.to_string();
        columns[4] = self.x.to_string();
        columns[5] = self.y.to_string();
        columns[6] = self.x1.to_string();
        columns[7] = self.y1.to_string();
        columns[8] = flags_column(&self.flags_hex, self.flags_mask);
        columns[9] = self.mod1.to_string();
        columns[10] = self.mod2.to_string();
        columns[11] = self.mod3.to_string();
        columns[12] = self.mod4.to_string();
        columns[13] = self.color.r.to_string();
        columns[14] = self.color.g.to_string();
        columns[15] = self.color.b.to_string();

        columns
    }
}
