// crates/resdata-core/src/decoder.rs

use tracing::{debug, info, warn};

use crate::{
    parse_flag_text, unquote, Color, ControlRecord, ControlType, Diagnostic, DiagnosticKind,
    Token, TokenKind, TokenMap, TokenStore, WindowRecord, CONTROL_COLOR_COLUMNS,
    WINDOW_AUTO_FIX_LIMIT, WINDOW_HEADER_COLUMNS,
};

/// Parses a legacy integer column: signed decimal, or `0x` hex.
pub fn parse_legacy_int(text: &str) -> Option<i64> {
    let text = text.trim();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let value = match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        Some(hex) if !hex.is_empty() => i64::from_str_radix(hex, 16).ok()?,
        Some(_) => return None,
        None if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
            digits.parse::<i64>().ok()?
        }
        None => return None,
    };

    Some(if negative { -value } else { value })
}

/// Decodes the RGB columns 13-15 of a control header.
///
/// Three in-range integers are taken as R, G, B. Otherwise column 13 is
/// tried as a packed `0xRRGGBB` value. Anything else, and any header with
/// fewer than 16 columns, is opaque white.
pub fn decode_color(fields: &[&str]) -> Color {
    if fields.len() < CONTROL_COLOR_COLUMNS {
        return Color::WHITE;
    }

    let channel = |text: &str| parse_legacy_int(text).and_then(|v| u8::try_from(v).ok());
    if let (Some(r), Some(g), Some(b)) = (channel(fields[13]), channel(fields[14]), channel(fields[15])) {
        return Color::new(r, g, b);
    }

    match parse_legacy_int(fields[13]) {
        Some(packed) => Color::from_packed(packed as u32),
        None => Color::WHITE,
    }
}

/// Turns the token store into window and control records.
///
/// Decoding is best effort: short or malformed headers never stop the
/// remaining windows from being decoded. Findings are kept in
/// `diagnostics()` and logged.
#[derive(Debug, Default)]
pub struct LayoutDecoder {
    diagnostics: Vec<Diagnostic>,
}

impl LayoutDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn decode(&mut self, store: &TokenStore) -> Vec<WindowRecord> {
        self.decode_entries(&store.all_entries())
    }

    /// Windows come out in token-map order.
    pub fn decode_entries(&mut self, entries: &TokenMap) -> Vec<WindowRecord> {
        self.diagnostics.clear();

        let windows: Vec<WindowRecord> = entries
            .iter()
            .filter_map(|(name, tokens)| self.decode_window(name, tokens))
            .collect();

        info!("Decoded {} windows from {} token groups", windows.len(), entries.len());
        windows
    }

    /// `None` when the window has no name or no header token.
    pub fn decode_window(&mut self, name: &str, tokens: &[Token]) -> Option<WindowRecord> {
        if name.trim().is_empty() || tokens.is_empty() {
            return None;
        }

        let header_index = tokens.iter().position(|t| t.kind == TokenKind::WindowHeader)?;
        let header = &tokens[header_index];

        let mut window = WindowRecord {
            name: name.to_string(),
            ..WindowRecord::default()
        };
        self.parse_window_header(&mut window, header);

        let mut i = header_index + 1;
        let mut text_count = 0;
        while i < tokens.len() && tokens[i].kind != TokenKind::ControlHeader {
            if tokens[i].kind == TokenKind::Text {
                match text_count {
                    0 => window.title_id = tokens[i].raw_text.trim().to_string(),
                    1 => window.help_id = tokens[i].raw_text.trim().to_string(),
                    _ => {}
                }
                text_count += 1;
            }
            i += 1;
        }

        while i < tokens.len() {
            let mut control = self.parse_control_header(&window.name, &tokens[i]);
            i += 1;

            let mut text_count = 0;
            while i < tokens.len() && tokens[i].kind != TokenKind::ControlHeader {
                if tokens[i].kind == TokenKind::Text {
                    match text_count {
                        0 => control.title_id = tokens[i].raw_text.trim().to_string(),
                        1 => control.tooltip_id = tokens[i].raw_text.trim().to_string(),
                        _ => {}
                    }
                    text_count += 1;
                }
                i += 1;
            }

            window.controls.push(control);
        }

        debug!(
            "Window {}: size=({}, {}), flags=0x{:08X}, controls={}",
            window.name,
            window.x,
            window.y,
            window.flags_mask,
            window.controls.len()
        );
        Some(window)
    }

    fn parse_window_header(&mut self, window: &mut WindowRecord, header: &Token) {
        let fields = header.fields();
        let owner = window.name.clone();

        window.source_line = header.line;
        window.raw_header = header.raw_text.clone();
        window.header_fields = fields.iter().map(|f| f.to_string()).collect();
        window.is_corrupted = fields.len() < WINDOW_HEADER_COLUMNS;
        window.valid = fields.len() >= 2;

        if let Some(texture) = fields.get(1) {
            window.texture = unquote(texture).to_string();
        }
        if let Some(title) = fields.get(2) {
            window.title_text = title.to_string();
        }
        window.modus = self.int_field(&owner, "modus", fields.get(3));
        window.x = self.int_field(&owner, "width", fields.get(4));
        window.y = self.int_field(&owner, "height", fields.get(5));
        window.r#mod = self.int_field(&owner, "mod", fields.get(7));

        if let Some(flags) = fields.get(6) {
            window.flags_hex = flags.to_string();
            let mask = self.flag_field(&owner, flags);

            window.flags_mask = if mask > 0 && mask < WINDOW_AUTO_FIX_LIMIT {
                let fixed = mask << 16;
                warn!(
                    "Auto-fix: window {} has low-word flags 0x{:X}, shifted to 0x{:X}",
                    owner, mask, fixed
                );
                self.diagnostics.push(Diagnostic::new(
                    &owner,
                    DiagnosticKind::AutoFixedWindowFlags { original: mask, fixed },
                ));
                fixed
            } else {
                mask
            };
        }
    }

    fn parse_control_header(&mut self, window_name: &str, header: &Token) -> ControlRecord {
        let fields = header.fields();
        let mut control = ControlRecord {
            source_line: header.line,
            raw_header: header.raw_text.clone(),
            header_fields: fields.iter().map(|f| f.to_string()).collect(),
            valid: fields.len() >= 2,
            ..ControlRecord::default()
        };

        if let Some(control_type) = fields.first() {
            control.r#type = control_type.to_string();
        }
        if let Some(id) = fields.get(1) {
            control.id = id.to_string();
        }
        if let Some(texture) = fields.get(2) {
            control.texture = unquote(texture).to_string();
        }

        let owner = if control.id.is_empty() {
            format!("{}/<unnamed>", window_name)
        } else {
            format!("{}/{}", window_name, control.id)
        };

        control.mod0 = self.int_field(&owner, "mod0", fields.get(3));
        control.x = self.int_field(&owner, "x", fields.get(4));
        control.y = self.int_field(&owner, "y", fields.get(5));
        control.x1 = self.int_field(&owner, "x1", fields.get(6));
        control.y1 = self.int_field(&owner, "y1", fields.get(7));

        if let Some(flags) = fields.get(8) {
            control.flags_hex = flags.to_string();
            let mask = self.flag_field(&owner, flags);
            control.apply_mask(mask);
        }

        control.mod1 = self.int_field(&owner, "mod1", fields.get(9));
        control.mod2 = self.int_field(&owner, "mod2", fields.get(10));
        control.mod3 = self.int_field(&owner, "mod3", fields.get(11));
        control.mod4 = self.int_field(&owner, "mod4", fields.get(12));

        control.color = decode_color(&fields);
        control.mapped_type = ControlType::from_engine_type(&control.r#type);

        control
    }

    /// Absent columns are zero without a diagnostic; unparsable ones get one.
    fn int_field(&mut self, owner: &str, field: &'static str, text: Option<&&str>) -> i32 {
        let Some(text) = text else {
            return 0;
        };

        match parse_legacy_int(text).and_then(|v| i32::try_from(v).ok()) {
            Some(value) => value,
            None => {
                warn!("Invalid {} value in {}: {}", field, owner, text);
                self.diagnostics.push(Diagnostic::new(
                    owner,
                    DiagnosticKind::MalformedNumber {
                        field,
                        text: text.to_string(),
                    },
                ));
                0
            }
        }
    }

    fn flag_field(&mut self, owner: &str, text: &str) -> u32 {
        match parse_flag_text(text) {
            Some(mask) => mask,
            None => {
                warn!("Invalid flag value in {}: {}", owner, text);
                self.diagnostics.push(Diagnostic::new(
                    owner,
                    DiagnosticKind::MalformedFlags {
                        text: text.to_string(),
                    },
                ));
                0
            }
        }
    }
}
