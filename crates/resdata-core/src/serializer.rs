// crates/resdata-core/src/serializer.rs

use tracing::{debug, info};

use crate::{ControlRecord, TokenMap, TokenStore, WindowRecord};

const LINE_END: &str = "\r\n";
const INDENT: &str = "    ";

/// Writes decoded records back out as resource text.
///
/// Window order follows the token store; windows that never decoded into a
/// record (no header, no name) are left out. Lines end with CRLF.
#[derive(Debug, Default)]
pub struct LayoutSerializer {
    out: String,
}

impl LayoutSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serialize(self, store: &TokenStore, windows: &[WindowRecord]) -> String {
        self.serialize_entries(&store.all_entries(), windows)
    }

    pub fn serialize_entries(mut self, entries: &TokenMap, windows: &[WindowRecord]) -> String {
        let mut written = 0;
        for name in entries.keys() {
            if let Some(window) = windows.iter().find(|w| w.is_named(name)) {
                self.write_window(window);
                written += 1;
            } else {
                debug!("Skipping token group '{}' without a decoded window", name);
            }
        }

        info!("Serialized {} windows ({} bytes)", written, self.out.len());
        self.out
    }

    /// Serializes one window on its own, independent of store order.
    pub fn serialize_window(mut self, window: &WindowRecord) -> String {
        self.write_window(window);
        self.out
    }

    fn write_window(&mut self, window: &WindowRecord) {
        self.line(0, &window.header_columns().join(" "));
        self.text_block(0, "Title String", &window.title_id);
        self.text_block(0, "Help Key", &window.help_id);

        self.line(0, "{");
        for control in &window.controls {
            self.write_control(control);
        }
        self.line(0, "}");
        self.out.push_str(LINE_END);
    }

    fn write_control(&mut self, control: &ControlRecord) {
        self.line(1, &control.header_columns().join(" "));
        self.text_block(1, "Title String", &control.title_id);
        self.text_block(1, "ToolTip", &control.tooltip_id);
    }

    fn text_block(&mut self, depth: usize, label: &str, id: &str) {
        self.line(depth, "{");
        self.line(depth + 1, &format!("// {}", label));
        if !id.is_empty() {
            self.line(depth + 1, id);
        }
        self.line(depth, "}");
    }

    fn line(&mut self, depth: usize, text: &str) {
        self.out.push_str(&format!("{}{}{}", INDENT.repeat(depth), text, LINE_END));
    }
}

/// Serializes every decoded window in token-store order.
pub fn serialize_layout(store: &TokenStore, windows: &[WindowRecord]) -> String {
    LayoutSerializer::new().serialize(store, windows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, LayoutDecoder, Tokenizer};

    const LAYOUT: &str = "\
APP_LOGIN \"WndTile00.tga\" \"\" 1 256 160 0x2410000 26
{
    // Title String
    IDS_RESDATA_INC_000010
}
{
    // Help Key
    IDS_RESDATA_INC_000011
}
{
    WTYPE_BUTTON WIDC_OK \"ButtOk.tga\" 0 10 10 80 30 0x220000 0 0 0 0 10 20 30
    {
        // Title String
        IDS_RESDATA_INC_000012
    }
    {
        // ToolTip
    }
}
";

    fn decode(text: &str) -> (TokenStore, Vec<WindowRecord>) {
        let store = TokenStore::new();
        Tokenizer::new().tokenize_into(&store, text);
        let windows = LayoutDecoder::new().decode(&store);
        (store, windows)
    }

    #[test]
    fn test_unedited_layout_round_trips() {
        let (store, windows) = decode(LAYOUT);
        let out = serialize_layout(&store, &windows);

        assert_eq!(out, format!("{}\n", LAYOUT).replace('\n', "\r\n"));
    }

    #[test]
    fn test_edited_color_and_flags_are_written_back() {
        let (store, mut windows) = decode(LAYOUT);
        let control = &mut windows[0].controls[0];
        control.color = Color::new(1, 2, 3);
        control.set_flags_mask(0x1);

        let out = serialize_layout(&store, &windows);
        assert!(out.contains("    WTYPE_BUTTON WIDC_OK \"ButtOk.tga\" 0 10 10 80 30 0x1 0 0 0 0 1 2 3\r\n"));
    }

    #[test]
    fn test_short_control_gets_padded_color_columns() {
        let (store, windows) = decode("APP_W \"\" \"\" 0 1 1 0x10000 0\nWTYPE_STATIC WIDC_A \"\" 0 1 2 3 4 0x0\n");
        let out = serialize_layout(&store, &windows);

        assert!(out.contains("    WTYPE_STATIC WIDC_A \"\" 0 1 2 3 4 0x0 0 0 0 0 255 255 255\r\n"));
    }

    #[test]
    fn test_window_columns_past_mod_are_kept() {
        let (store, windows) = decode("APP_W \"t.tga\" \"\" 1 10 20 0x10000 0 EXTRA1 EXTRA2\n");
        let out = serialize_layout(&store, &windows);

        assert!(out.starts_with("APP_W \"t.tga\" \"\" 1 10 20 0x10000 0 EXTRA1 EXTRA2\r\n"));
    }

    #[test]
    fn test_short_window_header_stays_corrupted() {
        let (store, windows) = decode("WND_SHORT \"Tile.tga\" \"\" 2\n");
        let out = serialize_layout(&store, &windows);
        assert!(out.starts_with("WND_SHORT \"Tile.tga\" \"\" 2\r\n"));

        let (_, reread) = decode(&out);
        assert!(reread[0].is_corrupted);
        assert_eq!(reread[0].modus, 2);
    }

    #[test]
    fn test_reserialized_layout_is_unchanged() {
        let text = "\
APP_W \"t.tga\" \"\" 1 10 20 0x10 0 EXTRA
{
    WTYPE_STATIC
    WTYPE_STATIC WIDC_A
    WTYPE_BUTTON WIDC_B \"b.tga\" 0 1 2 3 4 0x20 0 0 0 0 7 8 9 TAIL
    IDS_TIP_TITLE
    IDS_TIP_TEXT
}
";
        let (store, windows) = decode(text);
        let first = serialize_layout(&store, &windows);
        assert!(first.contains("    WTYPE_STATIC\r\n"));
        assert!(first.contains("    WTYPE_STATIC WIDC_A \"\" 0 0 0 0 0 0x0 0 0 0 0 255 255 255\r\n"));
        assert!(first.contains("    WTYPE_BUTTON WIDC_B \"b.tga\" 0 1 2 3 4 0x20 0 0 0 0 7 8 9 TAIL\r\n"));

        let (store, windows) = decode(&first);
        assert_eq!(windows[0].controls.len(), 3);
        assert!(windows[0].controls[0].id.is_empty());
        assert_eq!(windows[0].controls[1].texture, "");
        assert_eq!(windows[0].controls[2].tooltip_id, "IDS_TIP_TEXT");
        assert_eq!(serialize_layout(&store, &windows), first);
    }

    #[test]
    fn test_headerless_groups_are_skipped() {
        let (store, windows) = decode("IDS_ORPHAN\nAPP_W \"\" \"\" 0 1 1 0x10000 0\n");
        let out = serialize_layout(&store, &windows);

        assert!(out.starts_with("APP_W "));
        assert!(!out.contains("IDS_ORPHAN"));
        assert!(out.ends_with("}\r\n\r\n"));
    }
}
