// crates/resdata-behavior/src/window_style.rs

use resdata_core::{FlagTable, WindowRecord};

/// Always-on-screen windows that never offer a close button.
pub const HUD_WINDOWS: &[&str] = &[
    "APP_MINIMAP",
    "APP_HP_GAUGE",
    "APP_QUICK_SLOT",
    "APP_TARGET_INFO",
    "APP_CHAT",
    "APP_PLAYER_INFO",
    "APP_BUFF",
    "APP_ACTION_SLOT",
];

pub fn is_hud_window(name: &str) -> bool {
    HUD_WINDOWS.iter().any(|hud| hud.eq_ignore_ascii_case(name))
}

/// How the shared no-close/no-center bit is read for one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosePolicy {
    pub hud: bool,
    /// Only ever set for HUD windows.
    pub no_center: bool,
    pub hide_close: bool,
}

pub fn close_policy(window: &WindowRecord, table: &FlagTable) -> ClosePolicy {
    let mask = window.flags_mask;
    if is_hud_window(&window.name) {
        ClosePolicy {
            hud: true,
            no_center: table.is_set(mask, "WBS_NOCENTER"),
            hide_close: true,
        }
    } else {
        ClosePolicy {
            hud: false,
            no_center: false,
            hide_close: table.is_set(mask, "WBS_NOCLOSE"),
        }
    }
}

const LEADING_TAGS: &[(&str, &str)] = &[
    ("WBS_MOVE", "movable"),
    ("WBS_MODAL", "modal"),
    ("WBS_CHILD", "is_child"),
    ("WBS_TOPMOST", "always_on_top"),
];

const BUTTON_TAGS: &[(&str, &str)] = &[
    ("WBS_HELP", "has_help"),
    ("WBS_PIN", "has_pin"),
    ("WBS_VIEW", "has_view"),
    ("WBS_EXTENSION", "has_extension"),
    ("WBS_MINIMIZEBOX", "has_minimize"),
    ("WBS_MAXIMIZEBOX", "has_maximize"),
    ("WBS_VISIBLE", "visible"),
];

/// Semantic tags for a window mask, in their fixed evaluation order.
pub fn apply_window_style(window: &WindowRecord, table: &FlagTable) -> Vec<String> {
    let mask = window.flags_mask;
    let has = |name: &str| table.is_set(mask, name);
    let mut tags: Vec<&str> = Vec::new();

    tags.extend(LEADING_TAGS.iter().filter(|(flag, _)| has(*flag)).map(|(_, tag)| *tag));

    if has("WBS_THICKFRAME") || has("WBS_RESIZEABLE") {
        tags.push("resizable");
    }
    tags.push(if has("WBS_CAPTION") { "has_caption" } else { "no_caption" });
    tags.push(if has("WBS_NOFRAME") { "no_frame" } else { "has_frame" });

    let policy = close_policy(window, table);
    if policy.no_center {
        tags.push("no_center");
    }
    if !policy.hide_close {
        tags.push("has_close");
    }

    tags.extend(BUTTON_TAGS.iter().filter(|(flag, _)| has(*flag)).map(|(_, tag)| *tag));

    if !tags.contains(&"has_frame") && !tags.contains(&"no_frame") {
        tags.push("default_frame");
    }

    tags.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> FlagTable {
        [
            ("WBS_MOVE", 0x0001_0000),
            ("WBS_MODAL", 0x0002_0000),
            ("WBS_CAPTION", 0x0020_0000),
            ("WBS_THICKFRAME", 0x0004_0000),
            ("WBS_RESIZEABLE", 0x0008_0000),
            ("WBS_NOFRAME", 0x0100_0000),
            ("WBS_NOCLOSE", 0x0000_0080),
            ("WBS_NOCENTER", 0x0000_0080),
            ("WBS_HELP", 0x0200_0000),
            ("WBS_VISIBLE", 0x1000_0000),
        ]
        .into_iter()
        .collect()
    }

    fn window(name: &str, mask: u32) -> WindowRecord {
        WindowRecord {
            name: name.to_string(),
            flags_mask: mask,
            ..WindowRecord::default()
        }
    }

    #[test]
    fn test_tag_order() {
        let tags = apply_window_style(&window("APP_LOGIN", 0x1223_0000), &table());
        assert_eq!(
            tags,
            vec!["movable", "modal", "has_caption", "has_frame", "has_close", "has_help", "visible"]
        );
    }

    #[test]
    fn test_caption_and_frame_are_exclusive_pairs() {
        let tags = apply_window_style(&window("APP_EMPTY", 0), &table());
        assert_eq!(tags, vec!["no_caption", "has_frame", "has_close"]);

        let tags = apply_window_style(&window("APP_BARE", 0x0108_0000), &table());
        assert_eq!(tags, vec!["resizable", "no_caption", "no_frame", "has_close"]);
    }

    #[test]
    fn test_hud_windows_never_offer_close() {
        let minimap = apply_window_style(&window("APP_MINIMAP", 0), &table());
        assert!(!minimap.contains(&"has_close".to_string()));
        assert!(!minimap.contains(&"no_center".to_string()));

        let login = apply_window_style(&window("APP_LOGIN", 0), &table());
        assert!(login.contains(&"has_close".to_string()));
    }

    #[test]
    fn test_shared_bit_reads_per_window_kind() {
        let hud = apply_window_style(&window("App_Chat", 0x80), &table());
        assert!(hud.contains(&"no_center".to_string()));
        assert!(!hud.contains(&"has_close".to_string()));

        let normal = apply_window_style(&window("APP_INVENTORY", 0x80), &table());
        assert!(!normal.contains(&"no_center".to_string()));
        assert!(!normal.contains(&"has_close".to_string()));
    }

    #[test]
    fn test_is_hud_window_ignores_case() {
        assert!(is_hud_window("app_buff"));
        assert!(!is_hud_window("APP_BUFF_EXTRA"));
    }
}
