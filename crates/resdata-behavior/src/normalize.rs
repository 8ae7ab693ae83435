// crates/resdata-behavior/src/normalize.rs

/// Canonical key every unrecognized engine type falls back to.
pub const FALLBACK_BEHAVIOR: &str = "custom";

/// Engine type tag -> canonical behavior key.
const TYPE_KEYS: &[(&str, &str)] = &[
    ("WTYPE_NONE", "base"),
    ("WTYPE_BASE", "base"),
    ("WTYPE_STATIC", "label"),
    ("WTYPE_BUTTON", "button"),
    ("WTYPE_EDIT", "edit"),
    ("WTYPE_EDITCTRL", "edit"),
    ("WTYPE_SCROLLBAR", "scrollbar"),
    ("WTYPE_SLIDER", "scrollbar"),
    ("WTYPE_LISTBOX", "listbox"),
    ("WTYPE_LISTCTRL", "listbox"),
    ("WTYPE_LISTVIEW", "listbox"),
    ("WTYPE_COMBOBOX", "combobox"),
    ("WTYPE_TREECTRL", "tree"),
    ("WTYPE_VIEWTREE", "tree"),
    ("WTYPE_TABCTRL", "tab"),
    ("WTYPE_CUSTOM", "custom"),
    ("WTYPE_ITEMICON", "custom"),
    ("WTYPE_SCRIPT", "custom"),
    ("WTYPE_ANIMATE", "custom"),
    ("WTYPE_MESH", "custom"),
    ("WTYPE_DIALOGCTRL", "custom"),
    ("WTYPE_GROUPBOX", "groupbox"),
    ("WTYPE_TABPAGE", "label"),
    ("WTYPE_ICON", "label"),
    ("WTYPE_TEXT", "label"),
    ("WTYPE_HTML", "label"),
    ("WTYPE_RICHTEXT", "label"),
    ("WTYPE_PROGRESS", "progress"),
    ("WTYPE_GAUGE", "progress"),
    ("WTYPE_GAUGEEXT", "progress"),
];

fn lookup(raw_type: &str) -> Option<&'static str> {
    let key = raw_type.trim().to_ascii_uppercase();
    TYPE_KEYS.iter().find(|(tag, _)| *tag == key).map(|(_, behavior)| *behavior)
}

/// Maps a raw engine type to its canonical behavior key. Never fails.
pub fn normalize_type(raw_type: &str) -> &'static str {
    lookup(raw_type).unwrap_or(FALLBACK_BEHAVIOR)
}

/// True when the tag is in the lookup table, including explicit custom tags.
pub fn is_known_type(raw_type: &str) -> bool {
    lookup(raw_type).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tags() {
        assert_eq!(normalize_type("WTYPE_BUTTON"), "button");
        assert_eq!(normalize_type("  wtype_editctrl "), "edit");
        assert_eq!(normalize_type("WTYPE_GAUGEEXT"), "progress");
        assert_eq!(normalize_type("WTYPE_TABPAGE"), "label");
        assert_eq!(normalize_type("WTYPE_NONE"), "base");
    }

    #[test]
    fn test_unknown_tags_fall_back_to_custom() {
        assert_eq!(normalize_type("WTYPE_HOLOGRAM"), FALLBACK_BEHAVIOR);
        assert_eq!(normalize_type(""), FALLBACK_BEHAVIOR);
        assert!(!is_known_type("WTYPE_HOLOGRAM"));
        assert!(is_known_type("WTYPE_MESH"));
    }
}
