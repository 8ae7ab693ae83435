// crates/resdata-core/src/control_type.rs
use serde::Serialize;

/// Display-layer classification of a control, consumed by renderers.
///
/// This is not the behavior category; see `resdata-behavior` for that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ControlType {
    Button,
    Edit,
    Static,
    GroupBox,
    ComboBox,
    ListBox,
    TabControl,
    ScrollBarH,
    ScrollBarV,
    CheckBox,
    RadioButton,
    ScrollBarThumbV,
    ScrollBarThumbH,
    Progress,
    Custom,
    #[default]
    Unknown,
}

const DISPLAY_TYPES: &[(ControlType, &[&str])] = &[
    (
        ControlType::Button,
        &[
            "WTYPE_BUTTON",
            "WTYPE_BUTTON1",
            "WTYPE_BUTTON2",
            "WTYPE_OKBUTTON",
            "WTYPE_CHECKBUTTON",
            "WTYPE_RADIOBUTTON",
            "WTYPE_HYPERBUTTON",
            "WTYPE_TABBUTTONCTRL",
            "WTYPE_RESISTANCEBUTTON",
        ],
    ),
    (ControlType::Edit, &["WTYPE_EDITCTRL", "WTYPE_EDIT", "WTYPE_EDITBOX"]),
    (ControlType::Static, &["WTYPE_STATIC", "WTYPE_TEXT", "WTYPE_CAPTION"]),
    (ControlType::GroupBox, &["WTYPE_GROUPBOX"]),
    (ControlType::ComboBox, &["WTYPE_COMBOBOX"]),
    (ControlType::ListBox, &["WTYPE_LISTBOX", "WTYPE_LISTCTRL"]),
    (ControlType::TabControl, &["WTYPE_TABCTRL"]),
    (ControlType::ScrollBarH, &["WTYPE_SCROLLBAR", "WTYPE_SCROLLBAR2"]),
    (ControlType::CheckBox, &["WTYPE_CHECKBOX"]),
];

impl ControlType {
    /// Maps a raw engine tag such as `WTYPE_BUTTON` to its display type.
    pub fn from_engine_type(raw: &str) -> Self {
        let tag = raw.trim().to_ascii_uppercase();

        DISPLAY_TYPES
            .iter()
            .find(|(_, tags)| tags.contains(&tag.as_str()))
            .map(|(control_type, _)| *control_type)
            .unwrap_or_else(|| {
                if tag.starts_with("WTYPE_CUSTOM") {
                    ControlType::Custom
                } else {
                    ControlType::Unknown
                }
            })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ControlType::Button => "Button",
            ControlType::Edit => "Edit",
            ControlType::Static => "Static",
            ControlType::GroupBox => "GroupBox",
            ControlType::ComboBox => "ComboBox",
            ControlType::ListBox => "ListBox",
            ControlType::TabControl => "TabControl",
            ControlType::ScrollBarH => "ScrollBarH",
            ControlType::ScrollBarV => "ScrollBarV",
            ControlType::CheckBox => "CheckBox",
            ControlType::RadioButton => "RadioButton",
            ControlType::ScrollBarThumbV => "ScrollBarThumbV",
            ControlType::ScrollBarThumbH => "ScrollBarThumbH",
            ControlType::Progress => "Progress",
            ControlType::Custom => "Custom",
            ControlType::Unknown => "Unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_type_mapping() {
        assert_eq!(ControlType::from_engine_type("WTYPE_BUTTON"), ControlType::Button);
        assert_eq!(ControlType::from_engine_type(" wtype_radiobutton "), ControlType::Button);
        assert_eq!(ControlType::from_engine_type("WTYPE_TEXT"), ControlType::Static);
        assert_eq!(ControlType::from_engine_type("WTYPE_SCROLLBAR"), ControlType::ScrollBarH);
        assert_eq!(ControlType::from_engine_type("WTYPE_CUSTOM_MINIMAP"), ControlType::Custom);
        assert_eq!(ControlType::from_engine_type("WTYPE_TREECTRL"), ControlType::Unknown);
        assert_eq!(ControlType::from_engine_type(""), ControlType::Unknown);
    }
}
