// crates/resdata-behavior/src/combined.rs

use resdata_core::{AttributeMap, AttributeValue};

fn copy(semantic: &AttributeMap, out: &mut AttributeMap, key: &str) {
    if let Some(value) = semantic.get(key) {
        out.insert(key.to_string(), value.clone());
    }
}

fn set(out: &mut AttributeMap, key: &str, value: impl Into<AttributeValue>) {
    out.insert(key.to_string(), value.into());
}

/// Refines the category from the raw engine type plus semantic attributes.
///
/// `engine_type` is the trimmed, uppercased raw tag. The result always
/// carries a `category`; unmatched types fall back to the lowercase
/// `normalized` key.
pub fn derive_combined_behavior(engine_type: &str, normalized: &str, semantic: &AttributeMap) -> AttributeMap {
    let mut out = AttributeMap::new();
    let role = semantic.get("role").and_then(AttributeValue::as_str);

    match engine_type {
        "WTYPE_BUTTON" => {
            let category = if semantic.contains_key("triState") {
                "tristate_checkbox"
            } else if role == Some("checkbox") {
                "checkbox"
            } else if role == Some("radiobutton") {
                "radiobutton"
            } else {
                "button"
            };
            set(&mut out, "category", category);
            copy(semantic, &mut out, "toggle");
            if semantic.contains_key("defaultButton") {
                set(&mut out, "defaultButton", true);
            }
            copy(semantic, &mut out, "textAlign");
        }
        "WTYPE_EDIT" => {
            set(&mut out, "category", "edit");
            if semantic.contains_key("password") {
                set(&mut out, "password", true);
            }
            copy(semantic, &mut out, "multiline");
            if semantic.contains_key("readonly") {
                set(&mut out, "readonly", true);
            }
            copy(semantic, &mut out, "textAlign");
        }
        "WTYPE_LISTBOX" => {
            set(&mut out, "category", "listbox");
            copy(semantic, &mut out, "multiSelect");
            copy(semantic, &mut out, "extendedSelect");
            copy(semantic, &mut out, "ownerDraw");
        }
        "WTYPE_STATIC" => {
            if semantic.contains_key("groupbox") || semantic.contains_key("WSS_GROUPBOX") {
                set(&mut out, "category", "groupbox");
                set(&mut out, "isContainer", true);
            } else if semantic.contains_key("imageMode") {
                set(&mut out, "category", "image");
                copy(semantic, &mut out, "imageMode");
            } else {
                set(&mut out, "category", "label");
            }
            copy(semantic, &mut out, "textAlign");
        }
        "WTYPE_SCROLLBAR" => {
            set(&mut out, "category", "scrollbar");
            let orientation = semantic
                .get("orientation")
                .cloned()
                .unwrap_or_else(|| "vertical".into());
            out.insert("orientation".to_string(), orientation);
        }
        "WTYPE_TREECTRL" => {
            set(&mut out, "category", "tree");
            copy(semantic, &mut out, "multiSelect");
        }
        "WTYPE_TABCTRL" => {
            set(&mut out, "category", "tab");
            set(&mut out, "hasTabs", true);
        }
        _ => set(&mut out, "category", normalized.to_lowercase()),
    }

    out
}
