// crates/resdata-behavior/src/semantic.rs

use resdata_core::{AttributeMap, AttributeValue, ControlRecord, FlagTable, WindowRecord};

use crate::close_policy;

#[derive(Debug, Clone, Copy)]
enum RuleValue {
    Bool(bool),
    Text(&'static str),
}

impl From<RuleValue> for AttributeValue {
    fn from(value: RuleValue) -> Self {
        match value {
            RuleValue::Bool(b) => AttributeValue::Bool(b),
            RuleValue::Text(s) => AttributeValue::String(s.to_string()),
        }
    }
}

/// One step of flag interpretation. Steps run in list order and later
/// steps overwrite keys written by earlier ones.
#[derive(Debug)]
enum Rule {
    /// When any of the flags is set, write every listed attribute.
    When(&'static [&'static str], &'static [(&'static str, RuleValue)]),
    /// First listed flag that is set picks the value; `None` leaves the key alone.
    Choose(&'static str, &'static [(&'static str, RuleValue)], Option<RuleValue>),
}

use RuleValue::{Bool, Text};

const TRUE: RuleValue = Bool(true);

const CONTROL_RULES: &[Rule] = &[
    // Button roles
    Rule::When(&["BS_CHECKBOX", "BS_AUTOCHECKBOX"], &[("role", Text("checkbox")), ("toggle", TRUE)]),
    Rule::When(
        &["BS_3STATE", "BS_AUTO3STATE"],
        &[("role", Text("checkbox")), ("toggle", TRUE), ("triState", TRUE)],
    ),
    Rule::When(&["BS_RADIOBUTTON", "BS_AUTORADIOBUTTON"], &[("role", Text("radiobutton")), ("toggle", TRUE)]),
    Rule::When(&["BS_DEFPUSHBUTTON"], &[("defaultButton", TRUE)]),
    // Button alignment
    Rule::When(&["BS_LEFT"], &[("textAlign", Text("left"))]),
    Rule::When(&["BS_RIGHT"], &[("textAlign", Text("right"))]),
    Rule::When(&["BS_TOP"], &[("textAlignV", Text("top"))]),
    Rule::When(&["BS_BOTTOM"], &[("textAlignV", Text("bottom"))]),
    Rule::When(&["BS_VCENTER"], &[("textAlignV", Text("center"))]),
    // Edit
    Rule::When(&["ES_PASSWORD"], &[("password", TRUE)]),
    Rule::When(&["ES_READONLY"], &[("readonly", TRUE)]),
    Rule::When(&["ES_MULTILINE"], &[("multiline", TRUE)]),
    Rule::Choose(
        "textAlign",
        &[("ES_CENTER", Text("center")), ("ES_RIGHT", Text("right"))],
        Some(Text("left")),
    ),
    Rule::When(&["ES_AUTOHSCROLL"], &[("autoScrollX", TRUE)]),
    Rule::When(&["ES_AUTOVSCROLL"], &[("autoScrollY", TRUE)]),
    Rule::When(&["ES_NOHIDESEL"], &[("noHideSelection", TRUE)]),
    Rule::When(&["ES_OEMCONVERT"], &[("oemConvert", TRUE)]),
    Rule::When(&["ES_NUMBER"], &[("numeric", TRUE)]),
    Rule::When(&["ES_WANTRETURN"], &[("acceptReturn", TRUE)]),
    // List box
    Rule::When(&["LBS_MULTIPLESEL"], &[("multiSelect", TRUE)]),
    Rule::When(&["LBS_EXTENDEDSEL"], &[("extendedSelect", TRUE)]),
    Rule::When(&["LBS_SORT"], &[("sorted", TRUE)]),
    Rule::When(&["LBS_USETABSTOPS"], &[("tabStops", TRUE)]),
    Rule::When(&["LBS_OWNERDRAWFIXED"], &[("ownerDraw", Text("fixed"))]),
    Rule::When(&["LBS_OWNERDRAWVARIABLE"], &[("ownerDraw", Text("variable"))]),
    Rule::When(&["LBS_HASSTRINGS"], &[("hasStrings", TRUE)]),
    Rule::When(&["LBS_NOINTEGRALHEIGHT"], &[("noIntegralHeight", TRUE)]),
    Rule::When(&["LBS_DISABLENOSCROLL"], &[("disableNoScroll", TRUE)]),
    Rule::When(&["LBS_NOTIFY"], &[("notify", TRUE)]),
    Rule::When(&["LBS_MULTICOLUMN"], &[("multiColumn", TRUE)]),
    Rule::When(&["LBS_WANTKEYBOARDINPUT"], &[("wantKeyboard", TRUE)]),
    // Static
    Rule::When(&["SS_CENTER"], &[("textAlign", Text("center"))]),
    Rule::When(&["SS_RIGHT"], &[("textAlign", Text("right"))]),
    Rule::When(&["SS_NOTIFY"], &[("notify", TRUE)]),
    Rule::When(&["SS_BITMAP"], &[("imageMode", Text("bitmap"))]),
    Rule::When(&["SS_ICON"], &[("imageMode", Text("icon"))]),
    Rule::When(&["WSS_GROUPBOX"], &[("groupbox", TRUE)]),
    // Scroll bar
    Rule::When(&["SBS_VERT"], &[("orientation", Text("vertical"))]),
    Rule::When(&["SBS_HORZ"], &[("orientation", Text("horizontal"))]),
    // Generic
    Rule::Choose("enabled", &[("WS_DISABLED", Bool(false))], Some(TRUE)),
    Rule::When(&["WS_VISIBLE"], &[("visible", TRUE)]),
];

const WINDOW_RULES: &[Rule] = &[
    Rule::Choose("visible", &[("WBS_VISIBLE", TRUE)], Some(Bool(false))),
    Rule::Choose("enabled", &[("WBS_DISABLED", Bool(false))], Some(TRUE)),
    Rule::When(&["WBS_CHILD"], &[("isChild", TRUE)]),
    Rule::When(&["WBS_MODAL"], &[("modal", TRUE)]),
    Rule::When(&["WBS_TOPMOST"], &[("topMost", TRUE)]),
    Rule::Choose("hasCaption", &[("WBS_CAPTION", TRUE)], Some(Bool(false))),
    Rule::When(&["WBS_TITLE"], &[("hasTitle", TRUE)]),
    Rule::When(&["WBS_SYSMENU"], &[("hasSysMenu", TRUE)]),
    Rule::When(&["WBS_FRAME"], &[("hasFrame", TRUE)]),
    Rule::When(&["WBS_BORDER"], &[("hasBorder", TRUE)]),
    Rule::When(&["WBS_TOOLWINDOW"], &[("toolWindow", TRUE)]),
    Rule::When(&["WBS_THICKFRAME"], &[("resizable", TRUE)]),
    Rule::When(&["WBS_SIZE"], &[("sizeable", TRUE)]),
    Rule::When(&["WBS_NOFRAME"], &[("noFrame", TRUE)]),
    Rule::When(&["WBS_NODRAWFRAME"], &[("noDrawFrame", TRUE)]),
    Rule::When(&["WBS_HSCROLL"], &[("hScroll", TRUE)]),
    Rule::When(&["WBS_VSCROLL"], &[("vScroll", TRUE)]),
    Rule::When(&["WBS_DOCKING"], &[("docking", TRUE)]),
    Rule::When(&["WBS_MOVE"], &[("movable", TRUE)]),
    Rule::When(&["WBS_MINIMIZEBOX"], &[("hasMinimizeBox", TRUE)]),
    Rule::When(&["WBS_MAXIMIZEBOX"], &[("hasMaximizeBox", TRUE)]),
    Rule::When(&["WBS_HELP"], &[("hasHelpButton", TRUE)]),
    Rule::When(&["WBS_PIN"], &[("hasPinButton", TRUE)]),
    Rule::When(&["WBS_VIEW"], &[("hasViewButton", TRUE)]),
    Rule::When(&["WBS_EXTENSION"], &[("hasExtensionButton", TRUE)]),
];

fn apply_rules(rules: &[Rule], table: &FlagTable, mask: u32, out: &mut AttributeMap) {
    for rule in rules {
        match rule {
            Rule::When(flags, attributes) => {
                if flags.iter().any(|flag| table.is_set(mask, flag)) {
                    for (key, value) in attributes.iter() {
                        out.insert(key.to_string(), (*value).into());
                    }
                }
            }
            Rule::Choose(key, choices, fallback) => {
                let chosen = choices
                    .iter()
                    .find(|(flag, _)| table.is_set(mask, flag))
                    .map(|(_, value)| *value)
                    .or(*fallback);
                if let Some(value) = chosen {
                    out.insert(key.to_string(), value.into());
                }
            }
        }
    }
}

/// Attributes read from a control's low word against the control table.
pub fn resolve_control_semantic(control: &ControlRecord, table: &FlagTable) -> AttributeMap {
    let mut out = AttributeMap::new();
    apply_rules(CONTROL_RULES, table, control.low_flags, &mut out);
    out
}

/// Attributes read from a window's full mask against the window table.
pub fn resolve_window_semantic(window: &WindowRecord, table: &FlagTable) -> AttributeMap {
    let mut out = AttributeMap::new();
    apply_rules(WINDOW_RULES, table, window.flags_mask, &mut out);

    let policy = close_policy(window, table);
    if policy.no_center {
        out.insert("noCenter".to_string(), true.into());
    }
    out.insert("hasCloseButton".to_string(), (!policy.hide_close).into());
    out
}
