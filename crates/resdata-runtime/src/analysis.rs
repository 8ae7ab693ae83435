// crates/resdata-runtime/src/analysis.rs

use std::collections::BTreeMap;

use resdata_behavior::{is_known_type, normalize_type, FALLBACK_BEHAVIOR};
use resdata_core::{ControlType, WindowRecord};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnknownControl {
    pub window: String,
    pub id: String,
    pub raw_type: String,
    pub mapped_type: ControlType,
}

/// Per-type statistics over every decoded control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ControlTypeReport {
    /// Raw type tag (uppercased) -> number of controls.
    pub counts: BTreeMap<String, usize>,
    /// Controls neither the behavior nor the display tables recognize.
    pub unknown: Vec<UnknownControl>,
}

impl ControlTypeReport {
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

fn is_unrecognized(raw_type: &str, mapped_type: ControlType) -> bool {
    let falls_back = normalize_type(raw_type) == FALLBACK_BEHAVIOR && !is_known_type(raw_type);
    falls_back || mapped_type == ControlType::Unknown
}

pub fn analyze_control_types(windows: &[WindowRecord]) -> ControlTypeReport {
    let mut report = ControlTypeReport::default();

    for window in windows {
        for control in &window.controls {
            let tag = control.r#type.trim().to_ascii_uppercase();
            *report.counts.entry(tag).or_insert(0) += 1;

            if is_unrecognized(&control.r#type, control.mapped_type) {
                report.unknown.push(UnknownControl {
                    window: window.name.clone(),
                    id: control.id.clone(),
                    raw_type: control.r#type.clone(),
                    mapped_type: control.mapped_type,
                });
            }
        }
    }

    for control in &report.unknown {
        warn!(
            "Unrecognized control {}/{} of type '{}'",
            control.window, control.id, control.raw_type
        );
    }
    info!(
        "Control analysis: {} controls, {} types, {} unrecognized",
        report.total(),
        report.counts.len(),
        report.unknown.len()
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use resdata_core::ControlRecord;

    fn control(control_type: &str, id: &str) -> ControlRecord {
        ControlRecord {
            r#type: control_type.to_string(),
            id: id.to_string(),
            mapped_type: ControlType::from_engine_type(control_type),
            ..ControlRecord::default()
        }
    }

    #[test]
    fn test_counts_and_unknown_controls() {
        let windows = vec![WindowRecord {
            name: "APP_SHOP".to_string(),
            controls: vec![
                control("WTYPE_BUTTON", "WIDC_BUY"),
                control("wtype_button", "WIDC_SELL"),
                control("WTYPE_HOLOGRAM", "WIDC_PREVIEW"),
                control("WTYPE_CUSTOM", "WIDC_ITEMS"),
                control("WTYPE_TREECTRL", "WIDC_TREE"),
            ],
            ..WindowRecord::default()
        }];

        let report = analyze_control_types(&windows);
        assert_eq!(report.total(), 5);
        assert_eq!(report.counts["WTYPE_BUTTON"], 2);

        let unknown: Vec<&str> = report.unknown.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(unknown, vec!["WIDC_PREVIEW", "WIDC_TREE"]);
        assert_eq!(report.unknown[0].window, "APP_SHOP");
    }
}
