// crates/resdata-behavior/src/validate.rs

use resdata_core::{
    ControlRecord, Diagnostic, DiagnosticKind, FlagTables, FlagWord, WindowRecord, HIGH_BYTE_MASK,
    LOW_WORD_MASK, MID_BYTE_MASK,
};
use tracing::warn;

fn report(owner: &str, word: FlagWord, bits: u32, out: &mut Vec<Diagnostic>) {
    if bits == 0 {
        return;
    }
    let diagnostic = Diagnostic::new(owner, DiagnosticKind::UnknownFlagBits { word, bits });
    warn!("{}", diagnostic);
    out.push(diagnostic);
}

/// Bits of the window mask that no window flag covers. Never mutates the record.
pub fn validate_window(window: &WindowRecord, tables: &FlagTables) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    let unknown = window.flags_mask & !tables.window.known_mask();
    report(&window.name, FlagWord::Full, unknown, &mut out);
    out
}

/// Checks the low word against the control table and the mid and high
/// bytes against the window table. Reported mid/high bits are shifted down.
pub fn validate_control(window_name: &str, control: &ControlRecord, tables: &FlagTables) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    let owner = format!("{}/{}", window_name, control.id);
    let mask = control.flags_mask;
    let known_control = tables.control.known_mask();
    let known_window = tables.window.known_mask();

    report(&owner, FlagWord::Low, mask & LOW_WORD_MASK & !known_control, &mut out);
    report(&owner, FlagWord::Mid, (mask & MID_BYTE_MASK & !known_window) >> 16, &mut out);
    report(&owner, FlagWord::High, (mask & HIGH_BYTE_MASK & !known_window) >> 24, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use resdata_core::FlagTable;

    fn tables() -> FlagTables {
        FlagTables::new(
            [("WBS_MOVE", 0x0001_0000), ("WBS_CAPTION", 0x0020_0000), ("WBS_TOPMOST", 0x0100_0000)]
                .into_iter()
                .collect(),
            [("BS_CHECKBOX", 0x0002), ("WS_DISABLED", 0x0800)].into_iter().collect::<FlagTable>(),
        )
    }

    #[test]
    fn test_known_window_mask_is_clean() {
        let window = WindowRecord {
            name: "APP_OK".to_string(),
            flags_mask: 0x0121_0000,
            ..WindowRecord::default()
        };
        assert!(validate_window(&window, &tables()).is_empty());
    }

    #[test]
    fn test_unknown_window_bits_leave_record_unchanged() {
        let window = WindowRecord {
            name: "APP_ODD".to_string(),
            flags_mask: 0x0041_0004,
            ..WindowRecord::default()
        };
        let before = window.clone();

        let diagnostics = validate_window(&window, &tables());
        assert_eq!(
            diagnostics,
            vec![Diagnostic::new(
                "APP_ODD",
                DiagnosticKind::UnknownFlagBits { word: FlagWord::Full, bits: 0x0040_0004 }
            )]
        );
        assert_eq!(window, before);
    }

    #[test]
    fn test_control_words_are_checked_independently() {
        let mut control = ControlRecord {
            id: "WIDC_CHECK".to_string(),
            ..ControlRecord::default()
        };
        // Low 0x0012: 0x10 unknown. Mid 0x41: 0x40 unknown. High 0x81: 0x80 unknown.
        control.apply_mask(0x8141_0012);

        let diagnostics = validate_control("APP_W", &control, &tables());
        let found: Vec<(FlagWord, u32)> = diagnostics
            .iter()
            .map(|d| match d.kind {
                DiagnosticKind::UnknownFlagBits { word, bits } => (word, bits),
                _ => panic!("unexpected diagnostic {}", d),
            })
            .collect();

        assert_eq!(found, vec![(FlagWord::Low, 0x10), (FlagWord::Mid, 0x40), (FlagWord::High, 0x80)]);
        assert!(diagnostics.iter().all(|d| d.owner == "APP_W/WIDC_CHECK"));
        assert_eq!(control.flags_mask, 0x8141_0012);
    }
}
