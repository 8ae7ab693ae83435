// crates/resdata-core/src/diagnostics.rs
use std::fmt;

use serde::Serialize;

/// Which slice of a 32-bit mask a finding refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FlagWord {
    /// Bits 0-15.
    Low,
    /// Bits 16-23.
    Mid,
    /// Bits 24-31.
    High,
    /// The whole mask (window validation).
    Full,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DiagnosticKind {
    /// Flag text that is not hex; the mask was set to zero.
    MalformedFlags { text: String },
    /// Integer column that did not parse; the field was set to zero.
    MalformedNumber { field: &'static str, text: String },
    /// Window mask in the low word, shifted into the high word.
    AutoFixedWindowFlags { original: u32, fixed: u32 },
    /// Bits set in a mask that no known flag covers.
    UnknownFlagBits { word: FlagWord, bits: u32 },
}

/// A non-fatal finding about one window or control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Window name or control id the finding is about.
    pub owner: String,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(owner: impl Into<String>, kind: DiagnosticKind) -> Self {
        Self {
            owner: owner.into(),
            kind,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::MalformedFlags { text } => {
                write!(f, "{}: invalid flag value '{}', using 0", self.owner, text)
            }
            DiagnosticKind::MalformedNumber { field, text } => {
                write!(f, "{}: invalid {} value '{}', using 0", self.owner, field, text)
            }
            DiagnosticKind::AutoFixedWindowFlags { original, fixed } => write!(
                f,
                "{}: low-word window flags 0x{:X} shifted to 0x{:X}",
                self.owner, original, fixed
            ),
            DiagnosticKind::UnknownFlagBits { word, bits } => {
                let label = match word {
                    FlagWord::Low => "LOW flag bits",
                    FlagWord::Mid => "MID flag bits (16-23)",
                    FlagWord::High => "HIGH flag bits (24-31)",
                    FlagWord::Full => "flag bits",
                };
                write!(f, "{}: unknown {}: 0x{:X}", self.owner, label, bits)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_owner_and_text() {
        let diagnostic = Diagnostic::new(
            "APP_LOGIN",
            DiagnosticKind::MalformedFlags { text: "0xZZ".to_string() },
        );
        assert_eq!(diagnostic.to_string(), "APP_LOGIN: invalid flag value '0xZZ', using 0");

        let unknown = Diagnostic::new(
            "WIDC_OK",
            DiagnosticKind::UnknownFlagBits { word: FlagWord::Mid, bits: 0x40 },
        );
        assert_eq!(unknown.to_string(), "WIDC_OK: unknown MID flag bits (16-23): 0x40");
    }
}
