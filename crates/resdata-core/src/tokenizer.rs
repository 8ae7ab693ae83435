// crates/resdata-core/src/tokenizer.rs

use tracing::{debug, info};

use crate::{Token, TokenKind, TokenMap, TokenStore};

pub const COMMENT_MARKER: &str = "//";
pub const WINDOW_HEADER_PREFIXES: &[&str] = &["APP_", "WND_", "DPS_", "CONFIRM_"];
pub const CONTROL_HEADER_PREFIX: &str = "WTYPE_";
pub const TEXT_PREFIX: &str = "IDS_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenizeSummary {
    pub windows: usize,
    pub tokens: usize,
}

/// Line classifier for `resdata.inc` style text.
///
/// There is no grammar to fail against: anything unrecognized is dropped as
/// `Other`, so tokenizing never errors.
#[derive(Debug, Clone, Default)]
pub struct Tokenizer;

impl Tokenizer {
    pub fn new() -> Self {
        Self
    }

    /// Classifies one trimmed, non-empty line.
    pub fn classify(line: &str) -> TokenKind {
        if line.starts_with(COMMENT_MARKER) {
            TokenKind::Comment
        } else if line == "{" || line == "}" {
            TokenKind::Other
        } else if WINDOW_HEADER_PREFIXES.iter().any(|p| line.starts_with(p)) {
            TokenKind::WindowHeader
        } else if line.starts_with(CONTROL_HEADER_PREFIX) {
            TokenKind::ControlHeader
        } else if line.starts_with(TEXT_PREFIX) {
            TokenKind::Text
        } else {
            TokenKind::Other
        }
    }

    /// Splits `text` into per-window token lists without touching any store.
    pub fn tokenize(&self, text: &str) -> TokenMap {
        let mut map = TokenMap::new();
        let mut current_window = String::new();
        let mut last_comment = String::new();
        let mut sequence = 0usize;

        for (line_index, raw_line) in text.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }

            let kind = Self::classify(line);
            let mut control_id = String::new();

            match kind {
                TokenKind::Comment => {
                    last_comment = line[COMMENT_MARKER.len()..].trim().to_string();
                    continue;
                }
                TokenKind::Other => continue,
                TokenKind::WindowHeader => {
                    current_window = line
                        .split_whitespace()
                        .next()
                        .unwrap_or_default()
                        .to_string();
                }
                TokenKind::ControlHeader => {
                    control_id = line
                        .split_whitespace()
                        .nth(1)
                        .unwrap_or_default()
                        .to_string();
                }
                TokenKind::Text => {}
            }

            let token = Token {
                kind,
                raw_text: line.to_string(),
                window_name: current_window.clone(),
                control_id,
                sequence_index: sequence,
                trailing_comment: last_comment.clone(),
                line: line_index + 1,
            };
            sequence += 1;

            map.entry(current_window.clone()).or_default().push(token);
        }

        debug!("Tokenized {} persisted tokens into {} windows", sequence, map.len());
        map
    }

    /// Clears `store` and rebuilds it from `text` in one locked replacement.
    pub fn tokenize_into(&self, store: &TokenStore, text: &str) -> TokenizeSummary {
        info!("Tokenizing resource text ({} bytes)", text.len());

        let map = self.tokenize(text);
        let summary = TokenizeSummary {
            windows: map.len(),
            tokens: map.values().map(Vec::len).sum(),
        };
        store.replace_all(map);

        info!("Tokenizing finished: {} windows, {} tokens", summary.windows, summary.tokens);
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_WINDOWS: &str = "\
APP_A \"WndTile00.tga\" \"\" 1 256 160 0x2410000 26
// Title String
IDS_RESDATA_INC_000001
WTYPE_BUTTON WIDC_OK \"ButtOk.tga\" 0 10 10 80 30 0x220000 0 0 0 0
APP_B \"WndTile00.tga\" \"\" 1 128 64 0x10 26
{
IDS_RESDATA_INC_000002
}
WTYPE_STATIC WIDC_LABEL \"\" 0 4 4 60 20 0x0 0 0 0 0
";

    #[test]
    fn test_classify_precedence() {
        assert_eq!(Tokenizer::classify("// APP_COMMENTED"), TokenKind::Comment);
        assert_eq!(Tokenizer::classify("{"), TokenKind::Other);
        assert_eq!(Tokenizer::classify("}"), TokenKind::Other);
        assert_eq!(Tokenizer::classify("APP_LOGIN \"x.tga\""), TokenKind::WindowHeader);
        assert_eq!(Tokenizer::classify("CONFIRM_BUY"), TokenKind::WindowHeader);
        assert_eq!(Tokenizer::classify("WTYPE_EDIT WIDC_NAME"), TokenKind::ControlHeader);
        assert_eq!(Tokenizer::classify("IDS_RESDATA_INC_000123"), TokenKind::Text);
        assert_eq!(Tokenizer::classify("#define FOO 1"), TokenKind::Other);
    }

    #[test]
    fn test_sequence_is_global_across_windows() {
        let map = Tokenizer::new().tokenize(TWO_WINDOWS);
        assert_eq!(map.len(), 2);

        let a = &map["APP_A"];
        let b = &map["APP_B"];
        assert_eq!(a.len(), 3);
        assert_eq!(b.len(), 3);

        let sequence: Vec<usize> = a.iter().chain(b.iter()).map(|t| t.sequence_index).collect();
        assert_eq!(sequence, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_tokens_carry_window_control_and_comment() {
        let map = Tokenizer::new().tokenize(TWO_WINDOWS);
        let a = &map["APP_A"];

        assert!(a.iter().all(|t| t.window_name == "APP_A"));
        assert_eq!(a[1].kind, TokenKind::Text);
        assert_eq!(a[1].trailing_comment, "Title String");
        assert_eq!(a[1].line, 3);
        assert_eq!(a[2].kind, TokenKind::ControlHeader);
        assert_eq!(a[2].control_id, "WIDC_OK");
    }

    #[test]
    fn test_lines_before_first_window_land_in_unnamed_bucket() {
        let map = Tokenizer::new().tokenize("IDS_ORPHAN\nAPP_X \"\" \"\" 0 1 1 0 0\n");
        assert_eq!(map[""].len(), 1);
        assert_eq!(map["APP_X"].len(), 1);
    }

    #[test]
    fn test_tokenize_into_rebuilds_store() {
        let store = TokenStore::new();
        store.put("APP_STALE", Vec::new());

        let summary = Tokenizer::new().tokenize_into(&store, TWO_WINDOWS);
        assert_eq!(summary, TokenizeSummary { windows: 2, tokens: 6 });
        assert!(store.get("APP_STALE").is_empty());
        assert_eq!(store.window_count(), 2);
    }
}
