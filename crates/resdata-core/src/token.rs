// crates/resdata-core/src/token.rs
use serde::Serialize;

/// Classification of a single non-empty line of the resource file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    WindowHeader,
    ControlHeader,
    Text,
    Comment,
    Other,
}

impl TokenKind {
    /// Only headers and text references are kept in the token store.
    pub fn is_persisted(self) -> bool {
        matches!(self, TokenKind::WindowHeader | TokenKind::ControlHeader | TokenKind::Text)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::WindowHeader => "WindowHeader",
            TokenKind::ControlHeader => "ControlHeader",
            TokenKind::Text => "Text",
            TokenKind::Comment => "Comment",
            TokenKind::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Trimmed source line.
    pub raw_text: String,
    /// Window that was open when the line was read. Empty before the first header.
    pub window_name: String,
    /// Second field of a control header, empty for every other kind.
    pub control_id: String,
    /// Global position across the whole file, strictly increasing.
    pub sequence_index: usize,
    /// Most recent `//` comment seen before this line.
    pub trailing_comment: String,
    /// 1-based line number in the source text.
    pub line: usize,
}

impl Token {
    pub fn fields(&self) -> Vec<&str> {
        self.raw_text.split_whitespace().collect()
    }
}
