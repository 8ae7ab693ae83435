// crates/resdata-core/src/token_store.rs

use indexmap::IndexMap;
use parking_lot::Mutex;

use crate::Token;

/// Window name -> ordered token list, in first-insertion order.
pub type TokenMap = IndexMap<String, Vec<Token>>;

/// Shared registry of tokenized windows.
///
/// Every operation takes the same lock, so a reader never sees a window
/// half-replaced. Updates are whole-window replacements; there is no
/// field-level mutation and therefore no need for finer locking.
///
/// Callers share it through an `Arc<TokenStore>` handle.
#[derive(Debug, Default)]
pub struct TokenStore {
    tokens: Mutex<TokenMap>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&self) {
        self.tokens.lock().clear();
    }

    /// Replaces the entry for `window_name` wholesale.
    pub fn put(&self, window_name: &str, tokens: Vec<Token>) {
        self.tokens.lock().insert(window_name.to_string(), tokens);
    }

    /// Replaces the whole content in one locked step.
    pub fn replace_all(&self, entries: TokenMap) {
        *self.tokens.lock() = entries;
    }

    /// Copy of the tokens of one window, empty when the window is unknown.
    pub fn get(&self, window_name: &str) -> Vec<Token> {
        self.tokens
            .lock()
            .get(window_name)
            .cloned()
            .unwrap_or_default()
    }

    pub fn all_entries(&self) -> TokenMap {
        self.tokens.lock().clone()
    }

    pub fn window_count(&self) -> usize {
        self.tokens.lock().len()
    }

    pub fn token_count(&self) -> usize {
        self.tokens.lock().values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TokenKind;
    use std::sync::Arc;
    use std::thread;

    fn token(window: &str, index: usize) -> Token {
        Token {
            kind: TokenKind::Text,
            raw_text: format!("IDS_{}", index),
            window_name: window.to_string(),
            control_id: String::new(),
            sequence_index: index,
            trailing_comment: String::new(),
            line: index + 1,
        }
    }

    #[test]
    fn test_put_replaces_instead_of_merging() {
        let store = TokenStore::new();
        store.put("APP_A", vec![token("APP_A", 0), token("APP_A", 1)]);
        store.put("APP_A", vec![token("APP_A", 7)]);

        let tokens = store.get("APP_A");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].sequence_index, 7);
    }

    #[test]
    fn test_get_unknown_window_is_empty() {
        let store = TokenStore::new();
        assert!(store.get("APP_MISSING").is_empty());
    }

    #[test]
    fn test_clear_and_insertion_order() {
        let store = TokenStore::new();
        store.put("APP_B", vec![token("APP_B", 0)]);
        store.put("APP_A", vec![token("APP_A", 1)]);

        let keys: Vec<String> = store.all_entries().keys().cloned().collect();
        assert_eq!(keys, vec!["APP_B".to_string(), "APP_A".to_string()]);

        store.clear();
        assert_eq!(store.window_count(), 0);
        assert_eq!(store.token_count(), 0);
    }

    #[test]
    fn test_concurrent_writers_never_tear_a_window() {
        let store = Arc::new(TokenStore::new());
        let mut handles = Vec::new();

        for writer in 0..4 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                for round in 0..50 {
                    let base = writer * 1000 + round * 10;
                    store.put("APP_SHARED", (base..base + 5).map(|i| token("APP_SHARED", i)).collect());
                    let snapshot = store.get("APP_SHARED");
                    assert_eq!(snapshot.len(), 5);
                    let first = snapshot[0].sequence_index;
                    assert!(snapshot.iter().enumerate().all(|(i, t)| t.sequence_index == first + i));
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.get("APP_SHARED").len(), 5);
    }
}
