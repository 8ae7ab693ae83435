// crates/resdata-runtime/src/listener.rs

use resdata_core::TokenStore;

/// Notified after every re-parse, once the token store holds the new tokens
/// and before the records are decoded.
///
/// Symbol-table collaborators (text and `#define` tables) hook in here.
pub trait TokensReadyListener: Send + Sync {
    fn on_tokens_ready(&self, store: &TokenStore);
}

impl<F> TokensReadyListener for F
where
    F: Fn(&TokenStore) + Send + Sync,
{
    fn on_tokens_ready(&self, store: &TokenStore) {
        self(store)
    }
}
