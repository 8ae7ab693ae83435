// crates/resdata-core/src/lib.rs
pub mod token;
pub mod token_store;
pub mod tokenizer;
pub mod control_type;
pub mod records;
pub mod flags;
pub mod properties;
pub mod diagnostics;
pub mod decoder;
pub mod serializer;

pub use token::*;
pub use token_store::*;
pub use tokenizer::*;
pub use control_type::*;
pub use records::*;
pub use flags::*;
pub use properties::*;
pub use diagnostics::*;
pub use decoder::*;
pub use serializer::*;

#[derive(Debug, thiserror::Error)]
pub enum ResdataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid flag table: {0}")]
    InvalidFlagTable(String),

    #[error("Window not found: {0}")]
    WindowNotFound(String),

    #[error("Control '{control}' not found in window '{window}'")]
    ControlNotFound { window: String, control: String },

    #[error("Unknown flag: {0}")]
    UnknownFlag(String),
}

pub type Result<T> = std::result::Result<T, ResdataError>;
