// crates/resdata-behavior/src/lib.rs
pub mod capabilities;
pub mod base;
pub mod normalize;
pub mod semantic;
pub mod combined;
pub mod window_style;
pub mod validate;
pub mod config;
pub mod engine;

pub use capabilities::*;
pub use base::*;
pub use normalize::*;
pub use semantic::*;
pub use combined::*;
pub use window_style::*;
pub use validate::*;
pub use config::*;
pub use engine::*;
