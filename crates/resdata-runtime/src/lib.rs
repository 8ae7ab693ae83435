// crates/resdata-runtime/src/lib.rs
pub mod analysis;
pub mod listener;
pub mod project;

pub use analysis::*;
pub use listener::*;
pub use project::*;
