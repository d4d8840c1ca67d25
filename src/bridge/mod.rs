//! Hosts that expose sessions to a UI across a language boundary

pub mod engine;
pub mod table;

pub use engine::Engine;
pub use table::SessionTable;
