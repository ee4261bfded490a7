//! Error types for the Lexipane protocol layer.

mod channel;
mod explain;
mod settings;

pub use channel::*;
pub use explain::*;
pub use settings::*;
