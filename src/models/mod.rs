//! Data Models
//!
//! Configuration data structures and the command response envelope.

pub mod response;
pub mod rules;
pub mod settings;

pub use response::*;
pub use rules::*;
pub use settings::*;
