//! Common utility functions

pub mod email;
pub mod list;

// Re-export commonly used utilities
pub use email::*;
pub use list::*;
