//! Common utility functions

pub mod mobile;
pub mod validation;

// Re-export commonly used utilities
pub use mobile::*;
pub use validation::*;
