//! Value objects representing immutable domain concepts.

pub mod profile_form;
pub mod profile_submission;

// Re-export commonly used types
pub use profile_form::ProfileForm;
pub use profile_submission::{ProfileFields, ProfileSubmission};
