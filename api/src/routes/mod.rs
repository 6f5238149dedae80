pub mod profile;

pub use profile::AppState;
