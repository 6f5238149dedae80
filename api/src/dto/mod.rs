pub mod profile;

pub use profile::{SaveProfileRequest, SaveProfileResponse, SendOtpRequest, SendOtpResponse};
