//! Tests for OTP issuance

#[cfg(test)]
mod service_tests;
