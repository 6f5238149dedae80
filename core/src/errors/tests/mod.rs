//! Tests for domain errors
