//! Tests for profile editing
