//! Tests for the verification gate
