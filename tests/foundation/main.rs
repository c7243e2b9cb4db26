//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Error, name hashing, and shape classification.
