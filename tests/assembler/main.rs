//! Integration tests for Layer 1: Assembler
//!
//! Tests the full item-stream-to-SDL pipeline: merging repeated headers,
//! type resolutions, end-to-end schemas, and SDL validation.

mod fixtures;
mod resolutions;
