//! Deterministic string hashing for synthesized type names.
//!
//! Anonymous shapes are named after a hash of their compiled body text, so the
//! same body always yields the same name.
//!
//! # Example
//!
//! ```
//! use schemax_foundation::hash::{hash_code, hash_suffix};
//!
//! assert_eq!(hash_code(""), 0);
//! assert_eq!(hash_suffix("{\n\tasc\n\tdesc\n}"), "1894885946");
//! ```

/// 32-bit rolling hash over UTF-16 code units (`hash * 31 + unit`, wrapping).
#[must_use]
pub fn hash_code(s: &str) -> i32 {
    s.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_mul(31).wrapping_add(i32::from(unit))
    })
}

/// Digit-only rendering of [`hash_code`].
///
/// Non-negative hashes are prefixed with `1`, negative ones with `0` followed by
/// the absolute value, so the result never contains `-`.
#[must_use]
pub fn hash_suffix(s: &str) -> String {
    let hash = hash_code(s);
    if hash >= 0 {
        format!("1{hash}")
    } else {
        format!("0{}", hash.unsigned_abs())
    }
}
