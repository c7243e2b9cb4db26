//! SDL validation.
//!
//! The assembled text is parsed with `apollo-parser`; the first syntax error is
//! reported with the parser's own message.

use apollo_parser::Parser;
use tracing::debug;

use schemax_foundation::{Error, Result};

/// Parses `sdl` as a GraphQL document.
///
/// # Errors
///
/// Returns [`schemax_foundation::ErrorKind::InvalidSdl`] with the first parser message.
pub fn validate_sdl(sdl: &str) -> Result<()> {
    let tree = Parser::new(sdl).parse();
    let errors: Vec<_> = tree.errors().collect();
    debug!(errors = errors.len(), "validated SDL");
    match errors.first() {
        Some(err) => Err(Error::invalid_sdl(err.message())),
        None => Ok(()),
    }
}
