//! UUID utilities
//!
//! MusicBrainz recording identifiers are plain UUIDs; tags written by taggers
//! sometimes carry junk, so callers validate before use.

use uuid::Uuid;

/// Parse UUID from string
pub fn parse(s: &str) -> Result<Uuid, uuid::Error> {
    Uuid::parse_str(s)
}

/// True when `s` is a syntactically valid UUID
pub fn is_valid(s: &str) -> bool {
    parse(s).is_ok()
}
