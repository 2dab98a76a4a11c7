//! Recording identifier lookup in extractor output
//!
//! The only schema knowledge the client has: `metadata.tags.musicbrainz_trackid`
//! holds either one string or an array of strings.

use abz_common::uuid_utils;
use serde_json::Value;

/// Candidate identifiers in document order; non-string entries are dropped
pub fn candidate_ids(features: &Value) -> Vec<&str> {
    match features.pointer("/metadata/tags/musicbrainz_trackid") {
        Some(Value::String(id)) => vec![id.as_str()],
        Some(Value::Array(ids)) => ids.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}

/// First candidate that is a syntactically valid UUID
///
/// Surrounding whitespace in a tag is ignored, and the trimmed id is the one
/// used in the submission URL.
pub fn select_recording_id(features: &Value) -> Option<String> {
    candidate_ids(features)
        .into_iter()
        .map(str::trim)
        .find(|id| uuid_utils::is_valid(id))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const VALID: &str = "3f1f3a9e-5d2b-4c6a-9b1e-0a2b3c4d5e6f";
    const OTHER_VALID: &str = "8c1e2f3a-4b5c-4d6e-8f70-112233445566";

    #[test]
    fn test_single_string_id() {
        let features = json!({"metadata": {"tags": {"musicbrainz_trackid": VALID}}});
        assert_eq!(select_recording_id(&features).as_deref(), Some(VALID));
    }

    #[test]
    fn test_first_valid_entry_regardless_of_position() {
        let features = json!({
            "metadata": {"tags": {"musicbrainz_trackid": ["not-a-uuid", VALID, OTHER_VALID]}}
        });
        assert_eq!(select_recording_id(&features).as_deref(), Some(VALID));
    }

    #[test]
    fn test_no_valid_candidates() {
        let features = json!({
            "metadata": {"tags": {"musicbrainz_trackid": ["not-a-uuid", ""]}}
        });
        assert_eq!(select_recording_id(&features), None);
    }

    #[test]
    fn test_missing_field() {
        assert_eq!(select_recording_id(&json!({"metadata": {"tags": {}}})), None);
        assert_eq!(select_recording_id(&json!({"lowlevel": {}})), None);
        assert_eq!(select_recording_id(&json!([])), None);
    }

    #[test]
    fn test_non_string_entries_are_ignored() {
        let features = json!({
            "metadata": {"tags": {"musicbrainz_trackid": [42, null, VALID]}}
        });
        assert_eq!(candidate_ids(&features), vec![VALID]);
    }

    #[test]
    fn test_padded_id_is_trimmed() {
        let padded = format!("  {}\n", VALID);
        let features = json!({"metadata": {"tags": {"musicbrainz_trackid": padded}}});
        assert_eq!(select_recording_id(&features).as_deref(), Some(VALID));
    }
}
