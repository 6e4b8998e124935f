//! Checklists executed against an object store.
//!
//! Each checklist runs its steps in order and stops at the first failure.
//! Nothing a run created is rolled back, so a failed run leaves its bucket
//! and object in place for inspection.

pub mod cosi;
pub mod smoke;

/// Checks that a downloaded body decodes as UTF-8 and matches the uploaded
/// text.
///
/// Returns the decoded text on success so callers can echo it, or a
/// ready-to-print mismatch description.
fn verify_round_trip(expected: &str, actual: &[u8]) -> Result<String, String> {
    let text = match std::str::from_utf8(actual) {
        Ok(text) => text,
        Err(err) => return Err(format!("downloaded content is not valid UTF-8: {err}")),
    };

    if text != expected {
        return Err(format!(
            "downloaded content does not match: expected {expected:?}, got {text:?}"
        ));
    }

    Ok(text.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_accepts_matching_content() {
        let content = "Hello from the checklist!";
        assert_eq!(
            verify_round_trip(content, content.as_bytes()).unwrap(),
            content
        );
    }

    #[test]
    fn round_trip_rejects_different_content() {
        let detail = verify_round_trip("expected text", b"other text").unwrap_err();
        assert!(detail.contains("expected text"));
        assert!(detail.contains("other text"));
    }

    #[test]
    fn round_trip_rejects_invalid_utf8() {
        let detail = verify_round_trip("expected", &[0xff, 0xfe]).unwrap_err();
        assert!(detail.contains("UTF-8"));
    }
}
