//! Tag limits for event records.

use crate::error::CoreError;

/// Maximum number of tags allowed per event.
pub const MAX_TAGS: usize = 3;

/// Validate the tag list against [`MAX_TAGS`].
pub fn validate_tags(tags: &[String]) -> Result<(), CoreError> {
    if tags.len() > MAX_TAGS {
        return Err(CoreError::Validation(format!(
            "A maximum of {MAX_TAGS} tags are allowed per event"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_tags_is_valid() {
        assert!(validate_tags(&[]).is_ok());
    }

    #[test]
    fn three_tags_is_valid() {
        assert!(validate_tags(&tags(&["music", "outdoor", "family"])).is_ok());
    }

    #[test]
    fn four_tags_is_rejected() {
        let result = validate_tags(&tags(&["a", "b", "c", "d"]));
        assert!(result.is_err());
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("maximum of 3"), "got: {msg}");
    }
}
