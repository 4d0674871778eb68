use std::borrow::Cow;
use validator::ValidationError;

/// Message returned for a missing or blank blob name
pub const BLANK_NAME_MESSAGE: &str = "Please provide a valid fileName parameter.";

/// Message returned for a blob name with `.` or `..` path segments
pub const RELATIVE_NAME_MESSAGE: &str = "Blob names must not contain '.' or '..' path segments.";

/// Check a caller-supplied blob name
///
/// Names are used as URL paths below the container, so `.` and `..`
/// segments would resolve outside of it. Azure treats `\` as `/`, so both
/// separate segments here.
pub fn validate_blob_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed(BLANK_NAME_MESSAGE)));
    }

    if name
        .split(['/', '\\'])
        .any(|segment| segment == "." || segment == "..")
    {
        return Err(ValidationError::new("relative_segment")
            .with_message(Cow::Borrowed(RELATIVE_NAME_MESSAGE)));
    }

    Ok(())
}
