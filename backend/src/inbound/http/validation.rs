//! Shared validation helpers for inbound HTTP adapters.

use std::str::FromStr;

use serde_json::json;

use crate::domain::Error;

/// Error for a required JSON field that was absent or blank.
pub(crate) fn missing_field_error(field: &'static str, message: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": "missing_field",
    }))
}

/// Require a non-blank string field.
pub(crate) fn required_text(
    value: Option<&str>,
    field: &'static str,
    message: &str,
) -> Result<String, Error> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| missing_field_error(field, message))
}

/// Parse an optional wire value, treating blank strings as absent.
pub(crate) fn parse_optional<T>(value: Option<&str>) -> Result<Option<T>, Error>
where
    T: FromStr,
    T::Err: Into<Error>,
{
    value
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(|raw| raw.parse::<T>().map_err(Into::into))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, RoomType};
    use rstest::rstest;

    #[rstest]
    #[case(None)]
    #[case(Some("   "))]
    fn blank_text_is_missing(#[case] value: Option<&str>) {
        let err = required_text(value, "title", "Title is required").expect_err("blank");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "Title is required");
        let details = err.details().expect("details");
        assert_eq!(details["field"], "title");
        assert_eq!(details["code"], "missing_field");
    }

    #[rstest]
    fn text_is_trimmed() {
        let text = required_text(Some("  Kitchen  "), "title", "Title is required")
            .expect("present");
        assert_eq!(text, "Kitchen");
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some("kitchen"), Some(RoomType::Kitchen))]
    fn optional_wire_values(#[case] raw: Option<&str>, #[case] expected: Option<RoomType>) {
        let parsed = parse_optional::<RoomType>(raw).expect("valid");
        assert_eq!(parsed, expected);
    }

    #[rstest]
    fn unknown_wire_values_are_rejected() {
        let err = parse_optional::<RoomType>(Some("garage")).expect_err("unknown room");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }
}
