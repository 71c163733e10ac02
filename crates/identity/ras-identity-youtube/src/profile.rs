//! Normalization of the GData `users/default` feed entry.
//!
//! The feed wraps every scalar as `{"$t": value}`:
//!
//! ```json
//! { "entry": {
//!     "yt$googlePlusUserId": { "$t": "1234" },
//!     "yt$username": { "$t": "someone" },
//!     "title": { "$t": "Some One" },
//!     "yt$lastName": { "$t": "One" },
//!     "yt$firstName": { "$t": "Some" } } }
//! ```
//!
//! Only `entry`, `yt$username` and `title` are required. Any other key is
//! ignored.

use crate::error::ParseError;
use ras_identity_core::{NormalizedProfile, ProfileName};
use serde_json::Value;

pub const PROVIDER: &str = "youtube";

const ENTRY: &str = "/entry";
const GOOGLE_PLUS_USER_ID: &str = "/entry/yt$googlePlusUserId/$t";
const USERNAME: &str = "/entry/yt$username/$t";
const TITLE: &str = "/entry/title/$t";
const LAST_NAME: &str = "/entry/yt$lastName/$t";
const FIRST_NAME: &str = "/entry/yt$firstName/$t";

/// Build a [`NormalizedProfile`] from a raw profile response body.
///
/// Either every required field is present and the full profile is returned,
/// or nothing is.
pub fn parse_profile(body: &str) -> Result<NormalizedProfile, ParseError> {
    let json: Value = serde_json::from_str(body)?;

    if !json.pointer(ENTRY).is_some_and(Value::is_object) {
        return Err(ParseError::MissingField("entry"));
    }

    let username = required(&json, USERNAME, "entry.yt$username")?;
    let display_name = required(&json, TITLE, "entry.title")?;
    let id = text(&json, GOOGLE_PLUS_USER_ID).unwrap_or(&username).to_owned();

    let name = match (text(&json, LAST_NAME), text(&json, FIRST_NAME)) {
        (Some(family), Some(given)) => ProfileName::new(family, given),
        _ => ProfileName::new("", display_name.as_str()),
    };

    Ok(NormalizedProfile {
        provider: PROVIDER.to_string(),
        id,
        username,
        display_name,
        name,
        raw: body.to_string(),
        json,
    })
}

fn text<'a>(json: &'a Value, pointer: &str) -> Option<&'a str> {
    json.pointer(pointer).and_then(Value::as_str)
}

fn required(json: &Value, pointer: &str, field: &'static str) -> Result<String, ParseError> {
    text(json, pointer)
        .map(str::to_owned)
        .ok_or(ParseError::MissingField(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(entry: Value) -> String {
        json!({ "entry": entry }).to_string()
    }

    #[test]
    fn test_minimal_entry() {
        let raw = r#"{"entry":{"yt$username":{"$t":"u1"},"title":{"$t":"User One"}}}"#;
        let profile = parse_profile(raw).unwrap();

        assert_eq!(profile.provider, "youtube");
        assert_eq!(profile.id, "u1");
        assert_eq!(profile.username, "u1");
        assert_eq!(profile.display_name, "User One");
        assert_eq!(profile.name, ProfileName::new("", "User One"));
        assert_eq!(profile.raw, raw);
        assert_eq!(profile.json["entry"]["title"]["$t"], "User One");
    }

    #[test]
    fn test_google_plus_id_wins_over_username() {
        let profile = parse_profile(&body(json!({
            "yt$googlePlusUserId": { "$t": "101234567890" },
            "yt$username": { "$t": "someone" },
            "title": { "$t": "Some One" }
        })))
        .unwrap();

        assert_eq!(profile.id, "101234567890");
        assert_eq!(profile.username, "someone");
    }

    #[test]
    fn test_both_name_parts_are_used_verbatim() {
        let profile = parse_profile(&body(json!({
            "yt$username": { "$t": "someone" },
            "title": { "$t": "Display Title" },
            "yt$lastName": { "$t": "One" },
            "yt$firstName": { "$t": "Some" }
        })))
        .unwrap();

        assert_eq!(profile.name, ProfileName::new("One", "Some"));
        assert_eq!(profile.display_name, "Display Title");
    }

    #[test]
    fn test_single_name_part_falls_back_to_title() {
        for partial in [
            json!({ "yt$lastName": { "$t": "One" } }),
            json!({ "yt$firstName": { "$t": "Some" } }),
        ] {
            let mut entry = json!({
                "yt$username": { "$t": "someone" },
                "title": { "$t": "Some One" }
            });
            entry
                .as_object_mut()
                .unwrap()
                .extend(partial.as_object().unwrap().clone());

            let profile = parse_profile(&body(entry)).unwrap();
            assert_eq!(profile.name, ProfileName::new("", "Some One"));
        }
    }

    #[test]
    fn test_extra_keys_are_ignored() {
        let profile = parse_profile(&body(json!({
            "yt$username": { "$t": "someone" },
            "title": { "$t": "Some One" },
            "yt$statistics": { "subscriberCount": "12" }
        })))
        .unwrap();

        assert_eq!(profile.id, "someone");
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            parse_profile("<html>not json</html>"),
            Err(ParseError::Json(_))
        ));
    }

    #[test]
    fn test_missing_required_fields() {
        assert!(matches!(
            parse_profile(r#"{"feed":{}}"#),
            Err(ParseError::MissingField("entry"))
        ));
        assert!(matches!(
            parse_profile(r#"{"entry":"oops"}"#),
            Err(ParseError::MissingField("entry"))
        ));
        assert!(matches!(
            parse_profile(&body(json!({ "title": { "$t": "Some One" } }))),
            Err(ParseError::MissingField("entry.yt$username"))
        ));
        assert!(matches!(
            parse_profile(&body(json!({
                "yt$googlePlusUserId": { "$t": "1" },
                "yt$username": { "$t": "someone" }
            }))),
            Err(ParseError::MissingField("entry.title"))
        ));
        assert!(matches!(
            parse_profile(&body(json!({
                "yt$username": { "$t": 42 },
                "title": { "$t": "Some One" }
            }))),
            Err(ParseError::MissingField("entry.yt$username"))
        ));
    }
}
