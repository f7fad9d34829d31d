use crate::error::ParseError;
use crate::wire;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Identity metadata attached to a telemetry session.
///
/// Immutable value object: `user_id` is the required stable identifier,
/// the scalar fields are optional, and `additional_info` carries
/// open-ended string metadata under unique keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Always present on the wire, even when empty.
    pub additional_info: BTreeMap<String, String>,
}

impl UserRecord {
    pub fn new(user_id: impl Into<String>) -> Self {
        UserRecord {
            user_id: user_id.into(),
            user_name: None,
            full_name: None,
            email: None,
            phone_number: None,
            additional_info: BTreeMap::new(),
        }
    }
}

/// Encode a user record into its wire JSON object.
pub fn encode(user: &UserRecord) -> Value {
    serde_json::to_value(user).unwrap_or_else(|_| Value::Object(Map::new()))
}

/// Decode a user record from wire JSON.
///
/// `userId` and the `additionalInfo` object are required even though the
/// scalar fields are optional, and every `additionalInfo` entry must be a
/// string value.
pub fn decode(json: &Value) -> Result<UserRecord, ParseError> {
    let info_obj = wire::require_object(json, "additionalInfo")?;
    let mut additional_info = BTreeMap::new();
    for (key, value) in info_obj {
        let Value::String(value) = value else {
            return Err(wire::wrong_type("additionalInfo", "string values"));
        };
        additional_info.insert(key.clone(), value.clone());
    }

    Ok(UserRecord {
        user_id: wire::require_str(json, "userId")?,
        user_name: wire::opt_str(json, "userName")?,
        full_name: wire::opt_str(json, "fullName")?,
        email: wire::opt_str(json, "email")?,
        phone_number: wire::opt_str(json, "phoneNumber")?,
        additional_info,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn encode_always_emits_additional_info() {
        let user = UserRecord::new("u-1");
        assert_eq!(
            encode(&user),
            json!({ "userId": "u-1", "additionalInfo": {} })
        );
    }

    #[test]
    fn encode_skips_absent_scalars() {
        let mut user = UserRecord::new("u-1");
        user.email = Some("a@b.c".to_string());
        let encoded = encode(&user);
        assert_eq!(encoded["email"], "a@b.c");
        assert!(encoded.get("userName").is_none());
        assert!(encoded.get("phoneNumber").is_none());
    }

    #[test]
    fn decode_roundtrips_encode() {
        let mut user = UserRecord::new("u-42");
        user.user_name = Some("jdoe".to_string());
        user.full_name = Some("J. Doe".to_string());
        user.additional_info
            .insert("plan".to_string(), "pro".to_string());
        assert_eq!(decode(&encode(&user)).unwrap(), user);
    }

    #[test]
    fn decode_requires_additional_info() {
        let err = decode(&json!({ "userId": "u-1" })).unwrap_err();
        assert!(matches!(err, ParseError::MissingField(f) if f == "additionalInfo"));
    }

    #[test]
    fn decode_requires_user_id() {
        let err = decode(&json!({ "additionalInfo": {} })).unwrap_err();
        assert!(matches!(err, ParseError::MissingField(f) if f == "userId"));
    }

    #[test]
    fn decode_rejects_non_string_additional_info_entry() {
        let err = decode(&json!({
            "userId": "u-1",
            "additionalInfo": { "retries": 3 }
        }))
        .unwrap_err();
        assert!(matches!(err, ParseError::WrongType { .. }));
    }
}
