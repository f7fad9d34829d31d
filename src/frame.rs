use crate::error::ParseError;
use crate::wire;
use serde::Serialize;
use serde_json::Value;

/// Platform-independent mirror of one stack entry.
///
/// `class_name` holds the declaring unit (for Rust symbols, the module
/// path), `method_name` the bare function name. File and line are best
/// effort: debug info is not always available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackFrame {
    pub class_name: String,
    pub method_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u32>,
}

impl StackFrame {
    pub fn new(class_name: impl Into<String>, method_name: impl Into<String>) -> Self {
        StackFrame {
            class_name: class_name.into(),
            method_name: method_name.into(),
            file_name: None,
            line_number: None,
        }
    }

    pub fn with_location(mut self, file_name: impl Into<String>, line_number: u32) -> Self {
        self.file_name = Some(file_name.into());
        self.line_number = Some(line_number);
        self
    }
}

/// Encode frames as the wire JSON array.
pub fn encode_frames(frames: &[StackFrame]) -> Value {
    serde_json::to_value(frames).unwrap_or_else(|_| Value::Array(Vec::new()))
}

/// Decode a wire JSON array into frames.
///
/// The caller distinguishes an absent array (no stack trace supplied) from
/// an empty one before calling; this function only sees present arrays.
pub fn decode_frames(json: &Value) -> Result<Vec<StackFrame>, ParseError> {
    let Value::Array(items) = json else {
        return Err(wire::wrong_type("stackTrace", "array"));
    };

    items.iter().map(decode_frame).collect()
}

fn decode_frame(json: &Value) -> Result<StackFrame, ParseError> {
    Ok(StackFrame {
        class_name: wire::require_str(json, "className")?,
        method_name: wire::require_str(json, "methodName")?,
        file_name: wire::opt_str(json, "fileName")?,
        line_number: wire::opt_u32(json, "lineNumber")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn encodes_full_frame() {
        let frames = vec![StackFrame::new("app::net", "connect").with_location("net.rs", 42)];
        assert_eq!(
            encode_frames(&frames),
            json!([{
                "className": "app::net",
                "methodName": "connect",
                "fileName": "net.rs",
                "lineNumber": 42
            }])
        );
    }

    #[test]
    fn omits_absent_location() {
        let frames = vec![StackFrame::new("app", "main")];
        let encoded = encode_frames(&frames);
        let obj = &encoded[0];
        assert!(obj.get("fileName").is_none());
        assert!(obj.get("lineNumber").is_none());
    }

    #[test]
    fn decodes_roundtrip() {
        let frames = vec![
            StackFrame::new("app::net", "connect").with_location("net.rs", 42),
            StackFrame::new("app", "main"),
        ];
        let decoded = decode_frames(&encode_frames(&frames)).unwrap();
        assert_eq!(decoded, frames);
    }

    #[test]
    fn rejects_frame_without_method_name() {
        let json = json!([{ "className": "app" }]);
        assert!(matches!(
            decode_frames(&json),
            Err(ParseError::MissingField(field)) if field == "methodName"
        ));
    }

    #[test]
    fn rejects_non_array() {
        assert!(decode_frames(&json!({})).is_err());
    }

    #[test]
    fn empty_array_is_an_empty_sequence() {
        assert_eq!(decode_frames(&json!([])).unwrap(), Vec::new());
    }
}
