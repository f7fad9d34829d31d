use crate::callsite;
use crate::error::ParseError;
use crate::frame::{self, StackFrame};
use crate::wire;
use serde::Serialize;
use serde_json::Value;
use std::error::Error;

/// Portable descriptor of a raised error as handed to the log builder.
///
/// Rust errors do not carry their own stack, so the frames are captured
/// when the `Thrown` is created, which should happen as close to the
/// failure point as possible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thrown {
    pub name: String,
    pub reason: Option<String>,
    pub frames: Vec<StackFrame>,
}

impl Thrown {
    /// Build a descriptor from explicit parts. Useful when the frames come
    /// from somewhere other than the live stack (a panic payload, a
    /// foreign runtime, a test fixture).
    pub fn new(
        name: impl Into<String>,
        reason: Option<String>,
        frames: Vec<StackFrame>,
    ) -> Self {
        Thrown {
            name: name.into(),
            reason,
            frames,
        }
    }

    /// Capture a live error: the name is the error's concrete type (short
    /// form, without the module path), the reason its `Display` output,
    /// the frames the current stack at this call, innermost first.
    pub fn from_error<E: Error>(err: &E) -> Self {
        Thrown {
            name: short_type_name::<E>().to_string(),
            reason: Some(err.to_string()),
            frames: callsite::capture_frames(),
        }
    }
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

/// Wire-level exception descriptor attached to a log record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub stack_trace: Vec<StackFrame>,
}

/// Convert a raised error into its wire descriptor.
///
/// Total function: a descriptor with no reason or no frames yields the
/// corresponding absent/empty fields, never a failure.
pub fn capture(thrown: &Thrown) -> ExceptionInfo {
    ExceptionInfo {
        name: Some(thrown.name.clone()),
        reason: thrown.reason.clone(),
        stack_trace: thrown.frames.clone(),
    }
}

pub fn encode(exception: &ExceptionInfo) -> Value {
    serde_json::to_value(exception).unwrap_or_else(|_| Value::Object(Default::default()))
}

pub fn decode(json: &Value) -> Result<ExceptionInfo, ParseError> {
    let stack_trace = match json.get("stackTrace") {
        Some(frames) => frame::decode_frames(frames)?,
        None => return Err(wire::missing("stackTrace")),
    };
    Ok(ExceptionInfo {
        name: wire::opt_str(json, "name")?,
        reason: wire::opt_str(json, "reason")?,
        stack_trace,
    })
}
