use crate::error::ParseError;
use crate::wire;
use serde::Serialize;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of the thread that constructed a record.
///
/// `std::thread::ThreadId` has no stable numeric form, so each OS thread
/// gets a small process-local id on first capture. `is_main` marks the
/// thread named "main" by the runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadInfo {
    pub thread_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_name: Option<String>,
    pub is_main: bool,
}

impl ThreadInfo {
    /// Capture the calling thread's identity.
    pub fn current() -> Self {
        let thread = std::thread::current();
        let name = thread.name().map(str::to_string);
        ThreadInfo {
            thread_id: local_thread_id(),
            is_main: name.as_deref() == Some("main"),
            thread_name: name,
        }
    }
}

fn local_thread_id() -> u64 {
    static NEXT: AtomicU64 = AtomicU64::new(1);
    thread_local! {
        static ID: u64 = NEXT.fetch_add(1, Ordering::Relaxed);
    }
    ID.with(|id| *id)
}

pub fn encode(info: &ThreadInfo) -> Value {
    serde_json::to_value(info).unwrap_or_else(|_| Value::Object(Default::default()))
}

pub fn decode(json: &Value) -> Result<ThreadInfo, ParseError> {
    Ok(ThreadInfo {
        thread_id: wire::require_u64(json, "threadId")?,
        thread_name: wire::opt_str(json, "threadName")?,
        is_main: wire::require_bool(json, "isMain")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn capture_is_stable_within_a_thread() {
        let a = ThreadInfo::current();
        let b = ThreadInfo::current();
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_threads_get_distinct_ids() {
        let here = ThreadInfo::current();
        let there = std::thread::spawn(ThreadInfo::current).join().unwrap();
        assert_ne!(here.thread_id, there.thread_id);
        assert!(!there.is_main);
    }

    #[test]
    fn decode_roundtrips_encode() {
        let info = ThreadInfo {
            thread_id: 7,
            thread_name: Some("worker-1".to_string()),
            is_main: false,
        };
        assert_eq!(decode(&encode(&info)).unwrap(), info);
    }

    #[test]
    fn decode_requires_thread_id() {
        let err = decode(&json!({ "isMain": true })).unwrap_err();
        assert!(matches!(err, ParseError::MissingField(f) if f == "threadId"));
    }

    #[test]
    fn encode_omits_absent_name() {
        let info = ThreadInfo {
            thread_id: 1,
            thread_name: None,
            is_main: true,
        };
        assert_eq!(encode(&info), json!({ "threadId": 1, "isMain": true }));
    }
}
