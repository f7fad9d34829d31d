use crate::callsite::{self, CallSite};
use crate::error::ParseError;
use crate::exception::{self, ExceptionInfo, Thrown};
use crate::frame::{self, StackFrame};
use crate::sequencer::OrderSequencer;
use crate::severity::Severity;
use crate::thread_info::{self, ThreadInfo};
use crate::wire;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde_json::{Map, Value};
use std::error::Error;

/// Wire discriminator for log events, shared with the other platform SDKs.
pub const RECORD_KIND: &str = "message";

/// One structured log event.
///
/// A record is fully populated by [`LogRecordBuilder::build`] or by
/// [`decode`] and is immutable by contract afterwards: `order_id` and
/// `time` are assigned exactly once, and the call-site and exception
/// fields are never recomputed. Once built, a record is safe to share
/// read-only across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Logical subsystem or category, non-empty by convention.
    pub tag: String,
    pub severity: Severity,
    /// Free-text message, may be empty.
    pub message: String,
    /// Caller-supplied stack, independent of `exception`.
    pub stack_trace: Option<Vec<StackFrame>>,
    /// Derived from a supplied [`Thrown`] at construction.
    pub exception: Option<ExceptionInfo>,
    pub function: Option<String>,
    pub file_name: Option<String>,
    pub line_number: Option<u32>,
    pub class_name: Option<String>,
    /// Strictly increasing across all records built in the process.
    pub order_id: u64,
    pub time: DateTime<Utc>,
    pub thread_info: ThreadInfo,
}

impl LogRecord {
    /// Start building a record for an application logging call.
    pub fn builder(
        tag: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
    ) -> LogRecordBuilder {
        LogRecordBuilder {
            tag: tag.into(),
            severity,
            message: message.into(),
            stack_trace: None,
            thrown: None,
            call_site: None,
            order_id: None,
            time: None,
            thread_info: None,
        }
    }
}

/// Single constructing path for [`LogRecord`].
///
/// All derived fields (call site, exception descriptor, order id, time,
/// thread identity) are computed inside [`build`](Self::build), so the
/// returned value is complete and immutable from the start.
#[derive(Debug)]
pub struct LogRecordBuilder {
    tag: String,
    severity: Severity,
    message: String,
    stack_trace: Option<Vec<StackFrame>>,
    thrown: Option<Thrown>,
    call_site: Option<CallSite>,
    order_id: Option<u64>,
    time: Option<DateTime<Utc>>,
    thread_info: Option<ThreadInfo>,
}

impl LogRecordBuilder {
    /// Attach an explicit stack trace. Independent of any error attached
    /// via [`thrown`](Self::thrown) or [`error`](Self::error).
    pub fn stack_trace(mut self, frames: Vec<StackFrame>) -> Self {
        self.stack_trace = Some(frames);
        self
    }

    /// Attach a raised error as a portable descriptor.
    pub fn thrown(mut self, thrown: Thrown) -> Self {
        self.thrown = Some(thrown);
        self
    }

    /// Attach a live error, capturing its type name, message and the
    /// current stack.
    pub fn error<E: Error>(self, err: &E) -> Self {
        self.thrown(Thrown::from_error(err))
    }

    /// Supply the call-site fields up front, skipping stack inspection in
    /// [`build`](Self::build).
    pub fn call_site(mut self, site: CallSite) -> Self {
        self.call_site = Some(site);
        self
    }

    /// Supply a pre-existing order id; it is passed to the sequencer as a
    /// hint and kept verbatim.
    pub fn order_id(mut self, order_id: u64) -> Self {
        self.order_id = Some(order_id);
        self
    }

    pub fn time(mut self, time: DateTime<Utc>) -> Self {
        self.time = Some(time);
        self
    }

    pub fn thread_info(mut self, thread_info: ThreadInfo) -> Self {
        self.thread_info = Some(thread_info);
        self
    }

    /// Finish construction.
    ///
    /// If no call site was supplied, the calling thread's stack is
    /// inspected and all four call-site fields are filled together; a
    /// resolver miss leaves all four absent. A supplied [`Thrown`] is
    /// converted into the record's exception descriptor. The order id is
    /// drawn from `sequencer`, and time and thread identity are captured
    /// here unless supplied.
    pub fn build(self, sequencer: &OrderSequencer) -> LogRecord {
        let call_site = match self.call_site {
            Some(site) => site,
            None => callsite::resolve(callsite::DEFAULT_EXCLUDED_PREFIXES).unwrap_or_default(),
        };

        let exception = self.thrown.as_ref().map(exception::capture);
        if exception.is_some() {
            tracing::trace!(tag = %self.tag, "captured exception descriptor");
        }

        LogRecord {
            tag: self.tag,
            severity: self.severity,
            message: self.message,
            stack_trace: self.stack_trace,
            exception,
            function: call_site.function,
            file_name: call_site.file_name,
            line_number: call_site.line_number,
            class_name: call_site.class_name,
            order_id: sequencer.next(self.order_id),
            // The wire carries millisecond precision; capture at the same
            // granularity so records survive encode/decode unchanged.
            time: self.time.unwrap_or_else(|| Utc::now().trunc_subsecs(3)),
            thread_info: self.thread_info.unwrap_or_else(ThreadInfo::current),
        }
    }
}

/// Encode a record into its wire JSON object.
///
/// Optional-absent fields are omitted entirely, never emitted as `null`.
pub fn encode(record: &LogRecord) -> Value {
    let mut obj = Map::new();
    obj.insert("type".to_string(), Value::from(RECORD_KIND));
    obj.insert("orderId".to_string(), Value::from(record.order_id));
    obj.insert(
        "time".to_string(),
        Value::from(record.time.to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    obj.insert(
        "threadInfo".to_string(),
        thread_info::encode(&record.thread_info),
    );
    obj.insert("tag".to_string(), Value::from(record.tag.clone()));
    obj.insert("severity".to_string(), Value::from(record.severity.as_str()));
    obj.insert("message".to_string(), Value::from(record.message.clone()));
    if let Some(exc) = &record.exception {
        obj.insert("exception".to_string(), exception::encode(exc));
    }
    if let Some(function) = &record.function {
        obj.insert("function".to_string(), Value::from(function.clone()));
    }
    if let Some(file_name) = &record.file_name {
        obj.insert("fileName".to_string(), Value::from(file_name.clone()));
    }
    if let Some(line_number) = record.line_number {
        obj.insert("lineNumber".to_string(), Value::from(line_number));
    }
    if let Some(class_name) = &record.class_name {
        obj.insert("className".to_string(), Value::from(class_name.clone()));
    }
    if let Some(frames) = &record.stack_trace {
        obj.insert("stackTrace".to_string(), frame::encode_frames(frames));
    }
    Value::Object(obj)
}

/// Reconstruct a record from wire JSON.
///
/// Trusts the payload as-is: no call-site resolution, no exception
/// capture, no sequencer access. `order_id`, `time` and `thread_info`
/// come from the caller (the replay path parses the envelope itself);
/// callers that mix replay with fresh construction should pass the
/// replayed id to their sequencer as a hint.
pub fn decode(
    json: &Value,
    order_id: u64,
    time: DateTime<Utc>,
    thread_info: ThreadInfo,
) -> Result<LogRecord, ParseError> {
    let severity = wire::require_str(json, "severity")?.parse::<Severity>()?;
    let stack_trace = match json.get("stackTrace") {
        None | Some(Value::Null) => None,
        Some(frames) => Some(frame::decode_frames(frames)?),
    };
    let exception = match json.get("exception") {
        None | Some(Value::Null) => None,
        Some(exc) => Some(exception::decode(exc)?),
    };

    Ok(LogRecord {
        tag: wire::require_str(json, "tag")?,
        severity,
        message: wire::require_str(json, "message")?,
        stack_trace,
        exception,
        function: Some(wire::require_str(json, "function")?),
        file_name: Some(wire::require_str(json, "fileName")?),
        line_number: Some(wire::require_u32(json, "lineNumber")?),
        class_name: Some(wire::require_str(json, "className")?),
        order_id,
        time,
        thread_info,
    })
}
