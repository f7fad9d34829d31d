//! Immutable structured log events for a client-side telemetry SDK:
//! construction with call-site and exception capture, process-wide
//! ordering, and a portable JSON wire codec shared across platforms.
//!
//! Transport, buffering and filtering live in the surrounding SDK; this
//! crate only builds records and converts them to and from the wire shape.

pub mod callsite;
pub mod error;
pub mod exception;
pub mod frame;
pub mod record;
pub mod sequencer;
pub mod severity;
pub mod thread_info;
pub mod user;

mod wire;

pub use callsite::{CallSite, DEFAULT_EXCLUDED_PREFIXES};
pub use error::ParseError;
pub use exception::{ExceptionInfo, Thrown};
pub use frame::StackFrame;
pub use record::{LogRecord, LogRecordBuilder};
pub use sequencer::OrderSequencer;
pub use severity::{Severity, UnknownSeverityError};
pub use thread_info::ThreadInfo;
pub use user::UserRecord;
