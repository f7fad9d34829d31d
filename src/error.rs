use crate::severity::UnknownSeverityError;

/// Error type returned when decoding a wire JSON payload.
///
/// Decoding is all-or-nothing: any required field that is missing or
/// carries the wrong JSON type rejects the whole payload. A record is
/// never partially populated from malformed input.
#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("missing required field `{0}`")]
    MissingField(String),

    #[error("field `{field}` has wrong type, expected {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    #[error(transparent)]
    UnknownSeverity(#[from] UnknownSeverityError),
}
