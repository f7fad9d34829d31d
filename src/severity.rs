use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Closed set of log importance levels, ordered from least to most severe.
///
/// Severity values travel on the wire as their symbolic names
/// (case-sensitive), never as numeric codes, so the variant names here are
/// part of the cross-platform contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Severity {
    Verbose,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Severity {
    /// Symbolic wire name of this severity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Verbose => "Verbose",
            Severity::Debug => "Debug",
            Severity::Info => "Info",
            Severity::Warn => "Warn",
            Severity::Error => "Error",
            Severity::Fatal => "Fatal",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = UnknownSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Verbose" => Ok(Severity::Verbose),
            "Debug" => Ok(Severity::Debug),
            "Info" => Ok(Severity::Info),
            "Warn" => Ok(Severity::Warn),
            "Error" => Ok(Severity::Error),
            "Fatal" => Ok(Severity::Fatal),
            other => Err(UnknownSeverityError(other.to_string())),
        }
    }
}

/// Error type returned when a severity literal falls outside the closed
/// enumeration.
#[derive(thiserror::Error, Debug)]
#[error("unknown severity literal `{0}`")]
pub struct UnknownSeverityError(pub String);
