//! Error types for talking to the printer.

use crate::values::Value;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A status reply did not have the fixed 32-byte layout.
    #[error("invalid status frame: expected {expected} bytes, got {actual}")]
    Format { expected: usize, actual: usize },

    /// No data arrived within the bounded polling budget.
    #[error("no reply from printer after {attempts} read attempts")]
    Timeout { attempts: u32 },

    /// The printer reported one or more active error conditions, in the
    /// order it declares them.
    #[error("printer error: {}", describe(.0))]
    Printer(Vec<Value>),

    /// A handshake reply carried a different status type than the current
    /// step expected. The device is out of sync; this is never retried.
    #[error("expected status \"{expected}\" but got \"{observed}\"")]
    Protocol { expected: Value, observed: Value },

    /// A decoded identifier has no match in an external catalog.
    #[error("lookup failed: {0}")]
    Lookup(String),

    /// The channel to the printer could not be set up as requested.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("USB error: {0}")]
    Usb(#[from] rusb::Error),
}

fn describe(errors: &[Value]) -> String {
    errors
        .iter()
        .map(Value::description)
        .collect::<Vec<_>>()
        .join(", ")
}
