//! # Error Types
//!
//! Domain errors for nft-tui, built with `thiserror`.
//!
//! Only [`PrivilegeDenied`] and [`ConfigError`] ever reach `main`. The other
//! kinds are recovered where they happen:
//!
//! - [`CaptureError`] is turned into a diagnostic
//!   [`CapturedOutput`](crate::command::CapturedOutput) by the runner.
//! - [`AddressError`] is shown on an error pager screen by the controller.
//!
//! A tool that exits non-zero is not an error at all here; it is a
//! [`Status`](crate::command::Status) the controller uses to pick a title.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while launching a command or draining its output.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The program could not be started.
    #[error("could not start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The output buffer could not grow any further.
    #[error("out of memory while capturing output ({captured} bytes read)")]
    Allocation { captured: usize },

    /// Reading from the output pipe failed.
    #[error("failed to read output of `{program}`: {source}")]
    Read {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The shared stdout/stderr pipe could not be created.
    #[error("could not create output pipe: {0}")]
    Pipe(#[source] std::io::Error),
}

/// A user-supplied address that is not a dotted-quad IPv4 address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("'{0}' is not of the form a.b.c.d")]
    Malformed(String),

    #[error("'{value}': octet {octet} is out of range (0-255)")]
    OctetOutOfRange { value: String, octet: u32 },
}

/// Startup gate failure: the process is not running as root.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrivilegeDenied {
    #[error("nft-tui must be run as root (effective uid is {0}); try: sudo nft-tui")]
    NotRoot(u32),

    #[error("nft-tui must be run as root, and the effective uid could not be determined: {0}")]
    Unknown(String),
}

/// Invalid configuration file contents.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid set name '{0}' (expected letters, digits and '_', not starting with a digit)")]
    InvalidSetName(String),

    #[error("`{field}` must not be empty")]
    EmptyField { field: &'static str },
}
