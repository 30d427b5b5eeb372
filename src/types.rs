//! Types module for the main runtime, exposing error and result types.
//!
//! Most code in this module is based around coercion of local error types
//! into a common error type, to be used as the general "Error" of this crate.
//! Errors returned by the remote services are *not* coerced into this type;
//! see the `remote` module for how those are reported.
use logger::SetLoggerError;
use rusoto_core::region::ParseRegionError;
use rusoto_core::request;

use std::fmt::{self, Debug, Display, Formatter};
use std::io;

/// Exit code used when a required flag is missing.
pub const EXIT_USAGE: i32 = 2;

/// Exit code used for any other local failure.
pub const EXIT_FAILURE: i32 = 1;

/// Public type alias for a result with a `UtilError` error type.
pub type UtilResult<T> = Result<T, UtilError>;

/// Delegating error wrapper for local errors raised by the tool.
///
/// The internal `String` representation enables cheap coercion from
/// other error types by binding their error messages through. The exit
/// code is carried alongside so that `main` can decide how to terminate.
pub struct UtilError {
    message: String,
    code: i32,
}

impl UtilError {
    /// Constructs a usage error, used when required flags are missing.
    pub fn usage<S: Into<String>>(message: S) -> UtilError {
        UtilError {
            message: message.into(),
            code: EXIT_USAGE,
        }
    }

    /// Returns the process exit code associated with this error.
    pub fn code(&self) -> i32 {
        self.code
    }

    /// Returns the message carried by this error.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Debug implementation for `UtilError`.
impl Debug for UtilError {
    /// Formats an `UtilError` by delegating to `Display`.
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Display::fmt(self, f)
    }
}

/// Display implementation for `UtilError`.
impl Display for UtilError {
    /// Formats an `UtilError` by writing out the inner message.
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Macro to implement `From` for provided types.
macro_rules! derive_from {
    ($type:ty) => {
        impl<'a> From<$type> for UtilError {
            fn from(t: $type) -> UtilError {
                UtilError {
                    message: t.to_string(),
                    code: EXIT_FAILURE,
                }
            }
        }
    };
}

// Easy derivations of derive_from.
derive_from!(&'a str);
derive_from!(io::Error);
derive_from!(clap::Error);
derive_from!(SetLoggerError);
derive_from!(ParseRegionError);
derive_from!(request::TlsError);
derive_from!(serde_json::Error);
derive_from!(String);
