//! Error types for the Mirror3D engine
//!
//! Per-frame work never fails: it reports skip reasons instead. Errors are
//! reserved for configuration validation, mirror lookup and host render
//! backend failures.

use std::fmt;

/// Result type for Mirror3D engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Mirror3D engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// A configuration value is out of range or inconsistent
    InvalidConfig(String),

    /// A mirror key does not resolve to a live mirror, or its surface is degenerate
    InvalidMirror(String),

    /// The host render backend refused an operation
    BackendError(String),

    /// Initialization failed (render targets, material binding)
    InitializationFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
            Error::InvalidMirror(msg) => write!(f, "Invalid mirror: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Log an error and build it.
///
/// ```ignore
/// let err = mirror_err!("mirror3d::Config", InvalidConfig, "range_start {} >= range_end {}", a, b);
/// ```
#[macro_export]
macro_rules! mirror_err {
    ($source:expr, $variant:ident, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::mirror_error!($source, "{}", message);
        $crate::mirror3d::Error::$variant(message)
    }};
}

/// Log an error and return it from the enclosing function.
#[macro_export]
macro_rules! mirror_bail {
    ($source:expr, $variant:ident, $($arg:tt)*) => {
        return Err($crate::mirror_err!($source, $variant, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
