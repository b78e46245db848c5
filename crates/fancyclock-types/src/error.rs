use std::fmt;

/// Result type for fancyclock-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building formatters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Style configuration renders nothing, or names an unknown preset
    InvalidStyle(String),

    /// Custom strftime pattern could not be parsed
    InvalidPattern(String),

    /// Locale name is not in chrono's locale tables
    UnknownLocale(String),

    /// Date/time parts do not name a real instant
    InvalidTimestamp(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidStyle(msg) => write!(f, "Invalid style: {}", msg),
            Error::InvalidPattern(pattern) => write!(f, "Invalid pattern: {:?}", pattern),
            Error::UnknownLocale(name) => write!(f, "Unknown locale: {}", name),
            Error::InvalidTimestamp(msg) => write!(f, "Invalid timestamp: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
