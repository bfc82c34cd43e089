use std::fmt;

/// Configuration errors. Analysis itself never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An indentation rule pattern that does not compile.
    InvalidPattern { pattern: String, message: String },
    /// A flag outside `gimsuxy` on an indentation rule.
    UnsupportedFlag { pattern: String, flag: char },
    /// Settings payload that does not deserialize.
    InvalidSettings(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidPattern { pattern, message } => {
                write!(f, "invalid indentation rule /{pattern}/: {message}")
            }
            Error::UnsupportedFlag { pattern, flag } => {
                write!(f, "unsupported flag '{flag}' on indentation rule /{pattern}/")
            }
            Error::InvalidSettings(message) => write!(f, "invalid settings: {message}"),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
