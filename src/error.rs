use std::fmt;
use std::io;

pub(crate) type TintoResult<T> = Result<T, Error>;

/// Errors that can occur during tinto usage
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// An I/O error occurred when reading a theme file or directory
    Io(io::Error),

    /// JSON parsing failed when reading a tokenizer result.
    Json(serde_json::Error),

    /// An invalid color was encountered.
    /// Can only happen when parsing a color value directly, themes skip bad values.
    #[allow(missing_docs)]
    InvalidColor { value: String, reason: String },

    /// A theme was not found in the theme set.
    /// Only happens when asking to switch to a theme we don't know about
    ThemeNotFound(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Json(err) => write!(f, "JSON parsing error: {}", err),
            Error::InvalidColor { value, reason } => {
                write!(f, "invalid color '{}': {}", value, reason)
            }
            Error::ThemeNotFound(name) => write!(f, "theme '{}' not found", name),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::InvalidColor { .. } | Error::ThemeNotFound(_) => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
