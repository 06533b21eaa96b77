use thiserror::Error;

/// The single error raised by the codec: the input text or value does not
/// conform to the CoilSnake format.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Format error: {0}")]
pub struct FormatError(pub String);

impl FormatError {
    pub fn new(message: impl Into<String>) -> Self {
        FormatError(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

pub type Result<T> = std::result::Result<T, FormatError>;

macro_rules! format_bail {
    ($($arg:tt)*) => {
        return Err($crate::error::FormatError::new(format!($($arg)*)))
    };
}

macro_rules! format_ensure {
    ($cond:expr, $($arg:tt)*) => {
        if !$cond {
            $crate::error::format_bail!($($arg)*);
        }
    };
}

pub(crate) use format_bail;
pub(crate) use format_ensure;
