use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[macro_export]
macro_rules! errinput {
     ($($args:tt)*) => {
         $crate::DdlError::InvalidInput(format!($($args)*)).into()
     };
 }

/// Converter errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DdlError {
    /// Invalid user input, typically rejected SQL text or bad CLI arguments.
    InvalidInput(String),
    /// An IO error.
    IO(String),
}

impl std::error::Error for DdlError {}

impl std::fmt::Display for DdlError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DdlError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            DdlError::IO(msg) => write!(f, "io error: {msg}"),
        }
    }
}

impl serde::de::Error for DdlError {
    fn custom<T>(msg: T) -> Self
    where
        T: Display,
    {
        DdlError::InvalidInput(msg.to_string())
    }
}

impl serde::ser::Error for DdlError {
    fn custom<T>(msg: T) -> Self
    where
        T: Display,
    {
        DdlError::InvalidInput(msg.to_string())
    }
}

impl From<std::io::Error> for DdlError {
    fn from(err: std::io::Error) -> Self {
        DdlError::IO(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for DdlError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        DdlError::InvalidInput(err.to_string())
    }
}

/// A converter Result returning DdlError.
pub type DdlResult<T> = std::result::Result<T, DdlError>;

impl<T> From<DdlError> for DdlResult<T> {
    fn from(error: DdlError) -> Self {
        Err(error)
    }
}
