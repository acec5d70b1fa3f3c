use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    InvalidConfig(String),
    InvalidData(String),
    OutOfRange(String),
    Persistence(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Error::InvalidData(msg) => write!(f, "invalid data: {msg}"),
            Error::OutOfRange(msg) => write!(f, "out of range: {msg}"),
            Error::Persistence(msg) => write!(f, "persistence: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
