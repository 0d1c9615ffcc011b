use std::fmt;
use std::fmt::Formatter;
use crate::series::SeriesError;

#[derive(Debug)]
pub enum PowerError {
    Api(String),
    Document(String),
    Params(String),
    Other(String),
}

impl fmt::Display for PowerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PowerError::Api(e)      => write!(f, "PowerError::Api: {}", e),
            PowerError::Document(e) => write!(f, "PowerError::Document: {}", e),
            PowerError::Params(e)   => write!(f, "PowerError::Params: {}", e),
            PowerError::Other(e)    => write!(f, "PowerError::Other: {}", e),
        }
    }
}
impl From<String> for PowerError {
    fn from(e: String) -> Self {
        PowerError::Other(e)
    }
}
impl From<&str> for PowerError {
    fn from(e: &str) -> Self {
        PowerError::Other(e.to_string())
    }
}
impl From<reqwest::Error> for PowerError {
    fn from(e: reqwest::Error) -> PowerError {
        PowerError::Api(e.to_string())
    }
}
impl From<serde_json::Error> for PowerError {
    fn from(e: serde_json::Error) -> PowerError {
        PowerError::Document(e.to_string())
    }
}
impl From<SeriesError> for PowerError {
    fn from(e: SeriesError) -> PowerError {
        match e {
            SeriesError::KeyMismatch(m)     => PowerError::Document(m),
            SeriesError::ZeroDenominator(m) => PowerError::Params(m),
        }
    }
}
