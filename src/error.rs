use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum SubsyncError {
    FetchFailure(String),
}

impl Error for SubsyncError {}

impl fmt::Display for SubsyncError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SubsyncError::FetchFailure(msg) => {
                write!(fmt, "Failed to fetch captions: {}", msg)
            }
        }
    }
}
