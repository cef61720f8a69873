use std::io;

use thiserror::Error;

use service::ServiceError;

#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Input closed while a value was expected.
    #[error("end of input")]
    Eof,
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Service(#[from] ServiceError),
}
