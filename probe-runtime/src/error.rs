use std::ffi::OsString;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, ProbeError>;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Failed to load `{library:?}`: {diagnostic}")]
    LibraryNotLoadable {
        library: OsString,
        diagnostic: String,
    },
    #[error("Symbol `{symbol}` not found in `{library:?}`: {diagnostic}")]
    SymbolNotFound {
        library: OsString,
        symbol: String,
        diagnostic: String,
    },
    #[error("Symbol name `{0:?}` must not contain a NUL byte")]
    InvalidSymbolName(String),
    #[error("Library name must not be empty")]
    EmptyLibraryName,
}

impl<T> From<ProbeError> for std::result::Result<T, ProbeError> {
    fn from(error: ProbeError) -> Self {
        Err(error)
    }
}
