//! Dictionary tables, their length metadata, and per-round starter indexes.

use std::io;

use thiserror::Error;

mod dict_max_len;
mod dictionary_maxlength;
mod starter_index;

pub use dict_max_len::DictMaxLen;
pub use dictionary_maxlength::{DictSlot, DictionaryMaxlength};
pub use starter_index::StarterIndex;

/// Failure while loading or saving dictionaries.
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("I/O Error: {0}")]
    IoError(String),
    #[error("Parse Error: {0}")]
    ParseError(String),
}

impl From<io::Error> for DictionaryError {
    fn from(err: io::Error) -> Self {
        DictionaryError::IoError(err.to_string())
    }
}

impl From<serde_cbor::Error> for DictionaryError {
    fn from(err: serde_cbor::Error) -> Self {
        if err.is_io() {
            DictionaryError::IoError(err.to_string())
        } else {
            DictionaryError::ParseError(err.to_string())
        }
    }
}
