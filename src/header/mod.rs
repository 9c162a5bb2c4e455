//! The header word model: registry of words, pinned/pile state, and the
//! renderer projecting that state into zones.

pub mod word;
pub mod registry;
pub mod state;
pub mod renderer;

use thiserror::Error;

/// Header markup problems. None of these are fatal to the page: the caller
/// treats them as "widget not applicable" and leaves plain links working.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeaderError {
    #[error("no header root with id {0:?}")]
    MissingHeader(String),
    #[error("header has no zone with class {0:?}")]
    MissingZone(String),
}
