#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]

//! Readers for the machine's binary shot history.
//!
//! Both formats are little-endian with fixed-size records. A file that does
//! not match the expected magic or record layout is rejected outright; a log
//! that simply stops early decodes and is flagged incomplete.

mod error;
mod index;
mod le;
mod shot;

pub use error::DecodeError;
pub use index::{
    IndexEntry, ShotIndex, ShotListing, INDEX_ENTRY_SIZE, INDEX_HEADER_SIZE, INDEX_MAGIC,
    SHOT_FLAG_COMPLETED, SHOT_FLAG_DELETED, SHOT_FLAG_HAS_NOTES,
};
pub use shot::{ShotLog, ShotSample, SHOT_HEADER_SIZE, SHOT_MAGIC, SHOT_SAMPLE_SIZE};
