//! Buffer and codec primitives shared by the DNP3 application-layer crates.
//!
//! Everything in this crate operates on borrowed byte slices. Nothing here
//! allocates, and nothing here knows about object headers or qualifiers;
//! those live in `dnp3-objects` and `dnp3-app`.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

use core::fmt;

pub mod bytes;
pub mod cursor;
pub mod iterable;

pub use cursor::ReadCursor;
pub use iterable::LazyIterable;

/// Error returned when a cursor operation would run past the end of the
/// underlying buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EndOfBuffer;

impl fmt::Display for EndOfBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "operation would pass the end of the buffer")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EndOfBuffer {}
