use thiserror::Error;

/// Application-layer decode failures.
///
/// Every error is non-fatal: the caller discards the fragment and typically
/// reports the condition through the IIN field of its next response.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseError {
    /// Fewer bytes than the two (request) or four (response) byte
    /// application header.
    #[error("not enough data for the application header")]
    NotEnoughDataForAppHeader,
    /// An object header was truncated.
    #[error("not enough data for an object header")]
    NotEnoughDataForHeader,
    /// The qualifier declared more object data than the fragment holds.
    #[error("not enough data for the declared objects")]
    NotEnoughDataForObjects,
    /// The (group, variation) pair is not in the registry.
    #[error("unknown group/variation")]
    UnknownObject,
    /// The qualifier byte is not a listed code.
    #[error("unknown qualifier code")]
    UnknownQualifier,
    /// The qualifier shape is not legal for the object type, or the range
    /// was inverted.
    #[error("qualifier is not legal for the object type")]
    IllegalObjectQualifier,
}

/// Fragment composition failures.
///
/// Running out of space while writing *elements* is not an error — the
/// write iterators report it through their return values, and the response
/// context treats it as the signal to continue in the next fragment. These
/// errors cover the cases where not even a header could be placed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteError {
    /// The fragment cannot hold the requested object header.
    #[error("fragment buffer is full")]
    Full,
    /// Octet-string payloads must be 1 to 255 bytes, since the length is
    /// carried in the variation byte.
    #[error("octet payload length must be 1..=255")]
    OctetLength,
}
