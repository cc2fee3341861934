//! # Error module
//!
//! All fallible operations in this crate return the single [`Error`] type.
//! The variants are coarse categories; the payload carries the long message.
//! The `Display` trait prints the category followed by the message, so a
//! rendered error always starts with a recognizable prefix.

/// Enumerates h5features errors.  The `Display` trait will print the category and the long message.
#[derive(thiserror::Error,Debug)]
pub enum Error {
    /// a value type (features, times, properties, item) failed validation
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// a time or index window is reversed or empty
    #[error("invalid range: {0}")]
    InvalidRange(String),
    /// a group or item is absent
    #[error("not found: {0}")]
    NotFound(String),
    /// an append would overwrite an existing item
    #[error("duplicate: {0}")]
    Duplicate(String),
    /// dimension mismatch, non-empty destination, or version mismatch
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
    /// an on-disk shape or type matches no documented layout
    #[error("corrupt data: {0}")]
    CorruptData(String),
    /// the storage back-end failed; the message wraps the HDF5 text
    #[error("storage error: {0}")]
    Io(String),
    /// the requested operation is not implemented
    #[error("unsupported: {0}")]
    Unsupported(String)
}

impl From<hdf5::Error> for Error {
    fn from(err: hdf5::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<ndarray::ShapeError> for Error {
    fn from(err: ndarray::ShapeError) -> Self {
        Self::InvalidValue(err.to_string())
    }
}
