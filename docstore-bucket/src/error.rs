//! Error types for docstore-bucket

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Bucket identifier error type
///
/// The arithmetic API (`BucketId::new`, `with_used_bits`, `key_to_bucket_id`,
/// `location_key`) only returns [`Error::InvalidUsedBits`]. `Truncated` and
/// `NonCanonical` come only from decoding stored words: the `wire` module,
/// `BucketId::from_raw` / `TryFrom<u64>`, and serde deserialization.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Requested precision exceeds the build-time maximum.
    #[error("Failed to set used bits to {requested}, max is {max}.")]
    InvalidUsedBits { requested: u32, max: u32 },

    /// Wire input shorter than a full identifier. Decode only.
    #[error("Truncated bucket id: need {need} bytes, have {have}")]
    Truncated { need: usize, have: usize },

    /// Raw word carries location bits past its own precision. Decode only.
    #[error("Non-canonical bucket id: 0x{raw:016x}")]
    NonCanonical { raw: u64 },
}

impl Error {
    /// Create an invalid precision error
    pub fn invalid_used_bits(requested: u32, max: u32) -> Self {
        Error::InvalidUsedBits { requested, max }
    }

    /// Create a truncated input error
    pub fn truncated(need: usize, have: usize) -> Self {
        Error::Truncated { need, have }
    }

    /// Create a non-canonical raw value error
    pub fn non_canonical(raw: u64) -> Self {
        Error::NonCanonical { raw }
    }
}
