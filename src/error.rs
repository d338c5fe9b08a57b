#![forbid(unsafe_code)]

use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////

/// Why a stored block could not be decoded in full.
///
/// Progress made before the failure stays visible through the cursor
/// positions of the [`DecoderState`](crate::DecoderState).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoredError {
    /// Input ended inside the header or the payload.
    #[error("input ended before the stored block was complete")]
    InsufficientInput,

    /// NLEN is not the one's complement of LEN.
    #[error("stored block length check failed (len {len:#06x}, nlen {nlen:#06x})")]
    HeaderMismatch { len: u16, nlen: u16 },

    /// The destination buffer has no room for the remaining payload.
    #[error("destination buffer is full")]
    OutputFull,
}

impl StoredError {
    /// Whether the input itself is malformed, as opposed to one of the
    /// buffers being too short.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::HeaderMismatch { .. })
    }
}

////////////////////////////////////////////////////////////////////////////////
