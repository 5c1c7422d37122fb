use thiserror::Error;

/// Type alias for fallible framer operations.
pub type Result<T> = core::result::Result<T, self::Error>;

/// Errors reported by the encoder and decoder.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Encoder errors
    /// The frame buffer has no room for the start delimiter.
    #[error("no space in the frame buffer for the start delimiter")]
    NoSpaceForStartDelimiter,
    /// The frame buffer has no room for a two-byte escape sequence.
    #[error("no space in the frame buffer for an escape sequence")]
    NoSpaceForEscapeSequence,
    /// The frame buffer has no room for an ordinary payload byte.
    #[error("no space in the frame buffer for a payload byte")]
    NoSpaceForPayloadByte,
    /// The frame buffer has no room for the end delimiter.
    #[error("no space in the frame buffer for the end delimiter")]
    NoSpaceForEndDelimiter,

    // Decoder errors
    /// An incoming payload outgrew the receive buffer before the end
    /// delimiter arrived.
    #[error("received message exceeds the receive buffer capacity")]
    ReceiveOverflow,
    /// An escape byte was followed by a byte that does not unescape to a
    /// recognized special value.
    #[error("invalid escape sequence in received message")]
    InvalidEscapeSequence,
}
