//! Byte-stuffing frame codec for serial byte streams.
//!
//! Delimits variable-length messages on a byte-oriented link (such as a
//! UART) using SLIP-style byte stuffing: a frame is a start delimiter, the
//! escaped payload, and an end delimiter. Any payload byte that collides
//! with a delimiter is replaced by a two-byte escape sequence, so the
//! decoder can always find frame boundaries and resynchronize after
//! corruption by waiting for the next start byte.
//!
//! The crate never allocates. Both the [`Encoder`] and the [`Decoder`] are
//! bound at construction to a caller-supplied buffer and operate within its
//! capacity; an operation that does not fit fails without touching the
//! buffer. A single instance serves one direction only, so a typical
//! deployment pairs an `Encoder` for transmit with a `Decoder` for receive,
//! each with its own buffer.
//!
//! ## Encoding
//!
//! Build a frame with `start`, one `write` per payload byte (or `write_all`
//! for a slice), then `end`:
//!
//! ```
//! use serial_framer::{Encoder, END, START};
//!
//! let mut buf = [0u8; 16];
//! let mut enc = Encoder::new(&mut buf);
//!
//! enc.start().unwrap();
//! enc.write_all(&[0x01, 0x02, 0x03]).unwrap();
//! enc.end().unwrap();
//!
//! assert_eq!(enc.frame(), &[START, 0x01, 0x02, 0x03, END]);
//! ```
//!
//! ## Decoding
//!
//! Feed raw bytes to the decoder one at a time as they arrive. Each call
//! reports either that more bytes are needed, a complete payload, or a
//! decode error:
//!
//! ```
//! use serial_framer::{Decoder, END, START};
//!
//! let mut buf = [0u8; 16];
//! let mut dec = Decoder::new(&mut buf);
//!
//! assert_eq!(dec.feed(START).unwrap(), None);
//! assert_eq!(dec.feed(0x41).unwrap(), None);
//! assert_eq!(dec.feed(0x42).unwrap(), None);
//! assert_eq!(dec.feed(END).unwrap(), Some(&[0x41, 0x42][..]));
//! ```
//!
//! After an error the decoder discards input until the next [`START`] byte,
//! which always begins a fresh message regardless of prior state. At most
//! one message is lost to any run of corruption.

#![deny(missing_docs)]
#![deny(warnings)]
#![no_std]

mod decoder;
mod encoder;
mod error;

pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{Error, Result};

/// Frame start delimiter, also the decoder's resynchronization signal.
pub const START: u8 = 0x7F;

/// Frame end delimiter; triggers delivery of the assembled payload.
pub const END: u8 = 0x7E;

/// Escape byte introducing an escaped special value.
pub const ESCAPE: u8 = 0x7D;

/// XOR mask applied to a special byte when escaping or unescaping it.
pub const ESC_XOR: u8 = 0x20;

/// True for the byte values that must be escaped inside a payload.
const fn is_special(byte: u8) -> bool {
    matches!(byte, START | END | ESCAPE)
}
