use super::*;

/// Frame encoder bound to a caller-supplied buffer.
///
/// Build a frame with [`start`](Encoder::start), then one
/// [`write`](Encoder::write) per payload byte, then [`end`](Encoder::end).
/// Every append is all-or-nothing: a call that does not fit in the
/// remaining capacity fails and leaves the buffer untouched, so a failed
/// message can be retried from `start` after the caller makes room.
pub struct Encoder<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl<'a> Encoder<'a> {
    /// Create an encoder that assembles frames into `buf`.
    ///
    /// The buffer's length is the frame capacity; the encoder never
    /// allocates or resizes.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Encoder { buf, len: 0 }
    }

    /// Begin a new frame: discard any partial frame and append [`START`].
    pub fn start(&mut self) -> Result<()> {
        self.reset();
        if self.buf.is_empty() {
            return Err(Error::NoSpaceForStartDelimiter);
        }
        self.buf[0] = START;
        self.len = 1;

        Ok(())
    }

    /// Append one payload byte, escaping it if it collides with a delimiter.
    ///
    /// Special bytes need two bytes of remaining capacity for their escape
    /// pair; the pair is appended whole or not at all.
    pub fn write(&mut self, byte: u8) -> Result<()> {
        if is_special(byte) {
            if self.remaining() < 2 {
                return Err(Error::NoSpaceForEscapeSequence);
            }
            self.buf[self.len] = ESCAPE;
            self.buf[self.len + 1] = byte ^ ESC_XOR;
            self.len += 2;
        } else {
            if self.remaining() < 1 {
                return Err(Error::NoSpaceForPayloadByte);
            }
            self.buf[self.len] = byte;
            self.len += 1;
        }

        Ok(())
    }

    /// Append every byte of `payload` in order.
    ///
    /// Stops at the first byte that does not fit; bytes appended by earlier
    /// iterations remain in the buffer.
    pub fn write_all(&mut self, payload: &[u8]) -> Result<()> {
        for &byte in payload {
            self.write(byte)?;
        }

        Ok(())
    }

    /// Finish the frame by appending [`END`].
    ///
    /// On success the buffer holds the complete wire-ready frame.
    pub fn end(&mut self) -> Result<()> {
        if self.remaining() < 1 {
            return Err(Error::NoSpaceForEndDelimiter);
        }
        self.buf[self.len] = END;
        self.len += 1;

        Ok(())
    }

    /// The frame bytes assembled so far.
    pub fn frame(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Number of frame bytes assembled so far.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if nothing has been assembled since the last reset.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Discard the in-progress frame without writing anything.
    pub fn reset(&mut self) {
        self.len = 0;
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.len
    }
}
