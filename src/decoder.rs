use super::*;

/// Receive state, advanced one byte at a time.
///
/// `Failed` keeps the error that caused it so every discarded byte reports
/// the original cause until a start byte resynchronizes the stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    AwaitingStart,
    InMessage,
    InEscape,
    Failed(Error),
}

/// Frame decoder bound to a caller-supplied buffer.
///
/// Feed raw bytes from the transport one at a time with
/// [`feed`](Decoder::feed); unescaped payload bytes accumulate in the
/// buffer until an [`END`] byte completes the message. A [`START`] byte
/// begins a fresh message from any state, including after an error, so a
/// run of corruption costs at most one message.
pub struct Decoder<'a> {
    buf: &'a mut [u8],
    len: usize,
    state: State,
}

impl<'a> Decoder<'a> {
    /// Create a decoder that assembles payloads into `buf`.
    ///
    /// The buffer's length is the maximum payload size; the decoder never
    /// allocates or resizes.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Decoder {
            buf,
            len: 0,
            state: State::AwaitingStart,
        }
    }

    /// Process one raw byte from the stream.
    ///
    /// Returns `Ok(None)` while a message is pending, `Ok(Some(payload))`
    /// when an end delimiter completes one, or an error when the payload
    /// overflows the buffer or an escape sequence is malformed. The
    /// returned payload slice is valid until the next call; the buffer is
    /// reused for the following message.
    ///
    /// After an error the decoder keeps reporting it for every byte it
    /// discards; the next [`START`] byte resynchronizes.
    pub fn feed(&mut self, byte: u8) -> Result<Option<&[u8]>> {
        // A start byte begins a fresh message unconditionally. This is the
        // sole resynchronization mechanism.
        if byte == START {
            self.len = 0;
            self.state = State::InMessage;
            return Ok(None);
        }

        match self.state {
            State::AwaitingStart => Ok(None),
            State::InMessage => match byte {
                ESCAPE => {
                    self.state = State::InEscape;
                    Ok(None)
                }
                END => {
                    self.state = State::AwaitingStart;
                    Ok(Some(&self.buf[..self.len]))
                }
                _ => {
                    if self.len < self.buf.len() {
                        self.buf[self.len] = byte;
                        self.len += 1;
                        Ok(None)
                    } else {
                        self.fail(Error::ReceiveOverflow)
                    }
                }
            },
            State::InEscape => {
                let unescaped = byte ^ ESC_XOR;
                if !is_special(unescaped) {
                    self.fail(Error::InvalidEscapeSequence)
                } else if self.len < self.buf.len() {
                    self.buf[self.len] = unescaped;
                    self.len += 1;
                    self.state = State::InMessage;
                    Ok(None)
                } else {
                    self.fail(Error::ReceiveOverflow)
                }
            }
            State::Failed(err) => Err(err),
        }
    }

    /// Number of payload bytes assembled for the message in progress (or
    /// just delivered).
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no payload bytes have been assembled.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Discard any partial message and wait for the next start byte.
    pub fn reset(&mut self) {
        self.len = 0;
        self.state = State::AwaitingStart;
    }

    fn fail(&mut self, err: Error) -> Result<Option<&[u8]>> {
        self.state = State::Failed(err);
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feed a whole slice, requiring every byte but the last to report a
    /// pending message.
    fn feed_pending(dec: &mut Decoder, bytes: &[u8]) {
        for &b in bytes {
            assert_eq!(dec.feed(b), Ok(None));
        }
    }

    #[test]
    fn simple_frame() {
        let mut buf = [0u8; 16];
        let mut dec = Decoder::new(&mut buf);

        feed_pending(&mut dec, &[START, 0x01, 0x02, 0x03]);
        assert_eq!(dec.feed(END), Ok(Some(&[0x01, 0x02, 0x03][..])));
    }

    #[test]
    fn empty_frame_yields_empty_payload() {
        let mut buf = [0u8; 16];
        let mut dec = Decoder::new(&mut buf);

        feed_pending(&mut dec, &[START]);
        assert_eq!(dec.feed(END), Ok(Some(&[][..])));
    }

    #[test]
    fn escaped_specials_are_unescaped() {
        let mut buf = [0u8; 16];
        let mut dec = Decoder::new(&mut buf);

        feed_pending(&mut dec, &[START]);
        for special in [START, END, ESCAPE] {
            feed_pending(&mut dec, &[ESCAPE, special ^ ESC_XOR]);
        }
        assert_eq!(dec.feed(END), Ok(Some(&[START, END, ESCAPE][..])));
    }

    #[test]
    fn bytes_before_start_are_discarded() {
        let mut buf = [0u8; 16];
        let mut dec = Decoder::new(&mut buf);

        feed_pending(&mut dec, &[0xAA, END, 0x55, START, 0x41]);
        assert_eq!(dec.feed(END), Ok(Some(&[0x41][..])));
    }

    #[test]
    fn start_mid_message_restarts_the_frame() {
        let mut buf = [0u8; 16];
        let mut dec = Decoder::new(&mut buf);

        feed_pending(&mut dec, &[START, 0x01, 0x02, START, 0x03]);
        assert_eq!(dec.feed(END), Ok(Some(&[0x03][..])));
    }

    #[test]
    fn overflow_errors_exactly_on_the_first_excess_byte() {
        let mut buf = [0u8; 4];
        let mut dec = Decoder::new(&mut buf);

        feed_pending(&mut dec, &[START, 0x01, 0x02, 0x03, 0x04]);
        assert_eq!(dec.feed(0x05), Err(Error::ReceiveOverflow));
        // The assembled prefix is untouched by the failed append.
        assert_eq!(dec.len(), 4);
    }

    #[test]
    fn escaped_byte_that_does_not_fit_overflows() {
        let mut buf = [0u8; 1];
        let mut dec = Decoder::new(&mut buf);

        feed_pending(&mut dec, &[START, 0x01, ESCAPE]);
        assert_eq!(dec.feed(END ^ ESC_XOR), Err(Error::ReceiveOverflow));
    }

    #[test]
    fn invalid_escape_sequence_errors() {
        let mut buf = [0u8; 16];
        let mut dec = Decoder::new(&mut buf);

        feed_pending(&mut dec, &[START, ESCAPE]);
        assert_eq!(dec.feed(0x41), Err(Error::InvalidEscapeSequence));
    }

    #[test]
    fn failed_decoder_repeats_the_error_until_resynchronized() {
        let mut buf = [0u8; 16];
        let mut dec = Decoder::new(&mut buf);

        feed_pending(&mut dec, &[START, ESCAPE]);
        assert_eq!(dec.feed(0x41), Err(Error::InvalidEscapeSequence));
        for b in [0x42, END, ESCAPE] {
            assert_eq!(dec.feed(b), Err(Error::InvalidEscapeSequence));
        }
        feed_pending(&mut dec, &[START, 0x41]);
        assert_eq!(dec.feed(END), Ok(Some(&[0x41][..])));
    }

    #[test]
    fn start_resynchronizes_from_any_state() {
        let mut buf = [0u8; 4];
        let mut dec = Decoder::new(&mut buf);

        // Mid-escape.
        feed_pending(&mut dec, &[0x11, START, ESCAPE, START, 0x41]);
        assert_eq!(dec.feed(END), Ok(Some(&[0x41][..])));

        // After an overflow error.
        feed_pending(&mut dec, &[START, 0x01, 0x02, 0x03, 0x04]);
        assert_eq!(dec.feed(0x05), Err(Error::ReceiveOverflow));
        feed_pending(&mut dec, &[START, 0x41]);
        assert_eq!(dec.feed(END), Ok(Some(&[0x41][..])));
    }

    #[test]
    fn reset_returns_to_awaiting_start() {
        let mut buf = [0u8; 16];
        let mut dec = Decoder::new(&mut buf);

        feed_pending(&mut dec, &[START, 0x01, 0x02]);
        dec.reset();
        assert!(dec.is_empty());

        // Bytes are discarded again until the next start delimiter.
        feed_pending(&mut dec, &[0x03, END, START, 0x42]);
        assert_eq!(dec.feed(END), Ok(Some(&[0x42][..])));
    }

    #[test]
    fn round_trip_with_mixed_payload() {
        const PAYLOAD: &[u8] = &[0x00, START, 0x41, ESCAPE, 0xFF, END, 0x7C];

        let mut frame = [0u8; 32];
        let mut enc = Encoder::new(&mut frame);
        enc.start().unwrap();
        enc.write_all(PAYLOAD).unwrap();
        enc.end().unwrap();

        let mut out = [0u8; 32];
        let mut dec = Decoder::new(&mut out);
        let (last, head) = enc.frame().split_last().unwrap();
        feed_pending(&mut dec, head);
        assert_eq!(dec.feed(*last), Ok(Some(PAYLOAD)));
    }
}
