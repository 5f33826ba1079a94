//! Streaming reader over any byte source.
//!
//! The reader owns the byte source exclusively and yields messages lazily in
//! a single pass. Compression is the caller's concern: hand the reader an
//! already-decompressed `Read`.

use std::io::Read;

use crate::decoder::{next_frame, Framing};
use crate::error::{FeedError, FeedResult};
use crate::messages::ItchMessage;

/// Buffered streaming message reader.
///
/// ```rust,no_run
/// use itch_feed::reader::FeedReader;
/// use itch_feed::decoder::Framing;
///
/// let file = std::fs::File::open("20260102.itch").unwrap();
/// let reader = FeedReader::new(file, Framing::LengthPrefixed);
/// for message in reader.messages() {
///     let message = message.unwrap();
///     // feed it to a processor
/// }
/// ```
pub struct FeedReader<R: Read> {
    source: R,
    framing: Framing,
    buffer: Vec<u8>,
    buffer_pos: usize,
    buffer_len: usize,
    eof: bool,
}

impl<R: Read> FeedReader<R> {
    /// Refill granularity
    const CHUNK_SIZE: usize = 64 * 1024;

    /// Create a reader over a byte source
    pub fn new(source: R, framing: Framing) -> Self {
        Self {
            source,
            framing,
            buffer: vec![0u8; Self::CHUNK_SIZE * 2],
            buffer_pos: 0,
            buffer_len: 0,
            eof: false,
        }
    }

    /// Read the next message.
    ///
    /// Returns `Ok(None)` at a clean end of stream.
    ///
    /// # Errors
    ///
    /// `TruncatedStream` when the source ends mid-record; decode errors
    /// surface unchanged. Errors are terminal: the stream position can no
    /// longer be trusted.
    pub fn next_message(&mut self) -> FeedResult<Option<ItchMessage>> {
        loop {
            if self.buffer_pos < self.buffer_len {
                let data = &self.buffer[self.buffer_pos..self.buffer_len];
                match next_frame(data, self.framing) {
                    Ok((message, remaining)) => {
                        self.buffer_pos = self.buffer_len - remaining.len();
                        return Ok(Some(message));
                    }
                    Err(FeedError::TruncatedStream { .. }) if !self.eof => {
                        // Need more bytes, fall through to a refill
                    }
                    Err(e) => return Err(e),
                }
            } else if self.eof {
                return Ok(None);
            }

            self.refill()?;

            if self.eof && self.buffer_pos >= self.buffer_len {
                return Ok(None);
            }
        }
    }

    fn refill(&mut self) -> FeedResult<()> {
        // Shift the unconsumed tail to the front
        if self.buffer_pos > 0 {
            self.buffer.copy_within(self.buffer_pos..self.buffer_len, 0);
            self.buffer_len -= self.buffer_pos;
            self.buffer_pos = 0;
        }
        if self.buffer_len + Self::CHUNK_SIZE > self.buffer.len() {
            self.buffer.resize(self.buffer_len + Self::CHUNK_SIZE, 0);
        }
        let n = self.source.read(&mut self.buffer[self.buffer_len..])?;
        if n == 0 {
            self.eof = true;
        }
        self.buffer_len += n;
        Ok(())
    }

    /// Consume the reader, producing an iterator over messages
    #[must_use]
    pub fn messages(self) -> FeedMessageIter<R> {
        FeedMessageIter {
            reader: self,
            done: false,
        }
    }
}

/// Iterator over decoded messages.
///
/// The first error is yielded once and ends the iteration.
pub struct FeedMessageIter<R: Read> {
    reader: FeedReader<R>,
    done: bool,
}

impl<R: Read> Iterator for FeedMessageIter<R> {
    type Item = FeedResult<ItchMessage>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.next_message() {
            Ok(Some(message)) => Some(Ok(message)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{AddOrder, OrderDelete, SystemEvent};

    fn frame(message: &ItchMessage) -> Vec<u8> {
        let bytes = message.to_bytes();
        let mut out = Vec::with_capacity(bytes.len() + 2);
        out.extend_from_slice(&(bytes.len() as u16).to_be_bytes());
        out.extend_from_slice(&bytes);
        out
    }

    fn sample_messages() -> Vec<ItchMessage> {
        vec![
            ItchMessage::SystemEvent(SystemEvent {
                stock_locate: 0,
                tracking_number: 0,
                timestamp: 100,
                code: b'O',
            }),
            ItchMessage::AddOrder(AddOrder {
                stock_locate: 1,
                tracking_number: 0,
                timestamp: 1_000,
                order_ref: 5,
                buy_sell: b'B',
                shares: 100,
                stock: *b"AAPL    ",
                price: 990_000,
            }),
            ItchMessage::OrderDelete(OrderDelete {
                stock_locate: 1,
                tracking_number: 0,
                timestamp: 2_000,
                order_ref: 5,
            }),
        ]
    }

    #[test]
    fn test_reader_yields_all_messages() {
        let mut stream = Vec::new();
        for message in sample_messages() {
            stream.extend_from_slice(&frame(&message));
        }
        let reader = FeedReader::new(stream.as_slice(), Framing::LengthPrefixed);
        let decoded: Vec<_> = reader.messages().map(Result::unwrap).collect();
        assert_eq!(decoded, sample_messages());
    }

    #[test]
    fn test_reader_tagged_framing() {
        let mut stream = Vec::new();
        for message in sample_messages() {
            stream.extend_from_slice(&message.to_bytes());
        }
        let reader = FeedReader::new(stream.as_slice(), Framing::Tagged);
        let decoded: Vec<_> = reader.messages().map(Result::unwrap).collect();
        assert_eq!(decoded, sample_messages());
    }

    #[test]
    fn test_reader_truncated_tail() {
        let mut stream = Vec::new();
        for message in sample_messages() {
            stream.extend_from_slice(&frame(&message));
        }
        stream.truncate(stream.len() - 4);
        let reader = FeedReader::new(stream.as_slice(), Framing::LengthPrefixed);
        let results: Vec<_> = reader.messages().collect();
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_ok());
        assert!(matches!(
            results[2],
            Err(FeedError::TruncatedStream { .. })
        ));
    }

    #[test]
    fn test_reader_empty_source() {
        let reader = FeedReader::new(&[][..], Framing::LengthPrefixed);
        assert_eq!(reader.messages().count(), 0);
    }

    struct OneBytePerRead<'a>(&'a [u8]);

    impl Read for OneBytePerRead<'_> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.0.is_empty() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.0[0];
            self.0 = &self.0[1..];
            Ok(1)
        }
    }

    #[test]
    fn test_reader_dribbling_source() {
        let mut stream = Vec::new();
        for message in sample_messages() {
            stream.extend_from_slice(&frame(&message));
        }
        let reader = FeedReader::new(OneBytePerRead(&stream), Framing::LengthPrefixed);
        let decoded: Vec<_> = reader.messages().map(Result::unwrap).collect();
        assert_eq!(decoded, sample_messages());
    }
}
