#![forbid(unsafe_code)]

use crate::cursor::InputCursor;
use crate::error::StoredError;
use crate::sink::{Destination, OutputSink};

////////////////////////////////////////////////////////////////////////////////

/// LEN and NLEN, two little-endian 16-bit words.
const HEADER_SIZE: usize = 4;

////////////////////////////////////////////////////////////////////////////////

/// Input and output cursors of one decode call.
#[derive(Debug)]
pub struct DecoderState<'i, 'o> {
    pub input: InputCursor<'i>,
    pub output: OutputSink<'o>,
}

impl<'i, 'o> DecoderState<'i, 'o> {
    pub fn new(input: &'i [u8], destination: Destination<'o>) -> Self {
        Self {
            input: InputCursor::new(input),
            output: OutputSink::new(destination),
        }
    }

    /// Resumes from a cursor, e.g. a clone taken before an earlier attempt.
    pub fn from_cursor(input: InputCursor<'i>, destination: Destination<'o>) -> Self {
        Self {
            input,
            output: OutputSink::new(destination),
        }
    }
}

/// Decodes the body of one stored block, starting right after its BTYPE bits.
///
/// Buffered bits are dropped even when the call fails. On failure the bytes
/// copied so far stay in the output and both cursors keep their progress.
pub fn decode_stored_block(state: &mut DecoderState<'_, '_>) -> Result<(), StoredError> {
    let DecoderState { input, output } = state;

    input.discard_bits();

    if input.remaining() < HEADER_SIZE {
        return Err(StoredError::InsufficientInput);
    }
    let len = input.next_u16_le();
    let nlen = input.next_u16_le();
    if nlen != !len {
        return Err(StoredError::HeaderMismatch { len, nlen });
    }

    for _ in 0..len {
        if input.remaining() == 0 {
            return Err(StoredError::InsufficientInput);
        }
        if !output.can_accept(1) {
            return Err(StoredError::OutputFull);
        }
        output.emit(input.next_byte());
    }
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////
