#![forbid(unsafe_code)]

use std::cmp::min;
use std::io::{BufRead, Read, Write};

use anyhow::{Context, Result};
use log::{debug, warn};

mod cursor;
mod deflate;
mod error;
mod sink;
mod stored;

pub use crate::cursor::{BitSequence, InputCursor};
pub use crate::deflate::{inflate_block, BlockHeader, CompressionType};
pub use crate::error::StoredError;
pub use crate::sink::{Destination, OutputSink};
pub use crate::stored::{decode_stored_block, DecoderState};

////////////////////////////////////////////////////////////////////////////////

/// What the input starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// BFINAL and BTYPE bits, then the stored block.
    BlockHeader,
    /// LEN and NLEN right away.
    Raw,
}

#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub framing: Framing,
    /// Destination size, capped at the largest stored block. When unset, a
    /// dry run sizes it exactly.
    pub capacity: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            framing: Framing::BlockHeader,
            capacity: None,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////

fn decode(state: &mut DecoderState<'_, '_>, framing: Framing) -> Result<()> {
    match framing {
        Framing::Raw => decode_stored_block(state)?,
        Framing::BlockHeader => {
            let header = inflate_block(state)?;
            if !header.is_final {
                warn!("block is not marked final, following blocks are ignored");
            }
        }
    }
    Ok(())
}

/// Number of bytes the block in `data` decodes to.
pub fn stored_size(data: &[u8], framing: Framing) -> Result<usize> {
    let mut state = DecoderState::new(data, Destination::CountOnly);
    decode(&mut state, framing).context("dry run failed")?;
    Ok(state.output.position())
}

/// Decodes the single stored block read from `input` and writes its payload
/// to `output`. Returns the payload size.
pub fn decompress<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    config: &Config,
) -> Result<usize> {
    let mut data = Vec::new();
    input.read_to_end(&mut data)?;

    // A stored block never holds more than u16::MAX bytes.
    let capacity = match config.capacity {
        Some(capacity) => min(capacity, usize::from(u16::MAX)),
        None => stored_size(&data, config.framing)?,
    };
    debug!("decoding {} input bytes into {} bytes", data.len(), capacity);

    let mut buf = vec![0u8; capacity];
    let mut state = DecoderState::new(&data, Destination::Buffer(&mut buf));
    decode(&mut state, config.framing)?;

    if state.input.remaining() > 0 {
        warn!("ignoring {} bytes after the block", state.input.remaining());
    }
    output.write_all(state.output.written())?;
    output.flush()?;
    Ok(state.output.position())
}

////////////////////////////////////////////////////////////////////////////////
