#![forbid(unsafe_code)]

use std::convert::TryFrom;

use anyhow::{bail, Result};

use crate::cursor::InputCursor;
use crate::stored::{decode_stored_block, DecoderState};

////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    pub is_final: bool,
    pub compression_type: CompressionType,
}

impl BlockHeader {
    /// Reads BFINAL and BTYPE, three bits in total.
    pub fn read(input: &mut InputCursor<'_>) -> Result<Self> {
        let is_final = input.read_bits(1)?.bits() == 1;
        let compression_type = CompressionType::try_from(input.read_bits(2)?.bits())?;
        Ok(Self {
            is_final,
            compression_type,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionType {
    Uncompressed = 0,
    FixedTree = 1,
    DynamicTree = 2,
    Reserved = 3,
}

impl TryFrom<u16> for CompressionType {
    type Error = anyhow::Error;

    fn try_from(value: u16) -> std::result::Result<Self, Self::Error> {
        Ok(match value {
            0 => CompressionType::Uncompressed,
            1 => CompressionType::FixedTree,
            2 => CompressionType::DynamicTree,
            3 => CompressionType::Reserved,
            _ => bail!("invalid compression type {}", value),
        })
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Reads one block header and decodes the block behind it.
///
/// Only stored blocks are supported. A [`StoredError`](crate::StoredError)
/// from the block body is kept as the root cause of the returned error.
pub fn inflate_block(state: &mut DecoderState<'_, '_>) -> Result<BlockHeader> {
    let header = BlockHeader::read(&mut state.input)?;
    match header.compression_type {
        CompressionType::Uncompressed => decode_stored_block(state)?,
        CompressionType::FixedTree | CompressionType::DynamicTree => {
            bail!("huffman-coded blocks are not supported")
        }
        CompressionType::Reserved => bail!("unsupported block type"),
    }
    Ok(header)
}

////////////////////////////////////////////////////////////////////////////////
