#![forbid(unsafe_code)]

use byteorder::{ByteOrder, LittleEndian};

use crate::error::StoredError;

////////////////////////////////////////////////////////////////////////////////

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitSequence {
    bits: u16,
    len: u8,
}

impl BitSequence {
    pub(crate) fn new(bits: u16, len: u8) -> Self {
        debug_assert!(len <= 16);
        Self { bits, len }
    }

    pub fn bits(&self) -> u16 {
        self.bits
    }

    pub fn len(&self) -> u8 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Read position into a borrowed compressed buffer, plus the bits that were
/// pulled from it but not consumed yet.
#[derive(Clone, Debug)]
pub struct InputCursor<'a> {
    input: &'a [u8],
    position: usize,
    bit_buffer: u32,
    bit_count: u8,
}

impl<'a> InputCursor<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            position: 0,
            bit_buffer: 0,
            bit_count: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.input.len() - self.position
    }

    /// Index of the next unread byte.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn bit_count(&self) -> u8 {
        self.bit_count
    }

    /// Drops buffered bits so that the next read starts on a byte boundary.
    pub fn discard_bits(&mut self) {
        self.bit_buffer = 0;
        self.bit_count = 0;
    }

    /// Callers check `remaining() >= 1` first.
    pub(crate) fn next_byte(&mut self) -> u8 {
        let byte = self.input[self.position];
        self.position += 1;
        byte
    }

    /// Callers check `remaining() >= 2` first.
    pub(crate) fn next_u16_le(&mut self) -> u16 {
        let value = LittleEndian::read_u16(&self.input[self.position..]);
        self.position += 2;
        value
    }

    /// Reads `len` bits, least significant bit of each byte first.
    ///
    /// Callers ask for at most 16 bits.
    pub fn read_bits(&mut self, len: u8) -> Result<BitSequence, StoredError> {
        debug_assert!(len <= 16, "at most 16 bits per read");
        while self.bit_count < len {
            if self.remaining() == 0 {
                return Err(StoredError::InsufficientInput);
            }
            self.bit_buffer |= u32::from(self.next_byte()) << self.bit_count;
            self.bit_count += 8;
        }
        let bits = self.bit_buffer & ((1u32 << len) - 1);
        self.bit_buffer >>= len;
        self.bit_count -= len;
        Ok(BitSequence::new(bits as u16, len))
    }
}

////////////////////////////////////////////////////////////////////////////////
