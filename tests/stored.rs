use std::io::{self, Cursor};

use anyhow::Result;
use byteorder::{LittleEndian, WriteBytesExt};
use proptest::prelude::*;

use puffstore::{
    decode_stored_block, decompress, stored_size, Config, DecoderState, Destination, Framing,
    StoredError,
};

fn stored_block(len: u16, nlen: u16, payload: &[u8]) -> Vec<u8> {
    let mut data = Vec::new();
    data.write_u16::<LittleEndian>(len).unwrap();
    data.write_u16::<LittleEndian>(nlen).unwrap();
    data.extend_from_slice(payload);
    data
}

#[test]
fn decompress_sized_by_dry_run() -> Result<()> {
    let mut data = vec![0x01];
    data.extend(stored_block(5, !5, b"hello"));

    let mut output = Vec::new();
    let size = decompress(Cursor::new(&data), &mut output, &Config::default())?;
    assert_eq!(size, 5);
    assert_eq!(output, b"hello");
    Ok(())
}

#[test]
fn decompress_raw_with_spare_capacity() -> Result<()> {
    let data = stored_block(3, !3, &[0xaa, 0xbb, 0xcc]);
    let config = Config {
        framing: Framing::Raw,
        capacity: Some(64),
    };

    let mut output = Vec::new();
    assert_eq!(decompress(Cursor::new(&data), &mut output, &config)?, 3);
    assert_eq!(output, [0xaa, 0xbb, 0xcc]);
    Ok(())
}

#[test]
fn decompress_undersized() {
    let data = stored_block(5, !5, b"hello");
    let config = Config {
        framing: Framing::Raw,
        capacity: Some(3),
    };

    let mut output = Vec::new();
    let err = decompress(Cursor::new(&data), &mut output, &config).unwrap_err();
    assert_eq!(
        err.downcast_ref::<StoredError>(),
        Some(&StoredError::OutputFull)
    );
    assert!(output.is_empty());
}

#[test]
fn decompress_truncated() {
    let mut data = vec![0x01];
    data.extend(stored_block(10, !10, b"short"));

    let err = decompress(Cursor::new(&data), io::sink(), &Config::default()).unwrap_err();
    assert_eq!(
        err.downcast_ref::<StoredError>(),
        Some(&StoredError::InsufficientInput)
    );
}

#[test]
fn dry_run_then_decode() -> Result<()> {
    let payload: Vec<u8> = (0..200).collect();
    let data = stored_block(200, !200, &payload);

    let size = stored_size(&data, Framing::Raw)?;
    assert_eq!(size, 200);

    let mut small = [0u8; 100];
    let mut state = DecoderState::new(&data, Destination::Buffer(&mut small));
    assert_eq!(
        decode_stored_block(&mut state),
        Err(StoredError::OutputFull)
    );

    let mut buf = vec![0u8; size];
    let mut state = DecoderState::new(&data, Destination::Buffer(&mut buf));
    assert_eq!(decode_stored_block(&mut state), Ok(()));
    assert_eq!(state.output.written(), &payload[..]);
    Ok(())
}

#[test]
fn retry_from_snapshot() -> Result<()> {
    let mut data = vec![0x01];
    data.extend(stored_block(4, !4, &[1, 2, 3, 4]));
    data.push(0xee);

    let mut small = [0u8; 2];
    let mut state = DecoderState::new(&data, Destination::Buffer(&mut small));
    assert_eq!(state.input.read_bits(3)?.bits() & 0b110, 0);
    let snapshot = state.input.clone();

    assert_eq!(
        decode_stored_block(&mut state),
        Err(StoredError::OutputFull)
    );
    assert_eq!(state.output.written(), &[1, 2]);
    assert_eq!(state.input.position(), 7);

    let mut buf = [0u8; 8];
    let mut state = DecoderState::from_cursor(snapshot, Destination::Buffer(&mut buf));
    assert_eq!(state.input.position(), 1);
    assert_eq!(state.input.bit_count(), 5);
    assert_eq!(decode_stored_block(&mut state), Ok(()));
    assert_eq!(state.output.written(), &[1, 2, 3, 4]);
    assert_eq!(state.input.position(), 9);
    assert_eq!(state.input.remaining(), 1);
    Ok(())
}

#[test]
fn decompress_huge_capacity() -> Result<()> {
    let data: &[u8] = &[0x03, 0x00, 0xfc, 0xff, 0xaa, 0xbb, 0xcc];
    let config = Config {
        framing: Framing::Raw,
        capacity: Some(usize::MAX),
    };

    let mut output = Vec::new();
    assert_eq!(decompress(data, &mut output, &config)?, 3);
    assert_eq!(output, [0xaa, 0xbb, 0xcc]);
    Ok(())
}

proptest! {
    #[test]
    fn decodes_any_payload(payload in proptest::collection::vec(any::<u8>(), 0..4096)) {
        let len = payload.len() as u16;
        let data = stored_block(len, !len, &payload);
        let mut buf = vec![0u8; payload.len()];
        let mut state = DecoderState::new(&data, Destination::Buffer(&mut buf));

        prop_assert_eq!(decode_stored_block(&mut state), Ok(()));
        prop_assert_eq!(state.output.position(), payload.len());
        prop_assert_eq!(state.input.position(), payload.len() + 4);
        prop_assert_eq!(state.output.written(), &payload[..]);
    }

    #[test]
    fn rejects_wrong_complement(len in any::<u16>(), nlen in any::<u16>()) {
        prop_assume!(nlen != !len);
        let data = stored_block(len, nlen, &[0x55; 16]);
        let mut buf = [0u8; 16];
        let mut state = DecoderState::new(&data, Destination::Buffer(&mut buf));

        prop_assert_eq!(
            decode_stored_block(&mut state),
            Err(StoredError::HeaderMismatch { len, nlen })
        );
        prop_assert_eq!(state.output.position(), 0);
        prop_assert_eq!(state.input.position(), 4);
    }

    #[test]
    fn never_reads_past_short_input(data in proptest::collection::vec(any::<u8>(), 0..4)) {
        let mut state = DecoderState::new(&data, Destination::CountOnly);
        prop_assert_eq!(
            decode_stored_block(&mut state),
            Err(StoredError::InsufficientInput)
        );
        prop_assert_eq!(state.input.position(), 0);
    }
}
