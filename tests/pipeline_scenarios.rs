//! End-to-end pipeline scenarios: byte chunks in, validated frames out

mod common;

use bcnav3::{DecodedFrame, Pipeline};
use common::*;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

fn collect_frames(pipeline: &mut Pipeline, chunk: &[u8]) -> Vec<DecodedFrame> {
    let mut frames = Vec::new();
    pipeline.feed(chunk, |frame| frames.push(frame));
    frames
}

#[test]
fn test_fixtures_match_generator() {
    // the inline fixtures are frozen outputs of build_frame
    assert_eq!(build_frame(10, 10, 1), FRAME_PRN10_MT10);
    assert_eq!(build_frame(10, 30, 7), FRAME_PRN10_MT30);
    assert_eq!(build_frame(12, 40, 3), FRAME_PRN12_MT40);
}

#[test]
fn test_empty_input_produces_nothing() {
    let mut pipeline = Pipeline::new();
    let frames = collect_frames(&mut pipeline, &[]);
    assert!(frames.is_empty());
    assert_eq!(pipeline.buffered_bits(), 0);
    assert_eq!(pipeline.locked_prn(), None);
}

#[test]
fn test_single_frame_single_chunk() {
    let mut pipeline = Pipeline::new();
    let frames = collect_frames(&mut pipeline, &FRAME_PRN10_MT10);
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].prn, 10);
    assert_eq!(frames[0].msg_type, 10);
    assert_eq!(frames[0].bytes, DECODED_PRN10_MT10);
    assert_eq!(pipeline.locked_prn(), Some(10));
}

#[test]
fn test_single_frame_in_small_chunks() {
    let mut pipeline = Pipeline::new();
    let mut frames = Vec::new();
    for chunk in FRAME_PRN10_MT10.chunks(7) {
        pipeline.feed(chunk, |frame| frames.push(frame));
    }
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].bytes, DECODED_PRN10_MT10);
}

#[test]
fn test_frame_at_non_octet_boundary() {
    // three bits of leading garbage; the header starts at bit 3
    let shifted = shift_bits_right(&FRAME_PRN10_MT10, 3);
    let mut pipeline = Pipeline::new();
    let frames = collect_frames(&mut pipeline, &shifted);
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].bytes, DECODED_PRN10_MT10);
}

#[test]
fn test_two_back_to_back_frames_keep_lock() {
    let mut stream = Vec::new();
    stream.extend_from_slice(&FRAME_PRN10_MT10);
    stream.extend_from_slice(&FRAME_PRN10_MT30);
    let mut pipeline = Pipeline::new();
    let frames = collect_frames(&mut pipeline, &stream);
    assert_eq!(frames.len(), 2);
    assert_eq!((frames[0].prn, frames[0].msg_type), (10, 10));
    assert_eq!((frames[1].prn, frames[1].msg_type), (10, 30));
    assert_eq!(pipeline.locked_prn(), Some(10));
}

#[test]
fn test_prn_mismatch_clears_lock_then_relocks() {
    let mut pipeline = Pipeline::new();

    let frames = collect_frames(&mut pipeline, &FRAME_PRN10_MT10);
    assert_eq!(frames.len(), 1);
    assert_eq!(pipeline.locked_prn(), Some(10));

    // valid frame with a different PRN: dropped, lock cleared
    let frames = collect_frames(&mut pipeline, &FRAME_PRN12_MT40);
    assert!(frames.is_empty());
    assert_eq!(pipeline.locked_prn(), None);

    // the same frame again is accepted as the new lock
    let frames = collect_frames(&mut pipeline, &FRAME_PRN12_MT40);
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].prn, 12);
    assert_eq!(frames[0].msg_type, 40);
    assert_eq!(pipeline.locked_prn(), Some(12));
}

#[test]
fn test_corrupted_frame_dropped_stream_recovers() {
    let mut corrupted = FRAME_PRN10_MT10;
    corrupted[12] ^= 0x08;

    let mut stream = Vec::new();
    stream.extend_from_slice(&corrupted);
    stream.extend_from_slice(&FRAME_PRN10_MT30);

    let mut pipeline = Pipeline::new();
    let frames = collect_frames(&mut pipeline, &stream);
    // the bad frame is rejected and its 125 octets are consumed
    assert_eq!(frames.len(), 1);
    assert_eq!((frames[0].prn, frames[0].msg_type), (10, 30));
}

#[test]
fn test_residual_keeps_straddling_header() {
    // the first chunk is a full frame length ending one octet into the sync
    // header, so a search runs, fails, and must keep the header alive in
    // its 15-bit residual
    let mut stream = vec![0u8; 124];
    stream.extend_from_slice(&FRAME_PRN10_MT10);

    let mut pipeline = Pipeline::new();
    let mut frames = Vec::new();
    pipeline.feed(&stream[..125], |frame| frames.push(frame));
    assert!(frames.is_empty());
    assert_eq!(pipeline.buffered_bits(), 15);
    pipeline.feed(&stream[125..], |frame| frames.push(frame));
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].bytes, DECODED_PRN10_MT10);
}

#[test]
fn test_found_header_waits_for_full_frame() {
    // header found near the end of the first chunk with most of the frame
    // still outstanding; nothing may be emitted until it completes
    let mut stream = vec![0u8; 123];
    stream.extend_from_slice(&FRAME_PRN10_MT10);

    let mut pipeline = Pipeline::new();
    let mut frames = Vec::new();
    pipeline.feed(&stream[..130], |frame| frames.push(frame));
    assert!(frames.is_empty());
    // leading garbage was discarded, the partial frame is buffered
    assert_eq!(pipeline.buffered_bits(), 7 * 8);
    pipeline.feed(&stream[130..], |frame| frames.push(frame));
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].bytes, DECODED_PRN10_MT10);
}

#[test]
fn test_frame_recovered_from_garbage_at_odd_bit_offset() {
    for shift in 1..8 {
        let mut stream = vec![0u8; 41];
        stream.extend_from_slice(&shift_bits_right(&FRAME_PRN10_MT10, shift));
        stream.extend_from_slice(&[0u8; 17]);

        let mut pipeline = Pipeline::new();
        let frames = collect_frames(&mut pipeline, &stream);
        assert_eq!(frames.len(), 1, "shift {}", shift);
        assert_eq!(frames[0].bytes, DECODED_PRN10_MT10);
    }
}

#[test]
fn test_buffer_stays_bounded_on_random_input() {
    // one encoded frame length plus the 15-bit sync residual
    const BOUND_BITS: usize = 125 * 8 + 15;

    let mut rng = StdRng::seed_from_u64(0xB2B);
    let mut pipeline = Pipeline::new();
    for _ in 0..200 {
        let len = rng.random_range(0..400);
        let mut chunk = vec![0u8; len];
        rng.fill_bytes(&mut chunk);
        pipeline.feed(&chunk, |_| {});
        assert!(
            pipeline.buffered_bits() <= BOUND_BITS,
            "buffer grew to {} bits",
            pipeline.buffered_bits()
        );
    }
}

#[test]
fn test_random_chunking_never_loses_the_frame() {
    let mut stream = vec![0u8; 33];
    stream.extend_from_slice(&FRAME_PRN10_MT10);
    stream.extend_from_slice(&FRAME_PRN10_MT30);

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..10 {
        let mut pipeline = Pipeline::new();
        let mut frames = Vec::new();
        let mut rest: &[u8] = &stream;
        while !rest.is_empty() {
            let take = rng.random_range(1..=rest.len().min(97));
            let (chunk, tail) = rest.split_at(take);
            pipeline.feed(chunk, |frame| frames.push(frame));
            rest = tail;
        }
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].msg_type, 10);
        assert_eq!(frames[1].msg_type, 30);
    }
}
