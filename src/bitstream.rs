//! Bit-level window over the incoming byte stream
//!
//! The wire gives no octet-alignment guarantee for frame boundaries, so the
//! pipeline buffers incoming chunks as a continuous bit stream and keeps
//! sub-byte alignment when it trims from the front. The window also hosts the
//! 6-bit symbol repacking between the wire representation and the decoder.

use bitvec::prelude::*;

use crate::frame::DECODED_FRAME_LEN;
use crate::ldpc::{NUM_INFO_SYMBOLS, NUM_SYMBOLS};

/// Bits per codeword symbol
pub const SYMBOL_BITS: usize = 6;

/// Wire bits carrying codeword symbols (162 × 6); the remaining 12 payload
/// bits are padding
pub const CODEWORD_BITS: usize = NUM_SYMBOLS * SYMBOL_BITS;

/// Bits in a packed decoded frame body (81 × 6)
pub const INFO_BITS: usize = NUM_INFO_SYMBOLS * SYMBOL_BITS;

/// Growable bit buffer fed from byte chunks and consumed from the front.
#[derive(Debug, Default)]
pub struct BitWindow {
    bits: BitVec<u8, Msb0>,
}

impl BitWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a byte chunk, high bit of each octet first.
    pub fn extend_bytes(&mut self, chunk: &[u8]) {
        self.bits.extend_from_bitslice(chunk.view_bits::<Msb0>());
    }

    pub fn bit_len(&self) -> usize {
        self.bits.len()
    }

    pub fn as_bits(&self) -> &BitSlice<u8, Msb0> {
        &self.bits
    }

    /// Discard the first `n` bits.
    pub fn drain_front(&mut self, n: usize) {
        self.bits.drain(..n);
    }

    /// Keep only the last `n` bits; shorter windows are left untouched.
    pub fn retain_tail(&mut self, n: usize) {
        let len = self.bits.len();
        if len > n {
            self.bits.drain(..len - n);
        }
    }

    /// Remove the first `n_bytes * 8` bits and return them packed as octets.
    ///
    /// The caller must have checked that enough bits are buffered.
    pub fn take_bytes(&mut self, n_bytes: usize) -> Vec<u8> {
        let taken: BitVec<u8, Msb0> = self.bits.drain(..n_bytes * 8).collect();
        taken.chunks(8).map(fold_bits_u8).collect()
    }
}

/// Fold up to 8 bits, first bit highest, into a right-aligned octet.
fn fold_bits_u8(bits: &BitSlice<u8, Msb0>) -> u8 {
    bits.iter()
        .by_vals()
        .fold(0u8, |acc, bit| (acc << 1) | bit as u8)
}

/// Repack the encoded payload octets into 162 six-bit symbols, high bit
/// first. Only the first 972 payload bits carry symbols.
pub fn symbols_from_payload(payload: &[u8]) -> [u8; NUM_SYMBOLS] {
    debug_assert!(payload.len() * 8 >= CODEWORD_BITS);
    let bits = payload.view_bits::<Msb0>();
    let mut symbols = [0u8; NUM_SYMBOLS];
    for (symbol, chunk) in symbols.iter_mut().zip(bits[..CODEWORD_BITS].chunks(SYMBOL_BITS)) {
        *symbol = fold_bits_u8(chunk);
    }
    symbols
}

/// Pack 162 codeword symbols into the 123 payload octets of an encoded
/// frame; the 12 trailing bits are zero padding.
pub fn payload_from_symbols(symbols: &[u8; NUM_SYMBOLS]) -> [u8; crate::frame::ENCODED_PAYLOAD_LEN] {
    let mut bits: BitVec<u8, Msb0> = BitVec::with_capacity(crate::frame::ENCODED_PAYLOAD_LEN * 8);
    for &symbol in symbols {
        push_symbol(&mut bits, symbol);
    }
    bits.resize(crate::frame::ENCODED_PAYLOAD_LEN * 8, false);
    let mut payload = [0u8; crate::frame::ENCODED_PAYLOAD_LEN];
    for (octet, chunk) in payload.iter_mut().zip(bits.chunks(8)) {
        *octet = fold_bits_u8(chunk);
    }
    payload
}

/// Pack 81 information symbols into the 61 decoded-frame octets.
///
/// The 486 bits fill full octets from the front; the final 6 bits are
/// right-aligned in octet 60, leaving its top 2 bits zero.
pub fn pack_info_symbols(symbols: &[u8]) -> [u8; DECODED_FRAME_LEN] {
    debug_assert_eq!(symbols.len(), NUM_INFO_SYMBOLS);
    let mut bits: BitVec<u8, Msb0> = BitVec::with_capacity(INFO_BITS);
    for &symbol in symbols {
        push_symbol(&mut bits, symbol);
    }
    let mut frame = [0u8; DECODED_FRAME_LEN];
    for (octet, chunk) in frame.iter_mut().zip(bits.chunks(8)) {
        *octet = fold_bits_u8(chunk);
    }
    frame
}

/// Inverse of [`pack_info_symbols`]: spread 61 decoded octets back into 81
/// symbols. Octet 60 contributes only its low 6 bits.
pub fn unpack_info_bytes(frame: &[u8; DECODED_FRAME_LEN]) -> [u8; NUM_INFO_SYMBOLS] {
    let mut bits: BitVec<u8, Msb0> = BitVec::with_capacity(INFO_BITS);
    bits.extend_from_bitslice(frame[..DECODED_FRAME_LEN - 1].view_bits::<Msb0>());
    let last = frame[DECODED_FRAME_LEN - 1];
    for k in (0..SYMBOL_BITS).rev() {
        bits.push((last >> k) & 1 != 0);
    }
    let mut symbols = [0u8; NUM_INFO_SYMBOLS];
    for (symbol, chunk) in symbols.iter_mut().zip(bits.chunks(SYMBOL_BITS)) {
        *symbol = fold_bits_u8(chunk);
    }
    symbols
}

fn push_symbol(bits: &mut BitVec<u8, Msb0>, symbol: u8) {
    for k in (0..SYMBOL_BITS).rev() {
        bits.push((symbol >> k) & 1 != 0);
    }
}
