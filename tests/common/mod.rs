//! Shared fixtures and helpers for the integration tests
//!
//! The encoded fixtures below are complete 125-octet frames (sync header,
//! LDPC codeword, zero padding) whose decoded form carries a valid CRC-24Q
//! and header; they were generated with [`build_frame`] and are kept inline
//! so the tests also cross-check the encoder against a frozen reference.

#![allow(dead_code)]

use bcnav3::bitstream;
use bcnav3::crc::crc24q;
use bcnav3::frame::{DECODED_FRAME_LEN, ENCODED_FRAME_LEN};
use bcnav3::ldpc;

/// Encoded frame: PRN 10, message type 10
pub const FRAME_PRN10_MT10: [u8; ENCODED_FRAME_LEN] = [
    0xEB, 0x90, 0x28, 0xA0, 0xC6, 0x7E, 0x81, 0x6B, 0x4B, 0xFB, 0xE2, 0xFB,
    0x54, 0xF6, 0xBD, 0xDF, 0x7C, 0x1C, 0xE1, 0x87, 0x01, 0xBF, 0x31, 0xDE,
    0x56, 0x72, 0x0F, 0x47, 0x67, 0x66, 0x87, 0x59, 0xAA, 0x88, 0x3C, 0x59,
    0xEA, 0x56, 0x13, 0x7B, 0xD2, 0x85, 0xA1, 0xD8, 0x3C, 0x54, 0x55, 0x2F,
    0x37, 0xAE, 0x65, 0x5B, 0xDA, 0x02, 0x79, 0x80, 0xCC, 0xE3, 0x1A, 0x77,
    0x35, 0x5D, 0x68, 0x0B, 0x52, 0xC4, 0xB6, 0xC9, 0x2C, 0x8B, 0xF3, 0xF0,
    0xBC, 0xE9, 0x97, 0xE2, 0xA2, 0x08, 0x3E, 0x6E, 0xFB, 0xAF, 0x2B, 0x89,
    0xD7, 0xB3, 0x53, 0x55, 0x85, 0xD1, 0xAA, 0x84, 0xD3, 0x89, 0xF1, 0x31,
    0xB9, 0xED, 0xAB, 0x6D, 0xAB, 0x55, 0x7F, 0x49, 0xCD, 0xAC, 0x41, 0x30,
    0xFC, 0x54, 0x7F, 0xD8, 0x65, 0x68, 0xDA, 0xD4, 0xFA, 0x42, 0x88, 0x55,
    0xBB, 0x76, 0xC6, 0x60, 0x00,
];

/// Decoded form of [`FRAME_PRN10_MT10`]
pub const DECODED_PRN10_MT10: [u8; DECODED_FRAME_LEN] = [
    0x28, 0xA0, 0xC6, 0x7E, 0x81, 0x6B, 0x4B, 0xFB, 0xE2, 0xFB, 0x54, 0xF6,
    0xBD, 0xDF, 0x7C, 0x1C, 0xE1, 0x87, 0x01, 0xBF, 0x31, 0xDE, 0x56, 0x72,
    0x0F, 0x47, 0x67, 0x66, 0x87, 0x59, 0xAA, 0x88, 0x3C, 0x59, 0xEA, 0x56,
    0x13, 0x7B, 0xD2, 0x85, 0xA1, 0xD8, 0x3C, 0x54, 0x55, 0x2F, 0x37, 0xAE,
    0x65, 0x5B, 0xDA, 0x02, 0x79, 0x80, 0xCC, 0xE3, 0x1A, 0x77, 0x35, 0x5D,
    0x1A,
];

/// Encoded frame: PRN 10, message type 30
pub const FRAME_PRN10_MT30: [u8; ENCODED_FRAME_LEN] = [
    0xEB, 0x90, 0x29, 0xE0, 0x6C, 0x4E, 0x74, 0x92, 0x13, 0x25, 0x22, 0x2E,
    0x31, 0xA1, 0xCD, 0x13, 0xBE, 0x12, 0xED, 0x42, 0x69, 0x66, 0xCE, 0x24,
    0xFC, 0x23, 0xD7, 0xDA, 0x8D, 0x20, 0x97, 0x61, 0x6A, 0x06, 0x95, 0x6E,
    0xC2, 0x8A, 0xD4, 0x03, 0x13, 0x68, 0x28, 0xD4, 0x57, 0x1E, 0x3C, 0x5D,
    0xEE, 0x6E, 0x5E, 0xC0, 0x4A, 0x91, 0x11, 0x40, 0x5D, 0x3B, 0x51, 0x3F,
    0x64, 0xF4, 0x33, 0x9C, 0xE6, 0xC7, 0x7D, 0xED, 0xD5, 0x5B, 0xAE, 0xAA,
    0xC0, 0x04, 0xDB, 0x90, 0xAE, 0xAD, 0xBA, 0xB3, 0x12, 0x0A, 0x93, 0x81,
    0x1D, 0x83, 0x61, 0xFE, 0x45, 0x15, 0xA8, 0x72, 0x3D, 0x88, 0xFC, 0xBA,
    0xF0, 0x22, 0x8B, 0x6C, 0xEC, 0x26, 0xE6, 0x88, 0xDA, 0x53, 0x4D, 0x93,
    0x96, 0xEF, 0x07, 0x60, 0xD3, 0x9C, 0xE1, 0x57, 0x8F, 0x83, 0x63, 0x7C,
    0xE4, 0x24, 0x40, 0xA0, 0x00,
];

/// Encoded frame: PRN 12, message type 40
pub const FRAME_PRN12_MT40: [u8; ENCODED_FRAME_LEN] = [
    0xEB, 0x90, 0x32, 0x80, 0x53, 0xC3, 0x7D, 0x78, 0x8E, 0xB4, 0x4D, 0xB7,
    0x48, 0x2F, 0x6D, 0x46, 0x3D, 0x19, 0xE5, 0x70, 0x24, 0x4C, 0xBB, 0xA0,
    0xE3, 0x58, 0xFC, 0x78, 0x74, 0xFA, 0x8C, 0xB1, 0x95, 0x5C, 0xAF, 0xB5,
    0x32, 0x12, 0x53, 0xFE, 0x93, 0xD1, 0x23, 0x2C, 0x45, 0xED, 0x4C, 0xE9,
    0xC9, 0x99, 0x0D, 0x7D, 0xFF, 0xDC, 0x01, 0x00, 0x51, 0x55, 0x2C, 0x71,
    0xE6, 0x48, 0xE2, 0x0C, 0x84, 0xDC, 0xE1, 0x8F, 0x18, 0xF1, 0x98, 0x79,
    0x06, 0xD6, 0x33, 0x3E, 0x19, 0xB1, 0xDA, 0xC0, 0xF2, 0xE3, 0x65, 0x56,
    0x48, 0x0C, 0x0A, 0x79, 0x27, 0xC7, 0x46, 0xF2, 0xAB, 0x19, 0xD1, 0xAE,
    0xEC, 0xCD, 0x36, 0xBC, 0x31, 0x2D, 0xC8, 0x91, 0xA0, 0xF4, 0xD3, 0x5A,
    0xAC, 0x69, 0xB6, 0x18, 0x27, 0x01, 0xF6, 0x31, 0x54, 0xC7, 0x4F, 0x2D,
    0x8C, 0x7E, 0x8E, 0x20, 0x00,
];

/// Construct a complete valid encoded frame.
///
/// Fills the frame body from a seeded LCG, zeroes the low 6 bits of octet 53
/// (the rank-order truncation of the decoder pins that symbol to 0), steps
/// octet 57 until the CRC fits the 22-bit storage field, then derives the
/// parity symbols.
pub fn build_frame(prn: u8, msg_type: u8, seed: u32) -> [u8; ENCODED_FRAME_LEN] {
    let mut body = [0u8; DECODED_FRAME_LEN];
    body[0] = (prn << 2) | (msg_type >> 4);
    body[1] = (msg_type & 0x0F) << 4;
    let mut state = seed;
    for octet in body[2..58].iter_mut() {
        state = (state.wrapping_mul(1103515245).wrapping_add(12345)) & 0x7FFF_FFFF;
        *octet = (state >> 16) as u8;
    }
    body[53] &= 0xC0;
    loop {
        let crc = crc24q(&body[..58]);
        if crc & 0xC0 == 0 {
            body[58] = (crc >> 16) as u8;
            body[59] = (crc >> 8) as u8;
            body[60] = crc as u8;
            break;
        }
        body[57] = body[57].wrapping_add(1);
    }

    let info = bitstream::unpack_info_bytes(&body);
    let codeword = ldpc::encode(&info);
    let payload = bitstream::payload_from_symbols(&codeword);

    let mut frame = [0u8; ENCODED_FRAME_LEN];
    frame[0] = 0xEB;
    frame[1] = 0x90;
    frame[2..].copy_from_slice(&payload);
    frame
}

/// Prepend `shift` zero bits to a byte stream, padding the tail to a whole
/// octet with zeros.
pub fn shift_bits_right(data: &[u8], shift: usize) -> Vec<u8> {
    assert!(shift < 8);
    if shift == 0 {
        return data.to_vec();
    }
    let mut out = Vec::with_capacity(data.len() + 1);
    let mut carry = 0u8;
    for &byte in data {
        out.push(carry | (byte >> shift));
        carry = byte << (8 - shift);
    }
    out.push(carry);
    out
}
