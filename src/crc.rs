//! CRC-24Q verification for decoded B-CNAV3 frames
//!
//! 24-bit CRC with polynomial 0x1864CFB, zero initial register, MSB-first,
//! no reflection and no final XOR. A decoded frame carries the CRC over its
//! first 58 octets as a big-endian value in the last 3 octets; because the
//! frame body is packed from 486 bits, the top 2 bits of octet 60 are always
//! zero and only 22 bits of the stored field are significant.

use crc::{Algorithm, Crc};

/// CRC-24Q polynomial
const CRC_POLYNOMIAL: u32 = 0x1864CFB;

/// CRC-24Q algorithm configuration
const CRC_24Q: Algorithm<u32> = Algorithm {
    width: 24,
    poly: CRC_POLYNOMIAL,
    init: 0x0,
    refin: false,
    refout: false,
    xorout: 0x0,
    check: 0xCDE703,
    residue: 0x0,
};

/// CRC-24Q instance
const BCNAV3_CRC: Crc<u32> = Crc::<u32>::new(&CRC_24Q);

/// Octets of a decoded frame covered by the CRC
pub const CRC_COVERED_LEN: usize = 58;

/// Compute the CRC-24Q of an octet sequence
pub fn crc24q(data: &[u8]) -> u32 {
    BCNAV3_CRC.checksum(data)
}

/// Verify the CRC of a 61-octet decoded frame.
///
/// Recomputes the CRC over octets 0..58 and compares it with the big-endian
/// 24-bit value in octets 58..61.
pub fn crc24q_check(frame: &[u8]) -> bool {
    if frame.len() != crate::frame::DECODED_FRAME_LEN {
        return false;
    }
    let computed = crc24q(&frame[..CRC_COVERED_LEN]);
    let stored = u32::from(frame[58]) << 16 | u32::from(frame[59]) << 8 | u32::from(frame[60]);
    computed == stored
}
