//! Non-binary LDPC (81×162 over GF(2^6)) for B-CNAV3 frames
//!
//! **Decoding**: truncated extended min-sum belief propagation recovering 81
//! information symbols from the 123 coded payload octets of a frame.
//!
//! **Encoding**: parity derivation by solving the check equations of H, used
//! for test-vector generation and round-trip tests.

mod decode;
mod encode;
mod matrix;

pub use decode::EmsDecoder;
pub use encode::encode;
pub use matrix::{H, NUM_CHECKS, NUM_EDGES, NUM_INFO_SYMBOLS, NUM_SYMBOLS};
