//! Bit-level sync-header search
//!
//! Every encoded B-CNAV3 frame opens with the 16-bit pattern 0xEB90, but the
//! wire gives no alignment guarantee relative to octet boundaries, so the
//! search runs over the bit view of the buffer. When nothing matches, the
//! window keeps its last 15 bits so a header straddling this data and the
//! next chunk is still found whole.

use bitvec::prelude::*;
use tracing::debug;

use crate::bitstream::BitWindow;

/// Frame sync pattern, transmitted high bit first
pub const SYNC_HEADER: u16 = 0xEB90;

/// Length of the sync pattern in bits
pub const SYNC_HEADER_BITS: usize = 16;

/// Bits retained on a failed search, one less than the pattern length
pub const RESIDUAL_BITS: usize = SYNC_HEADER_BITS - 1;

/// Search the window for the sync header.
///
/// Returns `true` with the window realigned so the header starts at bit 0,
/// or `false` with the window trimmed to its last 15 bits. A window shorter
/// than 16 bits is left untouched. Calling the finder twice on an unchanged
/// window yields the same window state either way.
pub fn find_sync_header(window: &mut BitWindow) -> bool {
    let pattern = SYNC_HEADER.to_be_bytes();
    let pattern = pattern.view_bits::<Msb0>();
    let bits = window.as_bits();
    if bits.len() < SYNC_HEADER_BITS {
        return false;
    }

    let position = (0..=bits.len() - SYNC_HEADER_BITS)
        .find(|&start| bits[start..start + SYNC_HEADER_BITS] == pattern[..]);

    match position {
        Some(0) => true,
        Some(start) => {
            debug!(start, "sync header at nonzero bit offset, discarding leading bits");
            window.drain_front(start);
            true
        }
        None => {
            window.retain_tail(RESIDUAL_BITS);
            false
        }
    }
}
