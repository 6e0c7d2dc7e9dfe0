//! Byte-in/frame-out decoding pipeline
//!
//! The pipeline owns the bit window, the LDPC decoder state and the PRN
//! lock. Bytes go in through [`Pipeline::feed`] in arbitrarily sized chunks;
//! every validated frame comes back through the callback, in the order its
//! sync header appeared in the stream. All failures are recoverable: the
//! offending frame is dropped, a diagnostic is logged, and scanning resumes.
//!
//! A failed decode advances exactly one frame length past the sync header
//! rather than retrying a bit-shifted resync, so a false lock on an 0xEB90
//! pattern inside payload can shadow a real frame start within the same 125
//! octets. This mirrors the receiver this pipeline was modeled on.

use tracing::{debug, warn};

use crate::bitstream::BitWindow;
use crate::crc;
use crate::frame::{self, DecodedFrame, ENCODED_FRAME_LEN};
use crate::ldpc::EmsDecoder;
use crate::sync;

/// Bits in one encoded frame
pub const ENCODED_FRAME_BITS: usize = ENCODED_FRAME_LEN * 8;

/// Frame-synchronization and decoding state machine.
pub struct Pipeline {
    window: BitWindow,
    decoder: EmsDecoder,
    locked_prn: u8,
}

impl Pipeline {
    pub fn new() -> Self {
        Pipeline {
            window: BitWindow::new(),
            decoder: EmsDecoder::new(),
            locked_prn: 0,
        }
    }

    /// The PRN every emitted frame is currently required to carry.
    pub fn locked_prn(&self) -> Option<u8> {
        (self.locked_prn != 0).then_some(self.locked_prn)
    }

    /// Bits currently buffered; bounded by one frame plus the 15-bit sync
    /// residual after every [`Pipeline::feed`] call.
    pub fn buffered_bits(&self) -> usize {
        self.window.bit_len()
    }

    /// Consume a chunk of stream bytes, invoking `on_frame` for every
    /// validated frame found. A single chunk can yield zero or more frames.
    pub fn feed<F>(&mut self, chunk: &[u8], mut on_frame: F)
    where
        F: FnMut(DecodedFrame),
    {
        self.window.extend_bytes(chunk);

        while self.window.bit_len() >= ENCODED_FRAME_BITS {
            if !sync::find_sync_header(&mut self.window) {
                break;
            }
            if self.window.bit_len() < ENCODED_FRAME_BITS {
                // header found but its frame is still arriving
                break;
            }
            let encoded = self.window.take_bytes(ENCODED_FRAME_LEN);

            let Some(decoded) = self.decoder.decode(&encoded[2..]) else {
                warn!("LDPC decode did not converge, dropping frame");
                continue;
            };
            if !crc::crc24q_check(&decoded) {
                warn!("CRC-24Q mismatch, dropping frame");
                continue;
            }
            let (prn, msg_type) = match frame::parse_header(&decoded) {
                Ok(header) => header,
                Err(err) => {
                    warn!(%err, "frame header rejected, dropping frame");
                    continue;
                }
            };

            if self.locked_prn != 0 && prn != self.locked_prn {
                warn!(
                    locked = self.locked_prn,
                    received = prn,
                    "PRN mismatch, clearing lock and dropping frame"
                );
                self.locked_prn = 0;
                continue;
            }
            if self.locked_prn == 0 {
                self.locked_prn = prn;
                debug!(prn, "PRN lock acquired");
            }

            on_frame(DecodedFrame {
                bytes: decoded,
                prn,
                msg_type,
            });
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
