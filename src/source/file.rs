//! File replay source
//!
//! Reads a capture file `block_size` octets at a time with a fixed delay
//! between reads, approximating the pacing of a live stream.

use std::fs::File;
use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::Sender;
use snafu::ResultExt;
use tracing::{info, warn};

use super::{FileConfig, OpenFileSnafu, SourceError};

pub(super) fn spawn(
    config: FileConfig,
    tx: Sender<Vec<u8>>,
    stop: Arc<AtomicBool>,
) -> Result<(), SourceError> {
    let file = File::open(&config.path).context(OpenFileSnafu {
        path: config.path.clone(),
    })?;
    thread::spawn(move || read_loop(file, config, tx, stop));
    Ok(())
}

fn read_loop(mut file: File, config: FileConfig, tx: Sender<Vec<u8>>, stop: Arc<AtomicBool>) {
    info!(path = %config.path.display(), block_size = config.block_size, "file replay started");
    let interval = Duration::from_millis(config.interval_ms);
    let mut block = vec![0u8; config.block_size.max(1)];
    loop {
        if stop.load(Ordering::SeqCst) {
            break;
        }
        match file.read(&mut block) {
            Ok(0) => {
                info!("capture file exhausted");
                break;
            }
            Ok(n) => {
                if tx.send(block[..n].to_vec()).is_err() {
                    break;
                }
            }
            Err(err) => {
                warn!(%err, "file read error, stopping replay");
                break;
            }
        }
        thread::sleep(interval);
    }
}
