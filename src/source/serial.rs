//! Serial port source
//!
//! Opens the port with the configured UART framing and forwards every byte
//! read. The port timeout doubles as the stop-flag poll interval.

use std::io::{ErrorKind, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::Sender;
use serialport::SerialPort;
use snafu::ResultExt;
use tracing::{info, warn};

use super::{OpenSerialSnafu, SerialConfig, SourceError, READ_POLL_TIMEOUT_MS};

pub(super) fn spawn(
    config: SerialConfig,
    tx: Sender<Vec<u8>>,
    stop: Arc<AtomicBool>,
) -> Result<(), SourceError> {
    let port = serialport::new(&config.port, config.baud)
        .data_bits(config.data_bits)
        .parity(config.parity)
        .stop_bits(config.stop_bits)
        .flow_control(config.flow)
        .timeout(Duration::from_millis(READ_POLL_TIMEOUT_MS))
        .open()
        .context(OpenSerialSnafu {
            port: config.port.clone(),
        })?;
    thread::spawn(move || read_loop(port, config.port, tx, stop));
    Ok(())
}

fn read_loop(
    mut port: Box<dyn SerialPort>,
    name: String,
    tx: Sender<Vec<u8>>,
    stop: Arc<AtomicBool>,
) {
    info!(port = %name, "serial source opened");
    let mut block = [0u8; 1024];
    loop {
        if stop.load(Ordering::SeqCst) {
            break;
        }
        match port.read(&mut block) {
            Ok(0) => continue,
            Ok(n) => {
                if tx.send(block[..n].to_vec()).is_err() {
                    break;
                }
            }
            Err(err) if matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                continue;
            }
            Err(err) => {
                warn!(port = %name, %err, "serial read error, stopping source");
                break;
            }
        }
    }
}
