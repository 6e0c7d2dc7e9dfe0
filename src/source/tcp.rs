//! TCP client source
//!
//! Connects to a peer that streams encoded frames and forwards whatever the
//! socket delivers. Reads use a short timeout so the thread notices the stop
//! flag even on an idle connection.

use std::io::{ErrorKind, Read};
use std::net::TcpStream;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::Sender;
use snafu::ResultExt;
use tracing::{info, warn};

use super::{ConnectSnafu, SourceError, TcpConfig, READ_POLL_TIMEOUT_MS};

pub(super) fn spawn(
    config: TcpConfig,
    tx: Sender<Vec<u8>>,
    stop: Arc<AtomicBool>,
) -> Result<(), SourceError> {
    let addr = format!("{}:{}", config.host, config.port);
    let stream = TcpStream::connect(&addr).context(ConnectSnafu { addr: addr.clone() })?;
    stream
        .set_read_timeout(Some(Duration::from_millis(READ_POLL_TIMEOUT_MS)))
        .context(ConnectSnafu { addr: addr.clone() })?;
    thread::spawn(move || read_loop(stream, addr, tx, stop));
    Ok(())
}

fn read_loop(mut stream: TcpStream, addr: String, tx: Sender<Vec<u8>>, stop: Arc<AtomicBool>) {
    info!(%addr, "tcp source connected");
    let mut block = [0u8; 4096];
    loop {
        if stop.load(Ordering::SeqCst) {
            break;
        }
        match stream.read(&mut block) {
            Ok(0) => {
                info!(%addr, "peer closed the connection");
                break;
            }
            Ok(n) => {
                if tx.send(block[..n].to_vec()).is_err() {
                    break;
                }
            }
            Err(err) if matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                continue;
            }
            Err(err) => {
                warn!(%addr, %err, "tcp read error, stopping source");
                break;
            }
        }
    }
}
