//! Byte-source adapters
//!
//! Each adapter owns a reader thread that forwards byte chunks over a
//! channel in FIFO order; the pipeline worker is the sole consumer. Opening
//! the underlying resource happens synchronously in [`spawn`] so that a
//! missing file, refused connection or absent serial port fails `start`
//! instead of surfacing mid-stream. Reader threads exit on end of stream,
//! on a read error, or when the stop flag is raised; dropping the sender
//! closes the channel and lets the pipeline worker wind down.

mod file;
mod serial;
mod tcp;

use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crossbeam_channel::Receiver;
use snafu::Snafu;

/// Default octets per file read tick
pub const DEFAULT_BLOCK_SIZE: usize = 1024;

/// Default delay between file read ticks, in milliseconds
pub const DEFAULT_INTERVAL_MS: u64 = 100;

/// Default TCP peer host
pub const DEFAULT_TCP_HOST: &str = "127.0.0.1";

/// Default TCP peer port
pub const DEFAULT_TCP_PORT: u16 = 8888;

/// Default serial bit rate
pub const DEFAULT_BAUD: u32 = 9600;

/// How long blocking reads wait before rechecking the stop flag
pub(crate) const READ_POLL_TIMEOUT_MS: u64 = 500;

/// Selects and parameterizes the byte source.
#[derive(Debug, Clone)]
pub enum SourceConfig {
    /// Replay a capture file at a configurable rate
    File(FileConfig),
    /// Connect to a TCP peer streaming frames
    TcpClient(TcpConfig),
    /// Read from a serial port
    Serial(SerialConfig),
}

#[derive(Debug, Clone)]
pub struct FileConfig {
    pub path: PathBuf,
    /// Octets read per tick
    pub block_size: usize,
    /// Delay between ticks
    pub interval_ms: u64,
}

impl FileConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileConfig {
            path: path.into(),
            block_size: DEFAULT_BLOCK_SIZE,
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TcpConfig {
    pub host: String,
    pub port: u16,
}

impl Default for TcpConfig {
    fn default() -> Self {
        TcpConfig {
            host: DEFAULT_TCP_HOST.to_string(),
            port: DEFAULT_TCP_PORT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SerialConfig {
    pub port: String,
    pub baud: u32,
    pub data_bits: serialport::DataBits,
    pub parity: serialport::Parity,
    pub stop_bits: serialport::StopBits,
    pub flow: serialport::FlowControl,
}

impl SerialConfig {
    pub fn new(port: impl Into<String>) -> Self {
        SerialConfig {
            port: port.into(),
            baud: DEFAULT_BAUD,
            data_bits: serialport::DataBits::Eight,
            parity: serialport::Parity::None,
            stop_bits: serialport::StopBits::One,
            flow: serialport::FlowControl::None,
        }
    }
}

/// Adapter initialization failure; fails `Driver::start`.
#[derive(Debug, Snafu)]
pub enum SourceError {
    #[snafu(display("failed to open capture file {}: {source}", path.display()))]
    OpenFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("failed to connect to {addr}: {source}"))]
    Connect {
        addr: String,
        source: std::io::Error,
    },

    #[snafu(display("failed to open serial port {port}: {source}"))]
    OpenSerial {
        port: String,
        source: serialport::Error,
    },
}

/// Open the configured source and start its reader thread.
///
/// Returns the channel the source feeds; the channel closes when the source
/// ends for any reason.
pub(crate) fn spawn(
    config: SourceConfig,
    stop: Arc<AtomicBool>,
) -> Result<Receiver<Vec<u8>>, SourceError> {
    let (tx, rx) = crossbeam_channel::unbounded();
    match config {
        SourceConfig::File(cfg) => file::spawn(cfg, tx, stop)?,
        SourceConfig::TcpClient(cfg) => tcp::spawn(cfg, tx, stop)?,
        SourceConfig::Serial(cfg) => serial::spawn(cfg, tx, stop)?,
    }
    Ok(rx)
}
