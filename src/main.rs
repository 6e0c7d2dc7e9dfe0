use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use bcnav3::source::{FileConfig, SerialConfig, SourceConfig, TcpConfig};
use bcnav3::{tracing_init, Driver, Event};

#[derive(Parser)]
#[command(name = "bcnav3", about = "B-CNAV3 navigation frame receiver")]
struct Cli {
    #[command(subcommand)]
    source: SourceArg,
}

#[derive(Subcommand)]
enum SourceArg {
    /// Replay a capture file at a configurable rate
    File {
        path: PathBuf,
        /// Octets read per tick
        #[arg(long, default_value_t = 1024)]
        block_size: usize,
        /// Milliseconds between reads
        #[arg(long, default_value_t = 100)]
        interval_ms: u64,
    },
    /// Connect to a TCP peer streaming frames
    Tcp {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(long, default_value_t = 8888)]
        port: u16,
    },
    /// Read from a serial port
    Serial {
        port: String,
        #[arg(long, default_value_t = 9600)]
        baud: u32,
        /// 5, 6, 7 or 8
        #[arg(long, default_value_t = 8)]
        data_bits: u8,
        /// none, odd or even
        #[arg(long, default_value = "none")]
        parity: String,
        /// 1 or 2
        #[arg(long, default_value_t = 1)]
        stop_bits: u8,
        /// none, software or hardware
        #[arg(long, default_value = "none")]
        flow: String,
    },
}

fn main() {
    tracing_init::init_tracing();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = source_config(cli.source)?;
    let driver = Driver::start(config)?;

    for event in driver.events().iter() {
        match event {
            Event::Frame(frame) => {
                let body: String = frame.bytes.iter().map(|b| format!("{b:02X}")).collect();
                println!("PRN {:2}  MT {:2}  {}", frame.prn, frame.msg_type, body);
            }
            Event::SourceState(true) => {}
            Event::SourceState(false) => break,
        }
    }
    Ok(())
}

fn source_config(arg: SourceArg) -> Result<SourceConfig, Box<dyn Error>> {
    Ok(match arg {
        SourceArg::File {
            path,
            block_size,
            interval_ms,
        } => SourceConfig::File(FileConfig {
            path,
            block_size,
            interval_ms,
        }),
        SourceArg::Tcp { host, port } => SourceConfig::TcpClient(TcpConfig { host, port }),
        SourceArg::Serial {
            port,
            baud,
            data_bits,
            parity,
            stop_bits,
            flow,
        } => {
            let mut config = SerialConfig::new(port);
            config.baud = baud;
            config.data_bits = match data_bits {
                5 => serialport::DataBits::Five,
                6 => serialport::DataBits::Six,
                7 => serialport::DataBits::Seven,
                8 => serialport::DataBits::Eight,
                other => return Err(format!("unsupported data bits: {other}").into()),
            };
            config.parity = match parity.as_str() {
                "none" => serialport::Parity::None,
                "odd" => serialport::Parity::Odd,
                "even" => serialport::Parity::Even,
                other => return Err(format!("unsupported parity: {other}").into()),
            };
            config.stop_bits = match stop_bits {
                1 => serialport::StopBits::One,
                2 => serialport::StopBits::Two,
                other => return Err(format!("unsupported stop bits: {other}").into()),
            };
            config.flow = match flow.as_str() {
                "none" => serialport::FlowControl::None,
                "software" => serialport::FlowControl::Software,
                "hardware" => serialport::FlowControl::Hardware,
                other => return Err(format!("unsupported flow control: {other}").into()),
            };
            SourceConfig::Serial(config)
        }
    })
}
