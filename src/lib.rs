
pub mod bitstream;
pub mod crc;
pub mod driver;
pub mod frame;
pub mod gf64;
pub mod ldpc;
pub mod pipeline;
pub mod source;
pub mod sync;
pub mod tracing_init;

pub use driver::{Driver, Event};
pub use frame::DecodedFrame;
pub use pipeline::Pipeline;
pub use source::{FileConfig, SerialConfig, SourceConfig, TcpConfig};
