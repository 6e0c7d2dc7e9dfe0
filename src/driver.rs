//! Source-to-pipeline driver
//!
//! Binds a byte source to the decoding pipeline: Idle until `start`
//! initializes the source adapter, Running while the worker thread drains
//! the source channel through the pipeline, back to Idle on `stop` or when
//! the source ends. A single worker owns all mutable pipeline state, so
//! frames are emitted in stream order.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::info;

use crate::frame::DecodedFrame;
use crate::pipeline::Pipeline;
use crate::source::{self, SourceConfig, SourceError};

/// Outbound driver events
#[derive(Debug)]
pub enum Event {
    /// A validated frame with its satellite PRN and message type
    Frame(DecodedFrame),
    /// Source lifecycle transition; `false` means the driver went Idle
    SourceState(bool),
}

/// A running capture session.
pub struct Driver {
    events: Receiver<Event>,
    stop: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl Driver {
    /// Initialize the source adapter and enter Running.
    ///
    /// Adapter failures (missing file, refused connection, absent serial
    /// port) are returned here and no threads are left behind.
    pub fn start(config: SourceConfig) -> Result<Self, SourceError> {
        let stop = Arc::new(AtomicBool::new(false));
        let chunks = source::spawn(config, Arc::clone(&stop))?;
        let (event_tx, event_rx) = unbounded();
        let worker_stop = Arc::clone(&stop);
        let worker = thread::spawn(move || run_worker(chunks, event_tx, worker_stop));
        Ok(Driver {
            events: event_rx,
            stop,
            worker: Some(worker),
        })
    }

    /// Channel of validated frames and lifecycle transitions.
    pub fn events(&self) -> &Receiver<Event> {
        &self.events
    }

    /// Stop the session. When this returns the worker has exited, so no
    /// further frame events will be emitted; events already queued remain
    /// readable.
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for Driver {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_worker(chunks: Receiver<Vec<u8>>, events: Sender<Event>, stop: Arc<AtomicBool>) {
    let mut pipeline = Pipeline::new();
    let _ = events.send(Event::SourceState(true));
    info!("driver running");

    for chunk in chunks.iter() {
        if stop.load(Ordering::SeqCst) {
            break;
        }
        pipeline.feed(&chunk, |frame| {
            if !stop.load(Ordering::SeqCst) {
                let _ = events.send(Event::Frame(frame));
            }
        });
    }

    let _ = events.send(Event::SourceState(false));
    info!("driver stopped");
}
