#![allow(dead_code)]

use parking_lot::Mutex;
use quartz_interceptor::{CommandDefinition, CommandSender, Registry};
use std::{
    io,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

/// A sender which records every message it receives.
pub struct RecordingSender {
    name: String,
    messages: Mutex<Vec<String>>,
}

impl RecordingSender {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(RecordingSender {
            name: name.to_owned(),
            messages: Mutex::new(Vec::new()),
        })
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

impl CommandSender for RecordingSender {
    fn send_message(&self, text: &str) {
        self.messages.lock().push(text.to_owned());
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Wraps a definition and counts how often it is built.
pub struct CountingDefinition<D> {
    inner: D,
    builds: Arc<AtomicUsize>,
}

impl<D> CountingDefinition<D> {
    pub fn new(inner: D) -> (Self, Arc<AtomicUsize>) {
        let builds = Arc::new(AtomicUsize::new(0));
        (
            CountingDefinition {
                inner,
                builds: Arc::clone(&builds),
            },
            builds,
        )
    }
}

impl<D: CommandDefinition> CommandDefinition for CountingDefinition<D> {
    type Parser = D::Parser;

    fn build(&self, registry: &Arc<Registry>) -> anyhow::Result<D::Parser> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        self.inner.build(registry)
    }
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Runs `f` with a subscriber capturing error-level records, returning its result and the
/// captured text.
pub fn capture_errors<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_max_level(Level::ERROR)
        .with_ansi(false)
        .without_time()
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.0.lock()).into_owned();
    (result, logs)
}
