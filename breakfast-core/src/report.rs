use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::clock::Clock;

/// A single emitted report line. Sequence number and elapsed time are
/// assigned at emission, so a buffered message is stamped when it is
/// flushed, not when it was logged.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub seq: u32,
    pub elapsed: Duration,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>2} {:.4} {}",
            self.seq,
            self.elapsed.as_secs_f64(),
            self.message
        )
    }
}

/// Destination for emitted entries.
pub trait ReportWriter: Send + Sync {
    fn write(&self, entry: &LogEntry);
}

pub struct StdoutWriter;

impl ReportWriter for StdoutWriter {
    fn write(&self, entry: &LogEntry) {
        println!("{entry}");
    }
}

/// Captures entries in memory, for tests and anything else that wants to
/// inspect a run's output after the fact.
#[derive(Clone, Default)]
pub struct MemoryWriter {
    entries: Arc<std::sync::Mutex<Vec<LogEntry>>>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().expect("report writer poisoned").clone()
    }
}

impl ReportWriter for MemoryWriter {
    fn write(&self, entry: &LogEntry) {
        self.entries
            .lock()
            .expect("report writer poisoned")
            .push(entry.clone());
    }
}

#[derive(Default)]
struct ReportState {
    blocked: bool,
    buffer: Vec<String>,
    counter: u32,
}

/// Serialization point for all progress output.
///
/// Messages from concurrently running tasks interleave arbitrarily. A task
/// that needs its narration to appear contiguously brackets it with
/// `block`/`unblock`: while blocked, non-forced messages from anyone are
/// queued and emitted after the block ends, in their original order.
/// Contiguity is bought by postponing unrelated output, never by
/// reordering it.
pub struct Report {
    clock: Arc<Clock>,
    writer: Box<dyn ReportWriter>,
    state: Mutex<ReportState>,
}

impl Report {
    pub fn new(clock: Arc<Clock>, writer: Box<dyn ReportWriter>) -> Self {
        Self {
            clock,
            writer,
            state: Mutex::new(ReportState::default()),
        }
    }

    /// Append a message for emission. Emitted immediately unless the
    /// report is blocked, in which case it queues in FIFO order.
    pub async fn log(&self, message: impl Into<String>) {
        let mut state = self.state.lock().await;
        let message = message.into();
        if state.blocked {
            state.buffer.push(message);
        } else {
            self.emit(&mut state, message);
        }
    }

    /// Emit a message immediately even while the report is blocked. The
    /// entry jumps ahead of anything queued in the buffer.
    pub async fn log_force(&self, message: impl Into<String>) {
        let mut state = self.state.lock().await;
        self.emit(&mut state, message.into());
    }

    /// Queue subsequent non-forced messages instead of emitting them.
    pub async fn block(&self) {
        self.state.lock().await.blocked = true;
    }

    /// Resume emission and flush queued messages in the order they were
    /// logged. The flush works on a snapshot of the buffer; a message
    /// logged once the flush has begun emits live, after the snapshot.
    pub async fn unblock(&self) {
        let mut state = self.state.lock().await;
        state.blocked = false;
        let queued = std::mem::take(&mut state.buffer);
        for message in queued {
            self.emit(&mut state, message);
        }
    }

    pub async fn is_blocked(&self) -> bool {
        self.state.lock().await.blocked
    }

    fn emit(&self, state: &mut ReportState, message: String) {
        state.counter += 1;
        let entry = LogEntry {
            seq: state.counter,
            elapsed: self.clock.elapsed(),
            message,
        };
        self.writer.write(&entry);
    }
}
