//! Coordination kernel for a fixed set of concurrently running tasks:
//! a shared scaled clock, an ordered report sink with a blocking mode,
//! and a completion-order task set.

pub mod clock;
pub mod coordinator;
pub mod error;
pub mod report;

pub use clock::Clock;
pub use coordinator::{Completion, Outcome, TaskSet};
pub use error::{CoordinatorError, TaskError};
pub use report::{LogEntry, MemoryWriter, Report, ReportWriter, StdoutWriter};
