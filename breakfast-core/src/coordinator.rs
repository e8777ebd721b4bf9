use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;
use std::task::Poll;

use futures_util::future::poll_fn;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::error::{CoordinatorError, TaskError};

/// How a finished task ended.
#[derive(Debug)]
pub enum Outcome<T> {
    Finished(T),
    Failed(TaskError),
}

/// One drained completion: which task finished and how.
#[derive(Debug)]
pub struct Completion<K, T> {
    pub id: K,
    pub outcome: Outcome<T>,
}

/// The shrinking set of in-flight tasks the coordinator drains.
///
/// Members are identified by a caller-chosen key and removed as their
/// completions are reported, one at a time, in the order completions
/// actually occur. The set is empty once every member has been reported.
pub struct TaskSet<K, T> {
    members: Vec<(K, JoinHandle<Result<T, TaskError>>)>,
}

impl<K, T> TaskSet<K, T> {
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<K, T> Default for TaskSet<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, T> TaskSet<K, T>
where
    K: Debug + PartialEq,
    T: Send + 'static,
{
    /// Start a task and track it. Execution begins on the runtime right
    /// away, not on the first wait.
    pub fn spawn<F>(&mut self, id: K, task: F)
    where
        F: Future<Output = Result<T, TaskError>> + Send + 'static,
    {
        self.insert(id, tokio::spawn(task));
    }

    /// Track an already spawned task. A handle that has already completed
    /// is reported on the very next wait, not skipped.
    pub fn insert(&mut self, id: K, handle: JoinHandle<Result<T, TaskError>>) {
        debug_assert!(
            !self.members.iter().any(|(member, _)| *member == id),
            "duplicate task identity in set"
        );
        info!(?id, "tracking task");
        self.members.push((id, handle));
    }

    /// Cancellation is not supported. A task runs to completion once
    /// started; the request only logs a warning.
    pub fn cancel(&mut self, id: &K) {
        warn!(?id, "cancellation requested but not supported, task runs to completion");
    }

    /// Suspend until the next member finishes, then report it and remove
    /// it from the set.
    ///
    /// Handles are polled in insertion order and the first ready one wins,
    /// so simultaneous completions resolve deterministically. Polling a
    /// handle only observes completion; the task itself progresses on the
    /// runtime whether or not anyone is waiting. A member that failed or
    /// panicked is reported like any other completion and the rest of the
    /// set is untouched.
    pub async fn next_completion(&mut self) -> Result<Completion<K, T>, CoordinatorError> {
        if self.members.is_empty() {
            return Err(CoordinatorError::EmptyWait);
        }

        let (index, joined) = poll_fn(|cx| {
            for (index, (_, handle)) in self.members.iter_mut().enumerate() {
                if let Poll::Ready(joined) = Pin::new(handle).poll(cx) {
                    return Poll::Ready((index, joined));
                }
            }
            Poll::Pending
        })
        .await;

        let (id, _) = self.members.remove(index);
        let outcome = match joined {
            Ok(Ok(value)) => Outcome::Finished(value),
            Ok(Err(error)) => Outcome::Failed(error),
            Err(join_error) => Outcome::Failed(TaskError::Failed(join_error.to_string())),
        };
        info!(?id, remaining = self.members.len(), "task completed");

        Ok(Completion { id, outcome })
    }
}
