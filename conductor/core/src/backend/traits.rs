//! Executor Traits
//!
//! Trait definition for task executors plus the error type they share.
//!
//! An executor resolves or rejects exactly once per request. It has no
//! cancellation hook: callers that lose interest simply drop the result.

use async_trait::async_trait;
use thiserror::Error;

use crate::response::{ResponseError, TaskResponse};
use crate::tasks::{TaskKind, TaskRequest};

/// Why an executor could not produce a response
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExecutorError {
    /// The request needs a `query` string input and has none
    #[error("{task} request is missing a query string")]
    MissingQuery {
        /// Requested task
        task: TaskKind,
    },

    /// The executor has nothing for this task
    #[error("no response available for {0}")]
    UnknownTask(TaskKind),

    /// The produced response failed validation
    #[error("invalid response: {0}")]
    InvalidResponse(#[from] ResponseError),

    /// The executor's response table could not be read
    #[error("response table is unreadable: {0}")]
    Table(String),

    /// The executor is not reachable
    #[error("executor unavailable: {0}")]
    Unavailable(String),
}

/// Task executor trait
///
/// Implement this to plug a different answer source into the conductor.
#[async_trait]
pub trait TaskExecutor: Send + Sync {
    /// Executor name for logs (e.g. "Mock")
    fn name(&self) -> &str;

    /// Run one request
    ///
    /// The returned response's [`TaskResponse::kind`] always equals
    /// `request.task`.
    async fn execute(&self, request: &TaskRequest) -> Result<TaskResponse, ExecutorError>;
}
