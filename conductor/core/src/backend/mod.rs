//! Task Executors
//!
//! The executor is the seam between the command bar and whatever produces
//! answers. Everything upstream (classification, state, rendering) talks to
//! the [`TaskExecutor`] trait only, so a real backend can replace the mock
//! without touching them.
//!
//! # Available Executors
//!
//! - **Mock**: canned responses behind a fixed simulated latency (default)
//!
//! # Usage
//!
//! ```ignore
//! use galaxrx_core::backend::{MockExecutor, TaskExecutor};
//! use galaxrx_core::tasks::{TaskKind, TaskRequest};
//!
//! let executor = MockExecutor::new();
//! let request = TaskRequest::from_query(TaskKind::ForecastDemand, "forecast next week");
//! let response = executor.execute(&request).await?;
//! ```

mod mock;
mod traits;

pub use mock::{AssistantTopic, MockExecutor, DEFAULT_MOCK_DELAY};
pub use traits::{ExecutorError, TaskExecutor};
