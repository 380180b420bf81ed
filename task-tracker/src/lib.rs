//! Persistence and mutation of a single-user task list kept in one JSON file.
pub mod cli;
pub mod config;
pub mod error;
pub mod interactive;
pub mod store;
pub mod task;

pub use error::{ParseStatusError, StoreError};
pub use store::{CorruptPolicy, TaskStore};
pub use task::{Status, Task, Timestamp};
