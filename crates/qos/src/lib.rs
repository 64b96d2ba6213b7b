//! Quality-of-service dispatch for map work.
//!
//! A [`QosDispatcher`] owns three execution contexts:
//!
//! * **Foreground**: one serial lane that holds the shared rendering resource.
//!   Work submitted with [`QosDispatcher::perform_foreground_operation`]
//!   receives `&mut Foreground<R>` and runs in submission order.
//! * **User-initiated**: a worker pool for responsive work that must not
//!   block the foreground lane.
//! * **Utility**: a separate, smaller worker pool for long-running work such
//!   as SDK bring-up and cache warming.
//!
//! [`Foreground`] is neither `Send` nor `Sync`, so the resource cannot be
//! reached from worker contexts. One-time service initialization is guarded
//! by [`InitializationState`]; every completion callback runs on the
//! foreground lane exactly once.
//!
//! On Linux and Android worker threads also lower their OS scheduling
//! priority according to their context, so utility work yields the CPU to
//! the foreground lane under contention.

mod config;
mod context;
mod dispatcher;
mod error;
mod foreground;
mod init;
mod panic;
mod pool;
mod priority;
mod task;

pub use config::DispatcherConfig;
pub use context::ExecutionContext;
pub use dispatcher::QosDispatcher;
pub use error::DispatchError;
pub use foreground::{Foreground, ForegroundPump, is_foreground};
pub use init::{InitializationState, ServiceInitializer};
pub use task::{ForegroundTask, Task};
