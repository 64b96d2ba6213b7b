use tokio::runtime::{Builder, Runtime};

use crate::error::DispatchError;
use crate::panic::join_error_panic_message;
use crate::priority::ThreadPriority;
use crate::task::BoxedTask;
use crate::{DispatcherConfig, ExecutionContext};

/// Worker context backed by its own runtime.
///
/// Tasks run on the runtime's blocking pool, sized by the context's thread
/// budget, so a long utility job never occupies a user-initiated thread.
#[derive(Debug)]
pub(crate) struct WorkerPool {
	context: ExecutionContext,
	runtime: Option<Runtime>,
}

impl WorkerPool {
	pub fn new(context: ExecutionContext, config: &DispatcherConfig) -> Result<Self, DispatchError> {
		let threads = match context {
			ExecutionContext::UserInitiated => config.user_initiated_threads,
			_ => config.utility_threads,
		}
		.max(1);

		let priority = ThreadPriority::for_context(context);
		let runtime = Builder::new_multi_thread()
			.worker_threads(1)
			.max_blocking_threads(threads)
			.thread_name(config.thread_name(context))
			.on_thread_start(move || priority.apply())
			.build()
			.map_err(|source| DispatchError::Runtime { context, source })?;

		tracing::debug!(qos_context = context.as_str(), threads, niceness = priority.niceness(), "qos.pool.start");
		Ok(Self {
			context,
			runtime: Some(runtime),
		})
	}

	/// Queues a task. Never blocks the caller.
	pub fn submit(&self, task: BoxedTask) {
		let Some(runtime) = self.runtime.as_ref() else {
			return;
		};
		let context = self.context;
		tracing::trace!(qos_context = context.as_str(), "qos.submit");

		let job = runtime.spawn_blocking(move || task.run());
		runtime.spawn(async move {
			if let Err(err) = job.await
				&& let Some(msg) = join_error_panic_message(err)
			{
				tracing::error!(qos_context = context.as_str(), panic = %msg, "worker task panicked");
			}
		});
	}
}

impl Drop for WorkerPool {
	fn drop(&mut self) {
		if let Some(runtime) = self.runtime.take() {
			tracing::debug!(qos_context = self.context.as_str(), "qos.pool.stop");
			runtime.shutdown_background();
		}
	}
}
