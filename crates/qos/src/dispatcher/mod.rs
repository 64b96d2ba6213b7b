use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use crate::error::DispatchError;
use crate::foreground::{self, Foreground, ForegroundLane, ForegroundMessage, ForegroundPump, ForegroundSender};
use crate::init::{InitGate, InitializationState, ServiceInitializer};
use crate::panic::panic_message;
use crate::pool::WorkerPool;
use crate::priority::ThreadPriority;
use crate::task::{BoxedTask, Task};
use crate::{DispatcherConfig, ExecutionContext};

/// Priority-tiered dispatcher for map work.
///
/// Owns one serial foreground lane holding the rendering resource `R`, plus
/// user-initiated and utility worker contexts. Cloning shares the same lanes;
/// the lanes shut down once the last clone is dropped. Every submission
/// returns immediately.
pub struct QosDispatcher<R: 'static> {
	inner: Arc<DispatcherInner<R>>,
}

struct DispatcherInner<R> {
	config: DispatcherConfig,
	foreground: ForegroundSender<R>,
	user_initiated: WorkerPool,
	utility: WorkerPool,
	init: Arc<InitGate<R>>,
	initializer: Arc<dyn ServiceInitializer>,
}

impl<R> Drop for DispatcherInner<R> {
	fn drop(&mut self) {
		tracing::debug!(prefix = %self.config.thread_name_prefix, "qos.dispatcher.drop");
	}
}

impl<R: 'static> Clone for QosDispatcher<R> {
	fn clone(&self) -> Self {
		Self {
			inner: Arc::clone(&self.inner),
		}
	}
}

impl<R: 'static> std::fmt::Debug for QosDispatcher<R> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("QosDispatcher")
			.field("config", &self.inner.config)
			.field("initialization", &self.inner.init.state())
			.finish_non_exhaustive()
	}
}

impl<R: 'static> QosDispatcher<R> {
	/// Starts a dispatcher whose foreground lane runs on a dedicated thread.
	///
	/// Every thread it starts applies its context's OS priority on a best
	/// effort basis; see the crate docs.
	pub fn spawn(config: DispatcherConfig, initializer: impl ServiceInitializer) -> Result<Self, DispatchError> {
		let (sender, rx) = foreground::channel();
		let name = config.thread_name(ExecutionContext::Foreground);
		let priority = ThreadPriority::for_context(ExecutionContext::Foreground);
		std::thread::Builder::new()
			.name(name)
			.spawn(move || {
				priority.apply();
				ForegroundLane::new(rx).run();
			})
			.map_err(DispatchError::ForegroundThread)?;

		Self::with_foreground(config, initializer, sender)
	}

	/// Starts a dispatcher whose foreground lane is driven by the calling
	/// thread through the returned pump.
	pub fn attach(config: DispatcherConfig, initializer: impl ServiceInitializer) -> Result<(Self, ForegroundPump<R>), DispatchError> {
		let (sender, rx) = foreground::channel();
		let dispatcher = Self::with_foreground(config, initializer, sender)?;
		Ok((dispatcher, ForegroundPump::new(ForegroundLane::new(rx))))
	}

	fn with_foreground(config: DispatcherConfig, initializer: impl ServiceInitializer, foreground: ForegroundSender<R>) -> Result<Self, DispatchError> {
		let user_initiated = WorkerPool::new(ExecutionContext::UserInitiated, &config)?;
		let utility = WorkerPool::new(ExecutionContext::Utility, &config)?;
		Ok(Self {
			inner: Arc::new(DispatcherInner {
				config,
				foreground,
				user_initiated,
				utility,
				init: Arc::new(InitGate::new()),
				initializer: Arc::new(initializer),
			}),
		})
	}

	pub fn config(&self) -> &DispatcherConfig {
		&self.inner.config
	}

	pub fn initialization_state(&self) -> InitializationState {
		self.inner.init.state()
	}

	/// Runs the service initializer once on the utility context.
	///
	/// `on_complete` runs on the foreground lane after the setup work has
	/// finished, whether this call started it, joined an in-flight run, or
	/// arrived after completion. Returns the state observed by this call.
	pub fn initialize_services<F>(&self, on_complete: F) -> InitializationState
	where
		F: FnOnce(&mut Foreground<R>) + Send + 'static,
	{
		self.request_initialization(Some(Box::new(on_complete)))
	}

	/// Starts initialization without waiting on its completion.
	pub fn start_services(&self) -> InitializationState {
		self.request_initialization(None)
	}

	fn request_initialization(&self, on_complete: Option<crate::task::BoxedForegroundTask<R>>) -> InitializationState {
		let observed = self.inner.init.request(on_complete, &self.inner.foreground);
		tracing::debug!(observed = ?observed, "qos.init.request");
		if observed != InitializationState::NotStarted {
			return observed;
		}

		let gate = Arc::clone(&self.inner.init);
		let foreground = self.inner.foreground.clone();
		let initializer = Arc::clone(&self.inner.initializer);
		self.inner.utility.submit(Box::new(move || {
			if let Err(payload) = catch_unwind(AssertUnwindSafe(|| initializer.initialize())) {
				tracing::error!(panic = %panic_message(payload.as_ref()), "service initializer panicked");
			}
			gate.complete(&foreground);
		}));
		observed
	}

	/// Queues work on the serial foreground lane.
	///
	/// Work from one caller runs in submission order and never overlaps other
	/// foreground work. This is the only way to reach the resource.
	pub fn perform_foreground_operation<F>(&self, op: F)
	where
		F: FnOnce(&mut Foreground<R>) + Send + 'static,
	{
		self.inner.foreground.post(ForegroundMessage::Affine(Box::new(op)));
	}

	/// Queues foreground work that must not overtake pending initialization
	/// callbacks.
	///
	/// While initialization is in progress the work waits behind every
	/// callback registered so far and runs right after them. Otherwise it
	/// behaves like [`Self::perform_foreground_operation`].
	pub fn perform_foreground_after_initialization<F>(&self, op: F)
	where
		F: FnOnce(&mut Foreground<R>) + Send + 'static,
	{
		self.inner.init.defer(Box::new(op), &self.inner.foreground);
	}

	/// Queues responsive work that must stay off the foreground lane.
	pub fn perform_user_initiated_operation<F>(&self, op: F)
	where
		F: FnOnce() + Send + 'static,
	{
		self.inner.user_initiated.submit(Box::new(op));
	}

	/// Queues long-running background work. May overlap other utility work.
	pub fn perform_utility_operation<F>(&self, op: F)
	where
		F: FnOnce() + Send + 'static,
	{
		self.inner.utility.submit(Box::new(op));
	}

	/// Routes a boxed task to `context`.
	///
	/// A task routed to [`ExecutionContext::Foreground`] is serialized with
	/// other foreground work but is not lent the resource.
	pub fn perform(&self, context: ExecutionContext, task: Box<dyn Task>) {
		match context {
			ExecutionContext::Foreground => self.inner.foreground.post(ForegroundMessage::Plain(task)),
			ExecutionContext::UserInitiated => self.inner.user_initiated.submit(task),
			ExecutionContext::Utility => self.inner.utility.submit(task),
		}
	}

	/// Runs `work` on `context` and hands its output to `deliver` on the
	/// foreground lane.
	pub fn perform_then<T, W, D>(&self, context: ExecutionContext, work: W, deliver: D)
	where
		T: Send + 'static,
		W: FnOnce() -> T + Send + 'static,
		D: FnOnce(&mut Foreground<R>, T) + Send + 'static,
	{
		if context == ExecutionContext::Foreground {
			self.perform_foreground_operation(move |fg| {
				let output = work();
				deliver(fg, output);
			});
			return;
		}

		let foreground = self.inner.foreground.clone();
		let task: BoxedTask = Box::new(move || {
			let output = work();
			foreground.post(ForegroundMessage::Affine(Box::new(move |fg: &mut Foreground<R>| deliver(fg, output))));
		});
		self.perform(context, task);
	}
}
