//! The serial foreground lane and the affinity handle it lends out.
//!
//! Exactly one [`Foreground`] exists per dispatcher and it never leaves the
//! thread running the lane. Foreground work receives `&mut Foreground<R>`,
//! which is the only way to reach the rendering resource `R`.

use std::cell::Cell;
use std::marker::PhantomData;
use std::panic::{AssertUnwindSafe, catch_unwind};

use tokio::sync::mpsc;

use crate::ExecutionContext;
use crate::panic::panic_message;
use crate::task::{BoxedForegroundTask, BoxedTask};

thread_local! {
	static IN_FOREGROUND: Cell<bool> = const { Cell::new(false) };
}

/// Returns `true` while the current thread is executing foreground work.
pub fn is_foreground() -> bool {
	IN_FOREGROUND.with(Cell::get)
}

struct ForegroundMark {
	previous: bool,
}

impl ForegroundMark {
	fn enter() -> Self {
		Self {
			previous: IN_FOREGROUND.with(|flag| flag.replace(true)),
		}
	}
}

impl Drop for ForegroundMark {
	fn drop(&mut self) {
		IN_FOREGROUND.with(|flag| flag.set(self.previous));
	}
}

/// Foreground-affine slot holding the shared rendering resource.
///
/// Neither `Send` nor `Sync`: a reference obtained inside foreground work
/// cannot escape to a worker context.
pub struct Foreground<R> {
	resource: Option<R>,
	executed: u64,
	_affine: PhantomData<*const ()>,
}

impl<R> Foreground<R> {
	fn new() -> Self {
		Self {
			resource: None,
			executed: 0,
			_affine: PhantomData,
		}
	}

	/// Installs the resource, returning any previously installed one.
	pub fn install(&mut self, resource: R) -> Option<R> {
		tracing::debug!(replaced = self.resource.is_some(), "qos.foreground.install");
		self.resource.replace(resource)
	}

	/// Removes the resource from the lane.
	pub fn take(&mut self) -> Option<R> {
		tracing::debug!(present = self.resource.is_some(), "qos.foreground.take");
		self.resource.take()
	}

	pub fn is_installed(&self) -> bool {
		self.resource.is_some()
	}

	pub fn resource(&self) -> Option<&R> {
		self.resource.as_ref()
	}

	pub fn resource_mut(&mut self) -> Option<&mut R> {
		self.resource.as_mut()
	}

	/// Number of foreground tasks completed before the current one.
	pub fn executed(&self) -> u64 {
		self.executed
	}
}

pub(crate) enum ForegroundMessage<R> {
	/// Work that needs the resource slot.
	Affine(BoxedForegroundTask<R>),
	/// Plain work routed to the foreground lane.
	Plain(BoxedTask),
}

/// Cloneable enqueue side of the foreground lane.
pub(crate) struct ForegroundSender<R> {
	tx: mpsc::UnboundedSender<ForegroundMessage<R>>,
}

impl<R> Clone for ForegroundSender<R> {
	fn clone(&self) -> Self {
		Self { tx: self.tx.clone() }
	}
}

impl<R> ForegroundSender<R> {
	/// Non-blocking enqueue. Work posted after the lane exited is dropped.
	pub fn post(&self, msg: ForegroundMessage<R>) {
		tracing::trace!(qos_context = ExecutionContext::Foreground.as_str(), "qos.submit");
		if self.tx.send(msg).is_err() {
			tracing::warn!(qos_context = ExecutionContext::Foreground.as_str(), "foreground lane closed; dropping work");
		}
	}
}

pub(crate) fn channel<R>() -> (ForegroundSender<R>, mpsc::UnboundedReceiver<ForegroundMessage<R>>) {
	let (tx, rx) = mpsc::unbounded_channel();
	(ForegroundSender { tx }, rx)
}

/// Receiving end plus the resource slot. Lives on the foreground thread.
pub(crate) struct ForegroundLane<R> {
	rx: mpsc::UnboundedReceiver<ForegroundMessage<R>>,
	fg: Foreground<R>,
}

impl<R: 'static> ForegroundLane<R> {
	pub fn new(rx: mpsc::UnboundedReceiver<ForegroundMessage<R>>) -> Self {
		Self { rx, fg: Foreground::new() }
	}

	fn execute(&mut self, msg: ForegroundMessage<R>) {
		let _mark = ForegroundMark::enter();
		let fg = &mut self.fg;
		let outcome = catch_unwind(AssertUnwindSafe(|| match msg {
			ForegroundMessage::Affine(task) => task.run(fg),
			ForegroundMessage::Plain(task) => task.run(),
		}));
		if let Err(payload) = outcome {
			tracing::error!(
				qos_context = ExecutionContext::Foreground.as_str(),
				panic = %panic_message(payload.as_ref()),
				"foreground task panicked"
			);
		}
		self.fg.executed = self.fg.executed.wrapping_add(1);
	}

	/// Runs every queued task without waiting for more.
	pub fn run_pending(&mut self) -> usize {
		let mut ran = 0usize;
		while let Ok(msg) = self.rx.try_recv() {
			self.execute(msg);
			ran += 1;
		}
		ran
	}

	/// Blocks the current thread serving tasks until every sender is gone.
	pub fn run(&mut self) {
		while let Some(msg) = self.rx.blocking_recv() {
			self.execute(msg);
		}
		tracing::debug!(executed = self.fg.executed, "qos.foreground.closed");
	}
}

/// Foreground lane driven by a host-owned UI thread.
///
/// Returned by [`crate::QosDispatcher::attach`]. The thread that owns the
/// pump is the foreground context; the pump cannot be moved to another
/// thread.
pub struct ForegroundPump<R> {
	lane: ForegroundLane<R>,
}

impl<R: 'static> ForegroundPump<R> {
	pub(crate) fn new(lane: ForegroundLane<R>) -> Self {
		Self { lane }
	}

	/// Executes everything currently queued and returns how many tasks ran.
	pub fn run_pending(&mut self) -> usize {
		self.lane.run_pending()
	}

	/// Serves tasks until every dispatcher clone has been dropped.
	///
	/// Must not be called from within an async runtime.
	pub fn run(mut self) {
		self.lane.run();
	}

	pub fn resource(&self) -> Option<&R> {
		self.lane.fg.resource()
	}
}
