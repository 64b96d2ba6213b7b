//! One-time service initialization gate.

use parking_lot::Mutex;

use crate::foreground::{ForegroundMessage, ForegroundSender};
use crate::task::BoxedForegroundTask;

/// Progress of the dispatcher's one-time service initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InitializationState {
	NotStarted,
	InProgress,
	Completed,
}

/// Expensive setup work run once on the utility context.
pub trait ServiceInitializer: Send + Sync + 'static {
	fn initialize(&self);
}

impl<F> ServiceInitializer for F
where
	F: Fn() + Send + Sync + 'static,
{
	fn initialize(&self) {
		self()
	}
}

enum GateState<R> {
	NotStarted,
	InProgress(Vec<BoxedForegroundTask<R>>),
	Completed,
}

/// Tracks initialization and the callbacks waiting on it.
///
/// Callbacks that arrive while the setup work is in flight are queued and
/// posted to the foreground lane exactly once when it finishes.
pub(crate) struct InitGate<R> {
	state: Mutex<GateState<R>>,
}

impl<R> InitGate<R> {
	pub fn new() -> Self {
		Self {
			state: Mutex::new(GateState::NotStarted),
		}
	}

	pub fn state(&self) -> InitializationState {
		match &*self.state.lock() {
			GateState::NotStarted => InitializationState::NotStarted,
			GateState::InProgress(_) => InitializationState::InProgress,
			GateState::Completed => InitializationState::Completed,
		}
	}

	/// Registers a request and returns the state observed before it.
	///
	/// Only a `NotStarted` return obliges the caller to launch the setup work.
	pub fn request(&self, on_complete: Option<BoxedForegroundTask<R>>, foreground: &ForegroundSender<R>) -> InitializationState {
		let mut state = self.state.lock();
		match &mut *state {
			GateState::NotStarted => {
				*state = GateState::InProgress(on_complete.into_iter().collect());
				InitializationState::NotStarted
			}
			GateState::InProgress(waiters) => {
				waiters.extend(on_complete);
				InitializationState::InProgress
			}
			GateState::Completed => {
				if let Some(cb) = on_complete {
					foreground.post(ForegroundMessage::Affine(cb));
				}
				InitializationState::Completed
			}
		}
	}

	/// Queues `task` behind the callbacks of an in-flight run, or posts it
	/// straight to the foreground lane when no run is in flight.
	pub fn defer(&self, task: BoxedForegroundTask<R>, foreground: &ForegroundSender<R>) {
		let mut state = self.state.lock();
		match &mut *state {
			GateState::InProgress(waiters) => waiters.push(task),
			GateState::NotStarted | GateState::Completed => foreground.post(ForegroundMessage::Affine(task)),
		}
	}

	/// Marks initialization complete and releases every queued callback.
	pub fn complete(&self, foreground: &ForegroundSender<R>) {
		let mut state = self.state.lock();
		let previous = std::mem::replace(&mut *state, GateState::Completed);
		let GateState::InProgress(waiters) = previous else {
			tracing::warn!("qos.init.complete without an in-flight run");
			return;
		};
		tracing::debug!(waiters = waiters.len(), "qos.init.completed");
		// Posted under the lock so later requests queue behind these.
		for cb in waiters {
			foreground.post(ForegroundMessage::Affine(cb));
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::foreground::{ForegroundLane, channel};

	#[test]
	fn state_machine_never_reverts() {
		let (tx, rx) = channel::<Vec<&'static str>>();
		let gate = InitGate::new();
		assert_eq!(gate.state(), InitializationState::NotStarted);

		let first = gate.request(Some(Box::new(|fg: &mut crate::Foreground<Vec<&'static str>>| fg.resource_mut().unwrap().push("first"))), &tx);
		assert_eq!(first, InitializationState::NotStarted);
		assert_eq!(gate.state(), InitializationState::InProgress);

		let second = gate.request(Some(Box::new(|fg: &mut crate::Foreground<Vec<&'static str>>| fg.resource_mut().unwrap().push("second"))), &tx);
		assert_eq!(second, InitializationState::InProgress);

		let mut lane = ForegroundLane::new(rx);
		tx.post(ForegroundMessage::Affine(Box::new(|fg: &mut crate::Foreground<Vec<&'static str>>| {
			fg.install(Vec::new());
		})));
		assert_eq!(lane.run_pending(), 1, "waiters must not fire before completion");

		gate.complete(&tx);
		assert_eq!(gate.state(), InitializationState::Completed);

		let late = gate.request(Some(Box::new(|fg: &mut crate::Foreground<Vec<&'static str>>| fg.resource_mut().unwrap().push("late"))), &tx);
		assert_eq!(late, InitializationState::Completed);
		assert_eq!(gate.request(None, &tx), InitializationState::Completed);

		assert_eq!(lane.run_pending(), 3);
		let pump = crate::ForegroundPump::new(lane);
		assert_eq!(pump.resource(), Some(&vec!["first", "second", "late"]));
	}
}
