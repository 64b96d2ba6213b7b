//! Best-effort OS scheduling priority for dispatcher threads.
//!
//! On Linux and Android the nice value is per thread, so every thread a
//! dispatcher starts sets its own nice value to the base captured when the
//! dispatcher was built plus its context's
//! [`ExecutionContext::niceness_offset`]. Raising priority above the base
//! needs privileges, which is why the foreground lane stays at the base.
//! Other platforms share one nice value per process and are left untouched.

use crate::ExecutionContext;

/// Largest nice value the kernel accepts.
const MAX_NICE: i32 = 19;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ThreadPriority {
	context: ExecutionContext,
	niceness: i32,
}

impl ThreadPriority {
	/// Priority for `context` relative to the calling thread.
	pub fn for_context(context: ExecutionContext) -> Self {
		Self::from_base(current_niceness(), context)
	}

	pub fn from_base(base: i32, context: ExecutionContext) -> Self {
		Self {
			context,
			niceness: base.saturating_add(context.niceness_offset()).min(MAX_NICE),
		}
	}

	pub fn niceness(self) -> i32 {
		self.niceness
	}

	/// Applies the priority to the calling thread. Failures are logged and
	/// otherwise ignored.
	#[cfg(any(target_os = "linux", target_os = "android"))]
	pub fn apply(self) {
		if let Err(err) = rustix::process::setpriority_process(None, self.niceness) {
			tracing::debug!(qos_context = self.context.as_str(), niceness = self.niceness, %err, "qos.priority.unavailable");
		}
	}

	#[cfg(not(any(target_os = "linux", target_os = "android")))]
	pub fn apply(self) {
		tracing::trace!(qos_context = self.context.as_str(), "qos.priority.unsupported");
	}
}

#[cfg(any(target_os = "linux", target_os = "android"))]
pub(crate) fn current_niceness() -> i32 {
	rustix::process::getpriority_process(None).unwrap_or(0)
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
pub(crate) fn current_niceness() -> i32 {
	0
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn offsets_stack_on_base_and_clamp() {
		assert_eq!(ThreadPriority::from_base(0, ExecutionContext::Foreground).niceness(), 0);
		assert_eq!(ThreadPriority::from_base(0, ExecutionContext::UserInitiated).niceness(), 4);
		assert_eq!(ThreadPriority::from_base(5, ExecutionContext::Utility).niceness(), 15);
		assert_eq!(ThreadPriority::from_base(12, ExecutionContext::Utility).niceness(), MAX_NICE);
	}

	#[cfg(any(target_os = "linux", target_os = "android"))]
	#[test]
	fn apply_only_touches_calling_thread() {
		let base = current_niceness();
		let applied = std::thread::spawn(|| {
			let priority = ThreadPriority::for_context(ExecutionContext::Utility);
			priority.apply();
			(priority.niceness(), current_niceness())
		})
		.join()
		.unwrap();

		assert_eq!(applied.0, applied.1);
		assert_eq!(current_niceness(), base);
	}
}
