use serde::Deserialize;

/// Sizing for the dispatcher's worker contexts.
///
/// Priority ordinals are fixed by [`crate::ExecutionContext`]; only pool
/// sizes and thread naming are configurable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DispatcherConfig {
	/// Worker threads backing the user-initiated context.
	pub user_initiated_threads: usize,
	/// Worker threads backing the utility context. Utility work overlaps
	/// only when this is above one.
	pub utility_threads: usize,
	/// Prefix for every thread the dispatcher names.
	pub thread_name_prefix: String,
}

impl Default for DispatcherConfig {
	fn default() -> Self {
		Self {
			user_initiated_threads: 4,
			utility_threads: 2,
			thread_name_prefix: "meridian".to_string(),
		}
	}
}

impl DispatcherConfig {
	/// Sets the user-initiated pool size. Clamped to at least one thread.
	#[must_use]
	pub fn user_initiated_threads(mut self, threads: usize) -> Self {
		self.user_initiated_threads = threads.max(1);
		self
	}

	/// Sets the utility pool size. Clamped to at least one thread.
	#[must_use]
	pub fn utility_threads(mut self, threads: usize) -> Self {
		self.utility_threads = threads.max(1);
		self
	}

	#[must_use]
	pub fn thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.thread_name_prefix = prefix.into();
		self
	}

	pub(crate) fn thread_name(&self, context: crate::ExecutionContext) -> String {
		format!("{}-{}", self.thread_name_prefix, context.as_str())
	}
}
