/// Execution contexts map work is classified into.
///
/// Ordered by priority: `Foreground > UserInitiated > Utility`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionContext {
	/// Serial lane that owns the rendering resource.
	Foreground,
	/// Responsive work that must not block the foreground lane.
	UserInitiated,
	/// Long-running background work such as SDK bring-up or cache warming.
	Utility,
}

impl ExecutionContext {
	/// All contexts, highest priority first.
	pub const ALL: [Self; 3] = [Self::Foreground, Self::UserInitiated, Self::Utility];

	/// Fixed priority ordinal. Higher runs more aggressively.
	pub const fn priority(self) -> u8 {
		match self {
			Self::Foreground => 2,
			Self::UserInitiated => 1,
			Self::Utility => 0,
		}
	}

	/// How far this context's threads lower their OS scheduling priority
	/// below the thread that built the dispatcher, as a nice-value step.
	pub const fn niceness_offset(self) -> i32 {
		match self {
			Self::Foreground => 0,
			Self::UserInitiated => 4,
			Self::Utility => 10,
		}
	}

	/// Whether work in this context is executed one at a time.
	pub const fn is_serial(self) -> bool {
		matches!(self, Self::Foreground)
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Foreground => "foreground",
			Self::UserInitiated => "user_initiated",
			Self::Utility => "utility",
		}
	}
}

impl PartialOrd for ExecutionContext {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for ExecutionContext {
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		self.priority().cmp(&other.priority())
	}
}

impl std::fmt::Display for ExecutionContext {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn priority_orders_foreground_first() {
		let mut contexts = vec![ExecutionContext::Utility, ExecutionContext::Foreground, ExecutionContext::UserInitiated];
		contexts.sort_by(|a, b| b.cmp(a));
		assert_eq!(contexts, ExecutionContext::ALL.to_vec());
		assert!(ExecutionContext::Foreground > ExecutionContext::UserInitiated);
		assert!(ExecutionContext::UserInitiated > ExecutionContext::Utility);
	}

	#[test]
	fn lower_priority_means_larger_niceness_offset() {
		for pair in ExecutionContext::ALL.windows(2) {
			assert!(pair[0].niceness_offset() < pair[1].niceness_offset(), "{} vs {}", pair[0], pair[1]);
		}
		assert_eq!(ExecutionContext::Foreground.niceness_offset(), 0);
	}

	#[test]
	fn only_foreground_is_serial() {
		assert!(ExecutionContext::Foreground.is_serial());
		assert!(!ExecutionContext::UserInitiated.is_serial());
		assert!(!ExecutionContext::Utility.is_serial());
	}
}
