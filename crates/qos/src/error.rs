//! Errors raised while bringing a dispatcher up.

use thiserror::Error;

use crate::ExecutionContext;

/// Failure to create one of the dispatcher's execution contexts.
///
/// Submitting work never fails; only construction does.
#[derive(Debug, Error)]
pub enum DispatchError {
	/// A worker runtime could not be built.
	#[error("failed to build {context} runtime: {source}")]
	Runtime {
		context: ExecutionContext,
		#[source]
		source: std::io::Error,
	},
	/// The dedicated foreground thread could not be spawned.
	#[error("failed to spawn foreground thread: {0}")]
	ForegroundThread(#[source] std::io::Error),
}
