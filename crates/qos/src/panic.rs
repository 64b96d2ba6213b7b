use std::any::Any;

use tokio::task::JoinError;

/// Extracts a readable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
	if let Some(msg) = payload.downcast_ref::<&'static str>() {
		return (*msg).to_string();
	}
	if let Some(msg) = payload.downcast_ref::<String>() {
		return msg.clone();
	}
	"non-string panic payload".to_string()
}

/// Returns the panic message for a panicked task, `None` for cancellation.
pub(crate) fn join_error_panic_message(err: JoinError) -> Option<String> {
	if !err.is_panic() {
		return None;
	}
	let payload = err.into_panic();
	Some(panic_message(payload.as_ref()))
}

#[cfg(test)]
#[path = "panic_tests.rs"]
mod tests;
