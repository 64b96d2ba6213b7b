//! Opaque units of work accepted by the dispatcher.
//!
//! The dispatcher never inspects a task: it only decides where `run` is
//! called. Any failure inside a task belongs to whoever submitted it.

use crate::foreground::Foreground;

/// Fire-and-forget work for a worker context.
pub trait Task: Send + 'static {
	fn run(self: Box<Self>);
}

impl<F> Task for F
where
	F: FnOnce() + Send + 'static,
{
	fn run(self: Box<Self>) {
		(*self)()
	}
}

/// Work that runs inside the foreground lane with access to its resource.
pub trait ForegroundTask<R>: Send + 'static {
	fn run(self: Box<Self>, fg: &mut Foreground<R>);
}

impl<R, F> ForegroundTask<R> for F
where
	F: FnOnce(&mut Foreground<R>) + Send + 'static,
{
	fn run(self: Box<Self>, fg: &mut Foreground<R>) {
		(*self)(fg)
	}
}

pub(crate) type BoxedTask = Box<dyn Task>;
pub(crate) type BoxedForegroundTask<R> = Box<dyn ForegroundTask<R>>;
