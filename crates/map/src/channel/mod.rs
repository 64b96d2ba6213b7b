//! Entry point for calls arriving over the UI framework's method channel.

use std::sync::Arc;

use serde::Deserialize;

use crate::error::MethodError;
use crate::facade::MapOperationFacade;
use crate::types::LatLng;
use crate::view::MapView;

pub const SHOW_MAP: &str = "showMap";

/// Decoded channel invocation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MethodCall {
	pub method: String,
	#[serde(default)]
	pub arguments: serde_json::Value,
}

impl MethodCall {
	pub fn new(method: impl Into<String>, arguments: serde_json::Value) -> Self {
		Self {
			method: method.into(),
			arguments,
		}
	}
}

/// Successful reply sent back across the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodReply {
	Success,
}

impl MethodReply {
	pub fn to_json(self) -> serde_json::Value {
		match self {
			Self::Success => serde_json::Value::Null,
		}
	}
}

#[derive(Deserialize)]
struct ShowMapArgs {
	latitude: f64,
	longitude: f64,
}

type ViewFactory<V> = Arc<dyn Fn() -> V + Send + Sync>;

/// Dispatches channel calls onto a [`MapOperationFacade`].
pub struct MapChannel<V: MapView> {
	facade: MapOperationFacade<V>,
	factory: ViewFactory<V>,
}

impl<V: MapView> MapChannel<V> {
	/// `factory` builds a view on the foreground lane each time a map opens.
	pub fn new(facade: MapOperationFacade<V>, factory: impl Fn() -> V + Send + Sync + 'static) -> Self {
		Self {
			facade,
			factory: Arc::new(factory),
		}
	}

	pub fn facade(&self) -> &MapOperationFacade<V> {
		&self.facade
	}

	pub fn handle(&self, call: &MethodCall) -> Result<MethodReply, MethodError> {
		tracing::debug!(method = %call.method, "map.channel.call");
		match call.method.as_str() {
			SHOW_MAP => {
				let args = ShowMapArgs::deserialize(&call.arguments).map_err(|error| {
					tracing::debug!(%error, "map.channel.invalid_args");
					MethodError::InvalidArgs(SHOW_MAP.to_string())
				})?;
				let factory = Arc::clone(&self.factory);
				self.facade.show_map(move || factory(), LatLng::new(args.latitude, args.longitude));
				Ok(MethodReply::Success)
			}
			other => Err(MethodError::NotImplemented(other.to_string())),
		}
	}

	/// Handles a raw JSON call and always produces a wire reply.
	pub fn handle_json(&self, raw: &str) -> serde_json::Value {
		match serde_json::from_str::<MethodCall>(raw) {
			Ok(call) => match self.handle(&call) {
				Ok(reply) => reply.to_json(),
				Err(error) => error.envelope(),
			},
			Err(error) => {
				tracing::debug!(%error, "map.channel.malformed");
				MethodError::InvalidArgs("<malformed call>".to_string()).envelope()
			}
		}
	}
}
