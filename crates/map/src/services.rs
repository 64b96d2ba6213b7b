use meridian_qos::ServiceInitializer;

use crate::config::MapServicesConfig;

/// Process-wide services exposed by the vendor SDK.
pub trait SdkServices: Send + Sync + 'static {
	/// Registers the API key. Returns `false` if the SDK rejected it.
	fn provide_api_key(&self, api_key: &str) -> bool;
}

/// Brings the vendor SDK up on the utility context.
pub struct MapServicesInitializer<S> {
	api_key: String,
	sdk: S,
}

impl<S: SdkServices> MapServicesInitializer<S> {
	pub fn new(config: &MapServicesConfig, sdk: S) -> Self {
		Self {
			api_key: config.api_key.clone(),
			sdk,
		}
	}
}

impl<S: SdkServices> ServiceInitializer for MapServicesInitializer<S> {
	fn initialize(&self) {
		if self.sdk.provide_api_key(&self.api_key) {
			tracing::info!("map services ready");
		} else {
			tracing::error!("map SDK rejected the configured API key");
		}
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use parking_lot::Mutex;

	use super::*;

	#[derive(Clone, Default)]
	struct FakeSdk {
		keys: Arc<Mutex<Vec<String>>>,
	}

	impl SdkServices for FakeSdk {
		fn provide_api_key(&self, api_key: &str) -> bool {
			self.keys.lock().push(api_key.to_string());
			true
		}
	}

	#[test]
	fn hands_configured_key_to_sdk() {
		let sdk = FakeSdk::default();
		let init = MapServicesInitializer::new(&MapServicesConfig::with_api_key("abc"), sdk.clone());
		init.initialize();
		assert_eq!(*sdk.keys.lock(), vec!["abc".to_string()]);
	}
}
