//! Map view operations routed through QoS contexts.
//!
//! [`MapOperationFacade`] classifies every map interaction with an
//! [`OperationKind`] and hands it to the matching
//! [`meridian_qos::ExecutionContext`]. View-touching work only ever runs on
//! the foreground lane, SDK bring-up happens once on the utility context, and
//! [`MapChannel`] decodes calls arriving from the UI framework.

mod channel;
mod config;
mod error;
mod facade;
mod operation;
mod services;
mod types;
mod view;

#[cfg(test)]
mod test_view;

pub use channel::{MapChannel, MethodCall, MethodReply, SHOW_MAP};
pub use config::{API_KEY_ENV, MapServicesConfig};
pub use error::{ConfigError, MethodError};
pub use facade::MapOperationFacade;
pub use operation::OperationKind;
pub use services::{MapServicesInitializer, SdkServices};
pub use types::{
	CameraPosition, CameraUpdate, ClusterManager, ClusterManagerId, ClusterManagerUpdates, DEFAULT_FOCUS_ZOOM,
	GestureSettings, LatLng, MapConfiguration, MapType, Marker, MarkerId, MarkerUpdates, OverlayUpdates, Polygon,
	PolygonId, PolygonUpdates, ZoomBounds,
};
pub use view::MapView;
