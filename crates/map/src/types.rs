//! Data-transfer types handed to the map view.
//!
//! These mirror what the UI framework marshals across its channel. They are
//! plain values: validation beyond deserialization is the view's concern.

use serde::{Deserialize, Serialize};

/// Zoom used when a map is opened on a single location.
pub const DEFAULT_FOCUS_ZOOM: f32 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
	pub latitude: f64,
	pub longitude: f64,
}

impl LatLng {
	pub const fn new(latitude: f64, longitude: f64) -> Self {
		Self { latitude, longitude }
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraPosition {
	pub target: LatLng,
	pub zoom: f32,
	#[serde(default)]
	pub bearing: f32,
	#[serde(default)]
	pub tilt: f32,
}

impl CameraPosition {
	/// Camera looking straight down at `target`.
	pub const fn focused(target: LatLng, zoom: f32) -> Self {
		Self {
			target,
			zoom,
			bearing: 0.0,
			tilt: 0.0,
		}
	}
}

/// Camera movement requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CameraUpdate {
	NewCameraPosition { position: CameraPosition },
	NewLatLng { target: LatLng },
	NewLatLngZoom { target: LatLng, zoom: f32 },
	ZoomBy { amount: f32 },
	ZoomIn,
	ZoomOut,
	ZoomTo { zoom: f32 },
}

impl CameraUpdate {
	/// Resolves the update against the current camera.
	pub fn resolve(&self, current: CameraPosition) -> CameraPosition {
		match *self {
			Self::NewCameraPosition { position } => position,
			Self::NewLatLng { target } => CameraPosition { target, ..current },
			Self::NewLatLngZoom { target, zoom } => CameraPosition { target, zoom, ..current },
			Self::ZoomBy { amount } => CameraPosition {
				zoom: current.zoom + amount,
				..current
			},
			Self::ZoomIn => CameraPosition {
				zoom: current.zoom + 1.0,
				..current
			},
			Self::ZoomOut => CameraPosition {
				zoom: current.zoom - 1.0,
				..current
			},
			Self::ZoomTo { zoom } => CameraPosition { zoom, ..current },
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MapType {
	None,
	#[default]
	Normal,
	Satellite,
	Terrain,
	Hybrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomBounds {
	pub min: f32,
	pub max: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GestureSettings {
	pub rotate: Option<bool>,
	pub scroll: Option<bool>,
	pub tilt: Option<bool>,
	pub zoom: Option<bool>,
}

/// Partial map configuration. `None` fields leave the view's value alone.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapConfiguration {
	pub map_type: Option<MapType>,
	/// Vendor style JSON.
	pub style: Option<String>,
	pub initial_camera: Option<CameraPosition>,
	pub zoom_bounds: Option<ZoomBounds>,
	pub gestures: GestureSettings,
	pub my_location_enabled: Option<bool>,
	pub traffic_enabled: Option<bool>,
	pub buildings_enabled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolygonId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterManagerId(pub String);

fn visible_default() -> bool {
	true
}

fn opaque_default() -> f32 {
	1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
	pub id: MarkerId,
	pub position: LatLng,
	#[serde(default)]
	pub title: Option<String>,
	#[serde(default)]
	pub snippet: Option<String>,
	#[serde(default = "opaque_default")]
	pub alpha: f32,
	#[serde(default)]
	pub draggable: bool,
	#[serde(default = "visible_default")]
	pub visible: bool,
	#[serde(default)]
	pub z_index: f32,
	#[serde(default)]
	pub cluster_manager_id: Option<ClusterManagerId>,
}

impl Marker {
	pub fn new(id: impl Into<String>, position: LatLng) -> Self {
		Self {
			id: MarkerId(id.into()),
			position,
			title: None,
			snippet: None,
			alpha: 1.0,
			draggable: false,
			visible: true,
			z_index: 0.0,
			cluster_manager_id: None,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Polygon {
	pub id: PolygonId,
	pub points: Vec<LatLng>,
	#[serde(default)]
	pub holes: Vec<Vec<LatLng>>,
	/// ARGB.
	#[serde(default)]
	pub fill_color: u32,
	/// ARGB.
	#[serde(default)]
	pub stroke_color: u32,
	#[serde(default)]
	pub stroke_width: u32,
	#[serde(default = "visible_default")]
	pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterManager {
	pub id: ClusterManagerId,
}

/// Batched add / change / remove request for one kind of overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayUpdates<T, Id> {
	#[serde(default = "Vec::new")]
	pub to_add: Vec<T>,
	#[serde(default = "Vec::new")]
	pub to_change: Vec<T>,
	#[serde(default = "Vec::new")]
	pub ids_to_remove: Vec<Id>,
}

impl<T, Id> Default for OverlayUpdates<T, Id> {
	fn default() -> Self {
		Self {
			to_add: Vec::new(),
			to_change: Vec::new(),
			ids_to_remove: Vec::new(),
		}
	}
}

impl<T, Id> OverlayUpdates<T, Id> {
	pub fn is_empty(&self) -> bool {
		self.to_add.is_empty() && self.to_change.is_empty() && self.ids_to_remove.is_empty()
	}
}

pub type MarkerUpdates = OverlayUpdates<Marker, MarkerId>;
pub type PolygonUpdates = OverlayUpdates<Polygon, PolygonId>;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterManagerUpdates {
	#[serde(default)]
	pub to_add: Vec<ClusterManager>,
	#[serde(default)]
	pub ids_to_remove: Vec<ClusterManagerId>,
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn camera_updates_resolve_against_current() {
		let start = CameraPosition {
			target: LatLng::new(1.0, 2.0),
			zoom: 10.0,
			bearing: 30.0,
			tilt: 5.0,
		};
		let moved = CameraUpdate::NewLatLng {
			target: LatLng::new(3.0, 4.0),
		}
		.resolve(start);
		assert_eq!(moved.target, LatLng::new(3.0, 4.0));
		assert_eq!(moved.zoom, 10.0);
		assert_eq!(moved.bearing, 30.0);

		assert_eq!(CameraUpdate::ZoomIn.resolve(start).zoom, 11.0);
		assert_eq!(CameraUpdate::ZoomBy { amount: -2.5 }.resolve(start).zoom, 7.5);
		assert_eq!(CameraUpdate::ZoomTo { zoom: 3.0 }.resolve(start).target, start.target);
	}

	#[test]
	fn marker_defaults_fill_in_when_marshalled() {
		let marker: Marker = serde_json::from_str(r#"{"id":"m1","position":{"latitude":1.5,"longitude":-2.0}}"#).unwrap();
		assert_eq!(marker, Marker::new("m1", LatLng::new(1.5, -2.0)));
	}

	#[test]
	fn camera_update_uses_type_tag() {
		let update: CameraUpdate = serde_json::from_str(r#"{"type":"newLatLngZoom","target":{"latitude":0.0,"longitude":0.0},"zoom":4}"#).unwrap();
		assert_eq!(
			update,
			CameraUpdate::NewLatLngZoom {
				target: LatLng::new(0.0, 0.0),
				zoom: 4.0
			}
		);
	}

	#[test]
	fn partial_configuration_leaves_unset_fields_empty() {
		let config: MapConfiguration = serde_json::from_str(r#"{"mapType":"hybrid","gestures":{"tilt":false}}"#).unwrap();
		assert_eq!(config.map_type, Some(MapType::Hybrid));
		assert_eq!(config.gestures.tilt, Some(false));
		assert_eq!(config.gestures.zoom, None);
		assert_eq!(config.initial_camera, None);
	}
}
