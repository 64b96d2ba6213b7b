//! Recording [`MapView`] used by the crate's tests.

use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::Arc;

use meridian_qos::is_foreground;
use parking_lot::Mutex;

use crate::types::{
	CameraPosition, CameraUpdate, ClusterManager, ClusterManagerId, LatLng, MapConfiguration, MapType, Marker, MarkerId, Polygon, PolygonId,
};
use crate::view::MapView;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
	Created,
	Dropped,
	Configured(Option<MapType>),
	MoveCamera(CameraUpdate),
	AnimateCamera(CameraUpdate),
	MarkersAdded(Vec<MarkerId>),
	MarkersChanged(Vec<MarkerId>),
	MarkersRemoved(Vec<MarkerId>),
	PolygonsAdded(Vec<PolygonId>),
	PolygonsChanged(Vec<PolygonId>),
	PolygonsRemoved(Vec<PolygonId>),
	ClusterManagersAdded(usize),
	ClusterManagersRemoved(usize),
}

#[derive(Default)]
struct LogState {
	events: Vec<ViewEvent>,
	off_foreground: usize,
}

/// Shared event log. Clones observe the same events.
#[derive(Clone, Default)]
pub struct ViewLog {
	state: Arc<Mutex<LogState>>,
}

impl ViewLog {
	fn push(&self, event: ViewEvent) {
		let mut state = self.state.lock();
		if !is_foreground() {
			state.off_foreground += 1;
		}
		state.events.push(event);
	}

	pub fn events(&self) -> Vec<ViewEvent> {
		self.state.lock().events.clone()
	}

	/// `true` if every event was recorded on the foreground lane.
	pub fn all_on_foreground(&self) -> bool {
		self.state.lock().off_foreground == 0
	}
}

/// `!Send` like a real platform view.
pub struct RecordingView {
	log: ViewLog,
	camera: CameraPosition,
	_affine: PhantomData<Rc<()>>,
}

impl RecordingView {
	pub fn new(log: ViewLog) -> Self {
		log.push(ViewEvent::Created);
		Self {
			log,
			camera: CameraPosition::focused(LatLng::new(0.0, 0.0), 2.0),
			_affine: PhantomData,
		}
	}

	fn record_nonempty<T>(&self, items: &[T], event: impl FnOnce(&[T]) -> ViewEvent) {
		if !items.is_empty() {
			self.log.push(event(items));
		}
	}
}

impl Drop for RecordingView {
	fn drop(&mut self) {
		self.log.push(ViewEvent::Dropped);
	}
}

impl MapView for RecordingView {
	fn apply_configuration(&mut self, config: &MapConfiguration) {
		if let Some(camera) = config.initial_camera {
			self.camera = camera;
		}
		self.log.push(ViewEvent::Configured(config.map_type));
	}

	fn camera_position(&self) -> CameraPosition {
		self.camera
	}

	fn move_camera(&mut self, update: &CameraUpdate) {
		self.camera = update.resolve(self.camera);
		self.log.push(ViewEvent::MoveCamera(*update));
	}

	fn animate_camera(&mut self, update: &CameraUpdate) {
		self.camera = update.resolve(self.camera);
		self.log.push(ViewEvent::AnimateCamera(*update));
	}

	fn add_markers(&mut self, markers: &[Marker]) {
		self.record_nonempty(markers, |m| ViewEvent::MarkersAdded(m.iter().map(|m| m.id.clone()).collect()));
	}

	fn change_markers(&mut self, markers: &[Marker]) {
		self.record_nonempty(markers, |m| ViewEvent::MarkersChanged(m.iter().map(|m| m.id.clone()).collect()));
	}

	fn remove_markers(&mut self, ids: &[MarkerId]) {
		self.record_nonempty(ids, |ids| ViewEvent::MarkersRemoved(ids.to_vec()));
	}

	fn add_polygons(&mut self, polygons: &[Polygon]) {
		self.record_nonempty(polygons, |p| ViewEvent::PolygonsAdded(p.iter().map(|p| p.id.clone()).collect()));
	}

	fn change_polygons(&mut self, polygons: &[Polygon]) {
		self.record_nonempty(polygons, |p| ViewEvent::PolygonsChanged(p.iter().map(|p| p.id.clone()).collect()));
	}

	fn remove_polygons(&mut self, ids: &[PolygonId]) {
		self.record_nonempty(ids, |ids| ViewEvent::PolygonsRemoved(ids.to_vec()));
	}

	fn add_cluster_managers(&mut self, managers: &[ClusterManager]) {
		self.record_nonempty(managers, |m| ViewEvent::ClusterManagersAdded(m.len()));
	}

	fn remove_cluster_managers(&mut self, ids: &[ClusterManagerId]) {
		self.record_nonempty(ids, |ids| ViewEvent::ClusterManagersRemoved(ids.len()));
	}
}
