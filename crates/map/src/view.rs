use crate::types::{CameraPosition, CameraUpdate, ClusterManager, ClusterManagerId, MapConfiguration, Marker, MarkerId, Polygon, PolygonId};

/// The vendor map view, as seen by the facade.
///
/// Implementations are created and mutated only on the foreground lane, so
/// they need not be `Send`.
pub trait MapView: 'static {
	fn apply_configuration(&mut self, config: &MapConfiguration);

	fn camera_position(&self) -> CameraPosition;
	fn move_camera(&mut self, update: &CameraUpdate);
	fn animate_camera(&mut self, update: &CameraUpdate);

	fn add_markers(&mut self, markers: &[Marker]);
	fn change_markers(&mut self, markers: &[Marker]);
	fn remove_markers(&mut self, ids: &[MarkerId]);

	fn add_polygons(&mut self, polygons: &[Polygon]);
	fn change_polygons(&mut self, polygons: &[Polygon]);
	fn remove_polygons(&mut self, ids: &[PolygonId]);

	fn add_cluster_managers(&mut self, managers: &[ClusterManager]);
	fn remove_cluster_managers(&mut self, ids: &[ClusterManagerId]);
}
