use meridian_qos::{DispatchError, Foreground, InitializationState, QosDispatcher};

use crate::config::MapServicesConfig;
use crate::operation::OperationKind;
use crate::services::{MapServicesInitializer, SdkServices};
use crate::types::{CameraPosition, CameraUpdate, ClusterManagerUpdates, DEFAULT_FOCUS_ZOOM, LatLng, MapConfiguration, Marker, MarkerUpdates, PolygonUpdates};
use crate::view::MapView;

/// Routes every map interaction through the matching QoS context.
///
/// View-touching calls are queued on the foreground lane and reach the view
/// only there, in the order each caller issued them. Calls made before a
/// view is attached are skipped.
pub struct MapOperationFacade<V: MapView> {
	qos: QosDispatcher<V>,
}

impl<V: MapView> Clone for MapOperationFacade<V> {
	fn clone(&self) -> Self {
		Self { qos: self.qos.clone() }
	}
}

impl<V: MapView> MapOperationFacade<V> {
	pub fn new(qos: QosDispatcher<V>) -> Self {
		Self { qos }
	}

	/// Starts a dispatcher whose initializer hands `config`'s key to `sdk`.
	pub fn spawn(config: &MapServicesConfig, sdk: impl SdkServices) -> Result<Self, DispatchError> {
		let initializer = MapServicesInitializer::new(config, sdk);
		let qos = QosDispatcher::spawn(config.dispatcher.clone(), initializer)?;
		Ok(Self::new(qos))
	}

	pub fn dispatcher(&self) -> &QosDispatcher<V> {
		&self.qos
	}

	fn on_view<F>(&self, kind: OperationKind, op: F)
	where
		F: FnOnce(&mut V) + Send + 'static,
	{
		debug_assert!(kind.touches_view());
		self.qos.perform_foreground_after_initialization(move |fg| match fg.resource_mut() {
			Some(view) => {
				tracing::trace!(kind = kind.as_str(), "map.op");
				op(view);
			}
			None => tracing::debug!(kind = kind.as_str(), "no map view attached; skipping"),
		});
	}

	/// Runs a job that needs no view access in the context its kind maps to.
	pub fn run_classified<F>(&self, kind: OperationKind, job: F)
	where
		F: FnOnce() + Send + 'static,
	{
		tracing::trace!(kind = kind.as_str(), qos_context = kind.context().as_str(), "map.classified");
		self.qos.perform(kind.context(), Box::new(job));
	}

	/// Brings the SDK services up once; `on_ready` runs on the foreground lane.
	pub fn ensure_services<F>(&self, on_ready: F) -> InitializationState
	where
		F: FnOnce(&mut Foreground<V>) + Send + 'static,
	{
		tracing::trace!(kind = OperationKind::ServiceBringUp.as_str(), "map.classified");
		self.qos.initialize_services(on_ready)
	}

	/// Creates the view on the foreground lane once services are up.
	///
	/// View operations issued afterwards by the same caller reach the new
	/// view in order, even while services are still coming up.
	pub fn attach_view<F>(&self, factory: F)
	where
		F: FnOnce() -> V + Send + 'static,
	{
		self.ensure_services(move |fg| {
			if fg.install(factory()).is_some() {
				tracing::debug!(kind = OperationKind::ViewLifecycle.as_str(), "replaced existing map view");
			}
		});
	}

	/// Releases the view. Later view operations are skipped until a new one
	/// is attached.
	pub fn detach_view(&self) {
		self.qos.perform_foreground_after_initialization(|fg| {
			tracing::debug!(kind = OperationKind::ViewLifecycle.as_str(), attached = fg.is_installed(), "map.detach");
			drop(fg.take());
		});
	}

	/// Opens a view focused on `target` with a single marker there.
	pub fn show_map<F>(&self, factory: F, target: LatLng)
	where
		F: FnOnce() -> V + Send + 'static,
	{
		self.attach_view(factory);
		let position = CameraPosition::focused(target, DEFAULT_FOCUS_ZOOM);
		self.update_camera(CameraUpdate::NewCameraPosition { position }, false);
		self.update_markers(MarkerUpdates {
			to_add: vec![Marker::new("focus", target)],
			..MarkerUpdates::default()
		});
	}

	pub fn apply_configuration(&self, config: MapConfiguration) {
		self.on_view(OperationKind::ApplyConfiguration, move |view| view.apply_configuration(&config));
	}

	pub fn update_camera(&self, update: CameraUpdate, animated: bool) {
		self.on_view(OperationKind::CameraUpdate, move |view| {
			if animated {
				view.animate_camera(&update);
			} else {
				view.move_camera(&update);
			}
		});
	}

	pub fn update_markers(&self, updates: MarkerUpdates) {
		if updates.is_empty() {
			return;
		}
		self.on_view(OperationKind::MarkerMutation, move |view| {
			view.add_markers(&updates.to_add);
			view.change_markers(&updates.to_change);
			view.remove_markers(&updates.ids_to_remove);
		});
	}

	pub fn update_polygons(&self, updates: PolygonUpdates) {
		if updates.is_empty() {
			return;
		}
		self.on_view(OperationKind::OverlayMutation, move |view| {
			view.add_polygons(&updates.to_add);
			view.change_polygons(&updates.to_change);
			view.remove_polygons(&updates.ids_to_remove);
		});
	}

	pub fn update_cluster_managers(&self, updates: ClusterManagerUpdates) {
		if updates.to_add.is_empty() && updates.ids_to_remove.is_empty() {
			return;
		}
		self.on_view(OperationKind::ClusterMutation, move |view| {
			view.add_cluster_managers(&updates.to_add);
			view.remove_cluster_managers(&updates.ids_to_remove);
		});
	}

	/// Prepares data off the foreground lane, then applies it to the view.
	pub fn prepare_then_apply<T, P, A>(&self, prepare: P, apply: A)
	where
		T: Send + 'static,
		P: FnOnce() -> T + Send + 'static,
		A: FnOnce(&mut V, T) + Send + 'static,
	{
		let kind = OperationKind::OverlayPreparation;
		self.qos.perform_then(kind.context(), prepare, move |fg, prepared| match fg.resource_mut() {
			Some(view) => apply(view, prepared),
			None => tracing::debug!(kind = kind.as_str(), "no map view attached; dropping prepared data"),
		});
	}

	/// Queues cache warming or prefetch work on the utility context.
	pub fn warm_cache<F>(&self, job: F)
	where
		F: FnOnce() + Send + 'static,
	{
		self.run_classified(OperationKind::CacheWarming, job);
	}
}
