use meridian_qos::ExecutionContext;

/// Kinds of map interaction the facade schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
	/// Style, initial camera and gesture settings.
	ApplyConfiguration,
	CameraUpdate,
	MarkerMutation,
	OverlayMutation,
	ClusterMutation,
	/// Creating or releasing the view itself.
	ViewLifecycle,
	/// Decoding or preparing data that is applied to the view afterwards.
	OverlayPreparation,
	/// One-time SDK service bring-up.
	ServiceBringUp,
	/// Cache warming and prefetch-style work.
	CacheWarming,
}

impl OperationKind {
	/// Execution context this kind of work belongs to.
	pub const fn context(self) -> ExecutionContext {
		match self {
			Self::ApplyConfiguration | Self::CameraUpdate | Self::MarkerMutation | Self::OverlayMutation | Self::ClusterMutation | Self::ViewLifecycle => {
				ExecutionContext::Foreground
			}
			Self::OverlayPreparation => ExecutionContext::UserInitiated,
			Self::ServiceBringUp | Self::CacheWarming => ExecutionContext::Utility,
		}
	}

	/// Whether this kind reads or mutates the map view.
	pub const fn touches_view(self) -> bool {
		matches!(self.context(), ExecutionContext::Foreground)
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::ApplyConfiguration => "apply_configuration",
			Self::CameraUpdate => "camera_update",
			Self::MarkerMutation => "marker_mutation",
			Self::OverlayMutation => "overlay_mutation",
			Self::ClusterMutation => "cluster_mutation",
			Self::ViewLifecycle => "view_lifecycle",
			Self::OverlayPreparation => "overlay_preparation",
			Self::ServiceBringUp => "service_bring_up",
			Self::CacheWarming => "cache_warming",
		}
	}
}
