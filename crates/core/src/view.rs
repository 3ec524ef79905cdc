//! View contract consumed by the registry.

use std::any::{Any, type_name};
use std::sync::Arc;

use crate::LifecycleHandle;

/// Type-erasure helpers every view gets for free.
///
/// Factories use these to match a view's concrete type; diagnostics use the
/// type name.
pub trait ViewAny: Any + Send + Sync {
	fn as_any(&self) -> &dyn Any;
	fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
	fn view_type_name(&self) -> &'static str;
}

impl<T: Any + Send + Sync> ViewAny for T {
	fn as_any(&self) -> &dyn Any {
		self
	}

	fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
		self
	}

	fn view_type_name(&self) -> &'static str {
		type_name::<T>()
	}
}

/// A transient UI surface bound to one presenter session at a time.
///
/// The registry installs a [`LifecycleHandle`] on attach and clears it with
/// `None` when the view is unbound. Views forward their own resume, pause,
/// ready, destroy and save events through the installed handle.
pub trait View: ViewAny {
	/// Installs (`Some`) or clears (`None`) this view's lifecycle handle.
	///
	/// # Deadlocks
	///
	/// Called while the registry lock is held. Calling any method on the
	/// handle, or on the registry, from inside this function deadlocks.
	/// Queue pending events and forward them after the attach call returns.
	fn set_lifecycle_listener(&self, listener: Option<LifecycleHandle>);
}
