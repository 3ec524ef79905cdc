//! Per-session lifecycle handles installed on views.

use std::fmt;
use std::sync::Weak;

use crate::registry::Shared;
use crate::{SessionId, StateBundle};

/// Forwards one view's lifecycle events to the registry, tagged with the
/// session the view was attached to.
///
/// Holds only the session id and a weak registry reference: once the
/// registry is gone every call is a no-op, and a stale handle for a destroyed
/// session is harmless.
#[derive(Clone)]
pub struct LifecycleHandle {
	registry: Weak<Shared>,
	id: SessionId,
}

impl LifecycleHandle {
	pub(crate) fn new(registry: Weak<Shared>, id: SessionId) -> Self {
		Self { registry, id }
	}

	/// Session this handle reports for.
	pub fn id(&self) -> &SessionId {
		&self.id
	}

	pub fn resumed(&self) {
		if let Some(shared) = self.registry.upgrade() {
			shared.notify_resumed(&self.id);
		}
	}

	pub fn paused(&self) {
		if let Some(shared) = self.registry.upgrade() {
			shared.notify_paused(&self.id);
		}
	}

	pub fn ready(&self) {
		if let Some(shared) = self.registry.upgrade() {
			shared.notify_ready(&self.id);
		}
	}

	/// View teardown. `retain` keeps the presenter warm for reattachment.
	pub fn destroyed(&self, retain: bool) {
		if let Some(shared) = self.registry.upgrade() {
			shared.detach(&self.id, retain);
		}
	}

	/// Permanent teardown, the usual case for child views.
	pub fn destroyed_permanently(&self) {
		self.destroyed(false);
	}

	/// Saves the session id into `bundle` if this is a root session.
	pub fn persisted(&self, bundle: &mut StateBundle) {
		if let Some(shared) = self.registry.upgrade() {
			shared.persist(&self.id, bundle);
		}
	}
}

impl fmt::Debug for LifecycleHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("LifecycleHandle")
			.field("id", &self.id)
			.field("live", &(self.registry.strong_count() > 0))
			.finish()
	}
}
