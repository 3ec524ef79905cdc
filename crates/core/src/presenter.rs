//! Presenter capability contract.

use std::any::Any;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::View;

/// Presenter handle shared out of the registry.
///
/// The registry node stays the owner; callers get a second reference for
/// inspection. Lock order is registry first, presenter second: do not hold a
/// presenter lock while calling into the registry.
pub type SharedPresenter = Arc<Mutex<Box<dyn Presenter>>>;

/// Business logic bound to at most one view at a time.
///
/// The registry drives every method; implementations never call themselves
/// into the registry from these callbacks.
pub trait Presenter: Send + 'static {
	/// Begins using `view`.
	fn take_view(&mut self, view: Arc<dyn View>);

	/// Stops using the current view while keeping internal state.
	fn drop_view(&mut self);

	/// Returns the currently bound view, if any.
	fn view(&self) -> Option<Arc<dyn View>>;

	fn on_resume(&mut self) {}

	fn on_pause(&mut self) {}

	/// Fired after the view reports it is ready. See
	/// [`ReadyPolicy`](crate::ReadyPolicy) for how often.
	fn on_view_ready(&mut self) {}

	/// Releases all resources. Called at most once per session.
	fn destroy(&mut self);
}

/// Typed view storage for presenter implementations.
///
/// Keeps both the concrete `Arc<V>` for the presenter's own use and the
/// erased handle the registry asks for through [`Presenter::view`].
pub struct ViewSlot<V: View> {
	bound: Option<(Arc<V>, Arc<dyn View>)>,
}

impl<V: View> Default for ViewSlot<V> {
	fn default() -> Self {
		Self { bound: None }
	}
}

impl<V: View> ViewSlot<V> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Stores `view` if its concrete type is `V`. Returns false otherwise and
	/// leaves the slot untouched.
	pub fn take(&mut self, view: Arc<dyn View>) -> bool {
		let any: Arc<dyn Any + Send + Sync> = Arc::clone(&view).into_any_arc();
		match any.downcast::<V>() {
			Ok(typed) => {
				self.bound = Some((typed, view));
				true
			}
			Err(_) => false,
		}
	}

	pub fn clear(&mut self) {
		self.bound = None;
	}

	/// Returns the typed view.
	pub fn get(&self) -> Option<&Arc<V>> {
		self.bound.as_ref().map(|(typed, _)| typed)
	}

	/// Returns the erased view, for [`Presenter::view`].
	pub fn erased(&self) -> Option<Arc<dyn View>> {
		self.bound.as_ref().map(|(_, erased)| Arc::clone(erased))
	}

	pub fn is_bound(&self) -> bool {
		self.bound.is_some()
	}
}
