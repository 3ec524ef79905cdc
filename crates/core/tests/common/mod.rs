//! Shared views and presenters for registry integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use mvp_core::{Error, LifecycleHandle, Presenter, PresenterRegistry, RegistryConfig, Result, SequentialIds, View, ViewSlot};
use parking_lot::Mutex;

/// A screen that stores whatever handle the registry installs.
pub struct Screen {
	pub name: &'static str,
	listener: Mutex<Option<LifecycleHandle>>,
}

impl Screen {
	pub fn new(name: &'static str) -> Arc<Self> {
		Arc::new(Self {
			name,
			listener: Mutex::new(None),
		})
	}

	/// The installed handle.
	///
	/// # Panics
	///
	/// Panics if the screen is not attached.
	pub fn handle(&self) -> LifecycleHandle {
		self.listener.lock().clone().expect("screen is not attached")
	}

	pub fn is_attached(&self) -> bool {
		self.listener.lock().is_some()
	}
}

impl View for Screen {
	fn set_lifecycle_listener(&self, listener: Option<LifecycleHandle>) {
		*self.listener.lock() = listener;
	}
}

/// A view type no presenter is bound to.
pub struct Unbound;

impl View for Unbound {
	fn set_lifecycle_listener(&self, _listener: Option<LifecycleHandle>) {}
}

/// Per-presenter counters, keyed by creation serial.
#[derive(Default)]
pub struct Tracker {
	created: AtomicUsize,
	counts: Mutex<HashMap<(usize, &'static str), usize>>,
}

impl Tracker {
	fn bump(&self, serial: usize, event: &'static str) {
		*self.counts.lock().entry((serial, event)).or_default() += 1;
	}

	pub fn created(&self) -> usize {
		self.created.load(Ordering::SeqCst)
	}

	pub fn count(&self, serial: usize, event: &'static str) -> usize {
		self.counts.lock().get(&(serial, event)).copied().unwrap_or_default()
	}

	/// Total of `event` across every presenter.
	pub fn total(&self, event: &'static str) -> usize {
		self.counts.lock().iter().filter(|((_, e), _)| *e == event).map(|(_, n)| n).sum()
	}

	/// Highest per-presenter count of `event`.
	pub fn max_per_presenter(&self, event: &'static str) -> usize {
		self.counts.lock().iter().filter(|((_, e), _)| *e == event).map(|(_, n)| *n).max().unwrap_or_default()
	}
}

pub struct ScreenPresenter {
	pub serial: usize,
	slot: ViewSlot<Screen>,
	tracker: Arc<Tracker>,
}

impl Presenter for ScreenPresenter {
	fn take_view(&mut self, view: Arc<dyn View>) {
		assert!(self.slot.take(view), "ScreenPresenter only binds Screen views");
		self.tracker.bump(self.serial, "take_view");
	}

	fn drop_view(&mut self) {
		self.slot.clear();
		self.tracker.bump(self.serial, "drop_view");
	}

	fn view(&self) -> Option<Arc<dyn View>> {
		self.slot.erased()
	}

	fn on_resume(&mut self) {
		self.tracker.bump(self.serial, "resume");
	}

	fn on_pause(&mut self) {
		self.tracker.bump(self.serial, "pause");
	}

	fn on_view_ready(&mut self) {
		self.tracker.bump(self.serial, "ready");
	}

	fn destroy(&mut self) {
		self.tracker.bump(self.serial, "destroy");
	}
}

/// Builds a registry whose factory serves [`Screen`] views only.
pub fn registry_with(config: RegistryConfig) -> (PresenterRegistry, Arc<Tracker>) {
	let _ = tracing_subscriber::fmt::try_init();
	let tracker = Arc::new(Tracker::default());
	let factory_tracker = Arc::clone(&tracker);
	let factory = move |view: &Arc<dyn View>| -> Result<Box<dyn Presenter>> {
		if (**view).as_any().downcast_ref::<Screen>().is_none() {
			return Err(Error::NoPresenterForView {
				view_type: (**view).view_type_name(),
			});
		}
		let serial = factory_tracker.created.fetch_add(1, Ordering::SeqCst) + 1;
		Ok(Box::new(ScreenPresenter {
			serial,
			slot: ViewSlot::new(),
			tracker: Arc::clone(&factory_tracker),
		}))
	};
	let registry = PresenterRegistry::from_parts(Arc::new(factory), config, Arc::new(SequentialIds::new("session")));
	(registry, tracker)
}

pub fn registry() -> (PresenterRegistry, Arc<Tracker>) {
	registry_with(RegistryConfig::default())
}
