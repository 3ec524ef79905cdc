//! Presenter session registry.
//!
//! Owns every presenter session, maps session ids to their nodes and tracks
//! the current root. Views attach through [`PresenterRegistry::attach_root`]
//! or [`PresenterRegistry::attach_child`] and report the rest of their
//! lifecycle through the returned [`LifecycleHandle`].
//!
//! All state sits behind one mutex. Presenter and view callbacks run while it
//! is held, so they must not call back into the registry.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::node::{NodeSnapshot, PresenterNode};
use crate::{
	Error, IdGenerator, LifecycleHandle, OrphanPolicy, Presenter, PresenterFactory, ReadyPolicy, RegistryConfig, Result, SessionId,
	SharedPresenter, StateBundle, UuidIds, View,
};


#[derive(Default)]
struct State {
	nodes: HashMap<SessionId, PresenterNode>,
	current_root: Option<SessionId>,
}

/// Registry internals shared with lifecycle handles.
pub(crate) struct Shared {
	state: Mutex<State>,
	factory: Arc<dyn PresenterFactory>,
	ids: Arc<dyn IdGenerator>,
	config: RegistryConfig,
}

/// Keeps one presenter alive per logical screen across view recreation.
///
/// Cloning is cheap and yields another reference to the same registry.
/// Independent registries share nothing.
#[derive(Clone)]
pub struct PresenterRegistry {
	shared: Arc<Shared>,
}

impl PresenterRegistry {
	/// Creates a registry with default configuration and UUID session ids.
	pub fn new(factory: impl PresenterFactory + 'static) -> Self {
		Self::with_config(factory, RegistryConfig::default())
	}

	pub fn with_config(factory: impl PresenterFactory + 'static, config: RegistryConfig) -> Self {
		Self::from_parts(Arc::new(factory), config, Arc::new(UuidIds))
	}

	/// Creates a registry from already shared collaborators.
	pub fn from_parts(factory: Arc<dyn PresenterFactory>, config: RegistryConfig, ids: Arc<dyn IdGenerator>) -> Self {
		Self {
			shared: Arc::new(Shared {
				state: Mutex::new(State::default()),
				factory,
				ids,
				config,
			}),
		}
	}

	pub fn config(&self) -> &RegistryConfig {
		&self.shared.config
	}

	/// Attaches a top-level view.
	///
	/// If `restore` names a root session that is still tracked, that session's
	/// presenter is rebound to `view` and the factory is not consulted.
	/// Otherwise a new root session is created. Either way the session
	/// becomes the current root.
	///
	/// # Errors
	///
	/// Propagates factory failures. Nothing is mutated in that case.
	pub fn attach_root(&self, view: Arc<dyn View>, restore: Option<&StateBundle>) -> Result<LifecycleHandle> {
		let shared = &self.shared;
		let mut guard = shared.state.lock();
		let state = &mut *guard;

		let requested = restore
			.and_then(|bundle| bundle.get(&shared.config.restore_key))
			.filter(|raw| !raw.is_empty());

		// Only roots are ever persisted; a child id is not a valid restore token.
		let reusable = requested.and_then(|raw| state.nodes.get_mut(raw)).filter(|node| node.role.is_root());
		let (id, handle) = match reusable {
			Some(node) => {
				debug!(id = %node.id, view = (*view).view_type_name(), "reattaching root presenter");
				let handle = bind(&shared.config, Arc::downgrade(shared), node, view);
				(node.id.clone(), handle)
			}
			None => {
				if let Some(raw) = requested {
					debug!(requested = raw, "restore id does not name a tracked root, starting a fresh session");
				}
				let presenter = shared.factory.create_presenter(&view)?;
				let id = shared.ids.next_id();
				debug!(id = %id, view = (*view).view_type_name(), "created root presenter");
				let mut node = PresenterNode::root(id.clone(), presenter);
				let handle = bind(&shared.config, Arc::downgrade(shared), &mut node, view);
				state.nodes.insert(id.clone(), node);
				(id, handle)
			}
		};

		state.current_root = Some(id);
		Ok(handle)
	}

	/// Attaches a sub-region view under the current root.
	///
	/// Children are always created fresh and never change the current root.
	///
	/// # Errors
	///
	/// Propagates factory failures, and returns [`Error::NoCurrentRoot`] when
	/// no root is current and [`OrphanPolicy::Reject`] is configured.
	pub fn attach_child(&self, view: Arc<dyn View>) -> Result<LifecycleHandle> {
		let shared = &self.shared;
		let mut guard = shared.state.lock();
		let state = &mut *guard;

		let parent = state.current_root.clone();
		if parent.is_none() {
			match shared.config.orphan_children {
				OrphanPolicy::Reject => return Err(Error::NoCurrentRoot),
				OrphanPolicy::Permit => {
					warn!(view = (*view).view_type_name(), "attaching child presenter without a current root; it will not be cascaded");
				}
			}
		}

		let presenter = shared.factory.create_presenter(&view)?;
		let id = shared.ids.next_id();
		debug!(id = %id, parent = ?parent, view = (*view).view_type_name(), "created child presenter");

		let mut node = PresenterNode::child(id.clone(), parent, presenter);
		let handle = bind(&shared.config, Arc::downgrade(shared), &mut node, view);
		state.nodes.insert(id, node);
		Ok(handle)
	}

	/// Forwards a resume. A resumed root becomes the current root.
	pub fn notify_resumed(&self, id: &SessionId) {
		self.shared.notify_resumed(id);
	}

	pub fn notify_paused(&self, id: &SessionId) {
		self.shared.notify_paused(id);
	}

	/// Forwards a ready notification according to the configured [`ReadyPolicy`].
	pub fn notify_ready(&self, id: &SessionId) {
		self.shared.notify_ready(id);
	}

	/// Unbinds a session's view.
	///
	/// With `retain` the presenter stays alive for a later reattach. Without
	/// it the session is destroyed, together with all children if it is a
	/// root. Unknown ids are ignored.
	pub fn detach(&self, id: &SessionId, retain: bool) {
		self.shared.detach(id, retain);
	}

	/// Writes a root session's id into `bundle`. Children and unknown ids
	/// leave the bundle untouched.
	pub fn persist(&self, id: &SessionId, bundle: &mut StateBundle) {
		self.shared.persist(id, bundle);
	}

	/// Returns the presenter of the current root.
	pub fn current_parent(&self) -> Option<SharedPresenter> {
		let state = self.shared.state.lock();
		let id = state.current_root.as_ref()?;
		state.nodes.get(id).map(|node| Arc::clone(&node.presenter))
	}

	pub fn current_root_id(&self) -> Option<SessionId> {
		self.shared.state.lock().current_root.clone()
	}

	/// Forgets the current root without touching any session.
	pub fn clear_parent(&self) {
		self.shared.state.lock().current_root = None;
	}

	/// Looks up a live session's presenter.
	///
	/// # Errors
	///
	/// Returns [`Error::UnknownSession`] if `id` is not tracked. Use this only
	/// where the session must exist; lifecycle notifications tolerate stale ids.
	pub fn presenter(&self, id: &SessionId) -> Result<SharedPresenter> {
		self.shared
			.state
			.lock()
			.nodes
			.get(id)
			.map(|node| Arc::clone(&node.presenter))
			.ok_or_else(|| Error::UnknownSession(id.clone()))
	}

	pub fn contains(&self, id: &SessionId) -> bool {
		self.shared.state.lock().nodes.contains_key(id)
	}

	/// Number of live sessions.
	pub fn len(&self) -> usize {
		self.shared.state.lock().nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.shared.state.lock().nodes.is_empty()
	}

	/// Returns ids of the children attached under `root`, sorted.
	pub fn children_of(&self, root: &SessionId) -> Vec<SessionId> {
		let state = self.shared.state.lock();
		let mut children: Vec<_> = state
			.nodes
			.values()
			.filter(|node| node.is_child_of(root))
			.map(|node| node.id.clone())
			.collect();
		children.sort();
		children
	}

	/// Returns snapshots of every session sorted by id.
	pub fn snapshots(&self) -> Vec<NodeSnapshot> {
		let state = self.shared.state.lock();
		let mut snapshots: Vec<_> = state.nodes.values().map(PresenterNode::snapshot).collect();
		snapshots.sort_by(|a, b| a.id.cmp(&b.id));
		snapshots
	}
}

impl fmt::Debug for PresenterRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let state = self.shared.state.lock();
		f.debug_struct("PresenterRegistry")
			.field("sessions", &state.nodes.len())
			.field("current_root", &state.current_root)
			.field("config", &self.shared.config)
			.finish()
	}
}

impl Shared {
	pub(crate) fn notify_resumed(&self, id: &SessionId) {
		let mut guard = self.state.lock();
		let state = &mut *guard;
		let Some(node) = state.nodes.get(id) else {
			trace!(id = %id, "ignoring resume for unknown session");
			return;
		};
		node.presenter.lock().on_resume();
		if node.role.is_root() {
			state.current_root = Some(node.id.clone());
		}
	}

	pub(crate) fn notify_paused(&self, id: &SessionId) {
		let state = self.state.lock();
		let Some(node) = state.nodes.get(id) else {
			trace!(id = %id, "ignoring pause for unknown session");
			return;
		};
		node.presenter.lock().on_pause();
	}

	pub(crate) fn notify_ready(&self, id: &SessionId) {
		let mut state = self.state.lock();
		let Some(node) = state.nodes.get_mut(id) else {
			trace!(id = %id, "ignoring ready for unknown session");
			return;
		};
		if node.ready_fired {
			trace!(id = %id, "ready already delivered");
			return;
		}
		node.ready_fired = true;
		node.presenter.lock().on_view_ready();
	}

	pub(crate) fn detach(&self, id: &SessionId, retain: bool) {
		let mut guard = self.state.lock();
		let state = &mut *guard;
		let Some(node) = state.nodes.get(id) else {
			trace!(id = %id, retain, "ignoring detach for unknown session");
			return;
		};

		if retain {
			debug!(id = %id, "dropping view, presenter retained");
			unbind(&mut **node.presenter.lock());
			return;
		}

		let mut doomed = vec![node.id.clone()];
		if node.role.is_root() {
			doomed.extend(state.nodes.values().filter(|n| n.is_child_of(id)).map(|n| n.id.clone()));
		}
		debug!(id = %id, children = doomed.len() - 1, "destroying presenter session");

		for id in doomed {
			if let Some(node) = state.nodes.remove(&id) {
				let mut presenter = node.presenter.lock();
				unbind(&mut **presenter);
				presenter.destroy();
				trace!(id = %id, "presenter destroyed");
			}
			if state.current_root.as_ref() == Some(&id) {
				state.current_root = None;
			}
		}
	}

	pub(crate) fn persist(&self, id: &SessionId, bundle: &mut StateBundle) {
		let state = self.state.lock();
		match state.nodes.get(id) {
			Some(node) if node.role.is_root() => {
				bundle.put(self.config.restore_key.clone(), id.as_str());
				trace!(id = %id, "root session persisted");
			}
			Some(_) => trace!(id = %id, "child sessions are not persisted"),
			None => trace!(id = %id, "ignoring persist for unknown session"),
		}
	}
}

/// Binds `view` to the node's presenter and installs a fresh handle on it.
///
/// A view still bound from an earlier attach is unbound first.
fn bind(config: &RegistryConfig, registry: Weak<Shared>, node: &mut PresenterNode, view: Arc<dyn View>) -> LifecycleHandle {
	let handle = LifecycleHandle::new(registry, node.id.clone());
	{
		let mut presenter = node.presenter.lock();
		unbind(&mut **presenter);
		presenter.take_view(Arc::clone(&view));
	}
	if config.ready == ReadyPolicy::EveryBind {
		node.ready_fired = false;
	}
	view.set_lifecycle_listener(Some(handle.clone()));
	handle
}

/// Clears the bound view's handle and drops it from the presenter. No-op when
/// nothing is bound.
fn unbind(presenter: &mut dyn Presenter) {
	if let Some(view) = presenter.view() {
		view.set_lifecycle_listener(None);
		presenter.drop_view();
	}
}
