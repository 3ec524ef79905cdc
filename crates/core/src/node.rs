//! Registry arena entries.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{Presenter, SessionId, SharedPresenter};

/// Position of a session in the two-level hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
	/// Top-level screen session, restorable through a bundle.
	Root,
	/// Sub-region session. `parent` is `None` when no root was current at
	/// attach time; such a child is never swept by a cascade.
	Child { parent: Option<SessionId> },
}

impl Role {
	pub fn is_root(&self) -> bool {
		matches!(self, Self::Root)
	}

	/// Returns the parent id of a child.
	pub fn parent(&self) -> Option<&SessionId> {
		match self {
			Self::Root => None,
			Self::Child { parent } => parent.as_ref(),
		}
	}
}

/// One presenter session in the registry arena.
pub(crate) struct PresenterNode {
	pub(crate) id: SessionId,
	pub(crate) role: Role,
	pub(crate) presenter: SharedPresenter,
	/// Whether the pending ready notification was already forwarded.
	pub(crate) ready_fired: bool,
}

impl PresenterNode {
	pub(crate) fn root(id: SessionId, presenter: Box<dyn Presenter>) -> Self {
		Self::new(id, Role::Root, presenter)
	}

	pub(crate) fn child(id: SessionId, parent: Option<SessionId>, presenter: Box<dyn Presenter>) -> Self {
		Self::new(id, Role::Child { parent }, presenter)
	}

	fn new(id: SessionId, role: Role, presenter: Box<dyn Presenter>) -> Self {
		Self {
			id,
			role,
			presenter: Arc::new(Mutex::new(presenter)),
			ready_fired: false,
		}
	}

	/// Returns true if this node is a child of `root`.
	pub(crate) fn is_child_of(&self, root: &SessionId) -> bool {
		self.role.parent() == Some(root)
	}

	pub(crate) fn snapshot(&self) -> NodeSnapshot {
		NodeSnapshot {
			id: self.id.clone(),
			role: self.role.clone(),
			bound: self.presenter.lock().view().is_some(),
		}
	}
}

/// Point-in-time view of one session, for observation and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSnapshot {
	pub id: SessionId,
	pub role: Role,
	/// Whether the presenter currently holds a view.
	pub bound: bool,
}
