//! Session identifiers and their generators.

use std::borrow::Borrow;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Opaque identifier of one presenter session.
///
/// Generated once when a node is created and never reassigned. The empty
/// string is reserved as the "no session" sentinel and is never generated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
	/// Wraps an existing token, e.g. one read back from a restore bundle.
	pub fn new(raw: impl Into<String>) -> Self {
		Self(raw.into())
	}

	/// Returns the raw token.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Returns true for the sentinel value.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl fmt::Display for SessionId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for SessionId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl Borrow<str> for SessionId {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl From<&str> for SessionId {
	fn from(raw: &str) -> Self {
		Self(raw.to_owned())
	}
}

impl From<String> for SessionId {
	fn from(raw: String) -> Self {
		Self(raw)
	}
}

/// Source of fresh session identifiers.
pub trait IdGenerator: Send + Sync {
	/// Returns an identifier distinct from every one returned before.
	fn next_id(&self) -> SessionId;
}

/// Random v4 UUID identifiers.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
	fn next_id(&self) -> SessionId {
		SessionId(uuid::Uuid::new_v4().to_string())
	}
}

/// Monotonic `prefix-N` identifiers, starting at 1.
///
/// # Panics
///
/// [`IdGenerator::next_id`] panics once `u64::MAX` ids have been issued
/// rather than wrapping around and reissuing old ids.
#[derive(Debug)]
pub struct SequentialIds {
	prefix: String,
	next: AtomicU64,
}

impl SequentialIds {
	/// Creates a generator producing `prefix-1`, `prefix-2`, ...
	pub fn new(prefix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
			next: AtomicU64::new(0),
		}
	}
}

impl Default for SequentialIds {
	fn default() -> Self {
		Self::new("session")
	}
}

impl IdGenerator for SequentialIds {
	fn next_id(&self) -> SessionId {
		let n = self
			.next
			.fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_add(1))
			.map(|previous| previous + 1)
			.expect("session id counter exhausted");
		SessionId(format!("{}-{n}", self.prefix))
	}
}
