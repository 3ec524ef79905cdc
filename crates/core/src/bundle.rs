//! Restore tokens carried across view recreation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Default bundle key for a root session id.
pub const PRESENTER_ID_KEY: &str = "mvp.presenter.PRESENTER_ID_KEY";

/// Opaque string map a host persists alongside its views.
///
/// The registry only reads and writes one well-known key; everything else
/// belongs to the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateBundle {
	entries: BTreeMap<String, String>,
}

impl StateBundle {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.entries.get(key).map(String::as_str)
	}

	/// Stores `value` under `key`, returning the previous value.
	pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
		self.entries.insert(key.into(), value.into())
	}

	pub fn remove(&mut self, key: &str) -> Option<String> {
		self.entries.remove(key)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
