//! Error types for presenter attachment and registry configuration.

use std::path::PathBuf;

use thiserror::Error;

use crate::SessionId;

/// Errors surfaced by the presenter registry.
///
/// Stale or unknown session ids on lifecycle notifications are never errors;
/// only construction failures, explicit lookups and configuration problems are.
#[derive(Debug, Error)]
pub enum Error {
	/// The factory has no presenter registered for the view's concrete type.
	#[error("no presenter registered for view type {view_type}")]
	NoPresenterForView {
		/// Fully qualified type name of the view.
		view_type: &'static str,
	},

	/// A lookup required a live session that is not tracked.
	#[error("presenter session {0} does not exist")]
	UnknownSession(SessionId),

	/// A child view attached while no root session was current and the
	/// registry is configured to reject orphans.
	#[error("cannot attach a child presenter without a current root")]
	NoCurrentRoot,

	/// Registry configuration could not be parsed.
	#[error("invalid registry config: {0}")]
	ConfigParse(#[from] toml::de::Error),

	/// Registry configuration file could not be read.
	#[error("I/O error reading {path}: {error}")]
	ConfigIo {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, Error>;
