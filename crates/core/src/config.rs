//! Registry configuration.
//!
//! Every field has a default matching the stock lifecycle protocol, so an
//! empty TOML document yields [`RegistryConfig::default`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bundle::PRESENTER_ID_KEY;
use crate::{Error, Result};

/// When a presenter receives [`on_view_ready`](crate::Presenter::on_view_ready).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReadyPolicy {
	/// Forward the first ready notification of a node's lifetime only.
	#[default]
	OncePerNode,
	/// Forward the first ready notification after every view bind.
	EveryBind,
}

/// How child attachment behaves when no root session is current.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrphanPolicy {
	/// Record the child without a parent. It will never be swept by a cascade.
	#[default]
	Permit,
	/// Fail the attach with [`Error::NoCurrentRoot`].
	Reject,
}

/// Tunables for a [`PresenterRegistry`](crate::PresenterRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RegistryConfig {
	/// Bundle key under which a root's session id is persisted.
	pub restore_key: String,
	/// Ready notification delivery.
	pub ready: ReadyPolicy,
	/// Child attachment without a current root.
	pub orphan_children: OrphanPolicy,
}

impl Default for RegistryConfig {
	fn default() -> Self {
		Self {
			restore_key: PRESENTER_ID_KEY.to_string(),
			ready: ReadyPolicy::default(),
			orphan_children: OrphanPolicy::default(),
		}
	}
}

impl RegistryConfig {
	/// Parses a TOML document.
	pub fn from_toml_str(text: &str) -> Result<Self> {
		Ok(toml::from_str(text)?)
	}

	/// Reads and parses a TOML file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let text = std::fs::read_to_string(path).map_err(|error| Error::ConfigIo {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&text)
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn empty_document_is_default() {
		assert_eq!(RegistryConfig::from_toml_str("").unwrap(), RegistryConfig::default());
	}

	#[test]
	fn parses_all_fields() {
		let config = RegistryConfig::from_toml_str(
			r#"
restore-key = "app.presenter"
ready = "every-bind"
orphan-children = "reject"
"#,
		)
		.unwrap();

		assert_eq!(
			config,
			RegistryConfig {
				restore_key: "app.presenter".to_string(),
				ready: ReadyPolicy::EveryBind,
				orphan_children: OrphanPolicy::Reject,
			}
		);
	}

	#[test]
	fn rejects_unknown_policy() {
		let err = RegistryConfig::from_toml_str(r#"ready = "sometimes""#).unwrap_err();
		assert!(matches!(err, Error::ConfigParse(_)));
	}

	#[test]
	fn load_reads_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, r#"orphan-children = "reject""#).unwrap();

		let config = RegistryConfig::load(file.path()).unwrap();
		assert_eq!(config.orphan_children, OrphanPolicy::Reject);
		assert_eq!(config.restore_key, PRESENTER_ID_KEY);
	}

	#[test]
	fn load_reports_missing_file() {
		let err = RegistryConfig::load("/definitely/not/here.toml").unwrap_err();
		assert!(matches!(err, Error::ConfigIo { .. }));
	}
}
