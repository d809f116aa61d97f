//! User-facing menu settings loaded from TOML.
//!
//! ```toml
//! max-category-item-count = 5
//! overflow = { page = 1 }   # or "drop-tail"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use super::config::{CategoryOverflow, MenuCategoryConfig};

/// Errors that can occur when loading menu settings.
#[derive(Debug, Error)]
pub enum SettingsError {
	/// Error parsing TOML syntax or shape.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a settings file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A category cap of zero would hide every categorized item.
	#[error("max-category-item-count must be at least 1")]
	ZeroItemCap,
}

/// Declarative subset of [`MenuCategoryConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct MenuSettings {
	pub max_category_item_count: Option<usize>,
	pub overflow: CategoryOverflow,
}

impl MenuSettings {
	pub fn from_toml(src: &str) -> Result<Self, SettingsError> {
		let settings: Self = toml::from_str(src)?;
		settings.validate()?;
		Ok(settings)
	}

	pub fn load(path: &Path) -> Result<Self, SettingsError> {
		let src = std::fs::read_to_string(path).map_err(|error| SettingsError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		tracing::debug!(path = %path.display(), "loading menu settings");
		Self::from_toml(&src)
	}

	fn validate(&self) -> Result<(), SettingsError> {
		if self.max_category_item_count == Some(0) {
			return Err(SettingsError::ZeroItemCap);
		}
		Ok(())
	}

	/// Applies these settings on top of `config`, keeping its callbacks.
	pub fn apply(&self, config: MenuCategoryConfig) -> MenuCategoryConfig {
		let config = config.with_overflow(self.overflow);
		match self.max_category_item_count {
			Some(max) => config.with_max_category_item_count(max),
			None => config,
		}
	}

	pub fn category_config(&self) -> MenuCategoryConfig {
		self.apply(MenuCategoryConfig::new())
	}
}
