//! # Configuration
//!
//! Resolver settings are managed by [`confique`], layering environment
//! variables over an optional TOML file over compiled defaults.
//!
//! ## Available Settings
//!
//! | Key | Env | Default | Description |
//! |-----|-----|---------|-------------|
//! | `fallback_theme` | `QATTR_FALLBACK_THEME` | `core` | Theme used when a question has none stored |
//! | `plugin_category` | `QATTR_PLUGIN_CATEGORY` | `Plugin` | Category given to plugin attributes that lack one |
//! | `category_order` | | see [`default_category_order`] | Display precedence of categories |
//!
//! ## File Location
//!
//! The CLI reads `--config <file>` when given, otherwise `qattr.toml` in the
//! OS config directory (via the `directories` crate). A missing file is not
//! an error.

use crate::definitions::CategoryPrecedence;
use crate::error::Result;
use confique::Config;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "qattr.toml";

/// The category precedence used when none is configured.
pub fn default_category_order() -> Vec<String> {
    [
        "General",
        "Display",
        "Logic",
        "Input",
        "Other",
        "Timer",
        "Statistics",
        "Location",
        "Slider",
        "File metadata",
        "Plugin",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Host constants the resolver needs.
#[derive(Config, Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Theme used when neither an override nor a stored `question_template` is set.
    #[config(env = "QATTR_FALLBACK_THEME", default = "core")]
    pub fallback_theme: String,

    /// Category assigned to plugin attributes that do not declare one.
    #[config(env = "QATTR_PLUGIN_CATEGORY", default = "Plugin")]
    pub plugin_category: String,

    /// Categories in display order. Unlisted categories sort last.
    #[config(default = [
        "General", "Display", "Logic", "Input", "Other", "Timer",
        "Statistics", "Location", "Slider", "File metadata", "Plugin"
    ])]
    pub category_order: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fallback_theme: "core".to_string(),
            plugin_category: "Plugin".to_string(),
            category_order: default_category_order(),
        }
    }
}

impl ResolverConfig {
    /// Load from the environment and, when given, a TOML file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = path {
            builder = builder.file(path);
        }
        Ok(builder.load()?)
    }

    /// Where the CLI looks for a config file by default.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "qattr", "qattr").map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
    }

    /// The ranker behind category ordering.
    pub fn category_precedence(&self) -> CategoryPrecedence {
        CategoryPrecedence::new(self.category_order.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::CategoryRank;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ResolverConfig::default();
        assert_eq!(config.fallback_theme, "core");
        assert_eq!(config.plugin_category, "Plugin");
        assert_eq!(config.category_order.first().map(String::as_str), Some("General"));
        assert_eq!(config.category_order.len(), 11);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ResolverConfig::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.category_order, default_category_order());
    }

    #[test]
    fn test_file_overrides_category_order() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "category_order = [\"Display\", \"General\"]").unwrap();

        let config = ResolverConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.category_order, vec!["Display", "General"]);
        let precedence = config.category_precedence();
        assert_eq!(precedence.rank("Display"), 0);
        assert_eq!(precedence.rank("Logic"), usize::MAX);
    }

    #[test]
    fn test_invalid_file_is_a_config_error() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "category_order = 5").unwrap();
        assert!(matches!(
            ResolverConfig::load(Some(file.path())),
            Err(crate::error::QattrError::Config(_))
        ));
    }
}
