use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::LiterateError;
use crate::LiterateResult;
use crate::filter::FilterConfig;

/// Supported config file names in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["literate.toml", ".literate.toml", ".literaterc"];

/// Number of directories (the starting directory included) searched when
/// discovering a config file.
pub const MAX_DISCOVERY_DEPTH: usize = 5;

/// Default suffix of template files, e.g. `template.js.jinja`.
pub const DEFAULT_TEMPLATE_SUFFIX: &str = "jinja";

/// Configuration loaded from `literate.toml` or a YAML `.literaterc`.
///
/// ```toml
/// filter_lines_matching = ["^\\s*#skip"]
/// filter_leanpub_code_comments = true
/// template_suffix = "jinja"
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LiterateConfig {
	/// Regular expressions. Body lines matching any of them are excluded
	/// from rendered output.
	pub filter_lines_matching: Vec<String>,
	/// When true, leanpub annotation comments (`<!-- leanpub... -->`) are
	/// excluded as well. Defaults to `true`.
	pub filter_leanpub_code_comments: bool,
	/// Final extension of template files.
	pub template_suffix: String,
}

impl Default for LiterateConfig {
	fn default() -> Self {
		Self {
			filter_lines_matching: Vec::new(),
			filter_leanpub_code_comments: true,
			template_suffix: DEFAULT_TEMPLATE_SUFFIX.to_string(),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
	Toml,
	Yaml,
}

impl ConfigFormat {
	fn from_path(path: &Path) -> Self {
		let is_rc = path
			.file_name()
			.and_then(|name| name.to_str())
			.is_some_and(|name| name == ".literaterc");
		let is_yaml = path
			.extension()
			.and_then(|ext| ext.to_str())
			.is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "yaml" | "yml"));

		if is_rc || is_yaml { Self::Yaml } else { Self::Toml }
	}
}

impl LiterateConfig {
	/// Walk from `start` towards the filesystem root and return the first
	/// config file found, checking at most [`MAX_DISCOVERY_DEPTH`]
	/// directories.
	#[must_use]
	pub fn resolve_path(start: &Path) -> Option<PathBuf> {
		start
			.ancestors()
			.take(MAX_DISCOVERY_DEPTH)
			.flat_map(|dir| CONFIG_FILE_CANDIDATES.iter().map(move |name| dir.join(name)))
			.find(|path| path.is_file())
	}

	/// Discover and load the config for `start`. Returns `None` when no
	/// config file exists.
	pub fn discover(start: &Path) -> LiterateResult<Option<LiterateConfig>> {
		let Some(config_path) = Self::resolve_path(start) else {
			return Ok(None);
		};

		tracing::debug!(path = %config_path.display(), "loading config");
		Self::load_file(&config_path).map(Some)
	}

	/// Load an explicitly named config file.
	pub fn load_file(path: &Path) -> LiterateResult<LiterateConfig> {
		if !path.is_file() {
			return Err(LiterateError::ConfigNotFound(path.display().to_string()));
		}

		let content = std::fs::read_to_string(path)?;
		Self::parse(&content, ConfigFormat::from_path(path)).map_err(|reason| {
			LiterateError::ConfigParse {
				path: path.display().to_string(),
				reason,
			}
		})
	}

	fn parse(content: &str, format: ConfigFormat) -> Result<LiterateConfig, String> {
		// An empty rc file is a valid "all defaults" config.
		if content.trim().is_empty() {
			return Ok(Self::default());
		}

		match format {
			ConfigFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
			ConfigFormat::Yaml => serde_yaml_ng::from_str(content).map_err(|e| e.to_string()),
		}
	}

	/// The filter configuration injected into the declaration parser.
	pub fn filter_config(&self) -> FilterConfig {
		FilterConfig {
			patterns: self.filter_lines_matching.clone(),
			filter_leanpub_code_comments: self.filter_leanpub_code_comments,
		}
	}
}
