use regex::Regex;

use crate::LiterateError;
use crate::LiterateResult;

/// Built-in pattern matching leanpub annotation comments such as
/// `<!-- leanpub-start-insert -->`.
pub const LEANPUB_COMMENT_PATTERN: &str = r"^\s*<!--\s*leanpub";

/// The filter source handed to the parser: an ordered list of regular
/// expressions plus the toggle for the built-in leanpub comment pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
	pub patterns: Vec<String>,
	pub filter_leanpub_code_comments: bool,
}

impl Default for FilterConfig {
	fn default() -> Self {
		Self {
			patterns: Vec::new(),
			filter_leanpub_code_comments: true,
		}
	}
}

/// Compiled exclusion patterns. A body line matching any pattern is dropped
/// before indentation analysis.
#[derive(Debug, Clone, Default)]
pub struct LineFilter {
	patterns: Vec<Regex>,
}

impl LineFilter {
	/// Compile the configured patterns, user patterns first.
	pub fn new(config: &FilterConfig) -> LiterateResult<Self> {
		let mut sources: Vec<&str> = config.patterns.iter().map(String::as_str).collect();
		if config.filter_leanpub_code_comments {
			sources.push(LEANPUB_COMMENT_PATTERN);
		}

		let patterns = sources
			.into_iter()
			.map(|source| {
				Regex::new(source).map_err(|e| {
					LiterateError::FilterPattern {
						pattern: source.to_string(),
						reason: e.to_string(),
					}
				})
			})
			.collect::<LiterateResult<Vec<_>>>()?;

		Ok(Self { patterns })
	}

	/// A filter which keeps every line. Used by the diff engine.
	pub fn disabled() -> Self {
		Self::default()
	}

	/// Returns true if the line matches any active pattern.
	pub fn is_excluded(&self, line: &str) -> bool {
		self.patterns.iter().any(|pattern| pattern.is_match(line))
	}

	pub fn is_empty(&self) -> bool {
		self.patterns.is_empty()
	}
}
