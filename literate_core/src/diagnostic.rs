use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Severity of a recoverable problem. Fatal problems are reported as
/// [`LiterateError`](crate::LiterateError) instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
	Warning,
	Error,
}

/// The kind of recoverable problem found while extracting or rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub enum DiagnosticKind {
	/// A declaration carried some, but not all, of `name`, `template` and
	/// `ver`.
	IncompleteDeclaration {
		name: Option<String>,
		template: Option<String>,
		version: Option<String>,
	},
	/// A declaration had no body lines left after filtering.
	EmptyBlock,
	/// A `ver` value was not a non-negative integer and was read as `0`.
	NonNumericVersion { value: String },
	/// A block repeated the (name, template, version) of an earlier block.
	DuplicateBlock { existing: String, skipped: String },
	/// No blocks were found in any document.
	NoBlocks,
	/// More than one template file matched a bare template identifier.
	AmbiguousTemplate {
		template: String,
		candidates: Vec<String>,
	},
	/// No template file could be found for an identifier.
	MissingTemplate { template: String, searched: PathBuf },
}

/// A recoverable problem. The offending unit is skipped and the run goes on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
	pub kind: DiagnosticKind,
	/// The document the problem was found in, if any.
	pub file: Option<PathBuf>,
	/// 1-indexed line number of the related declaration, if any.
	pub line: Option<usize>,
	/// The version being rendered when the problem occurred, if any.
	pub version: Option<u32>,
}

impl Diagnostic {
	pub fn new(kind: DiagnosticKind) -> Self {
		Self {
			kind,
			file: None,
			line: None,
			version: None,
		}
	}

	#[must_use]
	pub fn at(mut self, file: impl Into<PathBuf>, line: usize) -> Self {
		self.file = Some(file.into());
		self.line = Some(line);
		self
	}

	#[must_use]
	pub fn during(mut self, version: u32) -> Self {
		self.version = Some(version);
		self
	}

	pub fn severity(&self) -> Severity {
		match self.kind {
			DiagnosticKind::MissingTemplate { .. } => Severity::Error,
			_ => Severity::Warning,
		}
	}

	/// Human-readable message for this diagnostic.
	pub fn message(&self) -> String {
		match &self.kind {
			DiagnosticKind::IncompleteDeclaration {
				name,
				template,
				version,
			} => {
				let found = [name, template, version]
					.iter()
					.map(|value| format!("`{value:?}`"))
					.collect::<Vec<_>>()
					.join(", ");
				format!(
					"found an incomplete literate codeblock declaration; got {found} for `name`, \
					 `template`, `ver`"
				)
			}
			DiagnosticKind::EmptyBlock => {
				"found a literate codeblock declared but nothing inside".to_string()
			}
			DiagnosticKind::NonNumericVersion { value } => {
				format!("version `{value}` is not a non-negative integer, using 0")
			}
			DiagnosticKind::DuplicateBlock { existing, skipped } => {
				format!(
					"found a duplicate block declaration, skipping; existing: {existing}, \
					 skipping: {skipped}"
				)
			}
			DiagnosticKind::NoBlocks => "no blocks found in documents".to_string(),
			DiagnosticKind::AmbiguousTemplate {
				template,
				candidates,
			} => {
				let listed = candidates
					.iter()
					.enumerate()
					.map(|(index, candidate)| format!("({}) {candidate}", index + 1))
					.collect::<Vec<_>>()
					.join(" ");
				format!(
					"found more than one possible template for `{template}`: {listed}; \
					 continuing with (1), rename conflicting templates or use the full template \
					 filename in the declaration"
				)
			}
			DiagnosticKind::MissingTemplate { template, searched } => {
				format!(
					"could not find template matching `{template}` in `{}`",
					searched.display()
				)
			}
		}
	}

	/// Emit this diagnostic through `tracing` at the matching level.
	pub fn emit(&self) {
		match self.severity() {
			Severity::Warning => tracing::warn!("{self}"),
			Severity::Error => tracing::error!("{self}"),
		}
	}
}

impl fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match (&self.file, self.line) {
			(Some(file), Some(line)) => write!(f, "[{}:{line}] ", file.display())?,
			(None, Some(line)) => write!(f, "[line {line}] ")?,
			_ => {}
		}

		if let Some(version) = self.version {
			write!(f, "(version {version}) ")?;
		}

		f.write_str(&self.message())
	}
}
