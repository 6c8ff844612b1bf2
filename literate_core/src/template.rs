use std::path::Path;
use std::path::PathBuf;

use globset::GlobBuilder;

use crate::Diagnostic;
use crate::DiagnosticKind;
use crate::LiterateError;
use crate::LiterateResult;

/// A validated directory of template files named
/// `<stem>.<content-ext>.<suffix>`.
#[derive(Debug, Clone)]
pub struct TemplateDirectory {
	root: PathBuf,
	suffix: String,
}

impl TemplateDirectory {
	/// Open a template directory. Fails when the path does not exist or
	/// carries an extension other than the template suffix.
	pub fn open(root: &Path, suffix: &str) -> LiterateResult<Self> {
		if !root.exists() {
			return Err(LiterateError::MissingTemplateDirectory(
				root.display().to_string(),
			));
		}

		if let Some(ext) = root.extension().and_then(|ext| ext.to_str()) {
			if ext != suffix {
				return Err(LiterateError::TemplateDirectoryExtension {
					path: root.display().to_string(),
					suffix: suffix.to_string(),
				});
			}
		}

		Ok(Self {
			root: root.to_path_buf(),
			suffix: suffix.to_string(),
		})
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	pub fn suffix(&self) -> &str {
		&self.suffix
	}

	/// Find the template file for an identifier.
	///
	/// An identifier ending in `.<suffix>` names a file directly. Any other
	/// identifier matches `<identifier>.*.<suffix>`; when several files match,
	/// the lexically first one is used and an ambiguity warning is recorded.
	/// Returns `Ok(None)` with a diagnostic when nothing usable is found.
	pub fn resolve(
		&self,
		identifier: &str,
		diagnostics: &mut Vec<Diagnostic>,
	) -> LiterateResult<Option<PathBuf>> {
		let candidate = if identifier.ends_with(&format!(".{}", self.suffix)) {
			Some(self.root.join(identifier))
		} else {
			let candidates = self.find_candidates(identifier)?;
			if candidates.len() > 1 {
				let diagnostic = Diagnostic::new(DiagnosticKind::AmbiguousTemplate {
					template: identifier.to_string(),
					candidates: candidates.clone(),
				});
				diagnostic.emit();
				diagnostics.push(diagnostic);
			}
			candidates
				.into_iter()
				.next()
				.map(|name| self.root.join(name))
		};

		match candidate {
			Some(path) if path.is_file() => Ok(Some(path)),
			Some(path) => {
				push_missing(identifier, path, diagnostics);
				Ok(None)
			}
			None => {
				push_missing(identifier, self.root.clone(), diagnostics);
				Ok(None)
			}
		}
	}

	/// File names in the directory matching `<identifier>.*.<suffix>`, sorted
	/// lexically.
	fn find_candidates(&self, identifier: &str) -> LiterateResult<Vec<String>> {
		let pattern = format!(
			"{}.*.{}",
			globset::escape(identifier),
			globset::escape(&self.suffix)
		);
		let matcher = GlobBuilder::new(&pattern)
			.literal_separator(true)
			.build()
			.map_err(|e| {
				LiterateError::TemplatePattern {
					template: identifier.to_string(),
					reason: e.to_string(),
				}
			})?
			.compile_matcher();

		let mut candidates = Vec::new();
		for entry in std::fs::read_dir(&self.root)? {
			let entry = entry?;
			if !entry.file_type()?.is_file() {
				continue;
			}
			let Some(name) = entry.file_name().to_str().map(str::to_string) else {
				continue;
			};
			if matcher.is_match(&name) {
				candidates.push(name);
			}
		}

		candidates.sort();
		Ok(candidates)
	}
}

fn push_missing(identifier: &str, searched: PathBuf, diagnostics: &mut Vec<Diagnostic>) {
	let diagnostic = Diagnostic::new(DiagnosticKind::MissingTemplate {
		template: identifier.to_string(),
		searched,
	});
	diagnostic.emit();
	diagnostics.push(diagnostic);
}

/// A resolved template file split into its stem and content extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
	pub path: PathBuf,
	/// File name without `.<content-ext>.<suffix>`.
	pub stem: String,
	/// Content extension without the leading dot, e.g. `js`.
	pub extension: String,
}

impl TemplateFile {
	/// Validate the trailing `.<content-ext>.<suffix>` of a template file
	/// name. A name without it is a fatal error.
	pub fn parse(path: &Path, suffix: &str) -> LiterateResult<Self> {
		let invalid = || {
			LiterateError::InvalidTemplateExtension {
				file: path.display().to_string(),
				suffix: suffix.to_string(),
			}
		};

		let file_name = path
			.file_name()
			.and_then(|name| name.to_str())
			.ok_or_else(invalid)?;
		let without_suffix = file_name
			.strip_suffix(suffix)
			.and_then(|rest| rest.strip_suffix('.'))
			.ok_or_else(invalid)?;
		let (stem, extension) = without_suffix.rsplit_once('.').ok_or_else(invalid)?;

		if extension.is_empty() || !extension.chars().all(|c| c.is_alphanumeric() || c == '_') {
			return Err(invalid());
		}

		Ok(Self {
			path: path.to_path_buf(),
			stem: stem.to_string(),
			extension: extension.to_string(),
		})
	}

	/// The output path for a version: `<stem>-<version>.<content-ext>` next to
	/// the template.
	pub fn output_path(&self, version: u32) -> PathBuf {
		let file_name = format!("{}-{version}.{}", self.stem, self.extension);
		match self.path.parent() {
			Some(parent) => parent.join(file_name),
			None => PathBuf::from(file_name),
		}
	}
}
