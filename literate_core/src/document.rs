use std::collections::HashMap;
use std::ffi::OsString;
use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;

use crate::CodeBlock;
use crate::Diagnostic;
use crate::DiagnosticKind;
use crate::LiterateError;
use crate::LiterateResult;
use crate::filter::LineFilter;
use crate::parser::extract_blocks;

/// Extension appended to document paths which do not exist as given.
pub const DEFAULT_DOCUMENT_EXTENSION: &str = "md";

/// The pruned blocks of a document set together with every diagnostic
/// produced while reading them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Extraction {
	/// Accepted blocks in discovery order.
	pub blocks: Vec<CodeBlock>,
	pub diagnostics: Vec<Diagnostic>,
}

impl Extraction {
	pub fn is_empty(&self) -> bool {
		self.blocks.is_empty()
	}
}

/// Resolve a document path, appending `.md` when the literal path does not
/// exist.
pub fn resolve_document_path(path: &Path) -> LiterateResult<PathBuf> {
	if path.is_file() {
		return Ok(path.to_path_buf());
	}

	let has_extension = path
		.extension()
		.is_some_and(|ext| ext == DEFAULT_DOCUMENT_EXTENSION);
	let candidate = if has_extension {
		path.to_path_buf()
	} else {
		let mut with_extension = OsString::from(path.as_os_str());
		with_extension.push(".");
		with_extension.push(DEFAULT_DOCUMENT_EXTENSION);
		PathBuf::from(with_extension)
	};

	if candidate.is_file() {
		Ok(candidate)
	} else {
		Err(LiterateError::MissingDocument(candidate.display().to_string()))
	}
}

/// Resolve every document path up front so a missing document aborts the
/// run before anything is read.
pub fn resolve_document_paths<P: AsRef<Path>>(paths: &[P]) -> LiterateResult<Vec<PathBuf>> {
	paths
		.iter()
		.map(|path| resolve_document_path(path.as_ref()))
		.collect()
}

/// Read the documents in the given order, extract their blocks and prune
/// duplicates across the whole set.
pub fn extract_documents<P: AsRef<Path>>(
	paths: &[P],
	filter: &LineFilter,
) -> LiterateResult<Extraction> {
	let mut blocks = Vec::new();
	let mut diagnostics = Vec::new();

	for path in resolve_document_paths(paths)? {
		let content = std::fs::read_to_string(&path)?;
		let (found, found_diagnostics) = extract_blocks(&content, &path, filter);
		tracing::debug!(path = %path.display(), blocks = found.len(), "scanned document");
		blocks.extend(found);
		diagnostics.extend(found_diagnostics);
	}

	let (blocks, duplicates) = prune_duplicates(blocks);
	diagnostics.extend(duplicates);

	if blocks.is_empty() {
		let diagnostic = Diagnostic::new(DiagnosticKind::NoBlocks);
		diagnostic.emit();
		diagnostics.push(diagnostic);
	}

	Ok(Extraction {
		blocks,
		diagnostics,
	})
}

/// Drop every block whose (name, template, version) was already seen. The
/// first occurrence wins and accepted blocks keep their discovery order.
pub fn prune_duplicates(blocks: Vec<CodeBlock>) -> (Vec<CodeBlock>, Vec<Diagnostic>) {
	let mut accepted: Vec<CodeBlock> = Vec::with_capacity(blocks.len());
	let mut seen: HashMap<(String, String, u32), usize> = HashMap::new();
	let mut diagnostics = Vec::new();

	for block in blocks {
		let (name, template, version) = block.key();
		let key = (name.to_string(), template.to_string(), version);
		if let Some(&index) = seen.get(&key) {
			let diagnostic = Diagnostic::new(DiagnosticKind::DuplicateBlock {
				existing: accepted[index].to_string(),
				skipped: block.to_string(),
			})
			.at(&block.file, block.line);
			diagnostic.emit();
			diagnostics.push(diagnostic);
			continue;
		}

		seen.insert(key, accepted.len());
		accepted.push(block);
	}

	(accepted, diagnostics)
}
