use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// A named, versioned fragment of text extracted from a document.
///
/// `lines` is never empty and each line keeps the terminator it was read
/// with, so [`CodeBlock::content`] reproduces the dedented body exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
	/// Filtered and dedented body lines, in document order.
	pub lines: Vec<String>,
	/// The name bound inside the template namespace.
	pub name: String,
	/// The template identifier this block renders into.
	pub template: String,
	pub version: u32,
	/// 1-indexed line number of the declaration.
	pub line: usize,
	/// The document the block was found in.
	pub file: PathBuf,
}

impl CodeBlock {
	/// The reconstituted body text.
	pub fn content(&self) -> String {
		self.lines.concat()
	}

	/// The identity used for deduplication.
	pub fn key(&self) -> (&str, &str, u32) {
		(&self.name, &self.template, self.version)
	}
}

impl fmt::Display for CodeBlock {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"<CodeBlock name={} template={} version={} line={} file={}>",
			self.name,
			self.template,
			self.version,
			self.line,
			self.file.display()
		)
	}
}
