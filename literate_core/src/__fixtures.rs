use std::path::Path;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::CodeBlock;

/// Build a block without going through the parser.
pub fn block(name: &str, template: &str, version: u32, lines: &[&str]) -> CodeBlock {
	CodeBlock {
		lines: lines.iter().map(|line| (*line).to_string()).collect(),
		name: name.to_string(),
		template: template.to_string(),
		version,
		line: 1,
		file: PathBuf::from("book.md"),
	}
}

/// A temporary project with a `templates` directory.
pub struct Workspace {
	pub dir: TempDir,
}

impl Workspace {
	pub fn new() -> Self {
		let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
		std::fs::create_dir(dir.path().join("templates"))
			.unwrap_or_else(|e| panic!("create templates: {e}"));
		Self { dir }
	}

	pub fn root(&self) -> &Path {
		self.dir.path()
	}

	pub fn templates(&self) -> PathBuf {
		self.root().join("templates")
	}

	pub fn write(&self, relative: &str, content: &str) -> PathBuf {
		let path = self.root().join(relative);
		std::fs::write(&path, content).unwrap_or_else(|e| panic!("write {relative}: {e}"));
		path
	}

	pub fn write_template(&self, name: &str, content: &str) -> PathBuf {
		self.write(&format!("templates/{name}"), content)
	}

	pub fn read(&self, relative: &str) -> String {
		std::fs::read_to_string(self.root().join(relative))
			.unwrap_or_else(|e| panic!("read {relative}: {e}"))
	}

	pub fn exists(&self, relative: &str) -> bool {
		self.root().join(relative).exists()
	}
}

/// Two versions of `greeting` targeting template `t`.
pub const GREETING_DOCUMENT: &str = "\
# Greetings

{lang='text' name='greeting' template='t' ver='1'}
    hello

Some prose in between.

{lang='text' name='greeting' template='t' ver='2'}
    hello there
";
