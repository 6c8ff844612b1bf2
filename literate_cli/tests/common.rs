use std::path::Path;

use assert_cmd::Command;

/// The `literate` binary with colors and log output disabled.
pub fn literate_cmd(dir: &Path) -> Command {
	let mut cmd = Command::cargo_bin("literate").unwrap_or_else(|e| panic!("binary: {e}"));
	cmd.current_dir(dir)
		.env("NO_COLOR", "1")
		.env("LITERATE_TEST", "1")
		.env_remove("RUST_LOG");
	cmd
}

/// Two versions of `greeting` targeting template `t`.
pub const GREETING_DOCUMENT: &str = "\
# Greetings

{lang='text' name='greeting' template='t' ver='1'}
    hello
{lang='text' name='greeting' template='t' ver='2'}
    hello there
    #skip internal note
";

/// A temporary project holding `book.md` and `templates/t.txt.jinja`.
pub fn greeting_project() -> tempfile::TempDir {
	let tmp = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
	std::fs::write(tmp.path().join("book.md"), GREETING_DOCUMENT)
		.unwrap_or_else(|e| panic!("write document: {e}"));
	std::fs::create_dir(tmp.path().join("templates"))
		.unwrap_or_else(|e| panic!("create templates: {e}"));
	std::fs::write(
		tmp.path().join("templates").join("t.txt.jinja"),
		"{{ greeting }}",
	)
	.unwrap_or_else(|e| panic!("write template: {e}"));
	tmp
}
