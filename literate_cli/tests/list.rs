mod common;

use literate_core::AnyEmptyResult;
use predicates::prelude::PredicateBooleanExt;

#[test]
fn list_prints_pruned_blocks() -> AnyEmptyResult {
	let tmp = common::greeting_project();
	std::fs::write(
		tmp.path().join("appendix.md"),
		"{lang='text' name='greeting' template='t' ver='1'}\n    duplicate\n",
	)?;

	common::literate_cmd(tmp.path())
		.args(["list", "book.md", "appendix.md"])
		.assert()
		.success()
		.stdout(predicates::str::contains("greeting template=t ver=1 book.md:3"))
		.stdout(predicates::str::contains("greeting template=t ver=2 book.md:5"))
		.stdout(predicates::str::contains("appendix.md").not())
		.stdout(predicates::str::contains("2 block(s)"))
		.stdout(predicates::str::contains("1 warning(s)"));

	Ok(())
}

#[test]
fn list_reports_documents_without_blocks() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("notes.md"), "# Just prose\n")?;

	common::literate_cmd(tmp.path())
		.args(["list", "notes"])
		.assert()
		.success()
		.stdout(predicates::str::contains("No code blocks found."));

	Ok(())
}
