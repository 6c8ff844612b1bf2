mod common;

use literate_core::AnyEmptyResult;
use serde_json::Value;

#[test]
fn render_writes_one_file_per_version() -> AnyEmptyResult {
	let tmp = common::greeting_project();

	common::literate_cmd(tmp.path())
		.arg("render")
		.arg("book.md")
		.arg("--templates")
		.arg("templates")
		.assert()
		.success()
		.stdout(predicates::str::contains("wrote templates/t-1.txt (v1)"))
		.stdout(predicates::str::contains("2 file(s) written for versions 1..=2"));

	let first = std::fs::read_to_string(tmp.path().join("templates/t-1.txt"))?;
	let second = std::fs::read_to_string(tmp.path().join("templates/t-2.txt"))?;
	assert_eq!(first, "hello\n");
	assert_eq!(second, "hello there\n#skip internal note\n");

	Ok(())
}

#[test]
fn render_infers_markdown_extension() -> AnyEmptyResult {
	let tmp = common::greeting_project();

	common::literate_cmd(tmp.path())
		.args(["render", "book", "--templates", "templates"])
		.assert()
		.success();

	assert!(tmp.path().join("templates/t-2.txt").is_file());

	Ok(())
}

#[test]
fn render_applies_discovered_config() -> AnyEmptyResult {
	let tmp = common::greeting_project();
	std::fs::write(
		tmp.path().join("literate.toml"),
		"filter_lines_matching = ['^\\s*#skip']\n",
	)?;

	common::literate_cmd(tmp.path())
		.args(["render", "book.md", "--templates", "templates"])
		.assert()
		.success();

	let second = std::fs::read_to_string(tmp.path().join("templates/t-2.txt"))?;
	assert_eq!(second, "hello there\n");

	Ok(())
}

#[test]
fn render_applies_explicit_literaterc() -> AnyEmptyResult {
	let tmp = common::greeting_project();
	std::fs::create_dir(tmp.path().join("settings"))?;
	std::fs::write(
		tmp.path().join("settings").join(".literaterc"),
		"filter_lines_matching:\n  - \"#skip\"\n",
	)?;

	common::literate_cmd(tmp.path())
		.args([
			"render",
			"book.md",
			"--templates",
			"templates",
			"--config",
			"settings/.literaterc",
		])
		.assert()
		.success();

	let second = std::fs::read_to_string(tmp.path().join("templates/t-2.txt"))?;
	assert_eq!(second, "hello there\n");

	Ok(())
}

#[test]
fn render_outputs_json() -> AnyEmptyResult {
	let tmp = common::greeting_project();

	let output = common::literate_cmd(tmp.path())
		.args(["render", "book.md", "--templates", "templates", "--format", "json"])
		.output()?;
	assert!(output.status.success());

	let json: Value = serde_json::from_slice(&output.stdout)?;
	let written = json["written"].as_array().ok_or("written should be an array")?;
	assert_eq!(written.len(), 2);
	assert_eq!(written[0]["template"], "t");
	assert_eq!(written[1]["version"], 2);
	assert_eq!(json["versions"]["start"], 1);
	assert_eq!(json["versions"]["end"], 2);
	assert_eq!(json["diagnostics"].as_array().map(Vec::len), Some(0));

	Ok(())
}

#[test]
fn render_reports_unresolved_templates_and_continues() -> AnyEmptyResult {
	let tmp = common::greeting_project();
	std::fs::write(
		tmp.path().join("extra.md"),
		"{lang='text' name='other' template='missing' ver='1'}\n    nothing\n",
	)?;

	common::literate_cmd(tmp.path())
		.args(["render", "book.md", "extra.md", "--templates", "templates"])
		.assert()
		.success()
		.stdout(predicates::str::contains("2 error(s)"));

	assert!(tmp.path().join("templates/t-2.txt").is_file());

	Ok(())
}

#[test]
fn render_fails_for_missing_document() -> AnyEmptyResult {
	let tmp = common::greeting_project();

	common::literate_cmd(tmp.path())
		.args(["render", "absent", "--templates", "templates"])
		.assert()
		.code(2)
		.stderr(predicates::str::contains("literate::missing_document"));

	Ok(())
}

#[test]
fn render_fails_for_missing_template_directory() -> AnyEmptyResult {
	let tmp = common::greeting_project();

	common::literate_cmd(tmp.path())
		.args(["render", "book.md", "--templates", "nope"])
		.assert()
		.code(2)
		.stderr(predicates::str::contains("literate::missing_template_directory"));

	assert!(!tmp.path().join("templates/t-1.txt").exists());

	Ok(())
}

#[test]
fn render_fails_for_template_without_content_extension() -> AnyEmptyResult {
	let tmp = common::greeting_project();
	std::fs::remove_file(tmp.path().join("templates").join("t.txt.jinja"))?;
	std::fs::write(tmp.path().join("templates").join("t.jinja"), "{{ greeting }}")?;
	std::fs::write(
		tmp.path().join("book.md"),
		"{lang='text' name='greeting' template='t.jinja' ver='1'}\n    hello\n",
	)?;

	common::literate_cmd(tmp.path())
		.args(["render", "book.md", "--templates", "templates"])
		.assert()
		.code(2)
		.stderr(predicates::str::contains("literate::invalid_template_extension"));

	Ok(())
}

#[test]
fn render_requires_documents() -> AnyEmptyResult {
	let tmp = common::greeting_project();

	common::literate_cmd(tmp.path())
		.args(["render", "--templates", "templates"])
		.assert()
		.failure();

	Ok(())
}
