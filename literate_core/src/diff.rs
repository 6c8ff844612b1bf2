use std::fmt::Write as _;
use std::path::Path;
use std::path::PathBuf;

use minijinja::Environment;
use minijinja::HtmlEscape;
use minijinja::Value;
use minijinja::context;
use serde::Serialize;
use similar::ChangeTag;
use similar::TextDiff;

use crate::CodeBlock;
use crate::Diagnostic;
use crate::LiterateError;
use crate::LiterateResult;
use crate::document::extract_documents;
use crate::document::resolve_document_paths;
use crate::filter::LineFilter;

/// File name of the combined report written by [`DiffReport::write_to`].
pub const REPORT_FILE_NAME: &str = "index.html";
/// File name of the stylesheet written next to the report.
pub const STYLESHEET_FILE_NAME: &str = "diff.css";

/// Stylesheet shipped with every report.
pub const STYLESHEET: &str = r"body {
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
  margin: 2rem;
  color: #24292e;
}
section.block {
  margin-bottom: 3rem;
}
div.diff h3 {
  font-size: 1rem;
  margin: 1.5rem 0 0.5rem;
}
pre.diff {
  background: #f6f8fa;
  padding: 0.75rem;
  overflow-x: auto;
}
pre.diff span {
  display: block;
}
pre.diff span.ins {
  background: #e6ffed;
}
pre.diff span.del {
  background: #ffeef0;
}
";

const REPORT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Code block history</title>
<link rel="stylesheet" href="{{ stylesheet }}">
</head>
<body>
{%- for section in sections %}
<section class="block">
<h2>{{ section.name }}</h2>
{%- for record in section.records %}
<div class="diff">
<h3>{{ section.name }}: v{{ record.from_version }} &rarr; v{{ record.to_version }}</h3>
{{ record.fragment }}
</div>
{%- endfor %}
</section>
{%- endfor %}
</body>
</html>
"#;

/// Computes a rendered fragment showing the difference between two texts.
pub trait DiffRenderer {
	fn render(&self, before: &str, after: &str) -> String;
}

/// Line based HTML diff backed by `similar`. Each line becomes a `<span>`
/// classed `ins`, `del` or `eq` inside a `<pre class="diff">`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlLineDiff;

impl DiffRenderer for HtmlLineDiff {
	fn render(&self, before: &str, after: &str) -> String {
		let diff = TextDiff::from_lines(before, after);
		let mut fragment = String::from("<pre class=\"diff\">");

		for change in diff.iter_all_changes() {
			let (class, sign) = match change.tag() {
				ChangeTag::Delete => ("del", '-'),
				ChangeTag::Insert => ("ins", '+'),
				ChangeTag::Equal => ("eq", ' '),
			};
			let line = change.value().trim_end_matches(['\n', '\r']);
			let _ = write!(
				fragment,
				"<span class=\"{class}\">{sign} {}</span>",
				HtmlEscape(line)
			);
		}

		fragment.push_str("</pre>");
		fragment
	}
}

/// The diff between two adjacent versions of one named block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffRecord {
	pub from_version: u32,
	pub to_version: u32,
	/// The fragment produced by the [`DiffRenderer`].
	pub fragment: String,
}

/// All diff records of one block name, ordered by version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffSection {
	pub name: String,
	pub records: Vec<DiffRecord>,
}

/// The combined history of every block name with two or more versions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffReport {
	pub sections: Vec<DiffSection>,
}

/// Result of a diff run.
#[derive(Debug, Clone, Serialize)]
pub struct DiffOutput {
	pub report: PathBuf,
	pub stylesheet: PathBuf,
	/// Number of diff records in the report.
	pub records: usize,
	pub diagnostics: Vec<Diagnostic>,
}

/// Group blocks by name and diff each pair of adjacent versions.
///
/// Sections follow the order in which names first appear. Versions are
/// sorted ascending and only neighbours are compared, so versions 1, 2 and 4
/// produce 1→2 and 2→4. When a name has several blocks at the same version
/// (for different templates) the first one stands for that version.
pub fn build_diff_report(blocks: &[CodeBlock], renderer: &dyn DiffRenderer) -> DiffReport {
	let mut groups: Vec<(&str, Vec<&CodeBlock>)> = Vec::new();

	for block in blocks {
		match groups.iter_mut().find(|(name, _)| *name == block.name) {
			Some((_, group)) => {
				if group.iter().all(|existing| existing.version != block.version) {
					group.push(block);
				}
			}
			None => groups.push((block.name.as_str(), vec![block])),
		}
	}

	let sections = groups
		.into_iter()
		.filter(|(_, group)| group.len() > 1)
		.map(|(name, mut group)| {
			group.sort_by_key(|block| block.version);
			let records = group
				.windows(2)
				.map(|pair| {
					DiffRecord {
						from_version: pair[0].version,
						to_version: pair[1].version,
						fragment: renderer.render(&pair[0].content(), &pair[1].content()),
					}
				})
				.collect();
			DiffSection {
				name: name.to_string(),
				records,
			}
		})
		.collect();

	DiffReport { sections }
}

impl DiffReport {
	pub fn record_count(&self) -> usize {
		self.sections.iter().map(|section| section.records.len()).sum()
	}

	/// Render the combined HTML report. Names are escaped; fragments are
	/// inserted as produced by the [`DiffRenderer`].
	pub fn to_html(&self) -> LiterateResult<String> {
		let render_error = |e: minijinja::Error| {
			LiterateError::TemplateRender {
				template: REPORT_FILE_NAME.to_string(),
				reason: e.to_string(),
			}
		};

		let sections: Vec<Value> = self
			.sections
			.iter()
			.map(|section| {
				let records: Vec<Value> = section
					.records
					.iter()
					.map(|record| {
						context! {
							from_version => record.from_version,
							to_version => record.to_version,
							fragment => Value::from_safe_string(record.fragment.clone()),
						}
					})
					.collect();
				context! { name => section.name, records => records }
			})
			.collect();

		let mut env = Environment::new();
		env.set_keep_trailing_newline(true);
		env.add_template(REPORT_FILE_NAME, REPORT_TEMPLATE)
			.map_err(render_error)?;
		env.get_template(REPORT_FILE_NAME)
			.map_err(render_error)?
			.render(context! { stylesheet => STYLESHEET_FILE_NAME, sections => sections })
			.map_err(render_error)
	}

	/// Write the report and the stylesheet into an existing directory.
	pub fn write_to(&self, directory: &Path) -> LiterateResult<(PathBuf, PathBuf)> {
		if !directory.is_dir() {
			return Err(LiterateError::MissingOutputDirectory(
				directory.display().to_string(),
			));
		}

		let stylesheet = directory.join(STYLESHEET_FILE_NAME);
		std::fs::write(&stylesheet, STYLESHEET)?;
		tracing::info!("wrote {}", stylesheet.display());

		let report = directory.join(REPORT_FILE_NAME);
		std::fs::write(&report, self.to_html()?)?;
		tracing::info!("wrote {}", report.display());

		Ok((report, stylesheet))
	}
}

/// Extract blocks with filtering disabled and write the diff report into
/// `output_dir`.
pub fn extract_and_diff<P: AsRef<Path>>(
	documents: &[P],
	output_dir: &Path,
) -> LiterateResult<DiffOutput> {
	diff_with(documents, output_dir, &HtmlLineDiff)
}

/// Like [`extract_and_diff`] with a custom diff renderer.
pub fn diff_with<P: AsRef<Path>>(
	documents: &[P],
	output_dir: &Path,
	renderer: &dyn DiffRenderer,
) -> LiterateResult<DiffOutput> {
	let documents = resolve_document_paths(documents)?;
	if !output_dir.is_dir() {
		return Err(LiterateError::MissingOutputDirectory(
			output_dir.display().to_string(),
		));
	}

	let extraction = extract_documents(&documents, &LineFilter::disabled())?;
	let report = build_diff_report(&extraction.blocks, renderer);
	let (report_path, stylesheet_path) = report.write_to(output_dir)?;

	Ok(DiffOutput {
		report: report_path,
		stylesheet: stylesheet_path,
		records: report.record_count(),
		diagnostics: extraction.diagnostics,
	})
}
