use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;

use crate::CodeBlock;
use crate::Diagnostic;
use crate::LiterateResult;
use crate::config::LiterateConfig;
use crate::document::extract_documents;
use crate::document::resolve_document_paths;
use crate::filter::LineFilter;
use crate::namespace::JinjaRenderer;
use crate::namespace::TemplateNamespace;
use crate::namespace::TemplateRenderer;
use crate::template::TemplateDirectory;
use crate::template::TemplateFile;

/// A file written for one (template, version) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedFile {
	pub template: String,
	pub version: u32,
	pub path: PathBuf,
}

/// Result of a render run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RenderResult {
	/// Files written, in the order they were written.
	pub written: Vec<RenderedFile>,
	/// Recoverable problems from extraction and rendering.
	pub diagnostics: Vec<Diagnostic>,
	/// The inclusive version range that was iterated. `None` when no blocks
	/// were found.
	pub versions: Option<RangeInclusive<u32>>,
}

impl RenderResult {
	/// Returns true if any diagnostic was recorded.
	pub fn has_diagnostics(&self) -> bool {
		!self.diagnostics.is_empty()
	}
}

/// The inclusive range between the lowest and highest block version.
pub fn version_range(blocks: &[CodeBlock]) -> Option<RangeInclusive<u32>> {
	let min = blocks.iter().map(|block| block.version).min()?;
	let max = blocks.iter().map(|block| block.version).max()?;
	Some(min..=max)
}

/// Render pruned blocks into their templates, once per version.
///
/// Every version between the lowest and highest is visited, including gap
/// versions without blocks of their own. At each version, every template
/// referenced so far is rendered again, so bindings from earlier versions
/// carry over. A template that cannot be resolved is skipped for that version
/// only.
pub fn render_blocks(
	blocks: &[CodeBlock],
	templates: &TemplateDirectory,
	renderer: &dyn TemplateRenderer,
) -> LiterateResult<RenderResult> {
	let mut result = RenderResult {
		versions: version_range(blocks),
		..RenderResult::default()
	};
	let Some(versions) = result.versions.clone() else {
		return Ok(result);
	};

	let mut namespaces: HashMap<&str, TemplateNamespace> = HashMap::new();
	let mut referenced: Vec<&str> = Vec::new();

	for version in versions {
		let active: Vec<&CodeBlock> = blocks
			.iter()
			.filter(|block| block.version == version)
			.collect();

		for block in active.iter().copied() {
			if !referenced.contains(&block.template.as_str()) {
				referenced.push(block.template.as_str());
			}
		}

		for &identifier in &referenced {
			let namespace = namespaces.entry(identifier).or_default();
			namespace.merge(
				active
					.iter()
					.copied()
					.filter(|block| block.template == identifier),
			);
			namespace.set_version(version);

			let mut diagnostics = Vec::new();
			let resolved = templates.resolve(identifier, &mut diagnostics)?;
			result
				.diagnostics
				.extend(diagnostics.into_iter().map(|d| d.during(version)));
			let Some(template_path) = resolved else {
				continue;
			};

			let template = TemplateFile::parse(&template_path, templates.suffix())?;
			let source = std::fs::read_to_string(&template.path)?;
			let mut output = renderer.render(identifier, &source, namespace)?;
			if !output.ends_with('\n') {
				output.push('\n');
			}

			let output_path = template.output_path(version);
			std::fs::write(&output_path, output)?;
			tracing::info!("wrote {}", truncate_left(&output_path.display().to_string(), 50));

			result.written.push(RenderedFile {
				template: identifier.to_string(),
				version,
				path: output_path,
			});
		}
	}

	Ok(result)
}

/// Extract blocks from the documents and render them into the templates
/// found in `template_dir`.
///
/// Fatal setup errors (missing document, missing or misnamed template
/// directory, invalid filter pattern) abort before any output is written.
pub fn extract_and_render<P: AsRef<Path>>(
	documents: &[P],
	template_dir: &Path,
	config: &LiterateConfig,
) -> LiterateResult<RenderResult> {
	render_with(documents, template_dir, config, &JinjaRenderer)
}

/// Like [`extract_and_render`] with a custom template renderer.
pub fn render_with<P: AsRef<Path>>(
	documents: &[P],
	template_dir: &Path,
	config: &LiterateConfig,
	renderer: &dyn TemplateRenderer,
) -> LiterateResult<RenderResult> {
	let documents = resolve_document_paths(documents)?;
	let templates = TemplateDirectory::open(template_dir, &config.template_suffix)?;
	let filter = LineFilter::new(&config.filter_config())?;
	let extraction = extract_documents(&documents, &filter)?;

	let mut result = render_blocks(&extraction.blocks, &templates, renderer)?;
	let mut diagnostics = extraction.diagnostics;
	diagnostics.append(&mut result.diagnostics);
	result.diagnostics = diagnostics;

	tracing::info!("done");
	Ok(result)
}

/// Shorten a string from the left to at most `max` characters, prefixing
/// `...` when anything was cut.
fn truncate_left(text: &str, max: usize) -> String {
	let count = text.chars().count();
	if count <= max {
		return text.to_string();
	}

	let tail: String = text.chars().skip(count - max).collect();
	format!("...{tail}")
}
