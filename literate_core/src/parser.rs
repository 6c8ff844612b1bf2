use std::path::Path;

use crate::CodeBlock;
use crate::Diagnostic;
use crate::DiagnosticKind;
use crate::filter::LineFilter;
use crate::lexer::tokenize_declaration;

/// The attributes read from a declaration line such as
/// `{lang='ruby' name='greeting' template='app' ver='2'}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declaration {
	pub lang: String,
	pub name: Option<String>,
	pub template: Option<String>,
	pub version: Option<String>,
}

/// Parse a single line as a declaration. Returns `None` unless the line is
/// fully wrapped in braces and carries a non-empty `lang` attribute.
///
/// Attribute order does not matter, unknown attributes are ignored and a
/// repeated key keeps its last value. Empty values count as absent.
pub fn parse_declaration(line: &str) -> Option<Declaration> {
	let mut lang = None;
	let mut declaration = Declaration::default();

	for attribute in tokenize_declaration(line)? {
		if attribute.value.is_empty() {
			continue;
		}

		let slot = match attribute.key.as_str() {
			"lang" => &mut lang,
			"name" => &mut declaration.name,
			"template" => &mut declaration.template,
			"ver" => &mut declaration.version,
			_ => continue,
		};
		*slot = Some(attribute.value);
	}

	declaration.lang = lang?;
	Some(declaration)
}

/// Parse a `ver` value. Anything that is not a non-negative integer becomes
/// `0`; the second value reports whether that coercion happened.
pub fn parse_version(value: &str) -> (u32, bool) {
	match value.trim().parse::<u32>() {
		Ok(version) => (version, false),
		Err(_) => (0, true),
	}
}

/// Scan one document and return its blocks together with diagnostics.
///
/// A single cursor drives both the declaration scan and body collection.
/// Body collection consumes every following blank or indented line and stops
/// at the first line that is neither; that line is then examined by the
/// declaration scan again.
pub fn extract_blocks(
	content: &str,
	file: &Path,
	filter: &LineFilter,
) -> (Vec<CodeBlock>, Vec<Diagnostic>) {
	let lines: Vec<&str> = content.split_inclusive('\n').collect();
	let mut blocks = Vec::new();
	let mut diagnostics = Vec::new();
	let mut cursor = 0;

	while cursor < lines.len() {
		let line = lines[cursor];
		cursor += 1;
		let declaration_line = cursor;

		let Some(declaration) = parse_declaration(line) else {
			continue;
		};

		let (name, template, raw_version) =
			match (declaration.name, declaration.template, declaration.version) {
				(None, None, None) => continue,
				(Some(name), Some(template), Some(version)) => (name, template, version),
				(name, template, version) => {
					let diagnostic = Diagnostic::new(DiagnosticKind::IncompleteDeclaration {
						name,
						template,
						version,
					})
					.at(file, declaration_line);
					diagnostic.emit();
					diagnostics.push(diagnostic);
					continue;
				}
			};

		let mut body = Vec::new();
		while cursor < lines.len() && is_body_line(lines[cursor]) {
			if !filter.is_excluded(lines[cursor]) {
				body.push(lines[cursor]);
			}
			cursor += 1;
		}

		if body.is_empty() {
			let diagnostic = Diagnostic::new(DiagnosticKind::EmptyBlock).at(file, declaration_line);
			diagnostic.emit();
			diagnostics.push(diagnostic);
			continue;
		}

		let (version, coerced) = parse_version(&raw_version);
		if coerced {
			let diagnostic = Diagnostic::new(DiagnosticKind::NonNumericVersion { value: raw_version })
				.at(file, declaration_line);
			diagnostic.emit();
			diagnostics.push(diagnostic);
		}

		tracing::debug!(%name, %template, version, line = declaration_line, "found block");
		blocks.push(CodeBlock {
			lines: dedent(&body),
			name,
			template,
			version,
			line: declaration_line,
			file: file.to_path_buf(),
		});
	}

	(blocks, diagnostics)
}

/// A body line is blank or starts with whitespace.
fn is_body_line(line: &str) -> bool {
	line.chars().next().is_none_or(char::is_whitespace)
}

fn is_blank(line: &str) -> bool {
	line.trim().is_empty()
}

/// Count of leading whitespace characters, not counting the line terminator.
fn indent_width(line: &str) -> usize {
	line.trim_end_matches(['\n', '\r'])
		.chars()
		.take_while(|c| c.is_whitespace())
		.count()
}

/// Remove the common indentation of all non-blank lines. Blank lines lose at
/// most that many whitespace characters and keep their terminator.
pub fn dedent(lines: &[&str]) -> Vec<String> {
	let width = lines
		.iter()
		.filter(|line| !is_blank(line))
		.map(|line| indent_width(line))
		.min()
		.unwrap_or(0);

	lines
		.iter()
		.map(|line| {
			let strip = indent_width(line).min(width);
			let offset = line
				.char_indices()
				.nth(strip)
				.map_or(line.len(), |(index, _)| index);
			line[offset..].to_string()
		})
		.collect()
}
