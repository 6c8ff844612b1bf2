use std::collections::BTreeMap;

use minijinja::AutoEscape;
use minijinja::Environment;
use minijinja::UndefinedBehavior;
use minijinja::Value;
use minijinja::context;

use crate::CodeBlock;
use crate::LiterateError;
use crate::LiterateResult;

/// Reserved top-level name holding run metadata, read in templates as
/// `{{ literate.meta.version }}`.
pub const META_NAMESPACE: &str = "literate";

/// The binding table of one template identifier.
///
/// A namespace lives for the whole run: a name bound at one version stays
/// bound at later versions until a block with the same name replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateNamespace {
	bindings: BTreeMap<String, String>,
	version: Option<u32>,
}

impl TemplateNamespace {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn bind(&mut self, name: impl Into<String>, content: impl Into<String>) {
		self.bindings.insert(name.into(), content.into());
	}

	/// Bind each block's name to its content, in the given order.
	pub fn merge<'a>(&mut self, blocks: impl IntoIterator<Item = &'a CodeBlock>) {
		for block in blocks {
			self.bind(block.name.clone(), block.content());
		}
	}

	pub fn set_version(&mut self, version: u32) {
		self.version = Some(version);
	}

	/// The most recently set version.
	pub fn version(&self) -> Option<u32> {
		self.version
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self.bindings.get(name).map(String::as_str)
	}

	pub fn bindings(&self) -> &BTreeMap<String, String> {
		&self.bindings
	}

	/// Build the evaluation context: every binding as a top-level variable,
	/// `version` as a shorthand unless a block claims that name, and the
	/// reserved `literate.meta.version`.
	pub fn to_context(&self) -> Value {
		let mut values: BTreeMap<String, Value> = BTreeMap::new();
		values.insert("version".to_string(), Value::from(self.version));

		for (name, content) in &self.bindings {
			values.insert(name.clone(), Value::from(content.as_str()));
		}

		values.insert(
			META_NAMESPACE.to_string(),
			context! { meta => context! { version => self.version } },
		);

		Value::from_serialize(&values)
	}
}

/// Evaluates template text against a namespace.
pub trait TemplateRenderer {
	/// Render `source`, named `name` for error reporting.
	fn render(
		&self,
		name: &str,
		source: &str,
		namespace: &TemplateNamespace,
	) -> LiterateResult<String>;
}

/// The default renderer, backed by minijinja.
///
/// Trailing newlines are kept, output is never auto-escaped and undefined
/// names render as empty text.
#[derive(Debug, Clone, Copy, Default)]
pub struct JinjaRenderer;

impl TemplateRenderer for JinjaRenderer {
	fn render(
		&self,
		name: &str,
		source: &str,
		namespace: &TemplateNamespace,
	) -> LiterateResult<String> {
		let render_error = |e: minijinja::Error| {
			LiterateError::TemplateRender {
				template: name.to_string(),
				reason: e.to_string(),
			}
		};

		let mut env = Environment::new();
		env.set_keep_trailing_newline(true);
		env.set_undefined_behavior(UndefinedBehavior::Chainable);
		env.set_auto_escape_callback(|_| AutoEscape::None);
		env.add_template(name, source).map_err(render_error)?;

		let template = env.get_template(name).map_err(render_error)?;
		template
			.render(namespace.to_context())
			.map_err(render_error)
	}
}
