use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum LiterateError {
	#[error(transparent)]
	#[diagnostic(code(literate::io_error))]
	Io(#[from] std::io::Error),

	#[error("unable to find markdown file `{0}`")]
	#[diagnostic(
		code(literate::missing_document),
		help("the `.md` extension is appended automatically when the path does not exist")
	)]
	MissingDocument(String),

	#[error("unable to find template directory `{0}`")]
	#[diagnostic(code(literate::missing_template_directory))]
	MissingTemplateDirectory(String),

	#[error("template directory `{path}` must end with extension `.{suffix}` or have none")]
	#[diagnostic(code(literate::template_directory_extension))]
	TemplateDirectoryExtension { path: String, suffix: String },

	#[error("unexpected extension for template file `{file}`")]
	#[diagnostic(
		code(literate::invalid_template_extension),
		help("template files must end with `.<ext>.{suffix}`, e.g. `template.js.{suffix}`")
	)]
	InvalidTemplateExtension { file: String, suffix: String },

	#[error("invalid template search pattern for `{template}`: {reason}")]
	#[diagnostic(code(literate::template_pattern))]
	TemplatePattern { template: String, reason: String },

	#[error("template rendering failed for `{template}`: {reason}")]
	#[diagnostic(code(literate::template_render))]
	TemplateRender { template: String, reason: String },

	#[error("unable to find diff output directory `{0}`")]
	#[diagnostic(
		code(literate::missing_output_directory),
		help("create the directory before running the diff")
	)]
	MissingOutputDirectory(String),

	#[error("config file `{0}` not found")]
	#[diagnostic(code(literate::config_not_found))]
	ConfigNotFound(String),

	#[error("failed to parse config file `{path}`: {reason}")]
	#[diagnostic(
		code(literate::config_parse),
		help(
			"supported keys: filter_lines_matching, filter_leanpub_code_comments, \
			 template_suffix"
		)
	)]
	ConfigParse { path: String, reason: String },

	#[error("invalid filter pattern `{pattern}`: {reason}")]
	#[diagnostic(code(literate::filter_pattern))]
	FilterPattern { pattern: String, reason: String },
}

pub type LiterateResult<T> = Result<T, LiterateError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
