use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Extract versioned code blocks from prose and render them into templates.",
	long_about = "literate reads documents containing named, versioned code blocks declared \
	              with `{lang='…' name='…' template='…' ver='…'}` lines and renders one file per \
	              template and version, or writes an HTML history of how each block changed.\n\n\
	              Quick start:\n  literate render book.md --templates templates\n  literate \
	              diff book.md --output history\n  literate list book.md"
)]
pub struct LiterateCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Enable debug logging.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Suppress all log output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub quiet: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Render every template once per version.
	///
	/// Extracts the code blocks from the documents, then walks every version
	/// from the lowest to the highest declared. At each version every template
	/// referenced so far is rendered into `<stem>-<version>.<ext>` next to the
	/// template file.
	Render {
		/// Documents to extract from. `.md` is appended when the path does not
		/// exist.
		#[arg(required = true)]
		documents: Vec<PathBuf>,

		/// Directory holding the `<stem>.<ext>.<suffix>` template files.
		#[arg(long, short)]
		templates: PathBuf,

		/// Configuration file. Defaults to the nearest `literate.toml`,
		/// `.literate.toml` or `.literaterc`.
		#[arg(long, short)]
		config: Option<PathBuf>,

		/// Output format for the list of written files.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Write an HTML report of how each block changed between versions.
	///
	/// Line filters are not applied, so the report shows every line of each
	/// block. The output directory must already exist.
	Diff {
		/// Documents to extract from.
		#[arg(required = true)]
		documents: Vec<PathBuf>,

		/// Existing directory receiving `index.html` and `diff.css`.
		#[arg(long, short)]
		output: PathBuf,
	},
	/// List the code blocks found in the documents.
	List {
		/// Documents to extract from.
		#[arg(required = true)]
		documents: Vec<PathBuf>,

		/// Configuration file. Defaults to the nearest `literate.toml`,
		/// `.literate.toml` or `.literaterc`.
		#[arg(long, short)]
		config: Option<PathBuf>,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption. Includes every written file,
	/// the version range and all diagnostics.
	Json,
}
