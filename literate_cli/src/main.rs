use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use literate_cli::Commands;
use literate_cli::LiterateCli;
use literate_cli::OutputFormat;
use literate_core::LiterateConfig;
use literate_core::RenderResult;
use literate_core::Severity;
use literate_core::diff::extract_and_diff;
use literate_core::extract_and_render;
use literate_core::extract_documents;
use literate_core::filter::LineFilter;
use literate_core::resolve_document_paths;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Set to any value to silence all log output, as `--quiet` does.
const QUIET_ENV_VAR: &str = "LITERATE_TEST";

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = LiterateCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let quiet = args.quiet || std::env::var_os(QUIET_ENV_VAR).is_some();
	if !quiet {
		init_logging(args.verbose, use_color);
	}

	let result = match &args.command {
		Some(Commands::Render {
			documents,
			templates,
			config,
			format,
		}) => run_render(documents, templates, config.as_deref(), *format),
		Some(Commands::Diff { documents, output }) => run_diff(documents, output),
		Some(Commands::List { documents, config }) => run_list(documents, config.as_deref()),
		None => {
			eprintln!("No subcommand specified. Run `literate --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		match e.downcast::<literate_core::LiterateError>() {
			Ok(literate_err) => {
				let report: miette::Report = (*literate_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Timestamped log lines on stderr. `RUST_LOG` overrides the level chosen by
/// `--verbose`.
fn init_logging(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "info" };
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::registry()
		.with(filter)
		.with(
			tracing_subscriber::fmt::layer()
				.with_writer(std::io::stderr)
				.with_ansi(use_color)
				.with_target(false),
		)
		.try_init()
		.ok();
}

fn current_dir() -> PathBuf {
	std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Load the explicit config file, or discover one from the working directory
/// and then from the first document's directory.
fn load_config(
	explicit: Option<&Path>,
	documents: &[PathBuf],
) -> Result<LiterateConfig, Box<dyn std::error::Error>> {
	if let Some(path) = explicit {
		return Ok(LiterateConfig::load_file(path)?);
	}

	let document_dir = documents
		.first()
		.and_then(|document| document.parent())
		.filter(|parent| !parent.as_os_str().is_empty());
	let discovered = match (LiterateConfig::discover(&current_dir())?, document_dir) {
		(Some(config), _) => Some(config),
		(None, Some(dir)) => LiterateConfig::discover(dir)?,
		(None, None) => None,
	};

	let config = discovered.unwrap_or_default();
	tracing::debug!(?config, "resolved configuration");
	Ok(config)
}

fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}

fn run_render(
	documents: &[PathBuf],
	templates: &Path,
	config: Option<&Path>,
	format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
	let config = load_config(config, documents)?;
	let result = extract_and_render(documents, templates, &config)?;

	match format {
		OutputFormat::Text => print_render_text(&result),
		OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
	}

	Ok(())
}

fn print_render_text(result: &RenderResult) {
	let root = current_dir();

	if result.written.is_empty() {
		println!("No files written.");
	} else {
		for file in &result.written {
			println!(
				"{} {} (v{})",
				colored!("wrote", green),
				make_relative(&file.path, &root),
				file.version
			);
		}
	}

	if let Some(versions) = &result.versions {
		println!(
			"\n{} file(s) written for versions {}..={}",
			result.written.len(),
			versions.start(),
			versions.end()
		);
	}

	print_diagnostic_summary(
		result
			.diagnostics
			.iter()
			.map(literate_core::Diagnostic::severity),
	);
}

fn print_diagnostic_summary(severities: impl Iterator<Item = Severity>) {
	let (errors, warnings) = severities.fold((0, 0), |(errors, warnings), severity| {
		match severity {
			Severity::Error => (errors + 1, warnings),
			Severity::Warning => (errors, warnings + 1),
		}
	});

	if errors > 0 {
		println!("{}", colored!(format!("{errors} error(s)"), red));
	}
	if warnings > 0 {
		println!("{}", colored!(format!("{warnings} warning(s)"), yellow));
	}
}

fn run_diff(documents: &[PathBuf], output: &Path) -> Result<(), Box<dyn std::error::Error>> {
	let result = extract_and_diff(documents, output)?;
	let root = current_dir();

	println!(
		"{} {} ({} change(s))",
		colored!("wrote", green),
		make_relative(&result.report, &root),
		result.records
	);
	print_diagnostic_summary(result.diagnostics.iter().map(literate_core::Diagnostic::severity));

	Ok(())
}

fn run_list(documents: &[PathBuf], config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
	let config = load_config(config, documents)?;
	let documents = resolve_document_paths(documents)?;
	let filter = LineFilter::new(&config.filter_config())?;
	let extraction = extract_documents(&documents, &filter)?;
	let root = current_dir();

	if extraction.is_empty() {
		println!("No code blocks found.");
		return Ok(());
	}

	println!("{}", colored!("Blocks:", bold));
	for block in &extraction.blocks {
		println!(
			"  {} template={} ver={} {}:{}",
			block.name,
			block.template,
			block.version,
			make_relative(&block.file, &root),
			block.line
		);
	}

	println!("\n{} block(s)", extraction.blocks.len());
	print_diagnostic_summary(extraction.diagnostics.iter().map(literate_core::Diagnostic::severity));

	Ok(())
}
