//! CLI definition, config resolution, and tracing setup.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use indicatif::{ProgressBar, ProgressStyle};
use tocgen_core::pipeline::{self, ProgressReporter, RunReport};
use tocgen_shared::{TocConfig, load_config, load_config_from};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// tocgen: generate a README table of contents from numbered files.
#[derive(Parser)]
#[command(
    name = "tocgen",
    version,
    about = "Generate or refresh a README table of contents from numbered notebooks and documents.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Directory to scan for numbered files.
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Target document (relative paths resolve against --dir).
    #[arg(short, long)]
    pub readme: Option<PathBuf>,

    /// Config file to use instead of <dir>/tocgen.toml.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Link Markdown and notebook headings to their anchors.
    #[arg(long)]
    pub link_headings: bool,

    /// Ignore heading-like lines inside fenced code blocks.
    #[arg(long)]
    pub skip_code_fences: bool,

    /// Print the generated TOC instead of writing it.
    #[arg(long)]
    pub dry_run: bool,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr so `--dry-run`
/// output stays clean.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "tocgen=info",
        1 => "tocgen=debug",
        _ => "tocgen=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Config resolution
// ---------------------------------------------------------------------------

/// Merge defaults, the config file, and CLI flags (in increasing priority).
fn resolve_config(cli: &Cli) -> Result<TocConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = load_config_from(path)
                .wrap_err_with(|| format!("loading config {}", path.display()))?;
            config.root_dir = cli.dir.clone();
            config
        }
        None => load_config(&cli.dir)?,
    };

    if let Some(readme) = &cli.readme {
        config.readme = readme.clone();
    }
    if cli.link_headings {
        config.link_headings = true;
    }
    if cli.skip_code_fences {
        config.skip_code_fences = true;
    }
    config.dry_run = cli.dry_run;

    Ok(config)
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Run the pipeline and print a summary.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;

    info!(
        dir = %config.root_dir.display(),
        readme = %config.readme_path().display(),
        extensions = ?config.extensions,
        "generating table of contents"
    );

    let reporter = CliProgress::new();
    let report = pipeline::run(&config, &reporter)?;

    match report.outcome {
        None => println!("{}", report.toc),
        Some(outcome) => {
            println!();
            println!("  Table of contents {}!", outcome.as_str());
            println!("  Files:    {}", report.file_count);
            println!("  Headings: {}", report.heading_count);
            println!("  Target:   {}", report.target.display());
            println!();
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(
                style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
            );
        }
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn file_extracted(&self, name: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Extracting [{current}/{total}] {name}"));
    }

    fn done(&self, _report: &RunReport) {
        self.spinner.finish_and_clear();
    }
}
