//! CLI definition, option resolution, tracing setup, and the run itself.

use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use srcprint_core::{BuildReport, ProgressReporter, build_document};
use srcprint_highlight::Highlighter;
use srcprint_shared::{AppConfig, BuildOptions, OutputFormat, load_config, load_config_from};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// srcprint — pretty-print source code into one HTML or LaTeX document.
#[derive(Parser)]
#[command(
    name = "srcprint",
    version,
    about = "Pretty-print source files with syntax highlighting into one HTML or LaTeX document.",
    override_usage = "srcprint [options] file...",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Highlighting style (see --list-styles).
    #[arg(short, long, env = "SRCPRINT_STYLE")]
    pub style: Option<String>,

    /// Output file (default: output.html, or output.tex with --latex).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Wrap lines longer than this many characters (HTML only).
    #[arg(
        short,
        long,
        env = "SRCPRINT_WIDTH",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub width: Option<u32>,

    /// Write LaTeX instead of HTML.
    #[arg(short, long)]
    pub latex: bool,

    /// Write HTML even if the config file selects LaTeX.
    #[arg(long, conflicts_with = "latex")]
    pub html: bool,

    /// Read configuration from this file instead of ~/.srcprint/srcprint.toml.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the available style names and exit.
    #[arg(long)]
    pub list_styles: bool,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Source files, rendered in the order given.
    pub files: Vec<PathBuf>,
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

/// Initialize tracing based on CLI flags. Logs go to stderr.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "srcprint=warn",
        1 => "srcprint=info",
        2 => "srcprint=debug",
        _ => "srcprint=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

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
// Run
// ---------------------------------------------------------------------------

/// Run the CLI.
pub(crate) fn run(cli: Cli) -> Result<()> {
    if cli.files.is_empty() && !cli.list_styles {
        println!("No input files");
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    let highlighter = load_highlighter(&config)?;

    if cli.list_styles {
        for name in highlighter.style_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let options = resolve_options(&cli, &config);
    info!(
        files = options.files.len(),
        output = %options.output.display(),
        format = %options.format,
        style = %options.style,
        "starting run"
    );

    let progress = CliProgress::new();
    let report = build_document(&options, &highlighter, &progress)?;

    if report.wrapped_lines > 0 {
        println!("(wrapped {} lines)", report.wrapped_lines);
    }

    Ok(())
}

/// Merge CLI flags over config values over built-in defaults.
pub(crate) fn resolve_options(cli: &Cli, config: &AppConfig) -> BuildOptions {
    let format = if cli.latex {
        OutputFormat::Latex
    } else if cli.html {
        OutputFormat::Html
    } else {
        config.defaults.format
    };

    let mut options = BuildOptions::new(format, cli.files.clone());
    if let Some(output) = &cli.output {
        options.output = output.clone();
    }
    options.style = cli
        .style
        .clone()
        .unwrap_or_else(|| config.defaults.style.clone());
    options.width = cli
        .width
        .map_or(config.defaults.width, |w| w as usize);
    options
}

fn load_highlighter(config: &AppConfig) -> Result<Highlighter> {
    match &config.styles.theme_dir {
        Some(dir) => Ok(Highlighter::with_theme_dir(dir)?),
        None => Ok(Highlighter::new()),
    }
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner on stderr.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn file_started(&self, path: &Path, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Rendering [{current}/{total}] {}", path.display()));
    }

    fn done(&self, _report: &BuildReport) {
        self.spinner.finish_and_clear();
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        // Failed runs never reach `done`.
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("srcprint").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn defaults_without_flags() {
        let cli = parse(&["a.py", "b.js"]);
        let opts = resolve_options(&cli, &AppConfig::default());

        assert_eq!(opts.files, vec![PathBuf::from("a.py"), PathBuf::from("b.js")]);
        assert_eq!(opts.format, OutputFormat::Html);
        assert_eq!(opts.output, PathBuf::from("output.html"));
        assert_eq!(opts.width, 100);
    }

    #[test]
    fn latex_flag_changes_default_output() {
        let cli = parse(&["-l", "a.py"]);
        let opts = resolve_options(&cli, &AppConfig::default());
        assert_eq!(opts.format, OutputFormat::Latex);
        assert_eq!(opts.output, PathBuf::from("output.tex"));
    }

    #[test]
    fn short_flags_parse() {
        let cli = parse(&["-s", "bw", "-o", "out/doc.html", "-w", "72", "x.rs"]);
        let opts = resolve_options(&cli, &AppConfig::default());
        assert_eq!(opts.style, "bw");
        assert_eq!(opts.output, PathBuf::from("out/doc.html"));
        assert_eq!(opts.width, 72);
    }

    #[test]
    fn cli_overrides_config() {
        let mut config = AppConfig::default();
        config.defaults.style = "Solarized (light)".into();
        config.defaults.width = 60;
        config.defaults.format = OutputFormat::Latex;

        let from_config = resolve_options(&parse(&["a.py"]), &config);
        assert_eq!(from_config.style, "Solarized (light)");
        assert_eq!(from_config.width, 60);
        assert_eq!(from_config.format, OutputFormat::Latex);

        let overridden = resolve_options(&parse(&["--html", "-w", "80", "a.py"]), &config);
        assert_eq!(overridden.format, OutputFormat::Html);
        assert_eq!(overridden.width, 80);
        assert_eq!(overridden.output, PathBuf::from("output.html"));
    }

    #[test]
    fn zero_width_rejected_by_parser() {
        let result = Cli::try_parse_from(["srcprint", "-w", "0", "a.py"]);
        assert!(result.is_err());
    }

    #[test]
    fn latex_and_html_conflict() {
        let result = Cli::try_parse_from(["srcprint", "--latex", "--html", "a.py"]);
        assert!(result.is_err());
    }

    #[test]
    fn verbosity_counts() {
        let cli = parse(&["-vv", "a.py"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn style_and_width_read_from_env() {
        use clap::CommandFactory;

        let cmd = Cli::command();
        let env_of = |id: &str| {
            cmd.get_arguments()
                .find(|a| a.get_id() == id)
                .and_then(|a| a.get_env())
                .map(|e| e.to_string_lossy().to_string())
        };
        assert_eq!(env_of("style").as_deref(), Some("SRCPRINT_STYLE"));
        assert_eq!(env_of("width").as_deref(), Some("SRCPRINT_WIDTH"));
    }

    #[test]
    fn list_styles_needs_no_files() {
        let cli = parse(&["--list-styles"]);
        assert!(cli.list_styles);
        assert!(cli.files.is_empty());
    }

    #[test]
    fn list_styles_runs_without_files() {
        let tmp = tempfile::tempdir().unwrap();
        let config = tmp.path().join("srcprint.toml");
        std::fs::write(&config, "").unwrap();

        let cli = parse(&["--list-styles", "--config", config.to_str().unwrap()]);
        run(cli).unwrap();

        let entries: Vec<_> = std::fs::read_dir(tmp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1, "only the config file should exist");
    }

    #[test]
    fn no_files_is_clean_exit() {
        let tmp = tempfile::tempdir().unwrap();
        let output = tmp.path().join("output.html");
        let cli = parse(&["-o", output.to_str().unwrap()]);

        run(cli).unwrap();
        assert!(!output.exists());
    }

    #[test]
    fn run_writes_document() {
        let tmp = tempfile::tempdir().unwrap();
        let config = tmp.path().join("srcprint.toml");
        std::fs::write(&config, "[defaults]\nwidth = 10\n").unwrap();
        let source = tmp.path().join("a.py");
        std::fs::write(&source, "x = 1\n").unwrap();
        let output = tmp.path().join("doc.html");

        let cli = parse(&[
            "--config",
            config.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            source.to_str().unwrap(),
        ]);
        run(cli).unwrap();

        let html = std::fs::read_to_string(&output).unwrap();
        assert_eq!(html.matches("<h1>").count(), 1);
    }

    #[test]
    fn run_surfaces_unsupported_file() {
        let tmp = tempfile::tempdir().unwrap();
        let config = tmp.path().join("srcprint.toml");
        std::fs::write(&config, "").unwrap();
        let source = tmp.path().join("data.zzz");
        std::fs::write(&source, "???\n").unwrap();
        let output = tmp.path().join("doc.html");

        let cli = parse(&[
            "--config",
            config.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            source.to_str().unwrap(),
        ]);
        let err = run(cli).unwrap_err();
        assert!(err.to_string().contains("unsupported file type"));
        assert!(!output.exists());
    }
}
