mod config;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use config::ConfigMerger;
use jobdiff_core::adapters::{FsJobSource, FsWritePort};
use jobdiff_core::pipeline::{ToolError, run_report, write_report_artifacts};
use jobdiff_core::settings::{CompareMode, ReportSettings};
use jobdiff_extract::{ExtractError, extract_steps_from_file};
use jobdiff_types::summary::ToolInfo;
use jobdiff_types::{BodyStyle, ErrorKind, JobBody};
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

/// Exit code when `--fail-on-diff` is set and the report has changes.
const EXIT_CHANGES_FOUND: u8 = 2;

#[derive(Debug, Parser)]
#[command(
    name = "jobdiff",
    version,
    about = "Render a static HTML report of generated CI job configurations, baseline vs diff."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build the HTML report from <config-dir>/base and/or <config-dir>/diff.
    Report(ReportArgs),
    /// Print the steps (or DSL body) extracted from a single job config.
    Show(ShowArgs),
}

#[derive(Debug, Parser)]
struct ReportArgs {
    /// Directory holding the downloaded `base/` and `diff/` job configs.
    #[arg(long, visible_alias = "output-location")]
    config_dir: Utf8PathBuf,

    /// Where to write the HTML report (overwritten if present).
    #[arg(long, visible_alias = "html-location")]
    html: Utf8PathBuf,

    /// Render only the baseline job configs.
    #[arg(long, default_value_t = false, conflicts_with = "diff_only")]
    baseline_only: bool,

    /// Render only the diff job configs.
    #[arg(long, default_value_t = false)]
    diff_only: bool,

    /// Treat values that differ only in spaces as unchanged.
    #[arg(long, default_value_t = false)]
    ignore_whitespace: bool,

    /// Layout of changed jobs (default: from jobdiff.toml, else base-diff).
    #[arg(long, value_enum)]
    style: Option<StyleArg>,

    /// Only load files whose name matches this glob (repeatable).
    #[arg(long)]
    include: Vec<String>,

    /// Also write a JSON summary of the comparison.
    #[arg(long)]
    summary_json: Option<Utf8PathBuf>,

    /// Page title.
    #[arg(long)]
    title: Option<String>,

    /// Exit with code 2 if any job was added, removed or changed.
    #[arg(long, default_value_t = false)]
    fail_on_diff: bool,

    /// Config file (default: ./jobdiff.toml when present).
    #[arg(long)]
    config: Option<Utf8PathBuf>,
}

#[derive(Debug, Parser)]
struct ShowArgs {
    /// Job config file.
    file: Utf8PathBuf,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum StyleArg {
    BaseDiff,
    Unified,
}

impl From<StyleArg> for BodyStyle {
    fn from(s: StyleArg) -> Self {
        match s {
            StyleArg::BaseDiff => BodyStyle::BaseDiff,
            StyleArg::Unified => BodyStyle::Unified,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    match real_main() {
        Ok(code) => code,
        Err(e) => {
            match error_kind(&e) {
                Some(kind) => error!(%kind, "{:?}", e),
                None => error!("{:?}", e),
            }
            ExitCode::from(1)
        }
    }
}

fn real_main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Report(args) => cmd_report(args),
        Command::Show(args) => cmd_show(args).map(|()| ExitCode::SUCCESS),
    }
}

fn error_kind(e: &anyhow::Error) -> Option<ErrorKind> {
    e.downcast_ref::<ToolError>()
        .map(ToolError::kind)
        .or_else(|| e.downcast_ref::<ExtractError>().map(ExtractError::kind))
}

fn cmd_report(args: ReportArgs) -> anyhow::Result<ExitCode> {
    let file_config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => config::load_or_default(Utf8Path::new(".")).context("load jobdiff.toml config")?,
    };
    let merged = ConfigMerger::new(file_config).merge_report_args(
        args.ignore_whitespace,
        args.style.map(BodyStyle::from),
        &args.include,
        args.title.as_deref(),
    );
    debug!("merged config: {:?}", merged);

    let mode = if args.baseline_only {
        CompareMode::BaselineOnly
    } else if args.diff_only {
        CompareMode::DiffOnly
    } else {
        CompareMode::Combined
    };

    let defaults = ReportSettings::default();
    let settings = ReportSettings {
        config_root: args.config_dir,
        html_out: args.html,
        summary_out: args.summary_json,
        mode,
        ignore_whitespace: merged.ignore_whitespace,
        style: merged.style,
        include: merged.include,
        title: merged.title.unwrap_or(defaults.title),
    };

    let source = FsJobSource::from_settings(&settings)?;

    let outcome = run_report(&settings, &source, tool_info())?;
    write_report_artifacts(&outcome, &settings, &FsWritePort)?;

    if args.fail_on_diff && outcome.has_changes() {
        info!("job configs changed; exiting with code {}", EXIT_CHANGES_FOUND);
        return Ok(ExitCode::from(EXIT_CHANGES_FOUND));
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_show(args: ShowArgs) -> anyhow::Result<()> {
    let body = extract_steps_from_file(&args.file)?;

    match args.format {
        OutputFormat::Text => match &body {
            JobBody::Flow(dsl) => {
                println!("{}: flow job", args.file);
                println!();
                println!("{}", dsl);
            }
            JobBody::Steps(steps) => {
                println!("{}: {} step(s)", args.file, steps.len());
                for (i, step) in steps.iter().enumerate() {
                    println!();
                    println!("[{}]", i + 1);
                    println!("{}", step);
                }
            }
        },
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }
    Ok(())
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "jobdiff".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}
