use anyhow::Context;
use camino::Utf8PathBuf;
use ciselect_cli::config::{self, ConfigMerger, GenerateOverrides};
use ciselect_core::adapters::{FsTemplateSource, FsWritePort, ShellGit};
use ciselect_core::pipeline::{run_changes, run_generate, write_generate_artifacts};
use ciselect_types::selection::ToolInfo;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "ciselect",
    version,
    about = "Select the sub-project pipelines a change needs and render the CI config."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Detect changes, select projects and write the generated CI config.
    Generate(GenerateArgs),
    /// Print the files changed between head and its merge base (debugging aid).
    Changes(ChangesArgs),
    /// List the configured projects.
    ListProjects(ListProjectsArgs),
}

#[derive(Debug, Parser)]
struct GenerateArgs {
    /// Repository root (default: current directory).
    #[arg(long, default_value = ".")]
    repo_root: Utf8PathBuf,

    /// Head commit to build.
    #[arg(long, env = "CIRCLE_SHA1")]
    head: Option<String>,

    /// Branch to compare against (default: config, then "main").
    #[arg(long, env = "BASE_REVISION")]
    base_revision: Option<String>,

    /// Pull request URL when building a pull request.
    #[arg(long, env = "CIRCLE_PULL_REQUEST")]
    pull_request: Option<String>,

    /// Template path (default: .circleci/ci-template.yml).
    #[arg(long)]
    template: Option<Utf8PathBuf>,

    /// Output path (default: generated_config.yml).
    #[arg(long)]
    output: Option<Utf8PathBuf>,

    /// Also write a JSON selection report to this path.
    #[arg(long)]
    report: Option<Utf8PathBuf>,

    /// Print the rendered config to stdout instead of writing files.
    #[arg(long, default_value_t = false)]
    stdout: bool,
}

#[derive(Debug, Parser)]
struct ChangesArgs {
    /// Repository root (default: current directory).
    #[arg(long, default_value = ".")]
    repo_root: Utf8PathBuf,

    /// Head commit to inspect.
    #[arg(long, env = "CIRCLE_SHA1")]
    head: Option<String>,

    /// Branch to compare against (default: config, then "main").
    #[arg(long, env = "BASE_REVISION")]
    base_revision: Option<String>,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Parser)]
struct ListProjectsArgs {
    /// Repository root (default: current directory).
    #[arg(long, default_value = ".")]
    repo_root: Utf8PathBuf,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    // stdout carries command output; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Changes(args) => cmd_changes(args),
        Command::ListProjects(args) => cmd_list_projects(args),
    }
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let repo_root = args.repo_root;

    let file_config =
        config::load_or_default(&repo_root).context("load ciselect.toml config")?;
    let settings = ConfigMerger::new(file_config).merge_generate_args(
        repo_root,
        GenerateOverrides {
            head: args.head,
            base_revision: args.base_revision,
            pull_request: args.pull_request,
            template: args.template,
            output: args.output,
            report: args.report,
        },
    )?;
    debug!(?settings, "merged settings");

    let git = ShellGit::new(settings.repo_root.clone());
    let outcome = run_generate(&settings, &git, &FsTemplateSource, tool_info())?;

    if args.stdout {
        let mut out = std::io::stdout().lock();
        out.write_all(outcome.rendered.as_bytes())
            .context("write rendered config to stdout")?;
        return Ok(());
    }

    write_generate_artifacts(&settings, &outcome, &FsWritePort)?;
    info!(
        "selected {} of {} projects",
        outcome.build_set.projects.len(),
        settings.projects.len()
    );
    Ok(())
}

fn cmd_changes(args: ChangesArgs) -> anyhow::Result<()> {
    let repo_root = args.repo_root;

    let file_config =
        config::load_or_default(&repo_root).context("load ciselect.toml config")?;
    let settings = ConfigMerger::new(file_config).merge_changes_args(
        repo_root,
        args.head,
        args.base_revision,
    );

    let git = ShellGit::new(settings.repo_root.clone());
    let changes = run_changes(&settings, &git)?;

    match args.format {
        OutputFormat::Text => {
            println!("Comparing {}", changes.range());
            if changes.is_empty() {
                info!("no files changed");
            }
            for file in &changes.files {
                println!("{}", file);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&changes)?);
        }
    }
    Ok(())
}

fn cmd_list_projects(args: ListProjectsArgs) -> anyhow::Result<()> {
    let file_config =
        config::load_or_default(&args.repo_root).context("load ciselect.toml config")?;
    let catalog = file_config.catalog()?;

    match args.format {
        OutputFormat::Text => {
            println!("Configured projects:\n");
            println!("  {:<24} {:<16} {:<24} FILENAME", "PREFIX", "EXECUTOR", "JOB");
            println!("  {:<24} {:<16} {:<24} --------", "------", "--------", "---");
            for p in &catalog {
                println!(
                    "  {:<24} {:<16} {:<24} {}",
                    p.prefix, p.executor, p.job, p.filename
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&catalog)?);
        }
    }
    Ok(())
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "ciselect".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    }
}
