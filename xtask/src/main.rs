use anyhow::Context;
use ciselect_types::project::ProjectCatalog;
use clap::{Parser, Subcommand};
use fs_err as fs;
use std::path::{Path, PathBuf};
use std::process::Command as ProcessCommand;

const STARTER_TEMPLATE: &str = include_str!("../../templates/ci-template.yml");

#[derive(Debug, Parser)]
#[command(name = "xtask", about = "Workspace helper tasks")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print schema identifiers used by ciselect.
    PrintSchemas,
    /// Print the built-in project catalog as JSON.
    PrintDefaults,
    /// Write the starter CI template.
    InitTemplate {
        #[arg(long, default_value = ".circleci/ci-template.yml")]
        path: PathBuf,
        /// Overwrite an existing template.
        #[arg(long)]
        force: bool,
    },
    /// Bless golden fixtures (overwrite expected outputs).
    BlessFixtures,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::PrintSchemas => {
            println!("{}", ciselect_types::schema::CISELECT_SELECTION_V1);
        }
        Command::PrintDefaults => {
            let catalog = ProjectCatalog::default();
            println!("{}", serde_json::to_string_pretty(&catalog)?);
        }
        Command::InitTemplate { path, force } => {
            init_template(&path, force)?;
            println!("wrote {}", path.display());
        }
        Command::BlessFixtures => {
            let status = ProcessCommand::new("cargo")
                .args(["test", "-p", "ciselect-render", "--test", "golden_fixtures"])
                .env("CISELECT_BLESS", "1")
                .status()
                .context("run golden fixture blessing")?;
            if !status.success() {
                anyhow::bail!("bless-fixtures failed");
            }
        }
    }
    Ok(())
}

fn init_template(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, STARTER_TEMPLATE)?;
    Ok(())
}
