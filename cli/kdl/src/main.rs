//! KDL CLI: assemble resource listings into Classic, Extended or Rez
//! resource containers.

mod commands;
mod listing;
mod manifest;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use kdl_target::Format;

use commands::{BuildOptions, BuildSettings};
use manifest::KdlManifest;

#[derive(Parser)]
#[command(name = "kdl", version, about = "The KDL resource assembler")]
struct Cli {
    /// Log path resolution and assembly details
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct TargetArgs {
    /// Input listing (default: [build] input in kdl.toml)
    input: Option<String>,
    /// Destination file or directory
    #[arg(short, long)]
    output: Option<String>,
    /// Container format (classic, extended, rez)
    #[arg(short, long)]
    format: Option<Format>,
    /// Directory holding scenarios (default: current directory)
    #[arg(long)]
    scenarios: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new KDL project
    Init {
        /// Project name
        name: String,
    },
    /// Assemble a listing and write the resource container
    Build {
        #[command(flatten)]
        target: TargetArgs,
        /// Assemble this scenario's manifest.kdl before the input
        #[arg(long)]
        scenario: Option<String>,
    },
    /// Show where a build would write its artifact
    Target {
        #[command(flatten)]
        target: TargetArgs,
        /// Print the resolved paths as JSON
        #[arg(long)]
        json: bool,
    },
    /// Locate a scenario's manifest.kdl
    Scenario {
        /// Scenario name
        name: String,
        /// Directory holding scenarios
        #[arg(long)]
        scenarios: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Commands::Init { name } => commands::init::run(&name),

        Commands::Build { target, scenario } => {
            let settings = settings(&cwd, target, scenario)?;
            commands::build::run(&settings).map(|_| ())
        }

        Commands::Target { target, json } => {
            let settings = settings(&cwd, target, None)?;
            commands::target::run(&settings, json)
        }

        Commands::Scenario { name, scenarios } => {
            let (manifest, project_dir) = load_manifest_optional(&cwd)?;
            let project_dir = project_dir.unwrap_or(cwd);
            let root = match scenarios {
                Some(root) => root,
                None => manifest
                    .and_then(|m| m.build.scenarios)
                    .map(|root| commands::project_relative(&project_dir, &root))
                    .unwrap_or_else(|| ".".to_string()),
            };
            commands::scenario::run(&root, &name).map(|_| ())
        }
    }
}

fn settings(
    cwd: &Path,
    args: TargetArgs,
    scenario: Option<String>,
) -> anyhow::Result<BuildSettings> {
    let (manifest, project_dir) = load_manifest_optional(cwd)?;
    let project_dir = project_dir.unwrap_or_else(|| cwd.to_path_buf());
    let options = BuildOptions {
        input: args.input,
        output: args.output,
        format: args.format,
        scenarios: args.scenarios,
        scenario,
    };
    BuildSettings::resolve(options, manifest.as_ref(), &project_dir)
}

fn load_manifest_optional(
    cwd: &Path,
) -> anyhow::Result<(Option<KdlManifest>, Option<PathBuf>)> {
    match KdlManifest::find_and_load(cwd)? {
        Some((m, dir)) => Ok((Some(m), Some(dir))),
        None => Ok((None, None)),
    }
}
