// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! OBJ exporter CLI

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use objexport::host::{DestinationPicker, FixedDestination, PromptDestination};
use objexport::{import_scene_file, ExportCommand, ExportConfig, ExportStatus};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "objexport")]
#[command(about = "Export B-rep scene documents to indexed OBJ meshes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a scene to an OBJ file
    Export {
        /// Input scene (JSON)
        scene: PathBuf,

        /// Output file; prompts for one when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Config file (defaults to the user config directory)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Include geometry hidden in the host model
        #[arg(long)]
        include_non_visible: bool,
    },

    /// Traverse a scene and print mesh statistics without writing a file
    Stats {
        /// Input scene (JSON)
        scene: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Export {
            scene,
            output,
            config,
            include_non_visible,
        } => {
            let ok = export_command(
                scene,
                output.as_deref(),
                config.as_deref(),
                *include_non_visible,
            )?;
            if !ok {
                std::process::exit(1);
            }
        }
        Commands::Stats { scene } => {
            stats_command(scene)?;
        }
        Commands::Version => {
            println!("objexport v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn export_command(
    scene_path: &Path,
    output: Option<&Path>,
    config_path: Option<&Path>,
    include_non_visible: bool,
) -> Result<bool> {
    let scene = import_scene_file(scene_path)?;
    let config_path = config_path.map(Path::to_path_buf).or_else(ExportConfig::default_path);
    let stored = ExportConfig::load(config_path.as_deref())?;

    // Environment and flag overrides apply to this run only
    let mut run_config = stored.clone().with_env_overrides();
    run_config.include_non_visible |= include_non_visible;

    let mut picker: Box<dyn DestinationPicker> = match output {
        // An explicit output path is relative to where the command was run
        Some(path) => Box::new(FixedDestination::new(std::env::current_dir()?.join(path))),
        None => Box::new(PromptDestination::new(std::io::stdin().lock(), std::io::stderr())),
    };

    let status = ExportCommand::new(&scene, &run_config).execute(picker.as_mut());
    match status {
        ExportStatus::Succeeded(report) => {
            println!("{} {}", "✓".green(), report.path.display().to_string().cyan());
            println!("  {} {}", "Elements:".bright_black(), report.elements);
            println!("  {} {}", "Solids:".bright_black(), report.solids);
            println!("  {} {}", "Faces:".bright_black(), report.faces);
            println!("  {} {}", "Triangles:".bright_black(), report.triangles);
            println!("  {} {}", "Vertices:".bright_black(), report.vertices);

            let mut stored = stored;
            stored.remember_destination(&report);
            if let Some(path) = config_path {
                if let Err(e) = stored.save(&path) {
                    eprintln!("{} {:#}", "Warning:".yellow(), e);
                }
            }
            Ok(true)
        }
        ExportStatus::Cancelled => {
            println!("{}", "Export cancelled".yellow());
            Ok(true)
        }
        ExportStatus::Failed(message) => {
            eprintln!("{} {}", "Error:".red(), message);
            Ok(false)
        }
    }
}

fn stats_command(scene_path: &Path) -> Result<()> {
    let scene = import_scene_file(scene_path)?;
    let config = ExportConfig::default();
    let (walk, stats) = ExportCommand::new(&scene, &config).survey()?;

    println!("{}", scene_path.display().to_string().bold());
    println!("  {} {}", "Elements:".bright_black(), walk.elements);
    println!("  {} {}", "Solids:".bright_black(), walk.solids);
    println!("  {} {}", "Faces:".bright_black(), stats.faces);
    println!("  {} {}", "Triangles:".bright_black(), stats.triangles);
    println!("  {} {}", "Vertices:".bright_black(), stats.vertices);

    Ok(())
}
