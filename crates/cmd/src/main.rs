// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use coursegen::{CONFIG_FILE, Layout};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "coursegen")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Project root holding data/ and templates/
    #[arg(short, long, global = true, default_value = ".")]
    root: PathBuf,
    /// Layout file (defaults to <root>/coursegen.yaml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a template against the course data
    Build {
        /// Top-level template
        input: PathBuf,
        /// File to (over)write with the rendered page
        output: PathBuf,
    },
    /// Resolve the course data and report what was found, without rendering
    Check,
}

/// An explicit `--config` must exist; the implicit `<root>/coursegen.yaml`
/// may be absent.
fn load_layout(root: &Path, config: Option<&Path>) -> Result<Layout> {
    let layout = match config {
        Some(path) => Layout::load_required(path)
            .with_context(|| format!("could not load {}", path.display()))?,
        None => {
            let path = root.join(CONFIG_FILE);
            Layout::load(&path).with_context(|| format!("could not load {}", path.display()))?
        }
    };
    Ok(layout.resolve(root))
}

fn build_command(layout: &Layout, input: &Path, output: &Path) -> Result<()> {
    coursegen::render_with(layout, input, output).with_context(|| {
        format!(
            "failed to render {} into {}",
            input.display(),
            output.display()
        )
    })
}

fn check_command(layout: &Layout) -> Result<()> {
    let data = coursegen::resolve(layout).context("course data does not resolve")?;
    let events: usize = data.lectures().iter().map(|l| l.events.len()).sum();

    println!(
        "{} lectures, {} events, {} assignments",
        data.lectures().len(),
        events,
        data.assignments().len()
    );
    println!(
        "This week: {} / {}",
        data.this_week_lecture().title,
        data.this_week_assignment().label
    );
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let layout = load_layout(&cli.root, cli.config.as_deref())?;

    match &cli.command {
        Commands::Build { input, output } => build_command(&layout, input, output),
        Commands::Check => check_command(&layout),
    }
}

// Errors are reported once, by anyhow on return from main.
fn main() -> Result<()> {
    diagnostics::init_diagnostics();
    run(&Cli::parse())
}
