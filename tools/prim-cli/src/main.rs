//! Prim CLI - Generate, inspect and render procedural shapes
//!
//! # Commands
//!
//! - `prim generate` - Generate one shape and export it (OBJ or raw vertex dump)
//! - `prim inspect` - Print counts, bounds and an invariant report for one shape
//! - `prim build` - Generate every shape in a manifest and export each to OBJ
//! - `prim render` - Render a manifest offscreen to a PNG
//!
//! # Usage
//!
//! ```bash
//! # A 40-sided open-topped cylinder as OBJ
//! prim generate cylinder --radius 0.6 --height 1.5 --sides 40 --subdivisions 3 --no-top -o cyl.obj
//!
//! # Raw interleaved floats (11 per vertex) for a hemisphere
//! prim generate sphere --sides 30 --semi --raw dome.bin
//!
//! # Check a shape's invariants
//! prim inspect pyramid --height 2
//!
//! # Build all shapes from a manifest
//! prim build shapes.toml --out-dir build
//!
//! # Snapshot the manifest scene
//! prim render shapes.toml -o scene.png
//! ```
//!
//! # Manifest (shapes.toml)
//!
//! ```toml
//! [camera]
//! eye = [0.0, 2.0, 5.0]
//! target = [0.0, 0.5, 0.0]
//!
//! [[shapes]]
//! name = "floor"
//! kind = "plane"
//! length = 10.0
//! width = 10.0
//! tint = [0.4, 0.4, 0.4]
//!
//! [[shapes]]
//! name = "dome"
//! kind = "sphere"
//! position = [1.0, 0.0, 0.0]
//! sides = 30
//! semi_circle = true
//! ```

mod args;
mod build;
mod generate;
mod inspect;
mod manifest;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Prim CLI - Generate, inspect and render procedural shapes
#[derive(Parser)]
#[command(name = "prim")]
#[command(about = "Generate, inspect and render procedural shapes")]
#[command(version)]
struct Cli {
    /// Enable debug logging (RUST_LOG still applies)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one shape and export it
    Generate(generate::GenerateArgs),

    /// Print counts, bounds and invariant checks for one shape
    Inspect(inspect::InspectArgs),

    /// Generate every shape in a manifest and export each to OBJ
    Build(build::BuildArgs),

    /// Render a manifest offscreen to a PNG
    Render(render::RenderArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    match cli.command {
        Commands::Generate(args) => generate::execute(args),
        Commands::Inspect(args) => inspect::execute(args),
        Commands::Build(args) => build::execute(args),
        Commands::Render(args) => render::execute(args),
    }
}
