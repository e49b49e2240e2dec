// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Scenebridge Team.

//! Scenebridge CLI
//!
//! Stands in for the host dialog layer: collects the output path and
//! the extra-UV toggle, runs the export, and shows the one-line
//! summary.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use scenebridge::{export_scene_file, ExportConfig};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "scenebridge")]
#[command(about = "Scenebridge - export a rigged scene to a DBZ interchange document", long_about = None)]
struct Cli {
    /// Input scene description (JSON)
    #[arg(value_name = "SCENE")]
    scene: String,

    /// Output file; defaults to the scene path with a .dbz extension
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Include the extra high-detail UV set and dual-resolution geometry
    #[arg(long)]
    hd_uvs: bool,

    /// Emit full world-transform fields on generic nodes
    #[arg(long)]
    world_transforms: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !Path::new(&cli.scene).exists() {
        eprintln!("Error: Scene file not found: {}", cli.scene);
        std::process::exit(1);
    }

    // Derived-path convention: same name, interchange extension
    let output = cli
        .output
        .unwrap_or_else(|| Path::new(&cli.scene).with_extension("dbz"));

    let config = ExportConfig {
        include_hd_uvs: cli.hd_uvs,
        prop_world_transforms: cli.world_transforms,
    };

    if cli.verbose {
        println!("Exporting: {}", cli.scene);
    }

    let report = export_scene_file(&cli.scene, &output, config)?;

    if cli.verbose {
        println!("Records: {}", report.figures);
        for warning in &report.warnings {
            println!("{} {}", "Warning:".yellow(), warning);
        }
    }

    let elapsed = report.elapsed.as_secs_f64();
    if report.compressed {
        println!(
            "{} {} ({:.2}s)",
            "Saved compressed:".green(),
            output.display(),
            elapsed
        );
    } else {
        println!(
            "{} {} ({:.2}s)",
            "Saved as text (compression failed):".yellow(),
            output.display(),
            elapsed
        );
    }

    Ok(())
}
