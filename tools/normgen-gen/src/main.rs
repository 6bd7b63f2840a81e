// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! normgen-gen CLI
//!
//! # Usage
//!
//! ```bash
//! # Pre-render every type of a manifest
//! normgen-gen render --manifest types.yaml --cache-dir var/cache
//!
//! # Using a configuration file
//! normgen-gen render --manifest types.yaml --config normgen.toml
//!
//! # Where does the normalizer of a type live?
//! normgen-gen path app::model::Person --cache-dir var/cache
//!
//! # Drop all generated sources
//! normgen-gen clear --cache-dir var/cache
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use normgen::GeneratorConfig;
use normgen_gen::{clear_cache, normalizer_path, render_manifest, RenderOutcome};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Generated normalizer cache tool
#[derive(Parser, Debug)]
#[command(name = "normgen-gen")]
#[command(about = "Pre-render and manage generated normalizer sources")]
#[command(version)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the normalizer source of every manifest type
    Render {
        /// Type manifest (YAML or JSON)
        #[arg(short, long)]
        manifest: PathBuf,

        /// Generator configuration file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Cache root, overrides the configuration
        #[arg(long)]
        cache_dir: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the cache path of a type's normalizer
    Path {
        /// Fully-qualified type name
        type_name: String,

        /// Cache root
        #[arg(long)]
        cache_dir: Option<PathBuf>,
    },

    /// Remove all generated sources
    Clear {
        /// Cache root
        #[arg(long)]
        cache_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match args.command {
        Commands::Render {
            manifest,
            config,
            cache_dir,
            json,
        } => {
            let mut config = match config {
                Some(path) => GeneratorConfig::from_file(&path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => GeneratorConfig::from_env(),
            };
            if let Some(dir) = cache_dir {
                config.cache_dir = dir;
            }

            let report = render_manifest(&manifest, &config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for outcome in &report.outcomes {
                    match outcome {
                        RenderOutcome::Written { type_id, path, .. } => {
                            println!("{:<40} {}", type_id, path.display());
                        }
                        RenderOutcome::Skipped { type_id } => {
                            println!("{:<40} (generic, no attributes)", type_id);
                        }
                    }
                }
                println!();
                println!("{} written, {} skipped", report.written(), report.skipped());
            }
        }
        Commands::Path {
            type_name,
            cache_dir,
        } => {
            let cache_dir = cache_dir.unwrap_or_else(|| GeneratorConfig::from_env().cache_dir);
            println!("{}", normalizer_path(&cache_dir, &type_name).display());
        }
        Commands::Clear { cache_dir } => {
            let cache_dir = cache_dir.unwrap_or_else(|| GeneratorConfig::from_env().cache_dir);
            if clear_cache(&cache_dir)? {
                println!("Cleared generated normalizers under {}", cache_dir.display());
            } else {
                println!("Nothing to clear under {}", cache_dir.display());
            }
        }
    }

    Ok(())
}
