// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations and shared CLI plumbing.

pub mod compile;
pub mod export;
pub mod inspect;
pub mod load;
pub mod train;

use model_ir::NameResolver;
use orchestrator::ToolchainConfig;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level follows `-v` repetition.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Loads the toolchain config from `path` (or defaults) and applies the
/// `--work-dir` override.
pub fn load_config(
    path: Option<&Path>,
    work_dir: Option<PathBuf>,
) -> anyhow::Result<ToolchainConfig> {
    let mut config = match path {
        Some(path) => ToolchainConfig::from_file(path)?,
        None => ToolchainConfig::default(),
    };
    if let Some(dir) = work_dir {
        config.work_dir = dir;
    }
    tracing::debug!("toolchain config: {config:?}");
    Ok(config)
}

/// `forge config`: prints the effective configuration.
pub fn print_config(config: &ToolchainConfig) -> anyhow::Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Prints a box banner with `title` centred.
pub fn banner(title: &str) {
    let width: usize = 54;
    let text = format!("forge · {title}");
    let pad = width.saturating_sub(text.chars().count());
    let left = pad / 2;
    println!("╔{}╗", "═".repeat(width));
    println!("║{}{text}{}║", " ".repeat(left), " ".repeat(pad - left));
    println!("╚{}╝", "═".repeat(width));
    println!();
}

/// Prints a resolved name table.
pub fn print_name_table(resolver: &NameResolver, logical_outputs: &[String]) {
    println!("  Inputs:");
    if let Some(manifest) = resolver.manifest() {
        for (logical, physical) in &manifest.inputs {
            println!("   {logical:<24} -> {physical}");
        }
    }
    println!("  Outputs:");
    for (i, physical) in resolver.physical_outputs().iter().enumerate() {
        let logical = logical_outputs.get(i).map_or("-", String::as_str);
        println!("   [{i}] {logical:<20} -> {physical}");
    }
    println!();
}
