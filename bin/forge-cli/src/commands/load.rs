// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `forge load` command: adopt an existing artifact and show its name table.

use orchestrator::{ModelOrchestrator, ToolchainConfig};
use std::path::{Path, PathBuf};

pub fn execute(config: ToolchainConfig, artifact: PathBuf) -> anyhow::Result<()> {
    super::banner("Artifact Loader");

    let model = load(config, &artifact)?;
    println!("  Artifact: {}", model.layout().artifact_dir().display());
    println!("  State:    {}", model.state());
    println!();
    super::print_name_table(model.resolver(), &[]);
    Ok(())
}

/// Builds an orchestrator named after the artifact and loads it.
pub fn load(config: ToolchainConfig, artifact: &Path) -> anyhow::Result<ModelOrchestrator> {
    let name = artifact
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow::anyhow!("'{}' does not name an artifact", artifact.display()))?;
    let mut model = ModelOrchestrator::new(name, config);
    model.load_existing(artifact)?;
    Ok(model)
}
