// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `forge inspect` command: validate a descriptor and print its structure.

use model_ir::{IoManifest, ModelDescriptor, NameResolver};
use std::path::PathBuf;

pub fn execute(descriptor: PathBuf, manifest: Option<PathBuf>) -> anyhow::Result<()> {
    super::banner("Model Inspector");

    let descriptor = ModelDescriptor::from_file(&descriptor).map_err(|e| {
        anyhow::anyhow!("failed to read descriptor '{}': {e}", descriptor.display())
    })?;

    // ── Inputs ─────────────────────────────────────────────────
    println!("  Model: {}", descriptor.model_name);
    println!();
    println!("  {:<20} {:<10} {:<20} {:<6}", "Input", "DType", "Shape", "Domain");
    println!("  {}", "-".repeat(60));
    for input in &descriptor.inputs {
        println!(
            "  {:<20} {:<10} {:<20} {:<6}",
            truncate(&input.name, 20),
            input.dtype.as_str(),
            format!("{:?}", input.shape),
            format!("{:?}", input.domain).to_lowercase(),
        );
    }
    println!();

    // ── Layers ─────────────────────────────────────────────────
    println!("  {:<4} {:<20} {:<30} {:<20}", "Idx", "Type", "Inputs", "Output");
    println!("  {}", "-".repeat(76));
    for (i, layer) in descriptor.layers.iter().enumerate() {
        println!(
            "  {:<4} {:<20} {:<30} {:<20}",
            i,
            truncate(&layer.layer_type, 20),
            truncate(&layer.input_names().join(", "), 30),
            layer.output_name().unwrap_or("?"),
        );
    }
    println!();

    // ── Outputs ────────────────────────────────────────────────
    let outputs: Vec<String> = descriptor.outputs.iter().map(|o| o.name.clone()).collect();
    println!("  Outputs: {}", outputs.join(", "));
    println!();

    match descriptor.validate() {
        Ok(()) => println!("  Descriptor is valid."),
        Err(e) => println!("  Descriptor is INVALID: {e}"),
    }
    println!();

    if let Some(path) = manifest {
        let mut resolver = NameResolver::new();
        resolver.load(IoManifest::from_file(&path)?);
        println!("  Name table ({}):", path.display());
        super::print_name_table(&resolver, &outputs);
    }
    Ok(())
}

/// Truncates a string to `max_len` characters with ellipsis if needed.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
