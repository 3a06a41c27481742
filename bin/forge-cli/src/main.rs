// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # forge
//!
//! Command-line interface for describing, compiling and training models
//! through the external model toolchain.
//!
//! ## Usage
//! ```bash
//! # Compile a descriptor into an artifact under the work dir
//! forge compile --descriptor ./simple_add.json --work-dir ./models
//!
//! # Adopt an existing artifact (ONNX files are converted first)
//! forge load --artifact ./models/resnet.onnx
//!
//! # Train an artifact on a recorded batch
//! forge train --artifact ./models/linear --data ./linear_data.json --epochs 100
//!
//! # Validate and print a descriptor
//! forge inspect --descriptor ./simple_add.json
//!
//! # Print the effective toolchain configuration
//! forge config
//! ```

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "forge",
    about = "Describe, compile and train models through an external toolchain",
    version,
    author
)]
struct Cli {
    /// Path to a TOML toolchain configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Artifact root directory (overrides the config file).
    #[arg(short, long, global = true)]
    work_dir: Option<PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a model descriptor into an artifact and print its name table.
    Compile {
        /// Path to the descriptor JSON.
        #[arg(short, long)]
        descriptor: PathBuf,
    },

    /// Load an existing artifact (directory or .onnx file) and print its name table.
    Load {
        /// Path to the artifact.
        #[arg(short, long)]
        artifact: PathBuf,
    },

    /// Train an existing artifact on a recorded training batch.
    Train {
        /// Path to the artifact directory.
        #[arg(short, long)]
        artifact: PathBuf,

        /// Path to the training batch JSON.
        #[arg(short, long)]
        data: PathBuf,

        /// Path to a training config JSON (flags below override it).
        #[arg(long)]
        train_config: Option<PathBuf>,

        /// Number of epochs.
        #[arg(long)]
        epochs: Option<u32>,

        /// Mini-batch size.
        #[arg(long)]
        batch_size: Option<u32>,

        /// Learning rate.
        #[arg(long)]
        learning_rate: Option<f64>,

        /// Fraction of samples held out for validation.
        #[arg(long)]
        validation_split: Option<f64>,

        /// Disable shuffling between epochs.
        #[arg(long)]
        no_shuffle: bool,
    },

    /// Validate a descriptor and print its inputs, layers and outputs.
    Inspect {
        /// Path to the descriptor JSON.
        #[arg(short, long)]
        descriptor: PathBuf,

        /// Optional IO-name manifest to show alongside.
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },

    /// Write a descriptor and training batch as model_layout.json / train_data.json.
    Export {
        /// Path to the descriptor JSON.
        #[arg(short, long)]
        descriptor: PathBuf,

        /// Path to a training batch JSON.
        #[arg(long)]
        data: Option<PathBuf>,

        /// Output directory (created if missing).
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Print the effective toolchain configuration as TOML.
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging based on verbosity.
    commands::init_tracing(cli.verbose);

    let config = commands::load_config(cli.config.as_deref(), cli.work_dir)?;

    match cli.command {
        Commands::Compile { descriptor } => commands::compile::execute(config, descriptor),
        Commands::Load { artifact } => commands::load::execute(config, artifact),
        Commands::Train {
            artifact,
            data,
            train_config,
            epochs,
            batch_size,
            learning_rate,
            validation_split,
            no_shuffle,
        } => {
            let overrides = commands::train::Overrides {
                epochs,
                batch_size,
                learning_rate,
                validation_split,
                no_shuffle,
            };
            commands::train::execute(config, artifact, data, train_config, overrides)
        }
        Commands::Inspect {
            descriptor,
            manifest,
        } => commands::inspect::execute(descriptor, manifest),
        Commands::Export {
            descriptor,
            data,
            out,
        } => commands::export::execute(config, descriptor, data, out),
        Commands::Config => commands::print_config(&config),
    }
}
