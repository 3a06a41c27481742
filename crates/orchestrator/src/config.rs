// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Toolchain configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! work_dir = "."
//! manifest_file = "cppflow_io_names.json"
//!
//! [compiler]
//! program = "python"
//! args = ["scripts/build_model_from_json.py"]
//!
//! [trainer]
//! program = "python"
//! args = ["scripts/train_model_from_json.py"]
//!
//! [converter]
//! program = "python"
//! args = ["scripts/convert_onnx_to_saved_model.py"]
//!
//! [extractor]
//! program = "python"
//! args = ["scripts/extract_model_info.py"]
//! ```

use crate::layout::DEFAULT_MANIFEST_FILE;
use crate::{ArtifactLayout, RuntimeError};
use std::fmt;
use std::path::{Path, PathBuf};

/// An external program plus the leading arguments passed before the
/// per-call positional arguments.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ToolCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Appends a leading argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    fn python(script: &str) -> Self {
        Self::new("python").arg(script)
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Where artifacts live and which external tools build, train and convert them.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ToolchainConfig {
    /// Root directory for artifacts; a model's artifact is `<work_dir>/<model_name>`.
    #[serde(default = "default_work_dir")]
    pub work_dir: PathBuf,
    /// File name of the IO-name manifest inside an artifact.
    #[serde(default = "default_manifest_file")]
    pub manifest_file: String,
    pub compiler: ToolCommand,
    pub trainer: ToolCommand,
    pub converter: ToolCommand,
    /// Regenerates the manifest for an existing artifact. Optional; when
    /// absent, loading expects the manifest to be present already.
    #[serde(default)]
    pub extractor: Option<ToolCommand>,
}

fn default_work_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_manifest_file() -> String {
    DEFAULT_MANIFEST_FILE.to_string()
}

impl ToolchainConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, RuntimeError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RuntimeError::Config(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, RuntimeError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| RuntimeError::Config(format!("TOML parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, RuntimeError> {
        toml::to_string_pretty(self)
            .map_err(|e| RuntimeError::Config(format!("TOML serialise error: {e}")))
    }

    /// Rejects empty program names and a manifest file name with a path
    /// component.
    pub fn validate(&self) -> Result<(), RuntimeError> {
        let tools = [
            ("compiler", Some(&self.compiler)),
            ("trainer", Some(&self.trainer)),
            ("converter", Some(&self.converter)),
            ("extractor", self.extractor.as_ref()),
        ];
        for (key, tool) in tools {
            if let Some(tool) = tool {
                if tool.program.trim().is_empty() {
                    return Err(RuntimeError::Config(format!("{key}.program is empty")));
                }
            }
        }

        let manifest = Path::new(&self.manifest_file);
        if self.manifest_file.is_empty() || manifest.components().count() != 1 {
            return Err(RuntimeError::Config(format!(
                "manifest_file must be a bare file name, got '{}'",
                self.manifest_file
            )));
        }
        Ok(())
    }

    /// Builds the artifact layout for `model_name` under this config's work dir.
    pub fn layout(&self, model_name: &str) -> ArtifactLayout {
        ArtifactLayout::new(&self.work_dir, model_name).with_manifest_file(&self.manifest_file)
    }
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            work_dir: default_work_dir(),
            manifest_file: default_manifest_file(),
            compiler: ToolCommand::python("scripts/build_model_from_json.py"),
            trainer: ToolCommand::python("scripts/train_model_from_json.py"),
            converter: ToolCommand::python("scripts/convert_onnx_to_saved_model.py"),
            extractor: Some(ToolCommand::python("scripts/extract_model_info.py")),
        }
    }
}
