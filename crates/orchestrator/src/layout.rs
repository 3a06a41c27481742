// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! On-disk layout of a model artifact.
//!
//! ```text
//! <work_dir>/
//! └── <model_name>/                 artifact directory
//!     ├── model_description.json    descriptor handed to the compiler
//!     ├── cppflow_io_names.json     manifest written by the compiler
//!     └── train/
//!         ├── train_config.json
//!         └── train_data.json
//! ```

use std::path::{Path, PathBuf};

pub const DESCRIPTOR_FILE: &str = "model_description.json";
pub const DEFAULT_MANIFEST_FILE: &str = "cppflow_io_names.json";
pub const TRAIN_DIR: &str = "train";
pub const TRAIN_CONFIG_FILE: &str = "train_config.json";
pub const TRAIN_DATA_FILE: &str = "train_data.json";

/// Every path the orchestrator reads or writes for one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLayout {
    work_dir: PathBuf,
    artifact_dir: PathBuf,
    manifest_file: String,
}

impl ArtifactLayout {
    /// Layout for a model compiled into `<work_dir>/<model_name>`.
    pub fn new(work_dir: impl Into<PathBuf>, model_name: &str) -> Self {
        let work_dir = work_dir.into();
        let artifact_dir = work_dir.join(model_name);
        Self {
            work_dir,
            artifact_dir,
            manifest_file: DEFAULT_MANIFEST_FILE.to_string(),
        }
    }

    /// Layout for an artifact that already exists at `artifact_dir`. The
    /// work dir becomes its parent.
    pub fn at(artifact_dir: impl Into<PathBuf>) -> Self {
        let artifact_dir = artifact_dir.into();
        let work_dir = artifact_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self {
            work_dir,
            artifact_dir,
            manifest_file: DEFAULT_MANIFEST_FILE.to_string(),
        }
    }

    /// Overrides the manifest file name.
    pub fn with_manifest_file(mut self, name: impl Into<String>) -> Self {
        self.manifest_file = name.into();
        self
    }

    /// Directory the compiler is launched from.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn artifact_dir(&self) -> &Path {
        &self.artifact_dir
    }

    pub fn descriptor_path(&self) -> PathBuf {
        self.artifact_dir.join(DESCRIPTOR_FILE)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.artifact_dir.join(&self.manifest_file)
    }

    pub fn train_dir(&self) -> PathBuf {
        self.artifact_dir.join(TRAIN_DIR)
    }

    pub fn train_config_path(&self) -> PathBuf {
        self.train_dir().join(TRAIN_CONFIG_FILE)
    }

    pub fn train_data_path(&self) -> PathBuf {
        self.train_dir().join(TRAIN_DATA_FILE)
    }

    /// `path` as seen from the work dir, which is where tools are launched.
    /// Paths outside the work dir are returned unchanged.
    pub fn tool_path(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.work_dir)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiled_layout() {
        let l = ArtifactLayout::new("/work", "simple_add");
        assert_eq!(l.work_dir(), Path::new("/work"));
        assert_eq!(l.artifact_dir(), Path::new("/work/simple_add"));
        assert_eq!(
            l.descriptor_path(),
            PathBuf::from("/work/simple_add/model_description.json")
        );
        assert_eq!(
            l.manifest_path(),
            PathBuf::from("/work/simple_add/cppflow_io_names.json")
        );
        assert_eq!(
            l.train_config_path(),
            PathBuf::from("/work/simple_add/train/train_config.json")
        );
        assert_eq!(
            l.train_data_path(),
            PathBuf::from("/work/simple_add/train/train_data.json")
        );
    }

    #[test]
    fn test_existing_layout() {
        let l = ArtifactLayout::at("/models/mnist").with_manifest_file("io_names.json");
        assert_eq!(l.work_dir(), Path::new("/models"));
        assert_eq!(l.artifact_dir(), Path::new("/models/mnist"));
        assert_eq!(
            l.manifest_path(),
            PathBuf::from("/models/mnist/io_names.json")
        );
    }

    #[test]
    fn test_tool_path() {
        let l = ArtifactLayout::new("/work", "simple_add");
        assert_eq!(
            l.tool_path(&l.descriptor_path()),
            PathBuf::from("simple_add/model_description.json")
        );
        assert_eq!(l.tool_path(l.artifact_dir()), PathBuf::from("simple_add"));
        assert_eq!(l.tool_path(Path::new("/elsewhere/x")), PathBuf::from("/elsewhere/x"));

        let rel = ArtifactLayout::new("models", "m");
        assert_eq!(rel.tool_path(&rel.train_data_path()), PathBuf::from("m/train/train_data.json"));
    }

    #[test]
    fn test_relative_artifact_has_empty_work_dir() {
        let l = ArtifactLayout::at("mnist");
        assert_eq!(l.work_dir(), Path::new(""));
    }
}
