// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! External tool invocation.
//!
//! Every out-of-process job follows the same contract: a program plus
//! positional arguments, exit status 0 for success. [`ProcessRunner`] is the
//! seam the orchestrator launches through; [`SystemRunner`] is the real one.

use crate::ToolCommand;
use std::fmt;
use std::path::{Path, PathBuf};

/// Which external collaborator is being launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    /// Builds an artifact and manifest from a descriptor.
    Compiler,
    /// Fits an artifact to a training batch.
    Trainer,
    /// Converts a foreign-format (ONNX) model to the native artifact format.
    Converter,
    /// Writes the manifest for an existing artifact.
    Extractor,
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ToolKind::Compiler => "model compiler",
            ToolKind::Trainer => "trainer",
            ToolKind::Converter => "model converter",
            ToolKind::Extractor => "manifest extractor",
        };
        f.write_str(name)
    }
}

/// A fully resolved command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub tool: ToolKind,
    pub program: String,
    /// Leading arguments from the config followed by the call's positional ones.
    pub args: Vec<String>,
    /// Working directory; inherits the caller's when `None`.
    pub cwd: Option<PathBuf>,
}

impl Invocation {
    pub fn new(tool: ToolKind, command: &ToolCommand) -> Self {
        Self {
            tool,
            program: command.program.clone(),
            args: command.args.clone(),
            cwd: None,
        }
    }

    /// Appends a path argument.
    pub fn path_arg(mut self, path: &Path) -> Self {
        self.args.push(path.to_string_lossy().into_owned());
        self
    }

    /// Sets the working directory. An empty path means the caller's.
    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.cwd = (!dir.as_os_str().is_empty()).then(|| dir.to_path_buf());
        self
    }

    /// The positional arguments appended after the configured ones.
    pub fn positional<'a>(&'a self, command: &ToolCommand) -> &'a [String] {
        self.args.get(command.args.len()..).unwrap_or_default()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " \"{arg}\"")?;
        }
        Ok(())
    }
}

/// How a finished process exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessStatus {
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl ProcessStatus {
    pub fn success() -> Self {
        Self { code: Some(0) }
    }

    pub fn exited(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn is_success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Launches an invocation and blocks until it finishes.
///
/// An `Err` means the process could not be started at all; a process that
/// ran and failed is reported through [`ProcessStatus`].
pub trait ProcessRunner: Send + Sync {
    fn run(&self, invocation: &Invocation) -> std::io::Result<ProcessStatus>;
}

/// Runs invocations with [`std::process::Command`], inheriting stdio so
/// tool output reaches the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> std::io::Result<ProcessStatus> {
        let mut command = std::process::Command::new(&invocation.program);
        command.args(&invocation.args);
        if let Some(dir) = &invocation.cwd {
            command.current_dir(dir);
        }
        let status = command.status()?;
        Ok(ProcessStatus {
            code: status.code(),
        })
    }
}
