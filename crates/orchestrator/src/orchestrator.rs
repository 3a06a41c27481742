// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The model lifecycle: describe, compile, train, run.
//!
//! ```text
//!             compile() / load_existing()
//! Described ──────────────────────────────▶ Compiled ◀─┐
//!                                              │       │ compile() /
//!                                              │ train()  load_existing()
//!                                              ▼       │
//!                                           Trained ───┘
//! ```
//!
//! A failed call never moves the state and never touches the name table.
//! `run` is valid in `Compiled` and `Trained`.

use crate::{
    ArtifactLayout, InferenceBackend, Invocation, ProcessRunner, RuntimeError, SystemRunner,
    ToolKind, ToolchainConfig,
};
use model_ir::{
    Domain, IoManifest, ModelDescriptor, ModelError, NameResolver, TrainingBatch, TrainingConfig,
    Value,
};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tensor_core::{DType, Tensor};

/// File name of the descriptor written by [`ModelOrchestrator::export_all`].
pub const EXPORT_LAYOUT_FILE: &str = "model_layout.json";
/// File name of the training batch written by [`ModelOrchestrator::export_all`].
pub const EXPORT_DATA_FILE: &str = "train_data.json";

/// Where a model is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelState {
    /// Only a description exists.
    Described,
    /// An artifact and a name table exist.
    Compiled,
    /// The artifact has been fit at least once.
    Trained,
}

impl ModelState {
    /// `true` when an artifact and name table are available.
    pub fn is_runnable(self) -> bool {
        matches!(self, ModelState::Compiled | ModelState::Trained)
    }
}

impl fmt::Display for ModelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ModelState::Described => "described",
            ModelState::Compiled => "compiled",
            ModelState::Trained => "trained",
        };
        f.write_str(s)
    }
}

/// Owns one model description, its training samples and its name table,
/// and drives the external toolchain against them.
///
/// # Example
/// ```no_run
/// use orchestrator::{ModelOrchestrator, ToolchainConfig};
/// use model_ir::{Domain, TrainingConfig, Value};
/// use tensor_core::DType;
///
/// # fn example() -> Result<(), orchestrator::RuntimeError> {
/// let mut model = ModelOrchestrator::new("linear", ToolchainConfig::default());
/// model
///     .add_input("x", DType::Float32, [-1, 1], Domain::Data)
///     .add_output("y")
///     .add_layer("Dense", [
///         ("input_name", Value::from("x")),
///         ("units", Value::from(1)),
///         ("output_name", Value::from("y")),
///     ]);
/// model.compile()?;
///
/// for i in 0..10 {
///     let x = i as f64;
///     model.add_example("x", vec![x], "y", vec![2.0 * x + 1.0]);
/// }
/// model.train(&TrainingConfig { epochs: 100, ..Default::default() })?;
/// # Ok(())
/// # }
/// ```
pub struct ModelOrchestrator {
    config: ToolchainConfig,
    descriptor: ModelDescriptor,
    batch: TrainingBatch,
    resolver: NameResolver,
    layout: ArtifactLayout,
    state: ModelState,
    runner: Box<dyn ProcessRunner>,
    backend: Option<Box<dyn InferenceBackend>>,
}

impl ModelOrchestrator {
    /// Creates an orchestrator for an empty model called `model_name`.
    pub fn new(model_name: impl Into<String>, config: ToolchainConfig) -> Self {
        Self::from_descriptor(ModelDescriptor::new(model_name), config)
    }

    /// Creates an orchestrator around an existing description.
    pub fn from_descriptor(descriptor: ModelDescriptor, config: ToolchainConfig) -> Self {
        tracing::info!(
            "orchestrator created for model '{}' in '{}'",
            descriptor.model_name,
            config.work_dir.display()
        );
        let layout = config.layout(&descriptor.model_name);
        Self {
            config,
            descriptor,
            batch: TrainingBatch::new(),
            resolver: NameResolver::new(),
            layout,
            state: ModelState::Described,
            runner: Box::new(SystemRunner),
            backend: None,
        }
    }

    /// Replaces the process runner used to launch external tools.
    pub fn with_runner(mut self, runner: Box<dyn ProcessRunner>) -> Self {
        self.runner = runner;
        self
    }

    /// Attaches the inference engine used by [`run`](Self::run).
    pub fn with_backend(mut self, backend: Box<dyn InferenceBackend>) -> Self {
        tracing::debug!("inference backend '{}' attached", backend.name());
        self.backend = Some(backend);
        self
    }

    // ── Accessors ──────────────────────────────────────────────

    pub fn state(&self) -> ModelState {
        self.state
    }

    pub fn descriptor(&self) -> &ModelDescriptor {
        &self.descriptor
    }

    /// Mutable access to the description. Changes take effect on the next
    /// compile; the current name table is not invalidated.
    pub fn descriptor_mut(&mut self) -> &mut ModelDescriptor {
        &mut self.descriptor
    }

    pub fn training_batch(&self) -> &TrainingBatch {
        &self.batch
    }

    pub fn resolver(&self) -> &NameResolver {
        &self.resolver
    }

    pub fn config(&self) -> &ToolchainConfig {
        &self.config
    }

    /// Layout of the current artifact, or of the one `compile` would build.
    pub fn layout(&self) -> &ArtifactLayout {
        &self.layout
    }

    // ── Description ────────────────────────────────────────────

    /// Declares an input. See [`ModelDescriptor::add_input`].
    pub fn add_input(
        &mut self,
        name: impl Into<String>,
        dtype: DType,
        shape: impl Into<Vec<i64>>,
        domain: Domain,
    ) -> &mut Self {
        self.descriptor.add_input(name, dtype, shape, domain);
        self
    }

    /// Declares an output. See [`ModelDescriptor::add_output`].
    pub fn add_output(&mut self, name: impl Into<String>) -> &mut Self {
        self.descriptor.add_output(name);
        self
    }

    /// Appends a layer. See [`ModelDescriptor::add_layer`].
    pub fn add_layer<K, V>(
        &mut self,
        layer_type: impl Into<String>,
        params: impl IntoIterator<Item = (K, V)>,
    ) -> &mut Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.descriptor.add_layer(layer_type, params);
        self
    }

    /// Records one training sample. See [`TrainingBatch::add_example`].
    pub fn add_example(
        &mut self,
        input_name: &str,
        input: impl Into<Value>,
        label_name: &str,
        label: impl Into<Value>,
    ) -> &mut Self {
        self.batch.add_example(input_name, input, label_name, label);
        self
    }

    /// Replaces the recorded training samples, e.g. with a batch read from disk.
    pub fn set_training_batch(&mut self, batch: TrainingBatch) {
        self.batch = batch;
    }

    /// Drops all recorded training samples.
    pub fn clear_examples(&mut self) {
        self.batch.clear();
    }

    // ── Lifecycle ──────────────────────────────────────────────

    /// Builds the artifact from the current description and loads its
    /// name table.
    ///
    /// Steps:
    /// 1. Write the description to `<artifact>/model_description.json`.
    /// 2. Move any previous manifest aside.
    /// 3. Run the model compiler from the work dir.
    /// 4. Load the manifest it wrote.
    ///
    /// The description is not checked locally; malformed models are left to
    /// the compiler to reject. On any failure the state, the previous name
    /// table and the previous manifest file are unchanged.
    pub fn compile(&mut self) -> Result<(), RuntimeError> {
        let layout = self.config.layout(&self.descriptor.model_name);
        let descriptor_path = layout.descriptor_path();
        self.descriptor.to_file(&descriptor_path)?;
        let previous = SetAside::new(layout.manifest_path())?;

        let invocation = Invocation::new(ToolKind::Compiler, &self.config.compiler)
            .path_arg(&layout.tool_path(&descriptor_path))
            .current_dir(layout.work_dir());
        let built = self
            .launch(&invocation)
            .and_then(|()| IoManifest::from_file(&layout.manifest_path()).map_err(RuntimeError::from));

        match built {
            Ok(manifest) => {
                previous.discard();
                self.install(layout, manifest, ModelState::Compiled);
                Ok(())
            }
            Err(e) => {
                previous.restore();
                Err(e)
            }
        }
    }

    /// Adopts an artifact built elsewhere.
    ///
    /// A path ending in `.onnx` is first converted into `<parent>/<stem>`.
    /// If an extractor is configured it then regenerates the manifest.
    /// Finally the manifest is loaded, as in [`compile`](Self::compile).
    pub fn load_existing(&mut self, path: &Path) -> Result<(), RuntimeError> {
        let artifact = if is_onnx(path) {
            if !path.exists() {
                return Err(RuntimeError::ArtifactMissing(path.to_path_buf()));
            }
            let target = path.with_extension("");
            let invocation = Invocation::new(ToolKind::Converter, &self.config.converter)
                .path_arg(path)
                .path_arg(&target);
            self.launch(&invocation)?;
            target
        } else {
            path.to_path_buf()
        };

        if !artifact.exists() {
            return Err(RuntimeError::ArtifactMissing(artifact));
        }

        let layout = ArtifactLayout::at(artifact).with_manifest_file(&self.config.manifest_file);
        if let Some(extractor) = &self.config.extractor {
            let invocation = Invocation::new(ToolKind::Extractor, extractor)
                .path_arg(&layout.tool_path(layout.artifact_dir()))
                .current_dir(layout.work_dir());
            self.launch(&invocation)?;
        }

        let manifest = IoManifest::from_file(&layout.manifest_path())?;
        self.install(layout, manifest, ModelState::Compiled);
        Ok(())
    }

    /// Fits the current artifact to the recorded samples.
    ///
    /// The config and batch are written under `<artifact>/train/` and the
    /// trainer is run as
    /// `<trainer> <artifact> <artifact> <train_config.json> <train_data.json>`,
    /// overwriting the artifact in place.
    pub fn train(&mut self, config: &TrainingConfig) -> Result<(), RuntimeError> {
        if self.batch.is_empty() {
            return Err(RuntimeError::NoData);
        }
        if !self.state.is_runnable() {
            return Err(RuntimeError::NotCompiled);
        }

        let layout = self.layout.clone();
        let config_path = layout.train_config_path();
        let data_path = layout.train_data_path();
        config.to_file(&config_path)?;
        self.batch.to_file(&data_path)?;

        let artifact = layout.tool_path(layout.artifact_dir());
        let invocation = Invocation::new(ToolKind::Trainer, &self.config.trainer)
            .path_arg(&artifact)
            .path_arg(&artifact)
            .path_arg(&layout.tool_path(&config_path))
            .path_arg(&layout.tool_path(&data_path))
            .current_dir(layout.work_dir());
        tracing::info!(
            "training '{}' on {} samples ({} epochs, batch size {})",
            self.descriptor.model_name,
            self.batch.num_samples(),
            config.epochs,
            config.batch_size,
        );
        self.launch(&invocation)?;

        // The trainer re-saves the artifact; node names normally survive.
        match IoManifest::from_file(&layout.manifest_path()) {
            Ok(manifest) => self.resolver.load(manifest),
            Err(e) => tracing::warn!("keeping previous name table after training: {e}"),
        }
        self.transition(ModelState::Trained);
        Ok(())
    }

    /// Runs inference on every declared output.
    ///
    /// Inputs are keyed by logical name. Names missing from the name table
    /// are dropped with a warning. Results are keyed by logical output name,
    /// or by physical name when no output was declared at that position.
    pub fn run(
        &self,
        inputs: &BTreeMap<String, Tensor>,
    ) -> Result<BTreeMap<String, Tensor>, RuntimeError> {
        if !self.state.is_runnable() {
            return Err(RuntimeError::NotCompiled);
        }
        let selected = self
            .resolver
            .physical_outputs()
            .iter()
            .enumerate()
            .map(|(i, physical)| (self.logical_output(i, physical), physical.clone()))
            .collect();
        self.execute(inputs, selected)
    }

    /// Runs inference on the named subset of outputs, in the order given.
    pub fn run_outputs(
        &self,
        inputs: &BTreeMap<String, Tensor>,
        outputs: &[&str],
    ) -> Result<BTreeMap<String, Tensor>, RuntimeError> {
        if !self.state.is_runnable() {
            return Err(RuntimeError::NotCompiled);
        }
        let physical = self.resolver.physical_outputs();
        let mut selected = Vec::with_capacity(outputs.len());
        for &name in outputs {
            let index = (0..physical.len())
                .find(|&i| self.logical_output(i, &physical[i]) == name)
                .ok_or_else(|| ModelError::UnknownOutput {
                    name: name.to_string(),
                })?;
            selected.push((name.to_string(), physical[index].clone()));
        }
        self.execute(inputs, selected)
    }

    // ── Export ─────────────────────────────────────────────────

    /// Writes `model_layout.json` and `train_data.json` into `dir`,
    /// creating it if needed. Returns the two paths.
    pub fn export_all(&self, dir: &Path) -> Result<(PathBuf, PathBuf), RuntimeError> {
        let layout_path = dir.join(EXPORT_LAYOUT_FILE);
        let data_path = dir.join(EXPORT_DATA_FILE);
        self.descriptor.to_file(&layout_path)?;
        self.batch.to_file(&data_path)?;
        tracing::info!("model and training data exported to '{}'", dir.display());
        Ok((layout_path, data_path))
    }

    /// Writes the description to `path`.
    pub fn save_descriptor(&self, path: &Path) -> Result<(), RuntimeError> {
        Ok(self.descriptor.to_file(path)?)
    }

    /// Writes the recorded samples to `path`.
    pub fn save_training_batch(&self, path: &Path) -> Result<(), RuntimeError> {
        Ok(self.batch.to_file(path)?)
    }

    // ── Internals ──────────────────────────────────────────────

    fn launch(&self, invocation: &Invocation) -> Result<(), RuntimeError> {
        tracing::info!("launching {}: {invocation}", invocation.tool);
        let status = self
            .runner
            .run(invocation)
            .map_err(|source| RuntimeError::Spawn {
                tool: invocation.tool,
                source,
            })?;
        if !status.is_success() {
            tracing::error!("{} exited with {:?}", invocation.tool, status.code);
            return Err(RuntimeError::SubprocessFailed {
                tool: invocation.tool,
                code: status.code,
            });
        }
        Ok(())
    }

    fn install(&mut self, layout: ArtifactLayout, manifest: IoManifest, state: ModelState) {
        tracing::info!(
            "artifact ready at '{}' ({} inputs, {} outputs)",
            layout.artifact_dir().display(),
            manifest.inputs.len(),
            manifest.outputs.len(),
        );
        self.resolver.load(manifest);
        self.layout = layout;
        self.transition(state);
    }

    fn transition(&mut self, next: ModelState) {
        if self.state != next {
            tracing::info!(
                "model '{}': {} -> {}",
                self.descriptor.model_name,
                self.state,
                next
            );
        }
        self.state = next;
    }

    /// Warns when a tensor disagrees with its declared input; never fails.
    fn check_declared(&self, logical: &str, tensor: &Tensor) {
        let Some(input) = self.descriptor.input(logical) else {
            return;
        };
        if !tensor.dtype().same_layout(input.dtype) {
            tracing::warn!(
                "input '{logical}' is {} but declared {}",
                tensor.dtype(),
                input.dtype
            );
        }
        if !tensor.shape().matches_declared(&input.shape) {
            tracing::warn!(
                "input '{logical}' has shape {} but declared {:?}",
                tensor.shape(),
                input.shape
            );
        }
    }

    fn logical_output(&self, index: usize, physical: &str) -> String {
        self.descriptor
            .outputs
            .get(index)
            .map_or_else(|| physical.to_string(), |o| o.name.clone())
    }

    fn execute(
        &self,
        inputs: &BTreeMap<String, Tensor>,
        selected: Vec<(String, String)>,
    ) -> Result<BTreeMap<String, Tensor>, RuntimeError> {
        if selected.is_empty() {
            return Err(RuntimeError::RunFailed(
                "name table lists no outputs".to_string(),
            ));
        }
        let backend = self
            .backend
            .as_deref()
            .ok_or_else(|| RuntimeError::RunFailed("no inference backend attached".to_string()))?;

        let mut resolved = Vec::with_capacity(inputs.len());
        for (logical, tensor) in inputs {
            match self.resolver.resolve(logical) {
                Ok(physical) => {
                    tracing::debug!("input '{logical}' -> '{physical}'");
                    self.check_declared(logical, tensor);
                    resolved.push((physical.to_string(), tensor.clone()));
                }
                Err(_) => tracing::warn!("dropping input '{logical}': not in the name table"),
            }
        }

        let (logical, physical): (Vec<String>, Vec<String>) = selected.into_iter().unzip();
        let results = backend.run(self.layout.artifact_dir(), &resolved, &physical)?;
        if results.len() != physical.len() {
            return Err(RuntimeError::RunFailed(format!(
                "backend '{}' returned {} tensors for {} requested outputs",
                backend.name(),
                results.len(),
                physical.len()
            )));
        }
        let mut tagged = BTreeMap::new();
        for (name, tensor) in logical.into_iter().zip(results) {
            if tagged.contains_key(&name) {
                return Err(RuntimeError::RunFailed(format!(
                    "output name '{name}' is used by more than one output"
                )));
            }
            tagged.insert(name, tensor);
        }
        Ok(tagged)
    }
}

impl fmt::Debug for ModelOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelOrchestrator")
            .field("model", &self.descriptor.model_name)
            .field("state", &self.state)
            .field("artifact", &self.layout.artifact_dir())
            .field("backend", &self.backend.as_ref().map(|b| b.name()))
            .finish()
    }
}

/// A manifest from an earlier build, renamed to `<name>.prev` while the
/// compiler runs so that a compiler which exits 0 without writing one is
/// caught.
struct SetAside {
    original: PathBuf,
    backup: Option<PathBuf>,
}

impl SetAside {
    fn new(original: PathBuf) -> Result<Self, RuntimeError> {
        let mut backup = original.clone().into_os_string();
        backup.push(".prev");
        let backup = PathBuf::from(backup);

        match std::fs::rename(&original, &backup) {
            Ok(()) => {
                tracing::debug!("moved previous manifest to '{}'", backup.display());
                Ok(Self {
                    original,
                    backup: Some(backup),
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self {
                original,
                backup: None,
            }),
            Err(source) => Err(RuntimeError::Io {
                path: original,
                source,
            }),
        }
    }

    /// Puts the previous manifest back, replacing whatever the failed build
    /// left behind.
    fn restore(self) {
        let Some(backup) = self.backup else {
            return;
        };
        if let Err(e) = std::fs::rename(&backup, &self.original) {
            tracing::warn!(
                "could not restore manifest '{}': {e}",
                self.original.display()
            );
        }
    }

    fn discard(self) {
        let Some(backup) = self.backup else {
            return;
        };
        if let Err(e) = std::fs::remove_file(&backup) {
            tracing::warn!("could not remove '{}': {e}", backup.display());
        }
    }
}

fn is_onnx(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("onnx"))
}
