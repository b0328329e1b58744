//! The host compilation as observed by this crate.
//!
//! A [`Compilation`] carries the finished module graph, the entry points with
//! the chunks and files they produced, and the mutable map of output
//! artifacts that page generation adds to.

mod snapshot;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::graph::{ModuleGraph, ModuleId};

pub use snapshot::{CompilationSnapshot, SnapshotError};

/// A group of output files belonging to one entry point.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Chunk {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  /// Output file names in emission order.
  #[serde(default)]
  pub files: Vec<String>,
  /// The module this chunk starts executing from, if it is an entry chunk.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub entry_module: Option<ModuleId>,
}

impl Chunk {
  pub fn new<I, S>(files: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      name: None,
      files: files.into_iter().map(Into::into).collect(),
      entry_module: None,
    }
  }

  pub fn with_entry_module(mut self, module: impl Into<ModuleId>) -> Self {
    self.entry_module = Some(module.into());
    self
  }
}

/// A named build entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entrypoint {
  pub name: String,
  #[serde(default)]
  pub chunks: Vec<Chunk>,
}

impl Entrypoint {
  pub fn new(name: impl Into<String>, chunks: Vec<Chunk>) -> Self {
    Self {
      name: name.into(),
      chunks,
    }
  }

  /// Entry modules of this entry point's chunks, in chunk order.
  pub fn entry_modules(&self) -> impl Iterator<Item = &ModuleId> {
    self.chunks.iter().filter_map(|chunk| chunk.entry_module.as_ref())
  }
}

/// An output file registered in the compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
  source: String,
}

impl Artifact {
  pub fn new(source: impl Into<String>) -> Self {
    Self { source: source.into() }
  }

  /// Content of the artifact.
  pub fn source(&self) -> &str {
    &self.source
  }

  /// Length of the content in bytes.
  pub fn size(&self) -> usize {
    self.source.len()
  }
}

/// One build compilation.
#[derive(Debug, Default, Clone)]
pub struct Compilation {
  pub graph: ModuleGraph,
  /// Entry points in the order the host declared them.
  pub entrypoints: Vec<Entrypoint>,
  /// Output artifacts keyed by output path.
  pub assets: BTreeMap<String, Artifact>,
}

impl Compilation {
  pub fn new(graph: ModuleGraph, entrypoints: Vec<Entrypoint>) -> Self {
    Self {
      graph,
      entrypoints,
      assets: BTreeMap::new(),
    }
  }

  /// Register an artifact at `path`, returning the artifact it replaced.
  pub fn emit_asset(&mut self, path: impl Into<String>, artifact: Artifact) -> Option<Artifact> {
    self.assets.insert(path.into(), artifact)
  }

  pub fn asset(&self, path: &str) -> Option<&Artifact> {
    self.assets.get(path)
  }

  pub fn entrypoint(&self, name: &str) -> Option<&Entrypoint> {
    self.entrypoints.iter().find(|entry| entry.name == name)
  }
}
