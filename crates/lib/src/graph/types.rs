use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Identity of a module in the build graph.
///
/// Hosts usually use the module's request or resolved path, but any string
/// that is unique within one compilation works.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(pub String);

impl std::fmt::Display for ModuleId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl From<&str> for ModuleId {
  fn from(value: &str) -> Self {
    ModuleId(value.to_string())
  }
}

impl From<String> for ModuleId {
  fn from(value: String) -> Self {
    ModuleId(value)
  }
}

/// A dependency edge of a module.
///
/// `module` is `None` when the host could not attach a module to the
/// dependency (for example a non-code asset).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Dependency {
  #[serde(default)]
  pub module: Option<ModuleId>,
}

impl Dependency {
  /// A dependency on the given module.
  pub fn on(module: impl Into<ModuleId>) -> Self {
    Self {
      module: Some(module.into()),
    }
  }

  /// A dependency without a module.
  pub fn unresolved() -> Self {
    Self { module: None }
  }
}

/// A node in the build's module graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
  pub id: ModuleId,
  /// Source path of the module.
  pub resource: PathBuf,
  /// Directory containing `resource`.
  pub context: PathBuf,
  /// Dependencies in import order.
  #[serde(default)]
  pub dependencies: Vec<Dependency>,
  /// Canonical representative when this module aggregates others
  /// (e.g. a concatenated module). Traversals visit the root module instead.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub root_module: Option<ModuleId>,
}

impl Module {
  /// Create a module for `resource`, using its parent directory as context.
  pub fn new(id: impl Into<ModuleId>, resource: impl Into<PathBuf>) -> Self {
    let resource = resource.into();
    let context = resource.parent().map(Path::to_path_buf).unwrap_or_default();
    Self {
      id: id.into(),
      resource,
      context,
      dependencies: Vec::new(),
      root_module: None,
    }
  }

  pub fn with_dependency(mut self, dependency: Dependency) -> Self {
    self.dependencies.push(dependency);
    self
  }

  pub fn with_root_module(mut self, root: impl Into<ModuleId>) -> Self {
    self.root_module = Some(root.into());
    self
  }
}

/// All modules of a compilation, keyed by identity.
///
/// Uses [`BTreeMap`] so iteration and serialization are deterministic.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ModuleGraph {
  modules: BTreeMap<ModuleId, Module>,
}

impl ModuleGraph {
  pub fn new() -> Self {
    Self::default()
  }

  /// Insert a module, returning the module previously stored under its id.
  pub fn insert(&mut self, module: Module) -> Option<Module> {
    self.modules.insert(module.id.clone(), module)
  }

  pub fn get(&self, id: &ModuleId) -> Option<&Module> {
    self.modules.get(id)
  }

  pub fn contains(&self, id: &ModuleId) -> bool {
    self.modules.contains_key(id)
  }

  pub fn len(&self) -> usize {
    self.modules.len()
  }

  pub fn is_empty(&self) -> bool {
    self.modules.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Module> {
    self.modules.values()
  }

  /// The module a dependency on `id` stands for during traversal.
  ///
  /// Aggregates are replaced by their root module; everything else, including
  /// ids missing from the graph, maps to itself.
  pub fn representative<'g>(&'g self, id: &'g ModuleId) -> &'g ModuleId {
    match self.modules.get(id).and_then(|m| m.root_module.as_ref()) {
      Some(root) => root,
      None => id,
    }
  }
}

impl FromIterator<Module> for ModuleGraph {
  fn from_iter<I: IntoIterator<Item = Module>>(iter: I) -> Self {
    let mut graph = ModuleGraph::new();
    for module in iter {
      graph.insert(module);
    }
    graph
  }
}
