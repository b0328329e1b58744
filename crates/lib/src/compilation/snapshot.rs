//! Serialized compilation snapshots.
//!
//! A snapshot is a JSON description of a finished compilation plus the
//! template records a cooperating transform reported while the host loaded
//! its modules. Hosts that run out of process dump one, and the CLI replays
//! it through the lifecycle hooks.
//!
//! ```json
//! {
//!   "modules": [
//!     { "id": "./src/page.js", "resource": "/app/src/page.js", "context": "/app/src",
//!       "dependencies": [{ "module": "./src/app.js" }] }
//!   ],
//!   "entrypoints": [
//!     { "name": "page", "chunks": [{ "files": ["page.js"], "entry_module": "./src/page.js" }] }
//!   ],
//!   "templates": {
//!     "./src/page.js": { "output": "page.html", "template": "page", "props": { "title": "Page" } }
//!   }
//! }
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Compilation, Entrypoint};
use crate::graph::{Module, ModuleGraph, ModuleId};
use crate::registry::TemplateRecord;

/// Errors that can occur while loading a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("invalid snapshot: {0}")]
  Json(#[from] serde_json::Error),

  /// A template or entry chunk names a module that is not in `modules`.
  #[error("unknown module: {0}")]
  UnknownModule(ModuleId),

  #[error("module declared more than once: {0}")]
  DuplicateModule(ModuleId),
}

/// Serialized form of a [`Compilation`] and its reported templates.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilationSnapshot {
  #[serde(default)]
  pub modules: Vec<Module>,
  #[serde(default)]
  pub entrypoints: Vec<Entrypoint>,
  /// Template records keyed by the module they were reported for.
  #[serde(default)]
  pub templates: BTreeMap<ModuleId, TemplateRecord>,
}

impl CompilationSnapshot {
  pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
    Ok(serde_json::from_str(json)?)
  }

  pub fn load(path: &Path) -> Result<Self, SnapshotError> {
    let json = std::fs::read_to_string(path)?;
    Self::from_json(&json)
  }

  /// Split the snapshot into the compilation and its template records.
  ///
  /// # Errors
  ///
  /// Returns `DuplicateModule` if two modules share an id and `UnknownModule`
  /// if a template or an entry chunk names a module that does not exist.
  /// Dependencies on unknown modules are allowed; traversal skips them.
  pub fn into_parts(self) -> Result<(Compilation, BTreeMap<ModuleId, TemplateRecord>), SnapshotError> {
    {
      let mut seen = HashSet::new();
      for module in &self.modules {
        if !seen.insert(&module.id) {
          return Err(SnapshotError::DuplicateModule(module.id.clone()));
        }
      }
    }

    let graph: ModuleGraph = self.modules.into_iter().collect();

    if let Some(id) = self.templates.keys().find(|id| !graph.contains(id)) {
      return Err(SnapshotError::UnknownModule(id.clone()));
    }

    if let Some(id) = self
      .entrypoints
      .iter()
      .flat_map(Entrypoint::entry_modules)
      .find(|id| !graph.contains(id))
    {
      return Err(SnapshotError::UnknownModule(id.clone()));
    }

    Ok((Compilation::new(graph, self.entrypoints), self.templates))
  }
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  const SNAPSHOT: &str = r#"{
    "modules": [
      { "id": "page", "resource": "/app/src/page.js", "context": "/app/src",
        "dependencies": [{ "module": "app" }, {}] },
      { "id": "app", "resource": "/app/src/app.js", "context": "/app/src" }
    ],
    "entrypoints": [
      { "name": "page", "chunks": [{ "files": ["page.js", "page.css"], "entry_module": "page" }] }
    ],
    "templates": {
      "page": { "output": "page.html", "template": "page", "props": { "title": "Page" } }
    }
  }"#;

  #[test]
  fn parses_and_splits() {
    let snapshot = CompilationSnapshot::from_json(SNAPSHOT).unwrap();
    let (compilation, templates) = snapshot.into_parts().unwrap();

    assert_eq!(compilation.graph.len(), 2);
    assert_eq!(compilation.entrypoints.len(), 1);
    assert!(compilation.assets.is_empty());

    let record = &templates[&ModuleId::from("page")];
    assert_eq!(record.output, "page.html");
    assert_eq!(record.template, "page");
    assert_eq!(record.props["title"], "Page");
  }

  #[test]
  fn empty_document_is_empty_snapshot() {
    let snapshot = CompilationSnapshot::from_json("{}").unwrap();
    assert_eq!(snapshot, CompilationSnapshot::default());
  }

  #[test]
  fn rejects_template_for_unknown_module() {
    let snapshot = CompilationSnapshot::from_json(
      r#"{ "templates": { "ghost": { "output": "x.html", "template": "x" } } }"#,
    )
    .unwrap();

    let err = snapshot.into_parts().unwrap_err();
    assert!(matches!(err, SnapshotError::UnknownModule(id) if id.0 == "ghost"));
  }

  #[test]
  fn rejects_unknown_entry_module() {
    let snapshot = CompilationSnapshot::from_json(
      r#"{ "entrypoints": [{ "name": "main", "chunks": [{ "files": [], "entry_module": "ghost" }] }] }"#,
    )
    .unwrap();

    assert!(matches!(snapshot.into_parts(), Err(SnapshotError::UnknownModule(_))));
  }

  #[test]
  fn rejects_duplicate_modules() {
    let snapshot = CompilationSnapshot::from_json(
      r#"{ "modules": [
        { "id": "a", "resource": "/a.js", "context": "/" },
        { "id": "a", "resource": "/b.js", "context": "/" }
      ] }"#,
    )
    .unwrap();

    assert!(matches!(snapshot.into_parts(), Err(SnapshotError::DuplicateModule(id)) if id.0 == "a"));
  }

  #[test]
  fn invalid_json_is_reported() {
    assert!(matches!(
      CompilationSnapshot::from_json("{ not json"),
      Err(SnapshotError::Json(_))
    ));
  }

  #[test]
  fn load_from_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("compilation.json");
    std::fs::write(&path, SNAPSHOT).unwrap();

    let snapshot = CompilationSnapshot::load(&path).unwrap();
    assert_eq!(snapshot.modules.len(), 2);

    let missing = CompilationSnapshot::load(&temp.path().join("missing.json"));
    assert!(matches!(missing, Err(SnapshotError::Io(_))));
  }
}
