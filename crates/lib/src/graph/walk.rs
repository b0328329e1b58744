//! Depth-first dependency traversal.
//!
//! [`walk`] lazily yields a module followed by all of its transitive
//! dependencies in pre-order. It keeps an explicit stack and a visited set
//! local to the walk, so it never recurses and terminates on cyclic graphs.

use std::collections::HashSet;

use tracing::trace;

use super::types::{Module, ModuleGraph, ModuleId};

/// Iterator over a module and its transitive dependencies.
///
/// Created by [`walk`]. Every module is yielded at most once.
#[derive(Debug)]
pub struct DependencyWalk<'g> {
  graph: &'g ModuleGraph,
  stack: Vec<&'g ModuleId>,
  visited: HashSet<&'g ModuleId>,
}

/// Walk `start` and its dependencies depth-first, pre-order.
///
/// Dependencies are followed in declaration order. A dependency on an
/// aggregate module is replaced by the aggregate's root module. Dependencies
/// without a module, or naming a module missing from the graph, are skipped.
/// A `start` missing from the graph yields nothing.
pub fn walk<'g>(graph: &'g ModuleGraph, start: &'g ModuleId) -> DependencyWalk<'g> {
  DependencyWalk {
    graph,
    stack: vec![start],
    visited: HashSet::new(),
  }
}

impl<'g> Iterator for DependencyWalk<'g> {
  type Item = &'g Module;

  fn next(&mut self) -> Option<Self::Item> {
    while let Some(id) = self.stack.pop() {
      if !self.visited.insert(id) {
        continue;
      }

      let Some(module) = self.graph.get(id) else {
        trace!(module = %id, "skipping module missing from graph");
        continue;
      };

      // Reversed so the first dependency is popped next.
      for dependency in module.dependencies.iter().rev() {
        if let Some(dep_id) = dependency.module.as_ref() {
          self.stack.push(self.graph.representative(dep_id));
        }
      }

      return Some(module);
    }

    None
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::graph::Dependency;
  use crate::util::testutil::module;

  fn ids<'g>(walk: DependencyWalk<'g>) -> Vec<&'g str> {
    walk.map(|m| m.id.0.as_str()).collect()
  }

  #[test]
  fn single_module_without_dependencies() {
    let graph: ModuleGraph = [module("a", &[])].into_iter().collect();
    let start = ModuleId::from("a");

    assert_eq!(ids(walk(&graph, &start)), vec!["a"]);
  }

  #[test]
  fn missing_start_yields_nothing() {
    let graph = ModuleGraph::new();
    let start = ModuleId::from("a");

    assert_eq!(walk(&graph, &start).count(), 0);
  }

  #[test]
  fn pre_order_follows_declaration_order() {
    //   a
    //  / \
    // b   e
    // |\
    // c d
    let graph: ModuleGraph = [
      module("a", &["b", "e"]),
      module("b", &["c", "d"]),
      module("c", &[]),
      module("d", &[]),
      module("e", &[]),
    ]
    .into_iter()
    .collect();
    let start = ModuleId::from("a");

    assert_eq!(ids(walk(&graph, &start)), vec!["a", "b", "c", "d", "e"]);
  }

  #[test]
  fn diamond_visits_shared_dependency_once() {
    //     a
    //    / \
    //   b   c
    //    \ /
    //     d
    let graph: ModuleGraph = [
      module("a", &["b", "c"]),
      module("b", &["d"]),
      module("c", &["d"]),
      module("d", &[]),
    ]
    .into_iter()
    .collect();
    let start = ModuleId::from("a");

    assert_eq!(ids(walk(&graph, &start)), vec!["a", "b", "d", "c"]);
  }

  #[test]
  fn cycles_terminate() {
    let graph: ModuleGraph = [module("a", &["b"]), module("b", &["c"]), module("c", &["a", "b"])]
      .into_iter()
      .collect();
    let start = ModuleId::from("a");

    assert_eq!(ids(walk(&graph, &start)), vec!["a", "b", "c"]);
  }

  #[test]
  fn self_dependency_terminates() {
    let graph: ModuleGraph = [module("a", &["a"])].into_iter().collect();
    let start = ModuleId::from("a");

    assert_eq!(ids(walk(&graph, &start)), vec!["a"]);
  }

  #[test]
  fn every_reachable_module_visited_exactly_once() {
    // Dense graph: every module depends on every module, itself included.
    let names: Vec<String> = (0..12).map(|i| format!("m{}", i)).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let graph: ModuleGraph = refs.iter().map(|id| module(id, &refs)).collect();
    let start = ModuleId::from("m5");

    let mut visited = ids(walk(&graph, &start));
    assert_eq!(visited.len(), names.len());
    assert_eq!(visited[0], "m5");

    visited.sort();
    visited.dedup();
    assert_eq!(visited.len(), names.len());
  }

  #[test]
  fn unreachable_modules_not_visited() {
    let graph: ModuleGraph = [module("a", &["b"]), module("b", &[]), module("orphan", &["a"])]
      .into_iter()
      .collect();
    let start = ModuleId::from("a");

    assert_eq!(ids(walk(&graph, &start)), vec!["a", "b"]);
  }

  #[test]
  fn unresolved_and_missing_dependencies_skipped() {
    let graph: ModuleGraph = [
      Module::new("a", "/src/a.js")
        .with_dependency(Dependency::unresolved())
        .with_dependency(Dependency::on("ghost"))
        .with_dependency(Dependency::on("b")),
      module("b", &[]),
    ]
    .into_iter()
    .collect();
    let start = ModuleId::from("a");

    assert_eq!(ids(walk(&graph, &start)), vec!["a", "b"]);
  }

  #[test]
  fn aggregate_dependency_replaced_by_root_module() {
    let graph: ModuleGraph = [
      module("a", &["concat"]),
      module("concat", &["inner"]).with_root_module("root"),
      module("root", &["leaf"]),
      module("inner", &[]),
      module("leaf", &[]),
    ]
    .into_iter()
    .collect();
    let start = ModuleId::from("a");

    assert_eq!(ids(walk(&graph, &start)), vec!["a", "root", "leaf"]);
  }

  #[test]
  fn start_module_is_not_substituted() {
    let graph: ModuleGraph = [
      module("concat", &["leaf"]).with_root_module("root"),
      module("root", &[]),
      module("leaf", &[]),
    ]
    .into_iter()
    .collect();
    let start = ModuleId::from("concat");

    assert_eq!(ids(walk(&graph, &start)), vec!["concat", "leaf"]);
  }

  #[test]
  fn walks_are_independent() {
    let graph: ModuleGraph = [module("a", &["shared"]), module("b", &["shared"]), module("shared", &[])]
      .into_iter()
      .collect();
    let a = ModuleId::from("a");
    let b = ModuleId::from("b");

    assert_eq!(ids(walk(&graph, &a)), vec!["a", "shared"]);
    assert_eq!(ids(walk(&graph, &b)), vec!["b", "shared"]);
  }

  #[test]
  fn walk_is_lazy() {
    let graph: ModuleGraph = [module("a", &["b"]), module("b", &["c"]), module("c", &[])]
      .into_iter()
      .collect();
    let start = ModuleId::from("a");

    let mut walk = walk(&graph, &start);
    assert_eq!(walk.next().map(|m| m.id.0.as_str()), Some("a"));
    // Only the direct dependency has been scheduled so far.
    assert_eq!(walk.stack.len(), 1);
    assert_eq!(walk.visited.len(), 1);
  }
}
