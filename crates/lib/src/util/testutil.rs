//! Test utilities for entrypage-lib.
//!
//! Builders for small compilations and renderers that record what they were
//! asked to render.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::compilation::{Chunk, Compilation, Entrypoint};
use crate::graph::{Dependency, Module, ModuleGraph, ModuleId};
use crate::registry::{LoaderContext, Props, TemplateRecord, TemplateRegistry};
use crate::render::{RenderError, RenderRequest, TemplateRenderer};

/// A record for template `page` written to `output`.
pub fn record(output: &str) -> TemplateRecord {
  TemplateRecord::new(output, "page")
}

/// A module at `/src/<id>.js` depending on `deps` in order.
pub fn module(id: &str, deps: &[&str]) -> Module {
  deps
    .iter()
    .fold(Module::new(id, format!("/src/{}.js", id)), |m, dep| {
      m.with_dependency(Dependency::on(*dep))
    })
}

/// Builds a compilation and a registry populated through the loader-context
/// protocol, one context per module.
#[derive(Default)]
pub struct CompilationBuilder {
  modules: Vec<Module>,
  entrypoints: Vec<Entrypoint>,
  templates: Vec<(ModuleId, TemplateRecord)>,
}

impl CompilationBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn module(mut self, id: &str, deps: &[&str]) -> Self {
    self.modules.push(module(id, deps));
    self
  }

  pub fn module_with_root(mut self, id: &str, deps: &[&str], root: &str) -> Self {
    self.modules.push(module(id, deps).with_root_module(root));
    self
  }

  pub fn entry(mut self, name: &str, chunks: Vec<Chunk>) -> Self {
    self.entrypoints.push(Entrypoint::new(name, chunks));
    self
  }

  pub fn template(mut self, id: &str, record: TemplateRecord) -> Self {
    self.templates.push((ModuleId::from(id), record));
    self
  }

  /// Modules and entry points without any registration.
  pub fn compilation(&self) -> Compilation {
    let graph: ModuleGraph = self.modules.iter().cloned().collect();
    Compilation::new(graph, self.entrypoints.clone())
  }

  pub fn build(self) -> (Compilation, TemplateRegistry) {
    let compilation = self.compilation();
    let mut registry = TemplateRegistry::new();

    for (id, record) in self.templates {
      let ctx = LoaderContext::new();
      registry.register_callback(&ctx, id);
      assert!(registry.report_template(&ctx, record), "template reported twice");
    }

    (compilation, registry)
  }
}

/// One call received by a [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderCall {
  pub resource: PathBuf,
  pub context: PathBuf,
  pub template: String,
  pub props: Props,
}

/// Renderer that records its calls and renders `<html>{template}</html>`.
///
/// Templates listed in `failing` return an error instead.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
  calls: Arc<Mutex<Vec<RenderCall>>>,
  failing: HashSet<String>,
  in_flight: Arc<AtomicUsize>,
  max_in_flight: Arc<AtomicUsize>,
}

impl RecordingRenderer {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn failing_on(mut self, template: &str) -> Self {
    self.failing.insert(template.to_string());
    self
  }

  pub fn calls(&self) -> Vec<RenderCall> {
    self.calls.lock().unwrap().clone()
  }

  /// Highest number of renders that were in progress at the same time.
  pub fn max_in_flight(&self) -> usize {
    self.max_in_flight.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl TemplateRenderer for RecordingRenderer {
  async fn render(&self, request: RenderRequest<'_>) -> Result<String, RenderError> {
    let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    self.max_in_flight.fetch_max(now, Ordering::SeqCst);

    self.calls.lock().unwrap().push(RenderCall {
      resource: request.resource.to_path_buf(),
      context: request.context.to_path_buf(),
      template: request.template.to_string(),
      props: request.props.clone(),
    });

    tokio::task::yield_now().await;
    self.in_flight.fetch_sub(1, Ordering::SeqCst);

    if self.failing.contains(request.template) {
      return Err(RenderError::template(request.template, "boom"));
    }
    Ok(format!("<html>{}</html>", request.template))
  }
}
