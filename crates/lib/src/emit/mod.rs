//! Entry page emission.
//!
//! This module provides the lifecycle hooks a host build calls:
//! - `module_loaded`: attaches a template callback to the module's loader
//!   context so a cooperating transform can report a template for it
//! - `additional_assets`: resolves every entry's template, renders it with the
//!   entry's scripts and styles, and registers the page as a build artifact
//!
//! Pages are rendered one at a time in entry order. With the default
//! [`FailurePolicy::Abort`] the first renderer failure fails the whole phase.

pub mod assets;
pub mod props;
pub mod resolve;
pub mod types;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::compilation::{Artifact, Compilation};
use crate::graph::{Module, ModuleId};
use crate::registry::{LoaderContext, Props, TemplateRecord, TemplateRegistry};
use crate::render::{RenderRequest, TemplateRenderer};

pub use assets::{AssetBundle, collect_assets};
pub use props::merge_props;
pub use resolve::{Association, find_associations};
pub use types::{EmitConfig, EmitError, EmitReport, EmittedPage, FailurePolicy};

/// Generates an HTML page for every entry point that carries a template.
///
/// The plugin itself is stateless; per-compilation state lives in the
/// [`CompilationSession`] returned by [`EntryPagePlugin::this_compilation`].
#[derive(Clone)]
pub struct EntryPagePlugin {
  config: EmitConfig,
  renderer: Arc<dyn TemplateRenderer>,
}

impl EntryPagePlugin {
  pub fn new(renderer: impl TemplateRenderer + 'static) -> Self {
    Self::with_shared_renderer(Arc::new(renderer))
  }

  pub fn with_shared_renderer(renderer: Arc<dyn TemplateRenderer>) -> Self {
    Self {
      config: EmitConfig::default(),
      renderer,
    }
  }

  pub fn with_config(mut self, config: EmitConfig) -> Self {
    self.config = config;
    self
  }

  pub fn config(&self) -> &EmitConfig {
    &self.config
  }

  /// Start a new compilation.
  ///
  /// Hosts call this once per compilation and route that compilation's
  /// lifecycle events to the returned session.
  pub fn this_compilation(&self) -> CompilationSession {
    debug!(plugin = %self.config.plugin_name, "compilation started");
    CompilationSession {
      config: self.config.clone(),
      renderer: Arc::clone(&self.renderer),
      registry: TemplateRegistry::new(),
    }
  }
}

impl std::fmt::Debug for EntryPagePlugin {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("EntryPagePlugin").field("config", &self.config).finish_non_exhaustive()
  }
}

/// Page generation state for one compilation.
pub struct CompilationSession {
  config: EmitConfig,
  renderer: Arc<dyn TemplateRenderer>,
  registry: TemplateRegistry,
}

/// A resolved page, owning everything needed to render it.
struct PagePlan {
  entry: String,
  module: ModuleId,
  resource: PathBuf,
  context: PathBuf,
  record: TemplateRecord,
  props: Props,
}

impl PagePlan {
  fn new(association: Association<'_>) -> Self {
    let assets = collect_assets(association.entry);
    let props = merge_props(&association.record.props, &assets);
    Self {
      entry: association.entry.name.clone(),
      module: association.module.id.clone(),
      resource: association.module.resource.clone(),
      context: association.module.context.clone(),
      record: association.record,
      props,
    }
  }
}

impl CompilationSession {
  /// Hook for the host's module-loaded event.
  ///
  /// Attaches a callback for `module` to `ctx`. A transform processing the
  /// module's source can then report its template through
  /// [`TemplateRegistry::report_template`].
  pub fn module_loaded(&mut self, ctx: &LoaderContext, module: &Module) {
    self.registry.register_callback(ctx, module.id.clone());
  }

  /// The registry cooperating transforms report templates to.
  pub fn registry(&self) -> &TemplateRegistry {
    &self.registry
  }

  /// Hook for the host's additional-assets phase.
  ///
  /// Must run after all modules are loaded and chunks are final. Each page is
  /// written to `compilation.assets` at its record's output path; a later
  /// page with the same output replaces an earlier one.
  ///
  /// # Errors
  ///
  /// Returns `EmitError::Render` for the first renderer failure, or
  /// `EmitError::Multiple` with every failure under [`FailurePolicy::Collect`].
  /// Pages emitted before a failure stay in the compilation.
  pub async fn additional_assets(&self, compilation: &mut Compilation) -> Result<EmitReport, EmitError> {
    let plans: Vec<PagePlan> = find_associations(compilation, &self.registry).map(PagePlan::new).collect();

    info!(
      plugin = %self.config.plugin_name,
      templates = self.registry.len(),
      pages = plans.len(),
      "generating entry pages"
    );

    let mut report = EmitReport::default();
    let mut failures = Vec::new();

    for plan in plans {
      let request = RenderRequest {
        resource: &plan.resource,
        context: &plan.context,
        template: &plan.record.template,
        props: &plan.props,
      };

      let html = match self.renderer.render(request).await {
        Ok(html) => html,
        Err(source) => {
          error!(entry = %plan.entry, output = %plan.record.output, error = %source, "page render failed");
          let err = EmitError::Render {
            entry: plan.entry,
            output: plan.record.output,
            source,
          };
          match self.config.failure_policy {
            FailurePolicy::Abort => return Err(err),
            FailurePolicy::Collect => {
              failures.push(err);
              continue;
            }
          }
        }
      };

      let artifact = Artifact::new(html);
      let size = artifact.size();
      if compilation.emit_asset(plan.record.output.clone(), artifact).is_some() {
        debug!(output = %plan.record.output, "replaced existing asset");
      }

      info!(entry = %plan.entry, module = %plan.module, output = %plan.record.output, size, "page emitted");
      report.pages.push(EmittedPage {
        entry: plan.entry,
        module: plan.module,
        output: plan.record.output,
        size,
      });
    }

    if !failures.is_empty() {
      return Err(EmitError::Multiple(failures));
    }

    Ok(report)
  }
}
