//! Template registry: the side tables behind the template reporting protocol.
//!
//! While the host loads a module, the coordinator registers a
//! [`TemplateCallback`] for that module's [`LoaderContext`]. A cooperating
//! source transform that recognizes a page template looks the callback up by
//! its own loader context and reports a [`TemplateRecord`] through it. The
//! record is stored against the module the callback was registered for.
//!
//! The registry is owned by one compilation session and dropped with it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::graph::ModuleId;

/// Free-form template props.
pub type Props = serde_json::Map<String, serde_json::Value>;

static NEXT_LOADER_CONTEXT: AtomicU64 = AtomicU64::new(1);

/// Opaque per-source-file handle supplied by the host.
///
/// Handles compare by identity: every [`LoaderContext::new`] call creates a
/// handle distinct from all others, and clones share the identity of their
/// original.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoaderContext(u64);

impl LoaderContext {
  pub fn new() -> Self {
    LoaderContext(NEXT_LOADER_CONTEXT.fetch_add(1, Ordering::Relaxed))
  }
}

impl Default for LoaderContext {
  fn default() -> Self {
    Self::new()
  }
}

/// The page a module asks to be generated for its entry point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateRecord {
  /// Output path of the generated page.
  pub output: String,
  /// Template identifier passed to the renderer.
  pub template: String,
  /// Props passed to the renderer, before asset props are merged in.
  #[serde(default)]
  pub props: Props,
}

impl TemplateRecord {
  pub fn new(output: impl Into<String>, template: impl Into<String>) -> Self {
    Self {
      output: output.into(),
      template: template.into(),
      props: Props::new(),
    }
  }

  pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
    self.props.insert(key.into(), value.into());
    self
  }
}

type RecordTable = Arc<Mutex<HashMap<ModuleId, TemplateRecord>>>;

/// Callback through which a transform reports the template of one module.
#[derive(Debug, Clone)]
pub struct TemplateCallback {
  module: ModuleId,
  records: RecordTable,
}

impl TemplateCallback {
  /// The module this callback reports for.
  pub fn module(&self) -> &ModuleId {
    &self.module
  }

  /// Store `record` for this callback's module.
  ///
  /// Returns `false` and leaves the stored record untouched if the module
  /// already has one.
  pub fn report(&self, record: TemplateRecord) -> bool {
    let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
    if records.contains_key(&self.module) {
      debug!(module = %self.module, "template already reported, ignoring");
      return false;
    }

    trace!(module = %self.module, output = %record.output, template = %record.template, "template reported");
    records.insert(self.module.clone(), record);
    true
  }
}

/// Loader-context callbacks and the template records reported through them.
#[derive(Debug, Default)]
pub struct TemplateRegistry {
  callbacks: HashMap<LoaderContext, TemplateCallback>,
  records: RecordTable,
}

impl TemplateRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Attach a callback for `module` to `ctx` and return it.
  ///
  /// Registering a handle again replaces its stored callback. Callbacks handed
  /// out earlier keep reporting for the module they were created for.
  pub fn register_callback(&mut self, ctx: &LoaderContext, module: ModuleId) -> TemplateCallback {
    let callback = TemplateCallback {
      module,
      records: Arc::clone(&self.records),
    };
    self.callbacks.insert(ctx.clone(), callback.clone());
    callback
  }

  /// The callback registered for `ctx`.
  ///
  /// `None` means the source file is not processed under this registry's
  /// hooks, which is the common case.
  pub fn callback(&self, ctx: &LoaderContext) -> Option<TemplateCallback> {
    self.callbacks.get(ctx).cloned()
  }

  /// Report `record` through the callback registered for `ctx`.
  ///
  /// This is the transform side of the protocol: without a registered
  /// callback nothing happens and `false` is returned.
  pub fn report_template(&self, ctx: &LoaderContext, record: TemplateRecord) -> bool {
    match self.callbacks.get(ctx) {
      Some(callback) => callback.report(record),
      None => false,
    }
  }

  /// The template record reported for `module`.
  pub fn template_record(&self, module: &ModuleId) -> Option<TemplateRecord> {
    self
      .records
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .get(module)
      .cloned()
  }

  /// Number of modules with a reported template.
  pub fn len(&self) -> usize {
    self.records.lock().unwrap_or_else(PoisonError::into_inner).len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}
