//! Types for entry page generation.
//!
//! This module defines the configuration, error and report types of the
//! additional-assets phase.

use serde::Serialize;
use thiserror::Error;

use crate::consts::DEFAULT_PLUGIN_NAME;
use crate::graph::ModuleId;
use crate::render::RenderError;

/// What to do when the renderer fails for one page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
  /// Stop at the first failure and fail the phase.
  #[default]
  Abort,
  /// Render every page, then fail the phase with all failures if there were any.
  Collect,
}

/// Errors that can occur while generating entry pages.
#[derive(Debug, Error)]
pub enum EmitError {
  /// The renderer failed for one page.
  #[error("failed to render '{output}' for entry '{entry}': {source}")]
  Render {
    entry: String,
    output: String,
    source: RenderError,
  },

  /// Several pages failed (only with [`FailurePolicy::Collect`]).
  #[error("{} page(s) failed to render:\n{}", .0.len(), .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
  Multiple(Vec<EmitError>),
}

/// Configuration for page generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitConfig {
  /// Name used to identify the plugin in logs.
  pub plugin_name: String,

  /// How renderer failures are handled.
  pub failure_policy: FailurePolicy,
}

impl Default for EmitConfig {
  fn default() -> Self {
    Self {
      plugin_name: DEFAULT_PLUGIN_NAME.to_string(),
      failure_policy: FailurePolicy::default(),
    }
  }
}

/// A page written to the compilation's assets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmittedPage {
  pub entry: String,
  pub module: ModuleId,
  pub output: String,
  /// Size of the page in bytes.
  pub size: usize,
}

/// Result of one additional-assets phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmitReport {
  /// Pages in the order they were emitted.
  pub pages: Vec<EmittedPage>,
}

impl EmitReport {
  pub fn len(&self) -> usize {
    self.pages.len()
  }

  pub fn is_empty(&self) -> bool {
    self.pages.is_empty()
  }

  /// Total size of all emitted pages in bytes.
  pub fn total_size(&self) -> usize {
    self.pages.iter().map(|page| page.size).sum()
  }
}
