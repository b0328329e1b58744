//! Template rendering seam.
//!
//! Page markup is produced by a [`TemplateRenderer`] supplied by the host. The
//! coordinator only decides what to render and where the result goes.

mod document;

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

use crate::registry::Props;

pub use document::DocumentRenderer;

/// Errors reported by a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
  #[error("template '{template}' failed: {message}")]
  Template { template: String, message: String },

  #[error("{0}")]
  Other(String),
}

impl RenderError {
  pub fn template(template: impl Into<String>, message: impl Into<String>) -> Self {
    RenderError::Template {
      template: template.into(),
      message: message.into(),
    }
  }
}

/// Everything a renderer gets for one page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRequest<'a> {
  /// Source path of the module that declared the template.
  pub resource: &'a Path,
  /// Directory containing `resource`.
  pub context: &'a Path,
  /// Template identifier from the template record.
  pub template: &'a str,
  /// Record props merged with the entry's `scripts` and `styles`.
  pub props: &'a Props,
}

/// Turns a template and its props into page markup.
#[async_trait]
pub trait TemplateRenderer: Send + Sync {
  async fn render(&self, request: RenderRequest<'_>) -> Result<String, RenderError>;
}
