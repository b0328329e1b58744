//! Built-in renderer producing a plain HTML5 document.
//!
//! Recognized props:
//! - `title`: document title (defaults to the template id)
//! - `styles`: style sheets, linked in order
//! - `scripts`: scripts, loaded `async` in order
//!
//! The body holds a single mount element with id `<template>-app`.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::{RenderError, RenderRequest, TemplateRenderer};
use crate::consts::{SCRIPTS_PROP, STYLES_PROP};

const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; style-src 'self' 'unsafe-inline'";

/// Renders a minimal HTML document that loads an entry's assets.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentRenderer;

impl DocumentRenderer {
  pub fn new() -> Self {
    Self
  }

  fn document(request: &RenderRequest<'_>) -> String {
    let title = request
      .props
      .get("title")
      .and_then(Value::as_str)
      .unwrap_or(request.template);

    let mut doc = String::new();
    doc.push_str("<!DOCTYPE html>\n");
    doc.push_str("<html>\n");
    doc.push_str("  <head>\n");
    doc.push_str("    <meta charset=\"utf-8\">\n");
    doc.push_str(&format!("    <title>{}</title>\n", escape_html(title)));
    doc.push_str(&format!(
      "    <meta http-equiv=\"Content-Security-Policy\" content=\"{}\">\n",
      escape_html(CONTENT_SECURITY_POLICY)
    ));
    for style in string_list(request, STYLES_PROP) {
      doc.push_str(&format!("    <link rel=\"stylesheet\" href=\"{}\">\n", escape_html(style)));
    }
    for script in string_list(request, SCRIPTS_PROP) {
      doc.push_str(&format!("    <script src=\"{}\" async></script>\n", escape_html(script)));
    }
    doc.push_str("  </head>\n");
    doc.push_str("  <body>\n");
    doc.push_str(&format!("    <div id=\"{}-app\"></div>\n", escape_html(request.template)));
    doc.push_str("  </body>\n");
    doc.push_str("</html>\n");
    doc
  }
}

#[async_trait]
impl TemplateRenderer for DocumentRenderer {
  async fn render(&self, request: RenderRequest<'_>) -> Result<String, RenderError> {
    if request.template.is_empty() {
      return Err(RenderError::template(
        request.template,
        format!("no template id declared by {}", request.resource.display()),
      ));
    }

    debug!(
      template = %request.template,
      resource = %request.resource.display(),
      "rendering document"
    );
    Ok(Self::document(&request))
  }
}

/// String entries of an array prop; other values are ignored.
fn string_list<'a>(request: &RenderRequest<'a>, key: &str) -> impl Iterator<Item = &'a str> {
  request
    .props
    .get(key)
    .and_then(Value::as_array)
    .into_iter()
    .flatten()
    .filter_map(Value::as_str)
}

fn escape_html(text: &str) -> String {
  let mut escaped = String::with_capacity(text.len());
  for c in text.chars() {
    match c {
      '&' => escaped.push_str("&amp;"),
      '<' => escaped.push_str("&lt;"),
      '>' => escaped.push_str("&gt;"),
      '"' => escaped.push_str("&quot;"),
      '\'' => escaped.push_str("&#39;"),
      _ => escaped.push(c),
    }
  }
  escaped
}
