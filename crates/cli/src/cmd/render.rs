//! Implementation of the `entrypage render` command.
//!
//! Replays a compilation snapshot through the page generator, renders every
//! entry page with the built-in document renderer and writes the resulting
//! artifacts under the output directory.

use std::fs;
use std::path::{Component, Path};

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::debug;

use entrypage_lib::emit::{EmitConfig, EmittedPage, EntryPagePlugin, FailurePolicy};
use entrypage_lib::render::DocumentRenderer;

use super::replay_snapshot;
use crate::output::{OutputFormat, format_bytes, print_info, print_json, print_stat, print_success};

#[derive(Debug, Serialize)]
struct RenderOutput<'a> {
  out: String,
  pages: &'a [EmittedPage],
  total_size: usize,
}

pub fn cmd_render(snapshot: &Path, out: &Path, collect_errors: bool, format: OutputFormat) -> Result<()> {
  let config = EmitConfig {
    failure_policy: if collect_errors {
      FailurePolicy::Collect
    } else {
      FailurePolicy::Abort
    },
    ..EmitConfig::default()
  };
  let plugin = EntryPagePlugin::new(DocumentRenderer::new()).with_config(config);

  let (mut compilation, session) = replay_snapshot(&plugin, snapshot)?;

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let report = rt
    .block_on(session.additional_assets(&mut compilation))
    .context("Failed to generate entry pages")?;

  for (path, artifact) in &compilation.assets {
    let target = output_path(out, path)?;
    if let Some(parent) = target.parent() {
      fs::create_dir_all(parent).with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(&target, artifact.source()).with_context(|| format!("Failed to write page: {}", target.display()))?;
    debug!(path = %target.display(), size = artifact.size(), "wrote page");
  }

  if format.is_json() {
    return print_json(&RenderOutput {
      out: out.display().to_string(),
      pages: &report.pages,
      total_size: report.total_size(),
    });
  }

  if report.is_empty() {
    print_info("No entry declares a template");
    return Ok(());
  }

  print_success(&format!("Rendered {} page(s) to {}", report.len(), out.display()));
  for page in &report.pages {
    print_stat(
      &page.output,
      &format!("{} (entry {}, module {})", format_bytes(page.size as u64), page.entry, page.module),
    );
  }

  Ok(())
}

/// Resolve an asset path below `out`, rejecting paths that would escape it.
fn output_path(out: &Path, asset: &str) -> Result<std::path::PathBuf> {
  let relative = Path::new(asset);
  if relative
    .components()
    .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
  {
    bail!("Refusing to write asset outside the output directory: {}", asset);
  }
  Ok(out.join(relative))
}
