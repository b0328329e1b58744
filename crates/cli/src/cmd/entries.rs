//! Implementation of the `entrypage entries` command.
//!
//! Shows which module supplies the template of each entry point and which
//! scripts and styles its page would load, without rendering anything.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use entrypage_lib::emit::{AssetBundle, EntryPagePlugin, collect_assets, find_associations};
use entrypage_lib::graph::ModuleId;
use entrypage_lib::registry::TemplateRecord;
use entrypage_lib::render::DocumentRenderer;

use super::replay_snapshot;
use crate::output::{OutputFormat, print_info, print_json, print_stat, symbols};

#[derive(Debug, Serialize)]
struct EntryPage {
  entry: String,
  module: ModuleId,
  #[serde(flatten)]
  record: TemplateRecord,
  assets: AssetBundle,
}

pub fn cmd_entries(snapshot: &Path, format: OutputFormat) -> Result<()> {
  let plugin = EntryPagePlugin::new(DocumentRenderer::new());
  let (compilation, session) = replay_snapshot(&plugin, snapshot)?;

  let pages: Vec<EntryPage> = find_associations(&compilation, session.registry())
    .map(|association| EntryPage {
      entry: association.entry.name.clone(),
      module: association.module.id.clone(),
      assets: collect_assets(association.entry),
      record: association.record,
    })
    .collect();

  if format.is_json() {
    #[derive(Serialize)]
    struct EntriesOutput {
      entries: Vec<EntryPage>,
    }

    return print_json(&EntriesOutput { entries: pages });
  }

  if pages.is_empty() {
    print_info("No entry declares a template");
    return Ok(());
  }

  for page in &pages {
    println!("{} {} {}", page.entry, symbols::ARROW, page.record.output);
    print_stat("module", &page.module.to_string());
    print_stat("template", &page.record.template);
    print_stat("scripts", &page.assets.scripts.join(", "));
    print_stat("styles", &page.assets.styles.join(", "));
  }

  print_info(&format!("{} page(s) across {} entry point(s)", pages.len(), compilation.entrypoints.len()));

  Ok(())
}
