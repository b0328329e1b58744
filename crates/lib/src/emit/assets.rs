use serde::Serialize;

use crate::compilation::Entrypoint;
use crate::consts::{SCRIPT_SUFFIX, STYLE_SUFFIX};

/// Script and style files produced for one entry point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssetBundle {
  pub scripts: Vec<String>,
  pub styles: Vec<String>,
}

/// Collect the files of `entry`, split into scripts and styles.
///
/// Files keep chunk order, then their order within the chunk. Matching is a
/// case-sensitive suffix test; files that are neither scripts nor styles are
/// dropped.
pub fn collect_assets(entry: &Entrypoint) -> AssetBundle {
  let mut bundle = AssetBundle::default();

  for file in entry.chunks.iter().flat_map(|chunk| &chunk.files) {
    if file.ends_with(SCRIPT_SUFFIX) {
      bundle.scripts.push(file.clone());
    } else if file.ends_with(STYLE_SUFFIX) {
      bundle.styles.push(file.clone());
    }
  }

  bundle
}
