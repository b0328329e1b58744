use serde_json::Value;

use super::assets::AssetBundle;
use crate::consts::{SCRIPTS_PROP, STYLES_PROP};
use crate::registry::Props;

/// Merge record props with the computed asset lists.
///
/// Computed keys always win: a `scripts` or `styles` prop supplied by the
/// transform is replaced by the entry's actual files.
pub fn merge_props(props: &Props, assets: &AssetBundle) -> Props {
  let mut merged = props.clone();
  merged.insert(SCRIPTS_PROP.to_string(), string_array(&assets.scripts));
  merged.insert(STYLES_PROP.to_string(), string_array(&assets.styles));
  merged
}

fn string_array(items: &[String]) -> Value {
  Value::Array(items.iter().cloned().map(Value::String).collect())
}
