/// Name reported in logs when no plugin name is configured.
pub const DEFAULT_PLUGIN_NAME: &str = "EntryPagePlugin";

/// Files with this suffix are collected as page scripts.
pub const SCRIPT_SUFFIX: &str = ".js";

/// Files with this suffix are collected as page style sheets.
pub const STYLE_SUFFIX: &str = ".css";

/// Template prop receiving the collected script files.
pub const SCRIPTS_PROP: &str = "scripts";

/// Template prop receiving the collected style sheets.
pub const STYLES_PROP: &str = "styles";
