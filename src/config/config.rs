use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const CONFIG_FILE: &str = "typespec.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Deepest allowed nesting of types in a single specification.
    pub max_depth: usize,
    /// Name prefix for structs declared with '=N'. The id is appended.
    pub struct_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: 256,
            struct_prefix: "typespec.struct.".into(),
        }
    }
}

impl Config {
    pub fn test() -> Self {
        Self {
            max_depth: 32,
            ..Self::default()
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    parser: Config,
}

/// Load the parser config from a TOML file. A missing file gives the default config.
pub fn load_config_file(path: &Path) -> Result<Config, String> {
    if !path.exists() {
        debug!("no config file at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    info!("Loading config: {}", path.display());
    let src = fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {}", path.display(), err))?;
    parse_config(&src).map_err(|err| format!("invalid config {}: {}", path.display(), err))
}

pub fn parse_config(src: &str) -> Result<Config, String> {
    let file: ConfigFile = toml::from_str(src).map_err(|err| err.to_string())?;
    if file.parser.max_depth == 0 {
        return Err("max-depth must be at least 1".into());
    }
    Ok(file.parser)
}

pub static DEFAULT_CONFIG_TOML: &str = r#"# Type specification parser configuration

[parser]
max-depth = 256                     # Deepest allowed type nesting
struct-prefix = "typespec.struct."  # Name prefix of '=N' structs
"#;
