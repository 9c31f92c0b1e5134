use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Top-level project configuration loaded from `.apigen.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApigenConfig {
    pub input: String,
    pub output: String,
    pub client: ClientConfig,
}

impl Default for ApigenConfig {
    fn default() -> Self {
        Self {
            input: "openapi.json".to_string(),
            output: "client.ts".to_string(),
            client: ClientConfig::default(),
        }
    }
}

/// Client generation options.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Overrides the spec's first server URL as the constructor default.
    pub base_url: Option<String>,
    pub no_jsdoc: bool,
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".apigen.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<ApigenConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: ApigenConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# apigen configuration
input: openapi.json     # path or URL of the spec document (JSON or YAML)
output: client.ts       # generated module (*.ts), or a directory

client:
  # base_url: https://api.example.com   # overrides the spec's first server URL
  no_jsdoc: false
"#
}
