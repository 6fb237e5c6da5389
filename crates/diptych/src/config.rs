//! Configuration file loading for diptych.
//!
//! Reads `diptych.config.json` from the current working directory, or the
//! file given with `--config`.
//! Also provides JSON Schema generation for editor autocompletion.

use diptych_musea::AssembleOptions;
use diptych_panel::RewriteOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "diptych.config.json";

/// Top-level diptych configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiptychConfig {
    /// JSON Schema reference (for editor autocompletion).
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Code block rewriting.
    #[serde(default)]
    pub rewrite: RewriteOptions,

    /// Function page assembly.
    #[serde(default)]
    pub assemble: AssembleOptions,

    /// Registry of packages and functions (JSON).
    ///
    /// Relative paths are resolved against the directory of the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<PathBuf>,

    /// Directory holding `<package>/<function>/index.d.ts`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types_dir: Option<PathBuf>,
}

impl DiptychConfig {
    fn rebase(mut self, base: &Path) -> Self {
        self.registry = self.registry.map(|p| base.join(p));
        self.types_dir = self.types_dir.map(|p| base.join(p));
        self
    }
}

/// Load the configuration from `path`, or `diptych.config.json` in the CWD.
///
/// A missing file yields the defaults; an unreadable or invalid one is
/// reported and also yields the defaults.
pub fn load_config(path: Option<&Path>) -> DiptychConfig {
    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()
            .unwrap_or_default()
            .join(CONFIG_FILE_NAME),
    };

    if !config_path.exists() {
        if path.is_some() {
            eprintln!(
                "\x1b[33mWarning:\x1b[0m Config file {} not found, using defaults",
                config_path.display()
            );
        }
        return DiptychConfig::default();
    }

    let base = config_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match serde_json::from_str::<DiptychConfig>(&content) {
            Ok(config) => config.rebase(&base),
            Err(e) => {
                eprintln!(
                    "\x1b[33mWarning:\x1b[0m Failed to parse {}: {}",
                    config_path.display(),
                    e
                );
                DiptychConfig::default()
            }
        },
        Err(e) => {
            eprintln!(
                "\x1b[33mWarning:\x1b[0m Failed to read {}: {}",
                config_path.display(),
                e
            );
            DiptychConfig::default()
        }
    }
}

/// JSON Schema for `diptych.config.json`.
pub const DIPTYCH_CONFIG_SCHEMA: &str = r#"{
  "$schema": "http://json-schema.org/draft-07/schema#",
  "title": "Diptych Configuration",
  "description": "Configuration file for diptych - TypeScript and JavaScript side by side in function documentation",
  "type": "object",
  "properties": {
    "$schema": {
      "type": "string",
      "description": "JSON Schema reference for editor autocompletion"
    },
    "rewrite": {
      "type": "object",
      "description": "Code block rewriting",
      "properties": {
        "format": {
          "type": "object",
          "description": "Style used to compare the TypeScript and JavaScript renderings",
          "properties": {
            "tabWidth": { "type": "integer", "minimum": 1, "maximum": 16, "default": 2 },
            "useTabs": { "type": "boolean", "default": false },
            "semi": { "type": "boolean", "default": false },
            "singleQuote": { "type": "boolean", "default": true },
            "collapseBlankLines": { "type": "boolean", "default": true }
          },
          "additionalProperties": false
        },
        "transpile": {
          "type": "object",
          "description": "TypeScript transform settings",
          "properties": {
            "target": {
              "type": "string",
              "description": "Runtime feature level",
              "default": "esnext",
              "examples": ["esnext", "es2022", "es2020"]
            },
            "onlyRemoveTypeImports": {
              "type": "boolean",
              "description": "Keep value imports that are only used as types",
              "default": false
            }
          },
          "additionalProperties": false
        },
        "markers": {
          "type": "object",
          "description": "Markup wrapped around the two panes",
          "properties": {
            "toggle": { "type": "string", "default": "CodeToggle" },
            "tsClass": { "type": "string", "default": "code-block-ts" },
            "jsClass": { "type": "string", "default": "code-block-js" }
          },
          "additionalProperties": false
        },
        "limits": {
          "type": "object",
          "description": "Work bounds per block and per document",
          "properties": {
            "maxBlockBytes": { "type": "integer", "minimum": 0, "default": 65536 },
            "maxDocumentBytes": { "type": "integer", "minimum": 0, "default": 1048576 }
          },
          "additionalProperties": false
        },
        "twoslashToken": {
          "type": "string",
          "description": "Fence meta token marking samples with inspection annotations",
          "default": "twoslash"
        }
      },
      "additionalProperties": false
    },
    "assemble": {
      "type": "object",
      "description": "Function page assembly",
      "properties": {
        "siteUrl": { "type": "string", "default": "https://vueuse.org/" },
        "sourceUrl": {
          "type": "string",
          "default": "https://github.com/vueuse/vueuse/blob/main/packages"
        },
        "demoContainer": { "type": "string", "default": "DemoContainer" },
        "linkFunctions": { "type": "boolean", "default": true },
        "contributors": { "type": "boolean", "default": true },
        "changelog": { "type": "boolean", "default": true }
      },
      "additionalProperties": false
    },
    "registry": {
      "type": "string",
      "description": "Path to the package and function registry (JSON)"
    },
    "typesDir": {
      "type": "string",
      "description": "Directory holding <package>/<function>/index.d.ts"
    }
  },
  "additionalProperties": false
}"#;

/// Write the JSON Schema to `node_modules/.diptych/diptych.config.schema.json`.
pub fn write_schema(dir: Option<&Path>) -> std::io::Result<PathBuf> {
    let base = dir
        .map(|d| d.to_path_buf())
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
    let schema_dir = base.join("node_modules/.diptych");
    std::fs::create_dir_all(&schema_dir)?;

    let schema_path = schema_dir.join("diptych.config.schema.json");
    std::fs::write(&schema_path, DIPTYCH_CONFIG_SCHEMA)?;
    Ok(schema_path)
}
