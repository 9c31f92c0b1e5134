use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use apigen_core::config::{self, ApigenConfig, CONFIG_FILE_NAME};
use apigen_core::ir::{ApiSchema, ParsedSpec};
use apigen_core::{CodeGenerator, GeneratedFile};
use apigen_typescript::{TypeScriptConfig, TypeScriptGenerator};

mod acquire;

/// Spec fetched when neither an argument nor a config file names one.
const DEFAULT_SPEC_URL: &str = "https://petstore3.swagger.io/api/v3/openapi.json";

const DEFAULT_OUTPUT: &str = "client.ts";

#[derive(Parser)]
#[command(
    name = "apigen",
    about = "OpenAPI to TypeScript client generator",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a TypeScript client from an OpenAPI spec
    Generate {
        /// Spec URL or file path (YAML or JSON)
        spec: Option<String>,

        /// Output `.ts` file, or a directory to generate into
        output: Option<PathBuf>,

        /// Base URL baked into the generated client constructor
        #[arg(long)]
        base_url: Option<String>,

        /// Skip JSDoc comments above generated methods
        #[arg(long)]
        no_jsdoc: bool,
    },

    /// Inspect the normalized form of an OpenAPI spec
    Inspect {
        /// Spec URL or file path
        input: String,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new apigen configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            spec,
            output,
            base_url,
            no_jsdoc,
        } => cmd_generate(spec, output, base_url, no_jsdoc),

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "apigen", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<ApigenConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

/// Arguments win over the config file, the config file over defaults.
/// The `--no-jsdoc` flag can only enable suppression; absence leaves the
/// config file's choice in force.
fn resolve_generate_settings(
    spec: Option<String>,
    output: Option<PathBuf>,
    base_url: Option<String>,
    no_jsdoc: bool,
    cfg: Option<ApigenConfig>,
) -> (String, PathBuf, TypeScriptConfig) {
    let source = spec
        .or_else(|| cfg.as_ref().map(|c| c.input.clone()))
        .unwrap_or_else(|| DEFAULT_SPEC_URL.to_string());
    let output = output
        .or_else(|| cfg.as_ref().map(|c| PathBuf::from(&c.output)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    let client_cfg = cfg.map(|c| c.client).unwrap_or_default();
    let config = TypeScriptConfig {
        base_url: base_url.or(client_cfg.base_url),
        no_jsdoc: no_jsdoc || client_cfg.no_jsdoc,
    };
    (source, output, config)
}

fn cmd_generate(
    spec: Option<String>,
    output: Option<PathBuf>,
    base_url: Option<String>,
    no_jsdoc: bool,
) -> Result<()> {
    let cfg = try_load_config()?;
    let (source, output, config) = resolve_generate_settings(spec, output, base_url, no_jsdoc, cfg);

    eprintln!("Generating {} → {}", source, output.display());
    let parsed = acquire::load_spec(&source)?;
    let files = TypeScriptGenerator.generate(&parsed, &config)?;
    write_output(&output, &files)?;

    eprintln!(
        "Generated client for {} {} ({} paths)",
        parsed.info.title,
        parsed.info.version,
        parsed.paths.len()
    );
    Ok(())
}

/// Write generated files to the output target.
///
/// A `.ts` target receives the module directly; anything else is treated
/// as a directory and files land under it by their generated names.
fn write_output(target: &Path, files: &[GeneratedFile]) -> Result<()> {
    if target.extension().and_then(|e| e.to_str()) == Some("ts") {
        let Some(file) = files.first() else {
            return Ok(());
        };
        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(target, &file.content)
            .with_context(|| format!("failed to write {}", target.display()))?;
        eprintln!("  wrote {}", target.display());
        return Ok(());
    }

    fs::create_dir_all(target)
        .with_context(|| format!("failed to create output directory {}", target.display()))?;
    for file in files {
        let path = target.join(&file.path);
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("  wrote {}", path.display());
    }
    Ok(())
}

fn cmd_inspect(input: String, format: InspectFormat) -> Result<()> {
    let spec = acquire::load_spec(&input)?;
    let summary = build_inspect_summary(&spec);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(spec: &ParsedSpec) -> serde_json::Value {
    let schemas: Vec<serde_json::Value> = spec
        .schemas
        .values()
        .map(|schema| {
            serde_json::json!({
                "name": schema.name,
                "kind": schema_kind(schema),
            })
        })
        .collect();

    let endpoints: Vec<serde_json::Value> = spec
        .endpoints()
        .map(|endpoint| {
            serde_json::json!({
                "operationId": endpoint.operation_id,
                "method": endpoint.method.as_str(),
                "path": endpoint.path,
                "tags": endpoint.tags,
            })
        })
        .collect();

    serde_json::json!({
        "info": {
            "title": spec.info.title,
            "version": spec.info.version,
        },
        "servers": spec.servers.iter().map(|s| &s.url).collect::<Vec<_>>(),
        "schemas": schemas,
        "endpoints": endpoints,
    })
}

fn schema_kind(schema: &ApiSchema) -> &'static str {
    if !schema.enum_values.is_empty() {
        "enum"
    } else if schema.is_object_shaped() {
        "object"
    } else if schema.schema_type.as_deref() == Some("array") {
        "array"
    } else if !schema.all_of.is_empty() || !schema.one_of.is_empty() || !schema.any_of.is_empty() {
        "composition"
    } else {
        "scalar"
    }
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PETSTORE_OAS3: &str =
        include_str!("../../apigen-core/tests/fixtures/petstore-oas3.json");

    fn sample_config() -> ApigenConfig {
        serde_yaml_ng::from_str(
            "input: specs/api.yaml\noutput: src/api.ts\nclient:\n  base_url: https://cfg.example.com\n  no_jsdoc: true\n",
        )
        .unwrap()
    }

    #[test]
    fn test_generate_settings_fall_back_to_defaults() {
        let (source, output, config) = resolve_generate_settings(None, None, None, false, None);
        assert_eq!(source, DEFAULT_SPEC_URL);
        assert_eq!(output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(config.base_url, None);
        assert!(!config.no_jsdoc);
    }

    #[test]
    fn test_generate_settings_read_the_config_file() {
        let (source, output, config) =
            resolve_generate_settings(None, None, None, false, Some(sample_config()));
        assert_eq!(source, "specs/api.yaml");
        assert_eq!(output, PathBuf::from("src/api.ts"));
        assert_eq!(config.base_url.as_deref(), Some("https://cfg.example.com"));
        assert!(config.no_jsdoc);
    }

    #[test]
    fn test_generate_settings_arguments_win_over_config() {
        let (source, output, config) = resolve_generate_settings(
            Some("override.json".to_string()),
            Some(PathBuf::from("out/client.ts")),
            Some("http://localhost:3000".to_string()),
            false,
            Some(sample_config()),
        );
        assert_eq!(source, "override.json");
        assert_eq!(output, PathBuf::from("out/client.ts"));
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:3000"));
        // An absent flag leaves the config file's no_jsdoc in force
        assert!(config.no_jsdoc);
    }

    #[test]
    fn test_write_output_to_ts_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out/client.ts");
        let files = vec![GeneratedFile {
            path: "client.ts".to_string(),
            content: "export {};\n".to_string(),
        }];

        write_output(&target, &files).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "export {};\n");
    }

    #[test]
    fn test_write_output_to_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("generated");
        let files = vec![GeneratedFile {
            path: "client.ts".to_string(),
            content: "export {};\n".to_string(),
        }];

        write_output(&target, &files).unwrap();
        assert!(target.join("client.ts").is_file());
    }

    #[test]
    fn test_inspect_summary_shape() {
        let spec = apigen_core::parse::from_json(PETSTORE_OAS3).unwrap();
        let summary = build_inspect_summary(&spec);

        assert_eq!(summary["info"]["title"], "Petstore");
        assert_eq!(summary["schemas"][0]["name"], "Pet");
        assert_eq!(summary["schemas"][0]["kind"], "object");
        assert_eq!(summary["schemas"][1]["kind"], "array");
        assert_eq!(summary["endpoints"][0]["operationId"], "listPets");
        assert_eq!(summary["endpoints"][0]["method"], "GET");
    }
}
