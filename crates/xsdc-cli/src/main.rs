use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use log::debug;

use xsdc_core::config::{self, CONFIG_FILE_NAME, ExtensionMode, XsdcConfig};
use xsdc_core::model::{self, XsdSchema};
use xsdc_core::transform::{self, Conversion, ConvertOptions};

#[derive(Parser)]
#[command(name = "xsdc", about = "XSD to JSON Schema converter", version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a schema model dump into a draft-07 JSON Schema
    Convert {
        /// Path to the schema model dump (YAML or JSON)
        #[arg(short = 'f', long)]
        xsd_file: PathBuf,

        /// Output path, `-` for stdout [default: <name>-jsonschema.json]
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Keep anonymous groups as `AnonymousGroup` properties
        #[arg(short = 'g', long)]
        anonymous_groups: bool,

        /// How types derived by extension relate to their base
        #[arg(long)]
        extension: Option<ExtensionArg>,
    },

    /// Validate a schema model dump
    Validate {
        /// Path to the schema model dump
        #[arg(short = 'f', long)]
        xsd_file: PathBuf,
    },

    /// Inspect the result of converting a schema model dump
    Inspect {
        /// Path to the schema model dump
        #[arg(short = 'f', long)]
        xsd_file: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new xsdc configuration
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

#[derive(Clone, Copy, ValueEnum)]
enum ExtensionArg {
    Flatten,
    Compose,
}

impl From<ExtensionArg> for ExtensionMode {
    fn from(arg: ExtensionArg) -> Self {
        match arg {
            ExtensionArg::Flatten => ExtensionMode::Flatten,
            ExtensionArg::Compose => ExtensionMode::Compose,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match cli.command {
        Commands::Convert {
            xsd_file,
            out,
            anonymous_groups,
            extension,
        } => cmd_convert(xsd_file, out, anonymous_groups, extension),

        Commands::Validate { xsd_file } => cmd_validate(xsd_file),

        Commands::Inspect { xsd_file, format } => cmd_inspect(xsd_file, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "xsdc", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// `RUST_LOG` overrides the default level.
fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<XsdcConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

fn load_schema(path: &Path) -> Result<XsdSchema> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");

    let schema = match ext {
        "json" => model::from_json(&content),
        _ => model::from_yaml(&content),
    }
    .with_context(|| format!("failed to load {}", path.display()))?;
    debug!(
        "loaded {}: {} types, {} groups, {} elements",
        path.display(),
        schema.types.len(),
        schema.groups.len(),
        schema.elements.len()
    );
    Ok(schema)
}

/// Document title for a model file: its file name without the dump extension
/// and without a trailing `.xsd`.
fn schema_title(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "schema".to_string());
    let stem = [".yaml", ".yml", ".json"]
        .iter()
        .find_map(|ext| file_name.strip_suffix(ext))
        .unwrap_or(&file_name);
    stem.strip_suffix(".xsd").unwrap_or(stem).to_string()
}

fn convert_file(path: &Path, options: &ConvertOptions) -> Result<Conversion> {
    let schema = load_schema(path)?;
    let conversion = transform::convert_with_options(&schema, options)
        .with_context(|| format!("failed to convert {}", path.display()))?;
    Ok(conversion)
}

fn cmd_convert(
    xsd_file: PathBuf,
    out: Option<PathBuf>,
    anonymous_groups: bool,
    extension: Option<ExtensionArg>,
) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let title = schema_title(&xsd_file);

    let mut options = ConvertOptions::from_config(&cfg, title.clone());
    if anonymous_groups {
        options.flatten_anonymous = false;
    }
    if let Some(extension) = extension {
        options.extension = extension.into();
    }

    let conversion = convert_file(&xsd_file, &options)?;
    let json = conversion.document.to_json_pretty()?;

    let out = out.unwrap_or_else(|| PathBuf::from(format!("{}{}", title, cfg.output_suffix)));
    if out.as_os_str() == "-" {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{json}")?;
    } else {
        fs::write(&out, format!("{json}\n"))
            .with_context(|| format!("failed to write {}", out.display()))?;
        eprintln!("  wrote {}", out.display());
    }

    if !conversion.warnings.is_empty() {
        eprintln!("Converted with {} warning(s).", conversion.warnings.len());
    }
    Ok(())
}

fn cmd_validate(xsd_file: PathBuf) -> Result<()> {
    let schema = load_schema(&xsd_file)?;

    eprintln!("Valid schema model: {}", xsd_file.display());
    if let Some(ref namespace) = schema.target_namespace {
        eprintln!("  Target namespace: {}", namespace);
    }
    eprintln!("  Types: {}", schema.types.len());
    eprintln!("  Groups: {}", schema.groups.len());
    eprintln!("  Elements: {}", schema.elements.len());

    // Also validate that it converts successfully
    let conversion = transform::convert(&schema)?;
    eprintln!("  Definitions: {}", conversion.document.definitions.len());
    eprintln!("  Warnings: {}", conversion.warnings.len());

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(xsd_file: PathBuf, format: InspectFormat) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let options = ConvertOptions::from_config(&cfg, schema_title(&xsd_file));
    let conversion = convert_file(&xsd_file, &options)?;

    let summary = build_inspect_summary(&conversion);

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

fn build_inspect_summary(conversion: &Conversion) -> serde_json::Value {
    let document = &conversion.document;
    let properties: Vec<serde_json::Value> = document
        .properties
        .iter()
        .map(|(name, schema)| {
            serde_json::json!({
                "name": name,
                "ref": schema.definition_name(),
                "required": document.required.contains(name),
            })
        })
        .collect();

    serde_json::json!({
        "title": document.title,
        "definitions": document.definitions.keys().collect::<Vec<_>>(),
        "properties": properties,
        "warnings": conversion.warnings,
    })
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
