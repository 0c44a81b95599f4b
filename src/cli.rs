use crate::domain::InputError;
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Schema-aware mock data generator - fills JSON skeletons with realistic fake values
#[derive(Parser, Debug, Clone)]
#[command(name = "proteus", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "PROTEUS_CONFIG", default_value = "proteus.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Fill a JSON skeleton with generated data
    Generate(GenerateArgs),
    /// Anonymize an existing JSON document
    Anonymize(AnonymizeArgs),
    /// Report the sensitive fields in a JSON document
    Analyze(AnalyzeArgs),
    /// Run the HTTP API server
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Path to the JSON skeleton file
    #[arg(short, long)]
    pub skeleton: PathBuf,

    /// Path to an OpenAPI/Swagger schema file (JSON or YAML)
    #[arg(short = 'w', long)]
    pub schema: Option<PathBuf>,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty print JSON output
    #[arg(short, long)]
    pub pretty: bool,

    /// Force generated list lengths to this count
    #[arg(long)]
    pub count: Option<usize>,

    /// Seed for reproducible generation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Locale tag for generated data
    #[arg(long)]
    pub locale: Option<String>,

    /// Check the result against the schema and warn about violations
    #[arg(long)]
    pub validate: bool,
}

#[derive(Args, Debug, Clone)]
pub struct AnonymizeArgs {
    /// Path to the JSON file to anonymize
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty print JSON output
    #[arg(short, long)]
    pub pretty: bool,
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Path to the JSON file to analyze
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty print JSON output
    #[arg(short, long)]
    pub pretty: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Server host address
    #[arg(long, env = "PROTEUS_HOST")]
    pub host: Option<String>,

    /// Server port
    #[arg(long, env = "PROTEUS_PORT")]
    pub port: Option<u16>,
}

/// Load a JSON document from disk.
pub fn load_json_file(path: &Path) -> Result<Value, InputError> {
    let text = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

/// Load a schema document from disk. `.yaml`/`.yml` files are decoded as
/// YAML, everything else as JSON.
pub fn load_schema_file(path: &Path) -> Result<Value, InputError> {
    let text = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
        .unwrap_or(false);

    if is_yaml {
        Ok(serde_yaml::from_str(&text)?)
    } else {
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["proteus", "generate", "--skeleton", "skeleton.json"]);
        assert_eq!(cli.config, PathBuf::from("proteus.toml"));
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.skeleton, PathBuf::from("skeleton.json"));
                assert!(args.schema.is_none());
                assert!(args.seed.is_none());
                assert!(args.count.is_none());
                assert!(!args.pretty);
                assert!(!args.validate);
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_cli_generate_with_args() {
        let cli = Cli::parse_from([
            "proteus",
            "--config",
            "custom.toml",
            "generate",
            "--skeleton",
            "user.json",
            "--schema",
            "api.yaml",
            "--seed",
            "7",
            "--count",
            "3",
            "--pretty",
            "--validate",
        ]);
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.schema, Some(PathBuf::from("api.yaml")));
                assert_eq!(args.seed, Some(7));
                assert_eq!(args.count, Some(3));
                assert!(args.pretty);
                assert!(args.validate);
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_cli_serve() {
        let cli = Cli::parse_from(["proteus", "serve", "--host", "0.0.0.0", "--port", "9090"]);
        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.host, Some("0.0.0.0".to_string()));
                assert_eq!(args.port, Some(9090));
            }
            _ => panic!("expected serve command"),
        }
    }

    #[test]
    fn test_load_schema_file_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.yaml");
        std::fs::write(
            &path,
            "definitions:\n  User:\n    properties:\n      age:\n        type: integer\n",
        )
        .unwrap();

        let document = load_schema_file(&path).unwrap();
        assert_eq!(
            document["definitions"]["User"]["properties"]["age"]["type"],
            serde_json::json!("integer")
        );
    }

    #[test]
    fn test_load_json_file_missing() {
        let result = load_json_file(Path::new("no-such-file.json"));
        assert!(result.is_err());
    }
}
