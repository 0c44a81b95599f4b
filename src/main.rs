use clap::Parser;
use proteus::adapters::anonymizer::DataAnonymizer;
use proteus::adapters::postprocess;
use proteus::adapters::schema_repository::SchemaRepository;
use proteus::adapters::skeleton_merger::SkeletonMerger;
use proteus::adapters::value_provider::ValueProvider;
use proteus::cli::{self, AnalyzeArgs, AnonymizeArgs, Cli, Command, GenerateArgs, ServeArgs};
use proteus::config::Settings;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let settings = Settings::from_file(&cli.config)?;

    match cli.command {
        Command::Generate(args) => run_generate(&settings, args),
        Command::Anonymize(args) => run_anonymize(args),
        Command::Analyze(args) => run_analyze(args),
        Command::Serve(args) => run_serve(settings, args).await,
    }
}

fn run_generate(settings: &Settings, args: GenerateArgs) -> anyhow::Result<()> {
    let skeleton = cli::load_json_file(&args.skeleton)?;

    let repository = match &args.schema {
        Some(path) => {
            let document = cli::load_schema_file(path)?;
            Some(SchemaRepository::from_document(&document))
        }
        None => None,
    };

    let locale = args
        .locale
        .as_deref()
        .unwrap_or(&settings.generator.locale);
    let mut provider = ValueProvider::with_locale(locale);
    debug!("generator locale: {}", provider.locale());
    if let Some(seed) = args.seed {
        provider.set_seed(seed);
    }

    if let (Some(repository), Some(example)) = (&repository, skeleton.as_object()) {
        if let Some(name) = repository.best_match(example) {
            debug!("skeleton resembles schema '{}'", name);
        }
    }

    let merger = SkeletonMerger::new();
    let mut result = merger.fill(&skeleton, repository.as_ref(), &mut provider);

    // Count override only applies to object results; list-shaped skeletons
    // are filled once per wanted item by the caller instead.
    if let Some(count) = args.count {
        if result.is_object() {
            result = postprocess::replicate_list_lengths(&result, count);
        }
    }

    if args.validate {
        match &repository {
            Some(repository) => {
                for violation in merger.validate(&result, repository) {
                    warn!("{}", violation);
                }
            }
            None => warn!("--validate requires --schema; skipping validation"),
        }
    }

    write_output(&result, args.output.as_deref(), args.pretty, "Generated data")
}

fn run_anonymize(args: AnonymizeArgs) -> anyhow::Result<()> {
    let data = cli::load_json_file(&args.input)?;

    let mut anonymizer = DataAnonymizer::new();
    let result = anonymizer.anonymize(&data);

    write_output(&result, args.output.as_deref(), args.pretty, "Anonymized data")
}

fn run_analyze(args: AnalyzeArgs) -> anyhow::Result<()> {
    let data = cli::load_json_file(&args.input)?;

    let anonymizer = DataAnonymizer::new();
    let fields = anonymizer.sensitive_fields(&data);
    let total = fields.len();

    let result = json!({
        "sensitive_fields": fields,
        "total_fields": total,
        "message": format!("Found {} sensitive field(s)", total),
    });

    write_output(&result, args.output.as_deref(), args.pretty, "Analysis")
}

async fn run_serve(mut settings: Settings, args: ServeArgs) -> anyhow::Result<()> {
    settings.apply_server_overrides(args.host.as_deref(), args.port);
    let host = settings.server.host.clone();
    let port = settings.server.port;

    info!("Starting Proteus mock data server on {}:{}", host, port);

    let settings = Arc::new(RwLock::new(settings));
    let app = proteus::create_app(settings);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn write_output(
    value: &Value,
    output: Option<&Path>,
    pretty: bool,
    label: &str,
) -> anyhow::Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };

    match output {
        Some(path) => {
            std::fs::write(path, text)?;
            info!("{} saved to {}", label, path.display());
        }
        None => println!("{}", text),
    }

    Ok(())
}
