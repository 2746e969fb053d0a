//! generate typescript fetcher builders from a graphql schema
//!
//! the output directory receives `CommonTypes.ts`, `index.ts`, and the
//! `fetchers/`, `enums/`, and `inputs/` subdirectories.
//!
//! command help reference (kept in sync with `fetchgen --help`):
#[doc = concat!("```text\n", include_str!("fetchgen-help.txt"), "\n```")]
pub const CLI_HELP: &str = include_str!("fetchgen-help.txt");

use fetchgen::{load_schema, Generator, GeneratorConfig, SchemaSource};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, PartialEq, Eq)]
struct Args {
    source: SchemaSource,
    out_dir: PathBuf,
    config_path: Option<PathBuf>,
}

#[derive(Debug, PartialEq, Eq)]
enum ParseArgsError {
    Help,
    Message(String),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args(std::env::args().collect()) {
        Ok(args) => args,
        Err(ParseArgsError::Help) => {
            print!("{CLI_HELP}");
            return;
        }
        Err(ParseArgsError::Message(err)) => {
            eprintln!("{err}\n\n{CLI_HELP}");
            std::process::exit(1);
        }
    };

    let config = match load_config(args.config_path.as_ref()).await {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("failed to load config: {err}");
            std::process::exit(1);
        }
    };

    let schema = match load_schema(&args.source).await {
        Ok(schema) => schema,
        Err(err) => {
            tracing::error!("failed to load schema: {err}");
            std::process::exit(1);
        }
    };

    let result = Generator::new(&schema, &config)
        .and_then(|generator| generator.generate(&args.out_dir));
    if let Err(err) = result {
        if err.is_generator_defect() {
            tracing::error!("codegen failed (generator defect): {err}");
        } else {
            tracing::error!("codegen failed: {err}");
        }
        std::process::exit(1);
    }
}

async fn load_config(path: Option<&PathBuf>) -> fetchgen::Result<GeneratorConfig> {
    match path {
        Some(path) => {
            let json = tokio::fs::read_to_string(path).await?;
            GeneratorConfig::from_json_str(&json)
        }
        None => Ok(GeneratorConfig::new()),
    }
}

fn parse_args(args: Vec<String>) -> Result<Args, ParseArgsError> {
    let mut url = None;
    let mut schema_path = None;
    let mut headers = Vec::new();
    let mut out_dir = None;
    let mut config_path = None;

    let mut iter = args.into_iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--url" => url = iter.next(),
            "--schema" => schema_path = iter.next().map(PathBuf::from),
            "--header" => {
                let header = iter.next().ok_or_else(|| {
                    ParseArgsError::Message("--header requires a value".to_string())
                })?;
                let (name, value) = header.split_once(':').ok_or_else(|| {
                    ParseArgsError::Message(format!("invalid header (expected k:v): {header}"))
                })?;
                headers.push((name.trim().to_string(), value.trim().to_string()));
            }
            "--out" => out_dir = iter.next().map(PathBuf::from),
            "--config" => config_path = iter.next().map(PathBuf::from),
            "--help" | "-h" => return Err(ParseArgsError::Help),
            _ => return Err(ParseArgsError::Message(format!("unknown argument: {arg}"))),
        }
    }

    let out_dir =
        out_dir.ok_or_else(|| ParseArgsError::Message("--out is required".to_string()))?;

    let source = match (schema_path, url) {
        (Some(path), None) => {
            if !headers.is_empty() {
                return Err(ParseArgsError::Message(
                    "--header only applies to --url".to_string(),
                ));
            }
            SchemaSource::File(path)
        }
        (None, Some(url)) => SchemaSource::Url { url, headers },
        (Some(_), Some(_)) => {
            return Err(ParseArgsError::Message(
                "--url and --schema are mutually exclusive".to_string(),
            ))
        }
        (None, None) => {
            return Err(ParseArgsError::Message(
                "--url or --schema is required".to_string(),
            ))
        }
    };

    Ok(Args {
        source,
        out_dir,
        config_path,
    })
}
