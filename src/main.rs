//! urlsentry entrypoint: classify URLs, print feature vectors, or run the
//! offline dataset jobs. Model, label encoder and extractor are loaded once
//! and injected into the request handler.

use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use urlsentry::{
    batch,
    config::SentryConfig,
    features::UrlFeatureExtractor,
    logging::StructuredLogger,
    model::{LabelEncoder, OnnxClassifier},
    service::UrlClassifier,
};

#[derive(Debug, Parser)]
#[command(name = "urlsentry")]
#[command(about = "Lexical URL classification: benign or malicious", long_about = None)]
struct Cli {
    /// JSON config file (falls back to URLSENTRY_CONFIG_PATH, then config.json).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the 15-value feature vector for each URL.
    Features {
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Classify each URL and print one JSON response per line.
    Classify {
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Read `{"url": ...}` requests from stdin, one per line; answer on stdout.
    Serve,

    /// Draw a class-balanced sample from a labelled URL CSV.
    Sample {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        /// Max rows per label (default from config, 20000).
        #[arg(long, value_name = "N")]
        per_label: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Clean a labelled URL CSV and append training feature columns.
    BuildFeatures {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
}

fn load_classifier(
    config: &SentryConfig,
) -> Result<UrlClassifier, Box<dyn std::error::Error + Send + Sync>> {
    let model = Arc::new(OnnxClassifier::load(&config.model_path)?);
    let labels = if config.labels_path.exists() {
        LabelEncoder::load(&config.labels_path)?
    } else {
        tracing::warn!(path = %config.labels_path.display(), "label file not found; using default classes");
        LabelEncoder::default()
    };
    let extractor = UrlFeatureExtractor::new(config.features.clone());
    Ok(UrlClassifier::new(extractor, model, labels))
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .or_else(|| std::env::var("URLSENTRY_CONFIG_PATH").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("config.json"));
    let config = SentryConfig::load(&config_path);

    StructuredLogger::init(config.log.json, &config.log.level);
    info!(config = %config_path.display(), "urlsentry starting");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Features { urls } => {
            let extractor = UrlFeatureExtractor::new(config.features.clone());
            for url in &urls {
                let fv = extractor.extract(url);
                StructuredLogger::emit_json(
                    &serde_json::json!({ "url": url, "features": fv.as_slice() }),
                    &mut out,
                )?;
            }
        }
        Command::Classify { urls } => {
            let classifier = load_classifier(&config)?;
            for url in &urls {
                let response = classifier.handle(&serde_json::json!({ "url": url }));
                StructuredLogger::emit_json(&response, &mut out)?;
            }
        }
        Command::Serve => {
            let classifier = load_classifier(&config)?;
            info!("serving requests from stdin");
            for line in std::io::stdin().lock().lines() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                StructuredLogger::emit_json(&classifier.handle_line(&line), &mut out)?;
                out.flush()?;
            }
        }
        Command::Sample {
            input,
            output,
            per_label,
            seed,
        } => {
            batch::run_sample(
                &input,
                &output,
                per_label.unwrap_or(config.batch.per_label),
                seed.unwrap_or(config.batch.seed),
            )?;
        }
        Command::BuildFeatures { input, output } => {
            batch::run_build(&input, &output, &config.batch)?;
        }
    }

    out.flush()?;
    Ok(())
}
