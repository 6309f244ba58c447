// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use lingofill::app_config::Config;
use lingofill::orchestration::{OutcomeStatus, RecordTranslator, TranslationOptions};
use lingofill::providers::Glossary;
use lingofill::record::{MemoryRecord, PendingWriteBuffer, TranslatableRecord};

/// lingofill - translate the localizable fields of a record with AI
///
/// Reads a record document (JSON) describing its translatable fields and
/// current per-locale values, translates the missing locales through the
/// configured chat-completion API, and writes the filled-in record back.
#[derive(Parser, Debug)]
#[command(name = "lingofill")]
#[command(version = "0.1.0")]
#[command(about = "AI-powered record field translation")]
#[command(long_about = "lingofill translates the localizable fields of structured records using an
LLM chat-completion API.

EXAMPLES:
    lingofill record.json                        # Fill every missing locale
    lingofill -f fr -t en -t es record.json      # Explicit source and targets
    lingofill --fields title record.json         # Restrict to one field
    lingofill --force record.json                # Overwrite existing targets
    lingofill -o out.json record.json            # Write the result elsewhere

CONFIGURATION:
    Configuration is read from conf.json by default (see --config). The API
    key may instead come from the LINGOFILL_API_KEY environment variable.")]
struct CommandLineOptions {
    /// Record document to translate
    #[arg(value_name = "RECORD_PATH")]
    record_path: PathBuf,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Source locale (defaults to the configured default locale)
    #[arg(short, long)]
    from: Option<String>,

    /// Target locale, repeatable (defaults to all configured locales)
    #[arg(short, long)]
    to: Vec<String>,

    /// Field to translate, repeatable (defaults to every declared field)
    #[arg(long)]
    fields: Vec<String>,

    /// Domain context embedded in the translation prompt
    #[arg(long)]
    context: Option<String>,

    /// Glossary entries as term=translation pairs, repeatable
    #[arg(short, long, value_name = "TERM=TRANSLATION")]
    glossary: Vec<String>,

    /// Overwrite existing non-blank target values
    #[arg(long)]
    force: bool,

    /// Where to write the translated record (defaults to in-place)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let options = CommandLineOptions::parse();

    let config_exists = std::path::Path::new(&options.config_path).exists();
    let config = if config_exists {
        Config::from_file(&options.config_path)?
    } else {
        Config::default()
    };

    env_logger::Builder::from_default_env()
        .filter_level(config.log_level.to_level_filter())
        .init();
    if !config_exists {
        warn!("Config file {} not found, using defaults", options.config_path);
    }

    let content = std::fs::read_to_string(&options.record_path)
        .with_context(|| format!("Failed to read record file: {}", options.record_path.display()))?;
    let mut record: MemoryRecord =
        serde_json::from_str(&content).context("Failed to parse record file as JSON")?;

    let translation_options = build_options(&options)?;
    let translator = RecordTranslator::from_config(&config)?;

    let mut buffer = PendingWriteBuffer::new();
    let result = translator
        .translate_record(&mut record, &mut buffer, &translation_options)
        .await?;

    // The record file write is this tool's "save"; commit staged rich-text
    // bodies before serializing.
    if let Some(store) = record.rich_text_mut() {
        buffer.commit(store);
    }

    for outcome in result.outcomes() {
        match &outcome.status {
            OutcomeStatus::Translated => {
                info!("translated {} [{}]", outcome.field, outcome.locale);
            }
            OutcomeStatus::Skipped { reason } => {
                info!("skipped {} [{}]: {}", outcome.field, outcome.locale, reason);
            }
            OutcomeStatus::Failed { kind, message } => {
                warn!(
                    "failed {} [{}]: {} ({})",
                    outcome.field, outcome.locale, message, kind
                );
            }
        }
    }
    println!(
        "{} field(s) translated, {} failed",
        result.translated_count(),
        result.failed_count()
    );

    let output_path = options.output.unwrap_or(options.record_path);
    let serialized = serde_json::to_string_pretty(&record)?;
    std::fs::write(&output_path, serialized)
        .with_context(|| format!("Failed to write record file: {}", output_path.display()))?;
    info!("Record written to {}", output_path.display());

    Ok(())
}

/// Assemble orchestration options from the command line
fn build_options(options: &CommandLineOptions) -> Result<TranslationOptions> {
    let mut translation_options = TranslationOptions::new().force(options.force);

    if let Some(from) = &options.from {
        translation_options = translation_options.from(from.as_str());
    }
    if !options.to.is_empty() {
        translation_options = translation_options.to(options.to.iter().map(String::as_str));
    }
    if !options.fields.is_empty() {
        translation_options = translation_options.fields(options.fields.clone());
    }
    if let Some(context) = &options.context {
        translation_options = translation_options.context(context.clone());
    }
    if !options.glossary.is_empty() {
        let mut pairs = Vec::new();
        for entry in &options.glossary {
            let (term, translation) = entry
                .split_once('=')
                .with_context(|| format!("Invalid glossary entry '{}', expected TERM=TRANSLATION", entry))?;
            pairs.push((term.to_string(), translation.to_string()));
        }
        translation_options = translation_options.glossary(Glossary::from_pairs(pairs));
    }
    Ok(translation_options)
}
