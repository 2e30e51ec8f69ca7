// Core library for the seedvec SQL embedding injector

pub mod cli;
pub mod config;
pub mod document;
pub mod embedding;
pub mod extractor;
pub mod fixer;
pub mod pipeline;
pub mod rewriter;
pub mod tracker;

pub use config::SeedvecConfig;

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use document::Document;
use embedding::{EmbeddingProvider, GeminiClient, Paced};
use pipeline::DocumentPipeline;

/// Summary of one injection run.
#[derive(Debug)]
pub struct InjectSummary {
    pub changed: usize,
    pub warnings: Vec<String>,
    pub backup: Option<PathBuf>,
}

/// Entry point for one invocation: either the embedding injection run or
/// the syntax-fix pass, per configuration.
pub fn run(config: &SeedvecConfig) -> Result<()> {
    if config.input.fix_syntax {
        run_fix(config)
    } else {
        run_inject(config)
    }
}

fn run_inject(config: &SeedvecConfig) -> Result<()> {
    // A missing credential is a deliberate early, successful no-op.
    let Some(api_key) = config.embedding.api_key.as_deref() else {
        println!(
            "Skipping embedding generation: {} is not set.",
            config.embedding.api_key_env
        );
        println!(
            "Set {} and try again.",
            config.embedding.api_key_env
        );
        return Ok(());
    };

    let client = GeminiClient::new(
        &config.embedding.endpoint,
        &config.embedding.model,
        api_key,
    )?;
    let paced = Paced::new(client, config.embedding.pace);

    run_inject_with_provider(config, &paced)?;
    Ok(())
}

/// Run the injection against an explicit provider. Split out so tests can
/// substitute a deterministic provider for the HTTP client.
pub fn run_inject_with_provider(
    config: &SeedvecConfig,
    provider: &dyn EmbeddingProvider,
) -> Result<InjectSummary> {
    println!("Processing {}...", config.input.file);

    let document = Document::load(&config.input.file)?;
    let pipeline = DocumentPipeline::new(provider, &config.input.table, &config.input.column)?;
    let outcome = pipeline.run(document.lines());

    let backup = if outcome.changed > 0 && !config.output.dry_run {
        Some(document.persist(&outcome.lines, &config.output.backup_suffix)?)
    } else {
        None
    };

    if outcome.changed > 0 {
        println!("Updated {} records.", outcome.changed);
        if config.output.dry_run {
            println!("Dry run, nothing written.");
        } else {
            println!("Done.");
        }
    } else {
        println!("No records updated (maybe already processed?).");
    }

    if !outcome.warnings.is_empty() {
        eprintln!("{} rows skipped, see warnings above.", outcome.warnings.len());
    }

    Ok(InjectSummary {
        changed: outcome.changed,
        warnings: outcome.warnings,
        backup,
    })
}

fn run_fix(config: &SeedvecConfig) -> Result<()> {
    let path = &config.input.file;
    println!("Reading {}...", path);

    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read '{}'", path))?;
    let outcome = fixer::fix_trailing_commas(&content)?;

    if outcome.fixes > 0 {
        println!("Fixed {} occurrences.", outcome.fixes);
        if config.output.dry_run {
            println!("Dry run, nothing written.");
        } else {
            fs::write(path, outcome.content)
                .with_context(|| format!("Failed to write '{}'", path))?;
            println!("File updated successfully.");
        }
    } else {
        println!("No syntax errors found matching the pattern.");
    }

    Ok(())
}
