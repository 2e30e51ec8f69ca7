use anyhow::Result;

use crate::embedding::EmbeddingProvider;
use crate::extractor::{FieldExtractor, RowFields};
use crate::rewriter;
use crate::tracker::{BlockTracker, LineClass};

/// Result of one pipeline run over a document.
#[derive(Debug)]
pub struct RunOutcome {
    pub lines: Vec<String>,
    pub changed: usize,
    pub warnings: Vec<String>,
}

/// Drives the full scan: classifies each line, extracts fields from
/// candidate rows, computes embeddings, and rewrites eligible lines.
///
/// The pipeline never aborts on a single row's failure; anything it is not
/// fully confident about passes through unchanged with a warning.
pub struct DocumentPipeline<'a> {
    extractor: FieldExtractor,
    provider: &'a dyn EmbeddingProvider,
    tracker: BlockTracker,
    column: String,
    quiet: bool,
}

impl<'a> DocumentPipeline<'a> {
    pub fn new(provider: &'a dyn EmbeddingProvider, table: &str, column: &str) -> Result<Self> {
        Ok(Self {
            extractor: FieldExtractor::new()?,
            provider,
            tracker: BlockTracker::new(table, column),
            column: column.to_string(),
            quiet: false,
        })
    }

    /// Suppress per-row progress output. Warnings are still collected.
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    /// Process the document's lines in order. The output always has exactly
    /// as many lines as the input.
    pub fn run(mut self, lines: &[String]) -> RunOutcome {
        let mut out = Vec::with_capacity(lines.len());
        let mut warnings = Vec::new();
        let mut changed = 0;

        for line in lines {
            let rewritten = match self.tracker.classify(line) {
                LineClass::HeaderActive => self.augment_header(line, &mut warnings),
                LineClass::HeaderAugmented => {
                    if !self.quiet {
                        println!(
                            "  '{}' column already present, copying block through",
                            self.column
                        );
                    }
                    line.clone()
                }
                LineClass::CandidateRow => self.process_row(line, &mut warnings, &mut changed),
                LineClass::Passthrough | LineClass::Plain => line.clone(),
            };
            out.push(rewritten);
        }

        if let Some(warning) = self.tracker.finish() {
            warn(&mut warnings, warning);
        }

        RunOutcome {
            lines: out,
            changed,
            warnings,
        }
    }

    fn augment_header(&self, line: &str, warnings: &mut Vec<String>) -> String {
        match rewriter::augment_header(line, &self.column) {
            Some(mutated) => mutated,
            None => {
                warn(
                    warnings,
                    format!(
                        "Header has no column-list terminator, left unchanged: {}",
                        preview(line)
                    ),
                );
                line.to_string()
            }
        }
    }

    fn process_row(&self, line: &str, warnings: &mut Vec<String>, changed: &mut usize) -> String {
        let Some(fields) = self.extractor.extract(line) else {
            warn(warnings, format!("Could not parse row: {}", preview(line)));
            return line.to_string();
        };

        if !self.quiet {
            println!(
                "  Generating embedding for {}: {}...",
                fields.code, fields.name
            );
        }

        let vector = match self.provider.embed(&embedding_text(&fields)) {
            Ok(vector) => vector,
            Err(e) => {
                warn(
                    warnings,
                    format!("Embedding failed for {}: {}", fields.code, e),
                );
                return line.to_string();
            }
        };

        match rewriter::rewrite_row(line, &vector) {
            Ok(rewritten) => {
                *changed += 1;
                rewritten
            }
            Err(e) => {
                warn(warnings, format!("Row {}: {}", fields.code, e));
                line.to_string()
            }
        }
    }
}

/// The fixed template combining name and description into the text the
/// embedding is computed from.
pub fn embedding_text(fields: &RowFields) -> String {
    format!(
        "Product Name: {}\nDescription: {}",
        fields.name, fields.description
    )
}

fn warn(warnings: &mut Vec<String>, message: String) {
    eprintln!("  Warning: {}", message);
    warnings.push(message);
}

fn preview(line: &str) -> String {
    let trimmed = line.trim();
    let mut end = trimmed.len().min(50);
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    if end < trimmed.len() {
        format!("{}...", &trimmed[..end])
    } else {
        trimmed.to_string()
    }
}
