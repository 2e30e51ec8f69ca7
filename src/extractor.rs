use anyhow::{Context, Result};
use regex::Regex;

/// Fields pulled out of one seed row.
///
/// All three fields are non-empty when extraction succeeds; a row either
/// parses completely or not at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFields {
    pub code: String,
    pub name: String,
    pub description: String,
}

/// Extracts typed fields from candidate seed rows.
///
/// The pattern is anchored at the start of the line (after leading
/// whitespace) and expects an optional category lookup sub-select followed
/// by the quoted code, name, and description fields.
pub struct FieldExtractor {
    row_regex: Regex,
}

impl FieldExtractor {
    pub fn new() -> Result<Self> {
        // Matches rows like:
        //   ((SELECT id FROM categories WHERE name = 'Tools'), 'EQ-001', 'Handpiece', 'Standard handpiece.', ...
        //   ('EQ-001', 'Handpiece', 'Standard handpiece.', ...
        let row_regex = Regex::new(
            r"^\s*\((?:\(SELECT[^')]*name = '(?P<cat>[^']*)'\), )?'(?P<code>[^']*)', '(?P<name>[^']*)', '(?P<desc>[^']*)',",
        )
        .context("Failed to compile row extraction regex")?;

        Ok(Self { row_regex })
    }

    /// Attempt to parse a candidate row. Returns `None` when the line does
    /// not conform; this is an expected outcome for blank lines, comments,
    /// and differently-shaped rows, not an error.
    pub fn extract(&self, line: &str) -> Option<RowFields> {
        let captures = self.row_regex.captures(line)?;

        let code = captures.name("code")?.as_str();
        let name = captures.name("name")?.as_str();
        let description = captures.name("desc")?.as_str();

        if code.is_empty() || name.is_empty() || description.is_empty() {
            return None;
        }

        Some(RowFields {
            code: code.to_string(),
            name: name.to_string(),
            description: description.to_string(),
        })
    }
}
