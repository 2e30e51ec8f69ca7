use anyhow::{Context, Result};
use regex::Regex;

/// Result of the syntax-fix pass.
#[derive(Debug)]
pub struct FixOutcome {
    pub content: String,
    pub fixes: usize,
}

/// Remove the stray trailing comma some generators leave between the last
/// VALUES row and an ON CONFLICT clause.
///
/// Vector literals contain commas of their own, but a comma directly
/// before ON CONFLICT can only be the statement-level separator, so a
/// global substitution is safe here.
pub fn fix_trailing_commas(content: &str) -> Result<FixOutcome> {
    let pattern =
        Regex::new(r"(?i),\s*(ON CONFLICT)").context("Failed to compile syntax-fix regex")?;

    let mut fixes = 0;
    let fixed = pattern.replace_all(content, |caps: &regex::Captures| {
        fixes += 1;
        format!("\n{}", &caps[1])
    });

    Ok(FixOutcome {
        content: fixed.into_owned(),
        fixes,
    })
}
