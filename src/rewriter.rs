use std::fmt::Write as _;
use thiserror::Error;

/// A row matched as a candidate but has no closing delimiter to anchor the
/// insertion. The row is left untouched rather than risking corruption.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("no closing delimiter found in row")]
pub struct StructuralDefect;

/// Serialize a vector the way it is stored in the seed file: `[0.1, 0.2]`.
pub fn format_vector(values: &[f64]) -> String {
    let mut out = String::with_capacity(values.len() * 10 + 2);
    out.push('[');
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{}", value);
    }
    out.push(']');
    out
}

/// Splice the serialized vector into a row as one extra quoted field,
/// immediately before the row's final closing delimiter. Every other byte
/// of the line is preserved.
pub fn rewrite_row(line: &str, vector: &[f64]) -> Result<String, StructuralDefect> {
    let insertion_point = line.rfind(')').ok_or(StructuralDefect)?;

    let literal = format_vector(vector);
    let mut out = String::with_capacity(line.len() + literal.len() + 4);
    out.push_str(&line[..insertion_point]);
    out.push_str(", '");
    out.push_str(&literal);
    out.push('\'');
    out.push_str(&line[insertion_point..]);
    Ok(out)
}

/// Add the derived column to a header's column list by extending the
/// column-list terminator token. Returns `None` when the token is absent.
pub fn augment_header(line: &str, column: &str) -> Option<String> {
    if !line.contains(") VALUES") {
        return None;
    }
    Some(line.replacen(") VALUES", &format!(", {}) VALUES", column), 1))
}
