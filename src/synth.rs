//! Enum body synthesis: matched records to TypeScript member lines.
//!
//! Trailing `// comment` text is aligned to a shared column, the first
//! multiple of 4 that leaves at least a full indentation unit after the
//! longest member line.

use crate::matcher::{DescriptionExtractor, MatchResult};
use std::collections::HashSet;

const INDENT: &str = "    ";
const TAB_WIDTH: usize = 4;

/// Primary and description enum bodies, member for member.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DescribedBodies {
    pub primary: String,
    pub descriptions: String,
}

/// `ceil(max_len / 4 + 1) * 4`.
pub fn alignment_column(max_len: usize) -> usize {
    (max_len + 2 * TAB_WIDTH - 1) / TAB_WIDTH * TAB_WIDTH
}

/// Escape `'` so the text is safe inside a single-quoted literal. Quotes
/// that are already escaped are left alone.
fn escape_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut escaped = false;
    for c in text.chars() {
        if c == '\'' && !escaped {
            out.push('\\');
        }
        escaped = c == '\\' && !escaped;
        out.push(c);
    }
    out
}

fn member_line(name: &str, literal: &str) -> String {
    format!("{}{} = '{}',", INDENT, name, escape_literal(literal))
}

/// Render `line` padded to `column`, then `// comment` if there is one.
fn aligned(line: &str, column: usize, comment: Option<&str>) -> String {
    match comment {
        Some(comment) => format!("{:<width$}// {}", line, comment, width = column),
        None => format!("{:<width$}", line, width = column),
    }
}

fn column_for(lines: &[String]) -> usize {
    let max_len = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    alignment_column(max_len)
}

/// Simple mode: one `NAME = 'VALUE',` line per record.
///
/// Comments are aligned only when at least one record carries one.
pub fn synthesize(records: &[MatchResult]) -> String {
    let lines: Vec<String> = records
        .iter()
        .map(|r| member_line(&r.name, &r.value))
        .collect();

    if records.iter().all(|r| r.comment.is_none()) {
        return lines.join("\n");
    }

    let column = column_for(&lines);
    lines
        .iter()
        .zip(records)
        .map(|(line, r)| aligned(line, column, r.comment.as_deref()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Description of a record: the extractor applied to `extra` when one is
/// configured, otherwise the record's comment.
fn description_of(record: &MatchResult, extractor: Option<&dyn DescriptionExtractor>) -> String {
    let extracted = match extractor {
        Some(extractor) => record.extra.as_deref().and_then(|e| extractor.extract(e)),
        None => None,
    };
    extracted
        .or_else(|| record.comment.clone())
        .unwrap_or_default()
}

/// Description mode: a primary body keyed by member name, always
/// comment-aligned, and a parallel body mapping each name to its
/// description.
pub fn synthesize_with_descriptions(
    records: &[MatchResult],
    extractor: Option<&dyn DescriptionExtractor>,
) -> DescribedBodies {
    let descriptions: Vec<String> = records
        .iter()
        .map(|r| description_of(r, extractor))
        .collect();
    let lines: Vec<String> = records
        .iter()
        .map(|r| member_line(&r.name, &r.value))
        .collect();
    let column = column_for(&lines);

    let primary = lines
        .iter()
        .zip(&descriptions)
        .map(|(line, desc)| aligned(line, column, Some(desc.as_str()).filter(|d| !d.is_empty())))
        .collect::<Vec<_>>()
        .join("\n");
    let descriptions = records
        .iter()
        .zip(&descriptions)
        .map(|(r, desc)| member_line(&r.name, desc))
        .collect::<Vec<_>>()
        .join("\n");

    DescribedBodies {
        primary,
        descriptions,
    }
}

/// Member names seen more than once, in order of their second appearance.
pub fn find_duplicates(records: &[MatchResult]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for record in records {
        let name = record.name.as_str();
        if !seen.insert(name) && !duplicates.contains(&name) {
            duplicates.push(name);
        }
    }
    duplicates
}
