//! Extraction of embedded shell commands from the markdown line stream.
//!
//! Two command syntaxes:
//! - Silent: markdown pseudo-comments, `[//]: # (cmd)`. A run of
//!   consecutive comment lines joins into one multi-line command.
//! - Noisy: shell examples starting with `$`, continued across lines that
//!   end in a trailing backslash, with `>` secondary prompts on the
//!   continuation lines.

use crate::peek::PeekLines;
use std::io::BufRead;
use thiserror::Error;

/// Prefix marking a markdown pseudo-comment line.
pub const COMMENT_PREFIX: &str = "[//]";

/// Prefix marking a noisy shell example line.
pub const EXAMPLE_PREFIX: &str = "$";

/// Prefix marking a code-fence delimiter line.
pub const FENCE_PREFIX: &str = "```";

/// Errors during command extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("pseudo-comment without (...) delimiters: {0}")]
    MissingDelimiters(String),
}

/// A command pulled out of the document, plus its raw source text for
/// byte-for-byte passthrough.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Extracted {
    /// The shell command to execute.
    pub command: String,
    /// Raw source lines, reproduced verbatim in the output.
    pub raw: String,
}

/// Consume a run of `[//]: # (cmd)` pseudo-comment lines.
///
/// The command text is taken between the first `(` and the last `)` of each
/// line; per-line commands are joined with newlines.
pub fn from_comments<R: BufRead>(gen: &mut PeekLines<R>) -> Result<Extracted, ExtractError> {
    let mut extracted = Extracted::default();
    loop {
        match gen.peek()? {
            Some(line) if line.starts_with(COMMENT_PREFIX) => {}
            _ => return Ok(extracted),
        }
        let Some(line) = gen.next_line()? else {
            return Ok(extracted);
        };
        let (left, right) = match (line.find('('), line.rfind(')')) {
            (Some(l), Some(r)) if l < r => (l, r),
            _ => {
                return Err(ExtractError::MissingDelimiters(
                    line.trim_end().to_string(),
                ))
            }
        };
        extracted.command.push_str(&line[left + 1..right]);
        extracted.command.push('\n');
        extracted.raw.push_str(&line);
    }
}

/// Consume a `$ ...` shell example, following trailing-backslash
/// continuations. Continuation markers (the trailing `\` and the leading
/// `>` secondary prompt) are stripped from the assembled command; the raw
/// lines keep them.
pub fn multi_line<R: BufRead>(gen: &mut PeekLines<R>) -> Result<Extracted, ExtractError> {
    let mut extracted = Extracted::default();
    let mut first = true;
    while let Some(line) = gen.next_line()? {
        extracted.raw.push_str(&line);
        let body = line.trim_end_matches(['\n', '\r']);
        let (body, continued) = match body.strip_suffix('\\') {
            Some(stripped) => (stripped, true),
            None => (body, false),
        };
        extracted.command.push_str(strip_marker(body, first));
        first = false;
        if !continued {
            break;
        }
    }
    Ok(extracted)
}

/// Strip the `$` prompt from the first line, or the `>` secondary prompt
/// from a continuation line.
fn strip_marker(line: &str, first: bool) -> &str {
    let trimmed = line.trim_start();
    let prompt = if first { EXAMPLE_PREFIX } else { ">" };
    match trimmed.strip_prefix(prompt) {
        Some(rest) => rest.trim_start(),
        None => line,
    }
}
