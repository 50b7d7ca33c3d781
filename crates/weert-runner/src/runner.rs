//! The scan/execute/emit loop.
//!
//! Walks the document with one line of lookahead. Pseudo-comment commands
//! run silently; `$` examples run with stdout captured and prettified, and
//! any stale output lines left in the source are skipped up to the closing
//! code fence. End of input anywhere in the scan is normal termination.

use crate::extract::{self, Extracted, COMMENT_PREFIX, EXAMPLE_PREFIX, FENCE_PREFIX};
use crate::peek::PeekLines;
use crate::render;
use std::io::{self, BufRead, Write};
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::debug;

/// Errors from the example runner.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error(transparent)]
    Extract(#[from] extract::ExtractError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Run every example embedded in `input`, writing the updated document to
/// `out`.
pub fn run<R: BufRead, W: Write>(input: R, out: &mut W) -> Result<(), RunnerError> {
    let mut gen = PeekLines::new(input);
    loop {
        let Some(next) = gen.peek()? else {
            return Ok(());
        };
        if next.starts_with(COMMENT_PREFIX) {
            let Extracted { command, raw } = extract::from_comments(&mut gen)?;
            debug!(command = command.as_str(), "running silent command");
            run_silent(&command)?;
            out.write_all(raw.as_bytes())?;
        } else if next.starts_with(EXAMPLE_PREFIX) {
            let Extracted { command, raw } = extract::multi_line(&mut gen)?;
            debug!(command = command.as_str(), "running example command");
            let output = run_noisy(&command)?;
            out.write_all(raw.as_bytes())?;
            out.write_all(render::prettify(&output).as_bytes())?;
            skip_stale_output(&mut gen)?;
        } else {
            let Some(line) = gen.next_line()? else {
                return Ok(());
            };
            out.write_all(line.as_bytes())?;
        }
    }
}

/// Run a setup command, discarding its output.
fn run_silent(command: &str) -> io::Result<()> {
    Command::new("sh")
        .arg("-c")
        .arg(command)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()?;
    Ok(())
}

/// Run an example command, capturing stdout.
fn run_noisy(command: &str) -> io::Result<String> {
    let output = Command::new("sh")
        .arg("-c")
        .arg(command)
        .stdin(Stdio::null())
        .output()?;
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Fast-forward past stale example output, up to (not including) the next
/// code-fence delimiter.
fn skip_stale_output<R: BufRead>(gen: &mut PeekLines<R>) -> io::Result<()> {
    loop {
        match gen.peek()? {
            Some(line) if !line.starts_with(FENCE_PREFIX) => {
                gen.next_line()?;
            }
            _ => return Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_str(input: &str) -> String {
        let mut out = Vec::new();
        run(Cursor::new(input), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_prose_reproduced_unchanged() {
        let src = "# Title\n\nSome *prose* here.\n";
        assert_eq!(run_str(src), src);
    }

    #[test]
    fn test_example_output_replaced() {
        let src = "```shell\n$ echo hello\nstale old output\n```\n";
        let expect = "```shell\n$ echo hello\nhello\n```\n";
        assert_eq!(run_str(src), expect);
    }

    #[test]
    fn test_json_output_prettified() {
        let src = "$ echo '{\"b\": 2, \"a\": 1}'\n```\n";
        let expect = "$ echo '{\"b\": 2, \"a\": 1}'\n{\n    \"a\": 1,\n    \"b\": 2\n}\n```\n";
        assert_eq!(run_str(src), expect);
    }

    #[test]
    fn test_silent_command_lines_pass_through() {
        let src = "[//]: # (true)\nafter\n";
        assert_eq!(run_str(src), src);
    }

    #[test]
    fn test_multi_line_example_concatenated() {
        let src = "$ echo one \\\n> two\n```\n";
        let expect = "$ echo one \\\n> two\none two\n```\n";
        assert_eq!(run_str(src), expect);
    }

    #[test]
    fn test_eof_during_stale_skip_is_normal_termination() {
        // No closing fence: the scan just runs out of input.
        let src = "$ echo hi\nleftover\n";
        let expect = "$ echo hi\nhi\n";
        assert_eq!(run_str(src), expect);
    }
}
