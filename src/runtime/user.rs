//! Terminal interaction (output, line input).

use anyhow::Result;

use super::RealRuntime;

use std::io::{self, BufRead, Write};

/// Reads one line from any BufRead after writing `prompt` to any Write.
/// Free-standing so tests can exercise it without a RealRuntime.
pub(crate) fn read_line_with_io<R: BufRead, W: Write>(
    prompt: &str,
    input: &mut R,
    output: &mut W,
) -> Result<Option<String>> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}

impl RealRuntime {
    pub(crate) fn print_impl(&self, text: &str) {
        println!("{}", text);
    }

    pub(crate) fn read_line_impl(&self, prompt: &str) -> Result<Option<String>> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let mut stdin_lock = stdin.lock();
        read_line_with_io(prompt, &mut stdin_lock, &mut stdout)
    }
}
