/// Token substitution over script text
///
/// Scripts are processed as raw bytes, one line at a time. A line keeps its
/// terminator, so `\r\n` endings and a missing final newline come out
/// exactly as they went in.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{Result, TokenizerError};
use crate::tokens::TokenTable;

/// Apply every token in `table` to `line`
///
/// Tokens are applied one after another in table order; text produced by
/// one replacement is visible to the tokens applied after it.
pub fn substitute_line(table: &TokenTable, line: &[u8]) -> Vec<u8> {
    let mut current = line.to_vec();
    for (name, value) in table.iter() {
        if let Some(replaced) = replace_all(&current, name.as_bytes(), value.as_bytes()) {
            current = replaced;
        }
    }
    current
}

/// Replace non-overlapping occurrences of `from`, scanning left to right
///
/// Returns `None` when `from` does not occur.
fn replace_all(haystack: &[u8], from: &[u8], to: &[u8]) -> Option<Vec<u8>> {
    if from.is_empty() || haystack.len() < from.len() {
        return None;
    }

    let mut out = Vec::new();
    let mut start = 0;
    let mut pos = 0;
    while pos + from.len() <= haystack.len() {
        if &haystack[pos..pos + from.len()] == from {
            out.extend_from_slice(&haystack[start..pos]);
            out.extend_from_slice(to);
            pos += from.len();
            start = pos;
        } else {
            pos += 1;
        }
    }

    if start == 0 {
        return None;
    }
    out.extend_from_slice(&haystack[start..]);
    Some(out)
}

/// Stream `script` through the token table into `output`
///
/// `destination` names `output` in errors. Returns the number of lines written.
pub fn tokenize_script<W: Write>(
    output: W,
    destination: &Path,
    table: &TokenTable,
    script: &Path,
) -> Result<usize> {
    let source = File::open(script).map_err(|e| TokenizerError::io(script, e))?;
    tokenize(BufReader::new(source), script, output, destination, table)
}

fn tokenize<R: BufRead, W: Write>(
    mut input: R,
    source: &Path,
    output: W,
    destination: &Path,
    table: &TokenTable,
) -> Result<usize> {
    let mut output = BufWriter::new(output);
    let mut line = Vec::new();
    let mut count = 0;

    loop {
        line.clear();
        let read = input
            .read_until(b'\n', &mut line)
            .map_err(|e| TokenizerError::io(source, e))?;
        if read == 0 {
            break;
        }
        output
            .write_all(&substitute_line(table, &line))
            .map_err(|e| TokenizerError::io(destination, e))?;
        count += 1;
    }

    output.flush().map_err(|e| TokenizerError::io(destination, e))?;
    Ok(count)
}
