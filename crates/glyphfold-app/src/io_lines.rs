use std::borrow::Cow;
use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use glyphfold_core::{DefaultPreprocessor, InvalidInputPolicy, Preprocessor, decode, normalize};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    pub policy: InvalidInputPolicy,
    pub trim: bool,
    pub json: bool,
}

impl Options {
    fn preprocessor(&self) -> Box<dyn Preprocessor> {
        if self.trim {
            Box::new(DefaultPreprocessor)
        } else {
            Box::new(Verbatim)
        }
    }
}

/// Normalizes without trimming, keeps leading/trailing whitespace
struct Verbatim;
impl Preprocessor for Verbatim {
    fn process(&self, text: &str) -> String {
        normalize(text)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub lines: usize,
    /// Lines that contained invalid UTF-8 and were decoded lossily
    pub replaced: usize,
}

#[derive(Serialize)]
struct Record<'a> {
    input: &'a str,
    output: &'a str,
}

fn write_record(out: &mut impl Write, input: &str, output: &str, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer(&mut *out, &Record { input, output })
            .context("failed to encode record")?;
        writeln!(out)?;
    } else {
        writeln!(out, "{output}")?;
    }
    Ok(())
}

pub fn process_args(args: &[String], options: &Options, out: &mut impl Write) -> Result<Summary> {
    let preprocessor = options.preprocessor();
    let mut summary = Summary::default();

    for arg in args {
        let output = preprocessor.process(arg);
        tracing::debug!(input = %arg, output = %output, "normalized argument");
        write_record(out, arg, &output, options.json)?;
        summary.lines += 1;
    }

    Ok(summary)
}

/// Reads `\n`-separated lines as raw bytes so invalid UTF-8 hits the policy
/// instead of aborting the read.
pub fn process_reader(
    mut reader: impl BufRead,
    options: &Options,
    out: &mut impl Write,
) -> Result<Summary> {
    let preprocessor = options.preprocessor();
    let mut summary = Summary::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .context("failed to read input")?;
        if read == 0 {
            break;
        }

        let line_no = summary.lines + 1;
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        // Also covers a final line with no newline
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }

        let text = decode(&buf, options.policy)
            .with_context(|| format!("line {line_no} is not valid UTF-8"))?;
        if matches!(text, Cow::Owned(_)) {
            tracing::warn!(line = line_no, "replaced invalid UTF-8 with U+FFFD");
            summary.replaced += 1;
        }

        let output = preprocessor.process(&text);
        tracing::debug!(line = line_no, "normalized line");
        write_record(out, &text, &output, options.json)?;
        summary.lines += 1;
    }

    Ok(summary)
}
