//! Interactive collection of link records.
//!
//! All prompt loops are unbounded: invalid input is absorbed by
//! re-prompting and never surfaces as an error. The only error paths
//! are a closed input stream (EOF) or a failed write to the output,
//! since no further interaction is possible in either case.
//!
//! Answers are trimmed of surrounding whitespace before validation, so
//! whitespace-only input counts as empty. The collector is generic over
//! its input and output streams, which lets tests script whole sessions.

use std::io::{self, BufRead, Write};

use crate::domain::{LinkOptions, LinkRecord};
use crate::store::LinkStore;
use crate::vocab::{Vocabularies, Vocabulary};

/// Read one line and trim surrounding whitespace.
///
/// EOF is an error: the session cannot continue without an answer.
fn read_trimmed(input: &mut impl BufRead) -> io::Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed before the session finished",
        ));
    }
    Ok(line.trim().to_string())
}

/// Prompt until a non-empty answer arrives
pub fn prompt_nonempty<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> io::Result<String> {
    loop {
        writeln!(output, "Enter {}:", label)?;
        output.flush()?;
        let answer = read_trimmed(input)?;
        if !answer.is_empty() {
            return Ok(answer);
        }
    }
}

/// Drives one interactive submission session
pub struct Collector<'v, R, W> {
    input: R,
    output: W,
    vocabs: &'v Vocabularies,
}

impl<'v, R: BufRead, W: Write> Collector<'v, R, W> {
    /// Create a collector over the given streams
    pub fn new(input: R, output: W, vocabs: &'v Vocabularies) -> Self {
        Self {
            input,
            output,
            vocabs,
        }
    }

    /// Collect records into the store until the user signals completion.
    ///
    /// Returns the number of records added.
    pub fn run(&mut self, store: &mut LinkStore) -> io::Result<usize> {
        let mut added = 0;
        loop {
            let record = self.collect_record()?;
            tracing::debug!(link = %record.link, "Collected link record");
            store.append(record);
            added += 1;

            if self.prompt_done()? {
                break;
            }
        }
        Ok(added)
    }

    /// Collect one full record
    pub fn collect_record(&mut self) -> io::Result<LinkRecord> {
        let vocabs = self.vocabs;

        let link = prompt_nonempty(&mut self.input, &mut self.output, "URL")?;
        let title = prompt_nonempty(&mut self.input, &mut self.output, "title")?;
        let level = self.prompt_vocab(&vocabs.level)?;
        let interest = self.prompt_vocab(&vocabs.interest)?;
        let resource_type = self.prompt_vocab(&vocabs.resource_type)?;

        Ok(LinkRecord::new(
            link,
            title,
            LinkOptions::new(level, interest, resource_type),
        ))
    }

    /// Prompt until the answer is a member of the vocabulary
    fn prompt_vocab(&mut self, vocab: &Vocabulary) -> io::Result<String> {
        loop {
            writeln!(
                self.output,
                "Enter {} ({}):",
                vocab.name(),
                vocab.display_list()
            )?;
            self.output.flush()?;

            let answer = read_trimmed(&mut self.input)?;
            if vocab.contains(&answer) {
                return Ok(answer);
            }

            writeln!(
                self.output,
                "Invalid {} '{}'. Valid values: {}",
                vocab.name(),
                answer,
                vocab.display_list()
            )?;
        }
    }

    /// Continuation question: only the literal tokens `y` and `n` are
    /// accepted. `y` ends the session, `n` starts another record.
    fn prompt_done(&mut self) -> io::Result<bool> {
        loop {
            writeln!(self.output, "Done adding links? (y/n)")?;
            self.output.flush()?;

            match read_trimmed(&mut self.input)?.as_str() {
                "y" => return Ok(true),
                "n" => return Ok(false),
                _ => {}
            }
        }
    }
}
