//! Output formatting for CLI commands.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::cli::args::{LatelyArgs, OutputFormat};
use crate::error::Result;
use crate::provider::meta::ResultMeta;
use crate::record::Record;

/// Result structure for search operations.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchOutput {
    pub terms: Vec<String>,
    pub total_hits: usize,
    pub duration_us: u64,
    pub results: Vec<ResultMeta>,
}

/// Result structure for listing records.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListOutput {
    pub total_records: usize,
    pub records: Vec<Record>,
}

/// Result structure for opening a record.
#[derive(Debug, Serialize, Deserialize)]
pub struct OpenOutput {
    pub name: String,
    pub location: String,
    pub launched: bool,
    pub command_line: Option<Vec<String>>,
    pub reason: Option<String>,
}

/// Human-readable rendering of a command result.
pub trait HumanOutput {
    /// Write the result for a terminal.
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()>;
}

impl HumanOutput for SearchOutput {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        if self.results.is_empty() {
            writeln!(out, "No results for \"{}\"", self.terms.join(" "))?;
            return Ok(());
        }

        for (i, meta) in self.results.iter().enumerate() {
            writeln!(out, "{:>3}. [{}] {}", i + 1, meta.score, meta.name)?;
            writeln!(out, "     {}", meta.location)?;
        }

        writeln!(out)?;
        writeln!(
            out,
            "Showing {} of {} hits ({}us)",
            self.results.len(),
            self.total_hits,
            self.duration_us
        )
    }
}

impl HumanOutput for ListOutput {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        for record in &self.records {
            let visited = record
                .last_visited
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string());
            writeln!(out, "{visited:<16}  {}  {}", record.name, record.location)?;
        }
        writeln!(out)?;
        writeln!(out, "Total records: {}", self.total_records)
    }
}

impl HumanOutput for OpenOutput {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        if let Some(argv) = &self.command_line {
            writeln!(out, "{}", argv.join(" "))?;
        } else if self.launched {
            writeln!(out, "Opened {} ({})", self.name, self.location)?;
        } else {
            writeln!(
                out,
                "Could not open {}: {}",
                self.location,
                self.reason.as_deref().unwrap_or("unknown error")
            )?;
        }
        Ok(())
    }
}

/// Output a result in the requested format.
pub fn output_result<T: Serialize + HumanOutput>(result: &T, args: &LatelyArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_result(result, args, &mut out)
}

/// Write a result in the requested format.
pub fn write_result<T: Serialize + HumanOutput>(
    result: &T,
    args: &LatelyArgs,
    out: &mut dyn Write,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => result.write_human(out)?,
        OutputFormat::Json => {
            let json = if args.pretty {
                serde_json::to_string_pretty(result)?
            } else {
                serde_json::to_string(result)?
            };
            writeln!(out, "{json}")?;
        }
    }
    Ok(())
}
