//! Extraction of per-instance symmetry statistics from solver logs
//!
//! The log is read line by line. An instance segment opens with an
//! [`INSTANCE_START`] line and closes with an [`INSTANCE_END`] line; only
//! closed segments make it into the result. Segments that are reopened or
//! never closed are dropped and reported as diagnostics.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use thiserror::Error;
use tracing::{debug, warn};

use super::line::{
    INSTANCE_END, INSTANCE_START, LineError, SYMMETRY_MARKER, SymmetryLine, parse_instance_name,
    parse_symmetry_line,
};
use super::structure::SymmetryStatistics;

/// Instance name to statistics, in order of appearance in the log
pub type StatisticsCollection = IndexMap<String, SymmetryStatistics>;

#[derive(Debug, Error)]
pub enum LogParseError {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read log: {0}")]
    Io(#[from] io::Error),
    #[error("line {line_number}: {source}\n  | {line_content}")]
    Line {
        line_number: usize,
        line_content: String,
        #[source]
        source: LineError,
    },
}

/// Data loss that the extraction tolerates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionDiagnostic {
    /// A new instance started before this one was closed
    DiscardedInstance { name: String, line_number: usize },
    /// The log ended before this instance was closed
    UnterminatedInstance { name: String },
    /// An end marker without an open instance
    EndWithoutStart { line_number: usize },
}

impl fmt::Display for ExtractionDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionDiagnostic::DiscardedInstance { name, line_number } => write!(
                f,
                "instance '{}' discarded: new instance started at line {}",
                name, line_number
            ),
            ExtractionDiagnostic::UnterminatedInstance { name } => {
                write!(f, "instance '{}' dropped: log ended without end marker", name)
            }
            ExtractionDiagnostic::EndWithoutStart { line_number } => {
                write!(f, "end marker at line {} without open instance", line_number)
            }
        }
    }
}

/// Result of a successful extraction
#[derive(Debug, Clone, Default)]
pub struct ExtractedStatistics {
    pub statistics: StatisticsCollection,
    pub diagnostics: Vec<ExtractionDiagnostic>,
}

#[derive(Debug, Default)]
enum ParserState {
    #[default]
    NoInstance,
    InInstance {
        name: String,
        stats: SymmetryStatistics,
    },
}

/// Line-driven state machine collecting statistics per instance
#[derive(Debug, Default)]
pub struct SymmetryLogParser {
    state: ParserState,
    line_number: usize,
    statistics: StatisticsCollection,
    diagnostics: Vec<ExtractionDiagnostic>,
}

impl SymmetryLogParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process the next line of the log
    pub fn feed_line(&mut self, line: &str) -> Result<(), LogParseError> {
        self.line_number += 1;
        let line_number = self.line_number;
        let at_line = |source: LineError| LogParseError::Line {
            line_number,
            line_content: line.to_string(),
            source,
        };

        if line.starts_with(INSTANCE_START) {
            let name = parse_instance_name(line).map_err(at_line)?;
            let previous = std::mem::replace(
                &mut self.state,
                ParserState::InInstance {
                    name,
                    stats: SymmetryStatistics::new(),
                },
            );
            if let ParserState::InInstance { name, .. } = previous {
                self.diagnose(ExtractionDiagnostic::DiscardedInstance { name, line_number });
            }
            return Ok(());
        }

        match &mut self.state {
            ParserState::NoInstance => {
                if line.starts_with(INSTANCE_END) {
                    self.diagnose(ExtractionDiagnostic::EndWithoutStart { line_number });
                }
            }
            ParserState::InInstance { stats, .. } => {
                if line.starts_with(INSTANCE_END) {
                    if let ParserState::InInstance { name, stats } =
                        std::mem::take(&mut self.state)
                    {
                        debug!(instance = %name, "finished instance");
                        self.statistics.insert(name, stats);
                    }
                } else if line.contains(SYMMETRY_MARKER) {
                    match parse_symmetry_line(line).map_err(at_line)? {
                        SymmetryLine::Permutations {
                            perms,
                            signed_perms,
                        } => stats.set_permutations(perms, signed_perms),
                        SymmetryLine::Structure(structure) => stats.record(structure),
                    }
                }
            }
        }

        Ok(())
    }

    /// Close the log; an instance still open is dropped
    pub fn finish(mut self) -> ExtractedStatistics {
        if let ParserState::InInstance { name, .. } = std::mem::take(&mut self.state) {
            self.diagnose(ExtractionDiagnostic::UnterminatedInstance { name });
        }

        ExtractedStatistics {
            statistics: self.statistics,
            diagnostics: self.diagnostics,
        }
    }

    fn diagnose(&mut self, diagnostic: ExtractionDiagnostic) {
        warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }
}

/// Extract the statistics of all instances in a log
pub fn extract_symmetry_statistics<R: BufRead>(
    reader: R,
) -> Result<ExtractedStatistics, LogParseError> {
    let mut parser = SymmetryLogParser::new();
    for line in reader.lines() {
        parser.feed_line(&line?)?;
    }
    Ok(parser.finish())
}

#[allow(dead_code)]
pub fn extract_from_str(text: &str) -> Result<ExtractedStatistics, LogParseError> {
    extract_symmetry_statistics(text.as_bytes())
}

pub fn extract_from_file(path: &Path) -> Result<ExtractedStatistics, LogParseError> {
    let file = File::open(path).map_err(|source| LogParseError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    extract_symmetry_statistics(BufReader::new(file))
}
