//! Symmetry statistics of solver runs
//!
//! Solver logs report, per instance, the size of the detected symmetry group
//! and which symmetry handling structures were applied. This module extracts
//! these per instance and formats them as table rows.

pub mod extractor;
pub mod line;
pub mod report;
pub mod structure;

#[allow(unused_imports)]
pub use extractor::{
    ExtractedStatistics, ExtractionDiagnostic, LogParseError, StatisticsCollection,
    SymmetryLogParser, extract_from_file, extract_from_str, extract_symmetry_statistics,
};
pub use report::{aggregated_row, detailed_rows};
#[allow(unused_imports)]
pub use structure::{SymmetryStatistics, SymmetryStructure};
