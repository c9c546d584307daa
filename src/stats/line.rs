//! Classification of individual solver log lines
//!
//! Statistics lines carry their numbers at fixed whitespace-separated token
//! positions, which differ per structure kind.

use thiserror::Error;

use super::structure::{DoubleLex, Orbitope, SignedDoubleLex, SymmetryStructure};

/// Prefix of the line that opens an instance, followed by its path
pub const INSTANCE_START: &str = "@01";
/// Prefix of the line that closes an instance
pub const INSTANCE_END: &str = "@04";
/// Marker contained in every symmetry statistics line
pub const SYMMETRY_MARKER: &str = "SYMMETRY";

const PERMS_PREFIX: &str = "SYMMETRY stats perms";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("{kind} line has no token at position {index}")]
    MissingToken { kind: &'static str, index: usize },
    #[error("{kind} line has non-integer token '{token}'")]
    InvalidInteger { kind: &'static str, token: String },
    #[error("{kind} line has negative block count {value}")]
    NegativeBlockCount { kind: &'static str, value: i64 },
    #[error("unrecognized symmetry structure")]
    UnknownStructure,
    #[error("instance start line has no instance name")]
    MissingInstanceName,
}

/// Content of a line containing [`SYMMETRY_MARKER`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymmetryLine {
    Permutations { perms: i64, signed_perms: i64 },
    Structure(SymmetryStructure),
}

/// Whitespace tokens of one line, tagged with the structure kind for errors
struct Fields<'a> {
    kind: &'static str,
    tokens: Vec<&'a str>,
}

impl<'a> Fields<'a> {
    fn new(kind: &'static str, line: &'a str) -> Self {
        Self {
            kind,
            tokens: line.split_whitespace().collect(),
        }
    }

    fn int(&self, index: usize) -> Result<i64, LineError> {
        let token = self.tokens.get(index).ok_or(LineError::MissingToken {
            kind: self.kind,
            index,
        })?;
        token.parse().map_err(|_| LineError::InvalidInteger {
            kind: self.kind,
            token: token.to_string(),
        })
    }

    fn count(&self, index: usize) -> Result<usize, LineError> {
        let value = self.int(index)?;
        usize::try_from(value).map_err(|_| LineError::NegativeBlockCount {
            kind: self.kind,
            value,
        })
    }
}

/// Instance name of a start line: last path segment of the second token
pub fn parse_instance_name(line: &str) -> Result<String, LineError> {
    line.split_whitespace()
        .nth(1)
        .and_then(|path| path.rsplit('/').next())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or(LineError::MissingInstanceName)
}

/// Classify a line containing [`SYMMETRY_MARKER`].
///
/// The first matching kind wins; a line matching no kind is malformed.
pub fn parse_symmetry_line(line: &str) -> Result<SymmetryLine, LineError> {
    let line = line.trim();

    if line.starts_with(PERMS_PREFIX) {
        parse_permutations(line)
    } else if line.contains("simplecut") {
        Ok(SymmetryLine::Structure(SymmetryStructure::SimpleCut))
    } else if line.contains("doublelexorbitope") {
        parse_signed_doublelex(line)
    } else if line.contains("orbitope dynamic") {
        parse_orbitope(line)
    } else if line.contains("doublelex columnblocks") {
        parse_doublelex(line)
    } else if line.contains("signedorbitope") {
        parse_signed_orbitope(line)
    } else {
        Err(LineError::UnknownStructure)
    }
}

/// `SYMMETRY stats perms <n> <label> <signed>`
fn parse_permutations(line: &str) -> Result<SymmetryLine, LineError> {
    let fields = Fields::new("permutation statistics", line);
    Ok(SymmetryLine::Permutations {
        perms: fields.int(3)?,
        signed_perms: fields.int(5)?,
    })
}

fn parse_signed_doublelex(line: &str) -> Result<SymmetryLine, LineError> {
    let fields = Fields::new("signed double-lex orbitope", line);
    Ok(SymmetryLine::Structure(SymmetryStructure::SignedDoubleLex(
        SignedDoubleLex {
            rowblock: fields.int(5)?,
            colblock: fields.int(7)?,
            sign: fields.int(9)?,
        },
    )))
}

fn parse_orbitope(line: &str) -> Result<SymmetryLine, LineError> {
    let fields = Fields::new("dynamic orbitope", line);
    Ok(SymmetryLine::Structure(SymmetryStructure::Orbitope(
        Orbitope {
            rows: fields.int(6)?,
            cols: fields.int(8)?,
        },
    )))
}

/// Block counts at 5 and 7; row block sizes start at 9, column block sizes
/// follow after one label token.
fn parse_doublelex(line: &str) -> Result<SymmetryLine, LineError> {
    let fields = Fields::new("double-lex column blocks", line);
    let nrowblocks = fields.count(5)?;
    let ncolblocks = fields.count(7)?;

    let rowblocks = (0..nrowblocks)
        .map(|i| fields.int(9 + i))
        .collect::<Result<Vec<_>, _>>()?;
    let colblocks = (0..ncolblocks)
        .map(|i| fields.int(9 + nrowblocks + 1 + i))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SymmetryLine::Structure(SymmetryStructure::DoubleLex(
        DoubleLex {
            rowblocks,
            colblocks,
        },
    )))
}

fn parse_signed_orbitope(line: &str) -> Result<SymmetryLine, LineError> {
    let fields = Fields::new("signed orbitope", line);
    Ok(SymmetryLine::Structure(SymmetryStructure::SignedOrbitope(
        Orbitope {
            rows: fields.int(5)?,
            cols: fields.int(7)?,
        },
    )))
}
