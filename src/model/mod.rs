//! Writer for the CIP text model format
//!
//! A model is written section by section:
//! `STATISTICS`, `OBJECTIVE`, `VARIABLES`, `CONSTRAINTS`, then `END`.
//! The writer checks that sections are opened in this order.

use std::fmt;
use std::io::{self, Write};

use thiserror::Error;

use crate::symmetry::{ConstraintSink, LinearConstraint};

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("I/O error while writing model: {0}")]
    Io(#[from] io::Error),
    #[error("cannot write {attempted} while in section {current}")]
    OutOfOrder {
        attempted: &'static str,
        current: Section,
    },
}

/// Position of the writer in the file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Section {
    Start,
    Statistics,
    Objective,
    Variables,
    Constraints,
    End,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", section_name(*self))
    }
}

/// Variable domain type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarType {
    Binary,
    Integer,
    ImplicitInteger,
    Continuous,
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarType::Binary => write!(f, "binary"),
            VarType::Integer => write!(f, "integer"),
            VarType::ImplicitInteger => write!(f, "implicit"),
            VarType::Continuous => write!(f, "continuous"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveSense {
    Minimize,
    Maximize,
}

impl fmt::Display for ObjectiveSense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectiveSense::Minimize => write!(f, "minimize"),
            ObjectiveSense::Maximize => write!(f, "maximize"),
        }
    }
}

/// Constraint handler type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsKind {
    Linear,
    Nonlinear,
}

impl fmt::Display for ConsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsKind::Linear => write!(f, "linear"),
            ConsKind::Nonlinear => write!(f, "nonlinear"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Le,
    Ge,
    Eq,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::Le => write!(f, "<="),
            Relation::Ge => write!(f, ">="),
            Relation::Eq => write!(f, "=="),
        }
    }
}

/// Contents of the `STATISTICS` section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelStatistics {
    pub name: String,
    pub nbinary: usize,
    pub ninteger: usize,
    pub nimplicit: usize,
    pub ncontinuous: usize,
    /// Upper bound on the number of constraints in the file
    pub max_conss: usize,
}

impl ModelStatistics {
    pub fn continuous(name: impl Into<String>, nvars: usize, max_conss: usize) -> Self {
        Self {
            name: name.into(),
            nbinary: 0,
            ninteger: 0,
            nimplicit: 0,
            ncontinuous: nvars,
            max_conss,
        }
    }

    pub fn binary(name: impl Into<String>, nvars: usize, max_conss: usize) -> Self {
        Self {
            name: name.into(),
            nbinary: nvars,
            ninteger: 0,
            nimplicit: 0,
            ncontinuous: 0,
            max_conss,
        }
    }

    pub fn nvars(&self) -> usize {
        self.nbinary + self.ninteger + self.nimplicit + self.ncontinuous
    }
}

/// Format a variable bound, spelling infinities the way CIP does
pub fn format_bound(value: f64) -> String {
    if value == f64::INFINITY {
        "Inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        value.to_string()
    }
}

/// Streams a CIP model into `out`
pub struct ModelWriter<W: Write> {
    out: W,
    section: Section,
    nconss: usize,
}

impl<W: Write> ModelWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            section: Section::Start,
            nconss: 0,
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    /// Number of constraints written so far
    pub fn constraint_count(&self) -> usize {
        self.nconss
    }

    fn enter(&mut self, next: Section) -> Result<(), ModelError> {
        if self.section >= next {
            return Err(ModelError::OutOfOrder {
                attempted: section_name(next),
                current: self.section,
            });
        }
        self.section = next;
        Ok(())
    }

    fn require(&self, section: Section, attempted: &'static str) -> Result<(), ModelError> {
        if self.section != section {
            return Err(ModelError::OutOfOrder {
                attempted,
                current: self.section,
            });
        }
        Ok(())
    }

    pub fn write_statistics(&mut self, stats: &ModelStatistics) -> Result<(), ModelError> {
        self.enter(Section::Statistics)?;
        writeln!(self.out, "STATISTICS")?;
        writeln!(self.out, "  Problem name     : {}", stats.name)?;
        writeln!(
            self.out,
            "  Variables        : {} ({} binary, {} integer, {} implicit integer, {} continuous)",
            stats.nvars(),
            stats.nbinary,
            stats.ninteger,
            stats.nimplicit,
            stats.ncontinuous
        )?;
        writeln!(
            self.out,
            "  Constraints      : 0 initial, {} maximal",
            stats.max_conss
        )?;
        Ok(())
    }

    pub fn write_objective(&mut self, sense: ObjectiveSense) -> Result<(), ModelError> {
        self.enter(Section::Objective)?;
        writeln!(self.out, "OBJECTIVE")?;
        writeln!(self.out, "  Sense            : {}", sense)?;
        Ok(())
    }

    pub fn begin_variables(&mut self) -> Result<(), ModelError> {
        self.enter(Section::Variables)?;
        writeln!(self.out, "VARIABLES")?;
        Ok(())
    }

    pub fn write_variable(
        &mut self,
        vartype: VarType,
        name: &str,
        obj: i64,
        lower: f64,
        upper: f64,
    ) -> Result<(), ModelError> {
        self.require(Section::Variables, "a variable")?;
        writeln!(
            self.out,
            "  [{}] <{}>: obj={}, original bounds=[{},{}]",
            vartype,
            name,
            obj,
            format_bound(lower),
            format_bound(upper)
        )?;
        Ok(())
    }

    pub fn begin_constraints(&mut self) -> Result<(), ModelError> {
        self.enter(Section::Constraints)?;
        writeln!(self.out, "CONSTRAINTS")?;
        Ok(())
    }

    /// Write `  [kind] <name>: expr rel rhs;`
    pub fn write_constraint(
        &mut self,
        kind: ConsKind,
        name: &str,
        expression: &str,
        relation: Relation,
        rhs: i64,
    ) -> Result<(), ModelError> {
        self.require(Section::Constraints, "a constraint")?;
        writeln!(
            self.out,
            "  [{}] <{}>: {} {} {};",
            kind, name, expression, relation, rhs
        )?;
        self.nconss += 1;
        Ok(())
    }

    pub fn write_linear(&mut self, constraint: &LinearConstraint) -> Result<(), ModelError> {
        self.require(Section::Constraints, "a constraint")?;
        writeln!(self.out, "  {}", constraint)?;
        self.nconss += 1;
        Ok(())
    }

    /// Write the terminator and hand back the underlying stream
    pub fn finish(mut self) -> Result<W, ModelError> {
        self.enter(Section::End)?;
        writeln!(self.out, "END")?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> ConstraintSink for ModelWriter<W> {
    type Error = ModelError;

    fn emit(&mut self, constraint: LinearConstraint) -> Result<(), Self::Error> {
        self.write_linear(&constraint)
    }
}

fn section_name(section: Section) -> &'static str {
    match section {
        Section::Start => "<start>",
        Section::Statistics => "STATISTICS",
        Section::Objective => "OBJECTIVE",
        Section::Variables => "VARIABLES",
        Section::Constraints => "CONSTRAINTS",
        Section::End => "END",
    }
}
