//! Generators for CIP benchmark instances
//!
//! Each generator writes one model file. The point-based problems (elec,
//! kissing number, packing) build a `(point, dimension)` variable matrix and
//! append symmetry handling inequalities for it before the terminator.

pub mod batch;
pub mod elec;
pub mod kissing;
pub mod maxcut;
pub mod packing;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::model::{ModelError, ModelWriter, VarType};
use crate::symmetry::VariableMatrix;

#[allow(unused_imports)]
pub use batch::{BatchConfig, BatchSummary, run_batch};
pub use elec::ElecInstance;
pub use kissing::KissingNumberInstance;
#[allow(unused_imports)]
pub use maxcut::{Graph, MaxCutInstance};
pub use packing::PackingInstance;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("need at least 2 points of dimension at least 1, got {npoints} points of dimension {dimension}")]
    InvalidShape { npoints: usize, dimension: usize },
    #[error("failed to create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read graph {}: {source}", path.display())]
    ReadGraph {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("line {line_number}: malformed edge '{content}'")]
    InvalidEdge { line_number: usize, content: String },
    #[error("graph file {} does not end with '{filetype}'", path.display())]
    FileType { path: PathBuf, filetype: String },
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// A model that can be written as a CIP file
pub trait InstanceGenerator {
    /// File name without the `.cip` extension
    fn file_stem(&self) -> String;

    /// Write all sections of the model, except the terminator
    fn write_model<W: Write>(&self, writer: &mut ModelWriter<W>) -> Result<(), GenerateError>;
}

/// Write `generator` to `<dir>/<stem>.cip` and return the path
pub fn write_instance<G: InstanceGenerator>(
    generator: &G,
    dir: &Path,
) -> Result<PathBuf, GenerateError> {
    let path = dir.join(format!("{}.cip", generator.file_stem()));
    let file = File::create(&path).map_err(|source| GenerateError::Create {
        path: path.clone(),
        source,
    })?;

    let mut writer = ModelWriter::new(BufWriter::new(file));
    generator.write_model(&mut writer)?;
    writer.finish()?;

    info!(path = %path.display(), "wrote instance");
    Ok(path)
}

/// Render a model into a string, mostly useful for inspection and tests
#[allow(dead_code)]
pub fn render_instance<G: InstanceGenerator>(generator: &G) -> Result<String, GenerateError> {
    let mut writer = ModelWriter::new(Vec::new());
    generator.write_model(&mut writer)?;
    let bytes = writer.finish()?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn check_shape(npoints: usize, dimension: usize) -> Result<(), GenerateError> {
    if npoints < 2 || dimension < 1 {
        return Err(GenerateError::InvalidShape { npoints, dimension });
    }
    Ok(())
}

/// Point coordinates (dimension-major) followed by the objective variable
fn write_point_variables<W: Write>(
    writer: &mut ModelWriter<W>,
    points: &VariableMatrix,
    bound: f64,
    obj_upper: f64,
) -> Result<(), GenerateError> {
    writer.begin_variables()?;
    for d in 0..points.ncols() {
        for i in 0..points.nrows() {
            writer.write_variable(VarType::Continuous, points.get(i, d), 0, -bound, bound)?;
        }
    }
    writer.write_variable(VarType::Continuous, "obj", 1, 0.0, obj_upper)?;
    Ok(())
}

/// `<x{i}_{d}>^2 + ...` over all dimensions of point `i`
fn squared_norm(points: &VariableMatrix, i: usize) -> String {
    (0..points.ncols())
        .map(|d| format!("<{}>^2", points.get(i, d)))
        .collect::<Vec<_>>()
        .join(" + ")
}

/// `(<x{i}_{d}> - <x{j}_{d}>)^2 + ...`
fn squared_distance(points: &VariableMatrix, i: usize, j: usize) -> String {
    (0..points.ncols())
        .map(|d| format!("(<{}> - <{}>)^2", points.get(i, d), points.get(j, d)))
        .collect::<Vec<_>>()
        .join(" + ")
}
