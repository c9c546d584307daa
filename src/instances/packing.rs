//! Allocate N points in a hypercube such that the pairwise l1-distance is as
//! large as possible.

use std::io::Write;

use super::{GenerateError, InstanceGenerator, check_shape, write_point_variables};
use crate::model::{ConsKind, ModelStatistics, ModelWriter, ObjectiveSense, Relation};
use crate::symmetry::{VariableMatrix, Variant, synthesize, ub_number_conss};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackingInstance {
    pub npoints: usize,
    pub dimension: usize,
    pub variant: Variant,
}

impl PackingInstance {
    pub fn new(npoints: usize, dimension: usize, variant: Variant) -> Self {
        Self {
            npoints,
            dimension,
            variant,
        }
    }
}

impl InstanceGenerator for PackingInstance {
    fn file_stem(&self) -> String {
        format!(
            "packing_N{}_D{}_sym{}",
            self.npoints, self.dimension, self.variant
        )
    }

    fn write_model<W: Write>(&self, writer: &mut ModelWriter<W>) -> Result<(), GenerateError> {
        let (n, dim) = (self.npoints, self.dimension);
        check_shape(n, dim)?;

        let points = VariableMatrix::points(n, dim);
        let max_conss = n * (n - 1) / 2 + ub_number_conss(n, dim);

        writer.write_statistics(&ModelStatistics::continuous(
            self.file_stem(),
            n * dim + 1,
            max_conss,
        ))?;
        writer.write_objective(ObjectiveSense::Maximize)?;
        write_point_variables(writer, &points, 1.0, (2 * dim) as f64)?;

        writer.begin_constraints()?;

        // all balls have sufficient l1-distance
        for i in 0..n {
            for j in (i + 1)..n {
                let l1 = (0..dim)
                    .map(|d| format!("abs(<{}> - <{}>)", points.get(i, d), points.get(j, d)))
                    .collect::<Vec<_>>()
                    .join(" + ");
                writer.write_constraint(
                    ConsKind::Nonlinear,
                    &format!("dist{}_{}", i, j),
                    &format!("{} - 2*<obj>", l1),
                    Relation::Ge,
                    0,
                )?;
            }
        }

        synthesize(writer, &points, self.variant)?;
        Ok(())
    }
}
