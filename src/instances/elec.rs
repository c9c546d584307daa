//! Fekete points: N points on the unit sphere minimizing the Riesz energy
//!
//! E.B. Saff and A.B.J. Kuijlaars. Distributing Many Points on a Sphere.
//! The Mathematical Intelligencer 19(1), pp. 5-11. 1997

use std::io::Write;

use super::{
    GenerateError, InstanceGenerator, check_shape, squared_distance, squared_norm,
    write_point_variables,
};
use crate::model::{ConsKind, ModelStatistics, ModelWriter, ObjectiveSense, Relation};
use crate::symmetry::{VariableMatrix, Variant, synthesize, ub_number_conss};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElecInstance {
    pub npoints: usize,
    pub dimension: usize,
    pub variant: Variant,
}

impl ElecInstance {
    pub fn new(npoints: usize, dimension: usize, variant: Variant) -> Self {
        Self {
            npoints,
            dimension,
            variant,
        }
    }
}

impl InstanceGenerator for ElecInstance {
    fn file_stem(&self) -> String {
        format!(
            "elec_N{}_D{}_sym{}",
            self.npoints, self.dimension, self.variant
        )
    }

    fn write_model<W: Write>(&self, writer: &mut ModelWriter<W>) -> Result<(), GenerateError> {
        let (n, dim) = (self.npoints, self.dimension);
        check_shape(n, dim)?;

        let points = VariableMatrix::points(n, dim);
        let max_conss = n + 1 + ub_number_conss(n, dim);

        writer.write_statistics(&ModelStatistics::continuous(
            format!("elec_N{}_D{}", n, dim),
            n * dim + 1,
            max_conss,
        ))?;
        writer.write_objective(ObjectiveSense::Minimize)?;
        write_point_variables(writer, &points, 1.0, f64::INFINITY)?;

        writer.begin_constraints()?;

        // every point has squared norm 1
        for i in 0..n {
            writer.write_constraint(
                ConsKind::Nonlinear,
                &format!("normcons{}", i),
                &squared_norm(&points, i),
                Relation::Eq,
                1,
            )?;
        }

        // energy: sum over pairs of inverse distances, bounded by obj
        let mut energy = Vec::with_capacity(n * (n - 1) / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                energy.push(format!("1/({})^(0.5)", squared_distance(&points, i, j)));
            }
        }
        writer.write_constraint(
            ConsKind::Nonlinear,
            "objcons",
            &format!("{} - <obj>", energy.join(" + ")),
            Relation::Le,
            0,
        )?;

        synthesize(writer, &points, self.variant)?;
        Ok(())
    }
}
