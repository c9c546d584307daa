//! Kissing number problem
//!
//! L. Liberti. Symmetry in Mathematical Programming. Combinatorial optimization
//! and applications. LNCS 5165, pp. 328-338, Springer. 2008

use std::io::Write;

use super::{
    GenerateError, InstanceGenerator, check_shape, squared_distance, squared_norm,
    write_point_variables,
};
use crate::model::{ConsKind, ModelStatistics, ModelWriter, ObjectiveSense, Relation};
use crate::symmetry::{VariableMatrix, Variant, synthesize, ub_number_conss};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KissingNumberInstance {
    /// Number of spheres
    pub npoints: usize,
    pub dimension: usize,
    /// Replace `sum_d (x^i_d - x^j_d)^2` by `8 - 2 * sum_d x^i_d * x^j_d`
    pub use_reformulation: bool,
    pub variant: Variant,
}

impl KissingNumberInstance {
    pub fn new(npoints: usize, dimension: usize, use_reformulation: bool, variant: Variant) -> Self {
        Self {
            npoints,
            dimension,
            use_reformulation,
            variant,
        }
    }

    fn distance_expression(&self, points: &VariableMatrix, i: usize, j: usize) -> String {
        if self.use_reformulation {
            let products = (0..points.ncols())
                .map(|d| format!("2 * <{}> * <{}>", points.get(i, d), points.get(j, d)))
                .collect::<Vec<_>>()
                .join(" - ");
            format!("8 - {} - 4*<obj>", products)
        } else {
            format!("{} - 4*<obj>", squared_distance(points, i, j))
        }
    }
}

impl InstanceGenerator for KissingNumberInstance {
    fn file_stem(&self) -> String {
        format!(
            "kissingnumber_N{}_D{}_reform{}_sym{}",
            self.npoints,
            self.dimension,
            if self.use_reformulation { "True" } else { "False" },
            self.variant
        )
    }

    fn write_model<W: Write>(&self, writer: &mut ModelWriter<W>) -> Result<(), GenerateError> {
        let (n, dim) = (self.npoints, self.dimension);
        check_shape(n, dim)?;

        let points = VariableMatrix::points(n, dim);
        let max_conss = n + n * (n - 1) / 2 + ub_number_conss(n, dim);

        writer.write_statistics(&ModelStatistics::continuous(
            format!("kissingnumber_N{}_D{}", n, dim),
            n * dim + 1,
            max_conss,
        ))?;
        writer.write_objective(ObjectiveSense::Maximize)?;
        write_point_variables(writer, &points, 2.0, 1.0)?;

        writer.begin_constraints()?;

        // every point has squared norm 4
        for i in 0..n {
            writer.write_constraint(
                ConsKind::Nonlinear,
                &format!("normcons{}", i),
                &squared_norm(&points, i),
                Relation::Eq,
                4,
            )?;
        }

        // all points have distance at least 4*obj
        for i in 0..n {
            for j in (i + 1)..n {
                writer.write_constraint(
                    ConsKind::Nonlinear,
                    &format!("dist{}_{}", i, j),
                    &self.distance_expression(&points, i, j),
                    Relation::Ge,
                    0,
                )?;
            }
        }

        synthesize(writer, &points, self.variant)?;
        Ok(())
    }
}
