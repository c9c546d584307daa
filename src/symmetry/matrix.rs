//! Matrices of model variables

use std::fmt;

/// A dense `nrows x ncols` matrix of variable names.
///
/// Every index pair in range has a name; the synthesizer only reads from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableMatrix {
    nrows: usize,
    ncols: usize,
    /// Row-major storage
    names: Vec<String>,
}

impl VariableMatrix {
    /// Build a matrix by naming every `(row, col)` pair.
    pub fn from_fn<F, S>(nrows: usize, ncols: usize, mut name: F) -> Self
    where
        F: FnMut(usize, usize) -> S,
        S: Into<String>,
    {
        let mut names = Vec::with_capacity(nrows * ncols);
        for i in 0..nrows {
            for j in 0..ncols {
                names.push(name(i, j).into());
            }
        }

        Self {
            nrows,
            ncols,
            names,
        }
    }

    /// The `x{i}_{j}` naming used by all point-based generators
    pub fn points(npoints: usize, dimension: usize) -> Self {
        Self::from_fn(npoints, dimension, |i, d| format!("x{}_{}", i, d))
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn is_empty(&self) -> bool {
        self.nrows == 0 || self.ncols == 0
    }

    /// Name of the variable at `(row, col)`.
    ///
    /// # Panics
    /// Panics if the index is out of range.
    pub fn get(&self, row: usize, col: usize) -> &str {
        assert!(
            row < self.nrows && col < self.ncols,
            "index ({}, {}) out of range for {}x{} matrix",
            row,
            col,
            self.nrows,
            self.ncols
        );
        &self.names[row * self.ncols + col]
    }
}

impl fmt::Display for VariableMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} variable matrix", self.nrows, self.ncols)
    }
}
