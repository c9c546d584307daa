//! Symmetry handling inequalities for matrices of variables
//!
//! All functions are pure in their inputs: they read the matrix, push
//! constraints into the sink in generation order and return how many were
//! pushed. Empty matrices produce no constraints.

use tracing::debug;

use super::constraint::{ConstraintSink, LinearConstraint};
use super::matrix::VariableMatrix;
use super::variant::Variant;

/// Enforce `x[0,0] >= x[0,1] >= ... >= x[0,n-1]`.
///
/// If `row_is_nonnegative`, additionally `x[0,n-1] >= 0`.
pub fn sort_first_row<S: ConstraintSink>(
    sink: &mut S,
    matrix: &VariableMatrix,
    row_is_nonnegative: bool,
) -> Result<usize, S::Error> {
    if matrix.is_empty() {
        return Ok(0);
    }

    let ncols = matrix.ncols();
    let mut emitted = 0;

    for j in 0..ncols - 1 {
        sink.emit(LinearConstraint::ordering(
            format!("sort_first_row{}", j),
            matrix.get(0, j),
            matrix.get(0, j + 1),
        ))?;
        emitted += 1;
    }

    if row_is_nonnegative {
        sink.emit(LinearConstraint::non_negative(
            "first_row_nonnegative",
            matrix.get(0, ncols - 1),
        ))?;
        emitted += 1;
    }

    Ok(emitted)
}

/// Enforce `x[0,0] >= x[1,0] >= ... >= x[m-1,0]`.
pub fn sort_first_column<S: ConstraintSink>(
    sink: &mut S,
    matrix: &VariableMatrix,
) -> Result<usize, S::Error> {
    if matrix.is_empty() {
        return Ok(0);
    }

    let mut emitted = 0;
    for i in 0..matrix.nrows() - 1 {
        sink.emit(LinearConstraint::ordering(
            format!("sort_first_column{}", i),
            matrix.get(i, 0),
            matrix.get(i + 1, 0),
        ))?;
        emitted += 1;
    }

    Ok(emitted)
}

/// Double-lex reflection scheme for a matrix whose rows and columns can be
/// permuted arbitrarily and whose column entries can be sign-reflected.
///
/// Column 0 has `nrows` active rows; every later column has `ceil(k/2)`
/// active rows, where `k` is the active count of the preceding column. In a
/// column with `k` active rows the first `ceil(k/2)` entries are forced
/// non-negative. With `enforce_sorting`, the remaining active rows
/// `ceil(k/2)..k` are sorted, and a final pass sorts the leading rows of the
/// last group.
///
/// Sorting always compares entries of column 0, whatever column is being
/// processed.
pub fn double_lex_reflection<S: ConstraintSink>(
    sink: &mut S,
    matrix: &VariableMatrix,
    enforce_sorting: bool,
) -> Result<usize, S::Error> {
    if matrix.is_empty() {
        return Ok(0);
    }

    let mut emitted = 0;
    let mut active = matrix.nrows();
    let mut half = active.div_ceil(2);

    for j in 0..matrix.ncols() {
        for i in 0..half {
            sink.emit(LinearConstraint::non_negative(
                format!("doublelex_nonnegative_col{}_row{}", j, i),
                matrix.get(i, j),
            ))?;
            emitted += 1;
        }

        if enforce_sorting {
            emitted += sort_column_zero(sink, matrix, half, active.saturating_sub(1))?;
        }

        active = half;
        half = active.div_ceil(2);
    }

    // last group
    if enforce_sorting {
        emitted += sort_column_zero(sink, matrix, 0, half.saturating_sub(1))?;
    }

    Ok(emitted)
}

/// `x[i,0] >= x[i+1,0]` for `i` in `from..to`
fn sort_column_zero<S: ConstraintSink>(
    sink: &mut S,
    matrix: &VariableMatrix,
    from: usize,
    to: usize,
) -> Result<usize, S::Error> {
    let mut emitted = 0;
    for i in from..to {
        sink.emit(LinearConstraint::ordering(
            format!("doublelex_sort_row{}", i),
            matrix.get(i, 0),
            matrix.get(i + 1, 0),
        ))?;
        emitted += 1;
    }
    Ok(emitted)
}

/// Add the symmetry handling inequalities selected by `variant`.
///
/// Returns the number of constraints pushed into `sink`.
pub fn synthesize<S: ConstraintSink>(
    sink: &mut S,
    matrix: &VariableMatrix,
    variant: Variant,
) -> Result<usize, S::Error> {
    let emitted = match variant {
        Variant::None => 0,
        Variant::SortFirstRow => sort_first_row(sink, matrix, false)?,
        Variant::SortFirstRowNonNegative => sort_first_row(sink, matrix, true)?,
        Variant::SortFirstRowAndColumn => {
            sort_first_row(sink, matrix, true)? + sort_first_column(sink, matrix)?
        }
        Variant::DoubleLex => double_lex_reflection(sink, matrix, false)?,
        Variant::DoubleLexSorted => double_lex_reflection(sink, matrix, true)?,
        Variant::DoubleLexSortedFirstRow => {
            double_lex_reflection(sink, matrix, true)? + sort_first_row(sink, matrix, false)?
        }
    };

    debug!(
        variant = variant.code(),
        nrows = matrix.nrows(),
        ncols = matrix.ncols(),
        emitted,
        "synthesized symmetry handling constraints"
    );

    Ok(emitted)
}

/// Upper bound on the number of constraints [`synthesize`] emits for an
/// `nrows x ncols` matrix, over all variants.
pub fn ub_number_conss(nrows: usize, ncols: usize) -> usize {
    2 * (nrows * ncols + 1) + ncols
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn names(conss: &[LinearConstraint]) -> Vec<&str> {
        conss.iter().map(|c| c.name.as_str()).collect()
    }

    fn run(matrix: &VariableMatrix, variant: Variant) -> Vec<LinearConstraint> {
        let mut conss = Vec::new();
        synthesize(&mut conss, matrix, variant).unwrap();
        conss
    }

    #[test]
    fn test_variant_none_is_empty() {
        for (m, n) in [(1, 1), (4, 3), (10, 2)] {
            assert!(run(&VariableMatrix::points(m, n), Variant::None).is_empty());
        }
    }

    #[test]
    fn test_sort_first_row_counts() {
        let matrix = VariableMatrix::points(2, 3);

        let mut conss = Vec::new();
        assert_eq!(sort_first_row(&mut conss, &matrix, true).unwrap(), 3);
        assert_eq!(
            names(&conss),
            ["sort_first_row0", "sort_first_row1", "first_row_nonnegative"]
        );
        assert_eq!(conss[2].terms, vec![(-1, "x0_2".to_string())]);

        let mut conss = Vec::new();
        assert_eq!(sort_first_row(&mut conss, &matrix, false).unwrap(), 2);
        assert_eq!(
            conss[1].to_string(),
            "[linear] <sort_first_row1>: -<x0_1> + <x0_2> <= 0;"
        );
    }

    #[test]
    fn test_sort_first_column() {
        let matrix = VariableMatrix::points(4, 2);
        let mut conss = Vec::new();
        assert_eq!(sort_first_column(&mut conss, &matrix).unwrap(), 3);
        assert_eq!(
            conss[2].to_string(),
            "[linear] <sort_first_column2>: -<x2_0> + <x3_0> <= 0;"
        );
    }

    #[test]
    fn test_double_lex_single_column() {
        let matrix = VariableMatrix::points(4, 1);
        let conss = run(&matrix, Variant::DoubleLex);
        assert_eq!(
            names(&conss),
            [
                "doublelex_nonnegative_col0_row0",
                "doublelex_nonnegative_col0_row1"
            ]
        );
    }

    #[test]
    fn test_double_lex_halving() {
        // active rows: 7 -> 4 -> 2
        let matrix = VariableMatrix::points(7, 3);
        let conss = run(&matrix, Variant::DoubleLex);
        let per_col: Vec<usize> = (0..3)
            .map(|j| {
                conss
                    .iter()
                    .filter(|c| c.name.starts_with(&format!("doublelex_nonnegative_col{}_", j)))
                    .count()
            })
            .collect();
        assert_eq!(per_col, vec![4, 2, 1]);
    }

    #[test]
    fn test_double_lex_sorting_uses_column_zero() {
        let matrix = VariableMatrix::points(7, 3);
        let conss = run(&matrix, Variant::DoubleLexSorted);
        let sorts: Vec<&LinearConstraint> = conss
            .iter()
            .filter(|c| c.name.starts_with("doublelex_sort_row"))
            .collect();

        // column 0 sorts rows 4..6, column 1 rows 2..3, column 2 none, final pass none
        assert_eq!(
            sorts.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            [
                "doublelex_sort_row4",
                "doublelex_sort_row5",
                "doublelex_sort_row2"
            ]
        );
        assert!(sorts.iter().all(|c| c.terms.iter().all(|(_, v)| v.ends_with("_0"))));
    }

    #[test]
    fn test_double_lex_final_sort_pass() {
        // 8 rows, one column: nonneg rows 0..4, sort rows 4..7, final pass sorts rows 0..1
        let matrix = VariableMatrix::points(8, 1);
        let conss = run(&matrix, Variant::DoubleLexSorted);
        assert_eq!(
            names(&conss),
            [
                "doublelex_nonnegative_col0_row0",
                "doublelex_nonnegative_col0_row1",
                "doublelex_nonnegative_col0_row2",
                "doublelex_nonnegative_col0_row3",
                "doublelex_sort_row4",
                "doublelex_sort_row5",
                "doublelex_sort_row6",
                "doublelex_sort_row0",
            ]
        );
    }

    #[test]
    fn test_variant_six_order() {
        let matrix = VariableMatrix::points(2, 2);
        let conss = run(&matrix, Variant::DoubleLexSortedFirstRow);
        assert_eq!(
            names(&conss),
            [
                "doublelex_nonnegative_col0_row0",
                "doublelex_nonnegative_col1_row0",
                "sort_first_row0"
            ]
        );
    }

    #[test]
    fn test_variant_three() {
        let matrix = VariableMatrix::points(3, 2);
        let conss = run(&matrix, Variant::SortFirstRowAndColumn);
        assert_eq!(
            names(&conss),
            [
                "sort_first_row0",
                "first_row_nonnegative",
                "sort_first_column0",
                "sort_first_column1"
            ]
        );
    }

    #[test]
    fn test_names_unique_within_model() {
        for variant in Variant::ALL {
            let conss = run(&VariableMatrix::points(13, 3), variant);
            let mut seen = std::collections::HashSet::new();
            for c in &conss {
                assert!(seen.insert(c.name.clone()), "duplicate name {}", c.name);
            }
        }
    }

    #[test]
    fn test_empty_matrix() {
        for variant in Variant::ALL {
            assert!(run(&VariableMatrix::points(0, 3), variant).is_empty());
            assert!(run(&VariableMatrix::points(3, 0), variant).is_empty());
        }
    }

    #[test]
    fn test_returned_count_matches_sink() {
        let matrix = VariableMatrix::points(9, 4);
        for variant in Variant::ALL {
            let mut conss = Vec::new();
            let n = synthesize(&mut conss, &matrix, variant).unwrap();
            assert_eq!(n, conss.len());
        }
    }

    proptest! {
        #[test]
        fn prop_count_within_upper_bound(nrows in 0usize..40, ncols in 0usize..12, code in 0i64..7) {
            let variant = Variant::try_from(code).unwrap();
            let matrix = VariableMatrix::points(nrows, ncols);
            let conss = run(&matrix, variant);
            prop_assert!(conss.len() <= ub_number_conss(nrows, ncols));
        }

        #[test]
        fn prop_synthesis_is_pure(nrows in 1usize..20, ncols in 1usize..6, code in 0i64..7) {
            let variant = Variant::try_from(code).unwrap();
            let matrix = VariableMatrix::points(nrows, ncols);
            let once = run(&matrix, variant);

            let mut twice = Vec::new();
            synthesize(&mut twice, &matrix, variant).unwrap();
            synthesize(&mut twice, &matrix, variant).unwrap();

            let mut doubled = once.clone();
            doubled.extend(once);
            prop_assert_eq!(twice, doubled);
        }
    }
}
