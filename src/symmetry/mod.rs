//! Symmetry handling inequalities for matrix-structured variables
//!
//! Given a matrix of variables whose rows and columns can be permuted (and,
//! for the double-lex scheme, whose columns can be sign-reflected), this
//! module synthesizes linear inequalities that cut off symmetric copies:
//! - sorting of the first row and/or first column
//! - the double-lex reflection scheme, which halves the active rows per column
//!
//! The strategy is selected by a [`Variant`].

pub mod constraint;
pub mod matrix;
pub mod synthesizer;
pub mod variant;

#[allow(unused_imports)]
pub use constraint::{ConstraintSink, CountingSink, LinearConstraint};
pub use matrix::VariableMatrix;
pub use synthesizer::{synthesize, ub_number_conss};
#[allow(unused_imports)]
pub use variant::{Variant, VariantError};
