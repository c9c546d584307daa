//! Linear constraint records and the sinks that receive them

use std::convert::Infallible;
use std::fmt;

/// A named linear inequality `sum coef * var <= rhs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearConstraint {
    pub name: String,
    pub terms: Vec<(i64, String)>,
    pub rhs: i64,
}

impl LinearConstraint {
    pub fn new(name: impl Into<String>, rhs: i64) -> Self {
        Self {
            name: name.into(),
            terms: Vec::new(),
            rhs,
        }
    }

    pub fn with_term(mut self, coef: i64, var: impl Into<String>) -> Self {
        self.terms.push((coef, var.into()));
        self
    }

    /// `-a + b <= 0`, i.e. `a >= b`
    pub fn ordering(name: impl Into<String>, larger: &str, smaller: &str) -> Self {
        Self::new(name, 0).with_term(-1, larger).with_term(1, smaller)
    }

    /// `-a <= 0`, i.e. `a >= 0`
    pub fn non_negative(name: impl Into<String>, var: &str) -> Self {
        Self::new(name, 0).with_term(-1, var)
    }

    /// Left-hand side in CIP syntax, e.g. `-<x0_0> + <x0_1>`
    pub fn expression(&self) -> String {
        let mut expr = String::new();
        for (idx, (coef, var)) in self.terms.iter().enumerate() {
            let sign = match (idx, *coef < 0) {
                (0, true) => "-",
                (0, false) => "",
                (_, true) => " - ",
                (_, false) => " + ",
            };
            expr.push_str(sign);
            if coef.abs() != 1 {
                expr.push_str(&coef.abs().to_string());
            }
            expr.push('<');
            expr.push_str(var);
            expr.push('>');
        }
        expr
    }
}

impl fmt::Display for LinearConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[linear] <{}>: {} <= {};",
            self.name,
            self.expression(),
            self.rhs
        )
    }
}

/// Destination for synthesized constraints, fed in generation order
pub trait ConstraintSink {
    type Error;

    fn emit(&mut self, constraint: LinearConstraint) -> Result<(), Self::Error>;
}

impl ConstraintSink for Vec<LinearConstraint> {
    type Error = Infallible;

    fn emit(&mut self, constraint: LinearConstraint) -> Result<(), Self::Error> {
        self.push(constraint);
        Ok(())
    }
}

/// Counts constraints without keeping them
#[allow(dead_code)]
#[derive(Debug, Default, Clone, Copy)]
pub struct CountingSink(pub usize);

impl ConstraintSink for CountingSink {
    type Error = Infallible;

    fn emit(&mut self, _constraint: LinearConstraint) -> Result<(), Self::Error> {
        self.0 += 1;
        Ok(())
    }
}
