//! Linear expressions and constraints over formulation variables.

use std::fmt;

/// Column index of a variable in a [`Formulation`](super::Formulation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct VarId(u32);

impl VarId {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn inner(self) -> u32 {
        self.0
    }

    /// Position of this variable in a solution vector.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    Binary,
    Continuous,
}

/// A decision variable with bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub kind: VarKind,
    pub lower: f64,
    pub upper: f64,
}

impl Variable {
    pub fn binary(name: String) -> Self {
        Self {
            name,
            kind: VarKind::Binary,
            lower: 0.0,
            upper: 1.0,
        }
    }

    pub fn continuous(name: String, lower: f64, upper: f64) -> Self {
        Self {
            name,
            kind: VarKind::Continuous,
            lower,
            upper,
        }
    }

    pub fn is_integer(&self) -> bool {
        self.kind == VarKind::Binary
    }
}

/// A sparse linear expression `Σ coef·var`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearExpr {
    terms: Vec<(VarId, f64)>,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_term(&mut self, var: VarId, coef: f64) {
        self.terms.push((var, coef));
    }

    pub fn with_term(mut self, var: VarId, coef: f64) -> Self {
        self.add_term(var, coef);
        self
    }

    pub fn terms(&self) -> &[(VarId, f64)] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Value of the expression at `values` (indexed by [`VarId::index`]).
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|&(var, coef)| coef * values[var.index()])
            .sum()
    }
}

impl FromIterator<(VarId, f64)> for LinearExpr {
    fn from_iter<I: IntoIterator<Item = (VarId, f64)>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    LessEqual,
    GreaterEqual,
    Equal,
}

impl Comparison {
    pub fn as_str(self) -> &'static str {
        match self {
            Comparison::LessEqual => "<=",
            Comparison::GreaterEqual => ">=",
            Comparison::Equal => "=",
        }
    }
}

/// A named linear constraint `expr (<=|>=|=) rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    name: String,
    expr: LinearExpr,
    sense: Comparison,
    rhs: f64,
}

impl LinearConstraint {
    pub fn new(name: impl Into<String>, expr: LinearExpr, sense: Comparison, rhs: f64) -> Self {
        Self {
            name: name.into(),
            expr,
            sense,
            rhs,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expr(&self) -> &LinearExpr {
        &self.expr
    }

    pub fn sense(&self) -> Comparison {
        self.sense
    }

    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    /// Row bounds `(lower, upper)` as a solver expects them.
    pub fn bounds(&self) -> (f64, f64) {
        match self.sense {
            Comparison::LessEqual => (f64::NEG_INFINITY, self.rhs),
            Comparison::GreaterEqual => (self.rhs, f64::INFINITY),
            Comparison::Equal => (self.rhs, self.rhs),
        }
    }

    /// Amount by which `values` violates the constraint; `0.0` when satisfied.
    pub fn violation(&self, values: &[f64]) -> f64 {
        let lhs = self.expr.evaluate(values);
        match self.sense {
            Comparison::LessEqual => (lhs - self.rhs).max(0.0),
            Comparison::GreaterEqual => (self.rhs - lhs).max(0.0),
            Comparison::Equal => (lhs - self.rhs).abs(),
        }
    }

    pub fn is_satisfied(&self, values: &[f64], tolerance: f64) -> bool {
        self.violation(values) <= tolerance
    }
}

impl fmt::Display for LinearConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.name)?;
        for (k, (var, coef)) in self.expr.terms().iter().enumerate() {
            if k > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{}*v{}", coef, var.inner())?;
        }
        write!(f, " {} {}", self.sense.as_str(), self.rhs)
    }
}
