use crate::error::TabsimError;
use crate::util::EPS;

use nalgebra::{DMatrix, DVector};

const LTE_STR: &str = "\u{2264}";
const EQ_STR: &str = "\u{003D}";
const GTE_STR: &str = "\u{2265}";

/// A linear program: objective coefficients, a constraint matrix, right-hand
/// sides, per-row senses, and an optimization direction.
///
/// A `Problem` is validated on construction and never mutated by the solver.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    objective: DVector<f64>,
    constraints: DMatrix<f64>,
    rhs: DVector<f64>,
    senses: Vec<ConstraintOp>,
    direction: Direction,
}

impl Problem {
    pub fn new(
        objective: DVector<f64>,
        constraints: DMatrix<f64>,
        rhs: DVector<f64>,
        senses: Vec<ConstraintOp>,
        direction: Direction,
    ) -> Result<Self, TabsimError> {
        let m = constraints.nrows();
        let n = constraints.ncols();

        if rhs.len() != m {
            return Err(TabsimError::validation(format!(
                "the number of right-hand side values ({}) must equal the number of constraints ({})",
                rhs.len(),
                m
            )));
        }

        if objective.len() != n {
            return Err(TabsimError::validation(format!(
                "the number of objective coefficients ({}) must equal the number of variables ({})",
                objective.len(),
                n
            )));
        }

        if senses.len() != m {
            return Err(TabsimError::validation(format!(
                "the number of senses ({}) must equal the number of constraints ({})",
                senses.len(),
                m
            )));
        }

        if objective.iter().any(|c| !c.is_finite())
            || constraints.iter().any(|a| !a.is_finite())
            || rhs.iter().any(|b| !b.is_finite())
        {
            return Err(TabsimError::validation(
                "all problem coefficients must be finite".to_string(),
            ));
        }

        Ok(Self {
            objective,
            constraints,
            rhs,
            senses,
            direction,
        })
    }

    /// Builds a problem from plain slices, one constraint row per entry.
    pub fn from_rows(
        objective: &[f64],
        rows: &[(Vec<f64>, ConstraintOp, f64)],
        direction: Direction,
    ) -> Result<Self, TabsimError> {
        let n = objective.len();

        for (i, (coeffs, _op, _rhs)) in rows.iter().enumerate() {
            if coeffs.len() != n {
                return Err(TabsimError::validation(format!(
                    "constraint {} has {} coefficients but {} variables are expected",
                    i,
                    coeffs.len(),
                    n
                )));
            }
        }

        let flat: Vec<f64> = rows.iter().flat_map(|(coeffs, _, _)| coeffs.clone()).collect();

        Self::new(
            DVector::from_column_slice(objective),
            DMatrix::from_row_slice(rows.len(), n, &flat),
            DVector::from_iterator(rows.len(), rows.iter().map(|(_, _, rhs)| *rhs)),
            rows.iter().map(|(_, op, _)| *op).collect(),
            direction,
        )
    }

    pub fn objective(&self) -> &DVector<f64> {
        &self.objective
    }

    pub fn constraints(&self) -> &DMatrix<f64> {
        &self.constraints
    }

    pub fn rhs(&self) -> &DVector<f64> {
        &self.rhs
    }

    pub fn senses(&self) -> &[ConstraintOp] {
        self.senses.as_slice()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn num_vars(&self) -> usize {
        self.constraints.ncols()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.nrows()
    }

    /// Checks `x` against the original constraints and variable nonnegativity.
    pub fn is_feasible(&self, x: &[f64]) -> bool {
        if x.len() != self.num_vars() {
            return false;
        }

        if x.iter().any(|&x_i| x_i < -EPS) {
            return false;
        }

        for (i, op) in self.senses.iter().enumerate() {
            let lhs: f64 = self
                .constraints
                .row(i)
                .iter()
                .zip(x.iter())
                .map(|(a, x_i)| a * x_i)
                .sum();

            let feasible = match op {
                ConstraintOp::Lte => lhs <= self.rhs[i] + EPS,
                ConstraintOp::Eq => (lhs - self.rhs[i]).abs() < EPS,
                ConstraintOp::Gte => lhs >= self.rhs[i] - EPS,
            };

            if !feasible {
                return false;
            }
        }

        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOp {
    Lte,
    Eq,
    Gte,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Max,
    Min,
}

impl std::fmt::Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.direction {
            Direction::Max => writeln!(f, "maximize")?,
            Direction::Min => writeln!(f, "minimize")?,
        }

        for (j, c) in self.objective.iter().enumerate() {
            if *c == 0. {
                continue;
            }

            write!(
                f,
                "{} {} x{} ",
                if *c > 0. { "+" } else { "-" },
                c.abs(),
                j
            )?;
        }

        writeln!(f, "\n\nsubject to")?;

        for (i, op) in self.senses.iter().enumerate() {
            for (j, a) in self.constraints.row(i).iter().enumerate() {
                if *a == 0. {
                    continue;
                }

                write!(
                    f,
                    "{} {} x{} ",
                    if *a >= 0. { "+" } else { "-" },
                    a.abs(),
                    j
                )?;
            }

            writeln!(f, "{} {}", op, self.rhs[i])?;
        }

        Ok(())
    }
}

impl std::fmt::Display for ConstraintOp {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ConstraintOp::Lte => write!(f, "{}", LTE_STR),
            ConstraintOp::Eq => write!(f, "{}", EQ_STR),
            ConstraintOp::Gte => write!(f, "{}", GTE_STR),
        }
    }
}
