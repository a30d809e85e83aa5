use crate::error::TabsimError;
use crate::normal_form::NormalForm;
use crate::problem::{ConstraintOp, Direction, Problem};
use crate::util::EPS;

use nalgebra::{DMatrix, DVector};

/// The augmented simplex tableau.
///
/// Row 0 is the objective (reduced-cost) row, rows `1..=m` are constraint
/// rows. Columns left to right: original variables, the shared slack/surplus
/// block (slack +1 per ≤ row, surplus −1 per ≥ row, one running counter in
/// row order), the artificial block (+1 per ≥/= row), and the right-hand
/// side last. A single tableau is built per solve call and mutated in place
/// by each pivot.
#[derive(Debug, Clone)]
pub struct Tableau {
    grid: DMatrix<f64>,
    num_vars: usize,
    num_slack_surplus: usize,
    num_artificial: usize,
}

impl Tableau {
    /// Builds the initial tableau from the normalized constraint system,
    /// placing slack, surplus, and artificial columns by the original senses.
    ///
    /// Row 0 holds the negated maximization objective; for a minimization
    /// problem the coefficients are negated first, so the iteration loop
    /// always computes as if maximizing.
    pub fn new(prob: &Problem, normal: &NormalForm) -> Self {
        let m = prob.num_constraints();
        let n = prob.num_vars();

        let num_slack = count_op(prob, ConstraintOp::Lte);
        let num_surplus = count_op(prob, ConstraintOp::Gte);
        let num_artificial = num_surplus + count_op(prob, ConstraintOp::Eq);
        let num_slack_surplus = num_slack + num_surplus;

        let total_cols = n + num_slack_surplus + num_artificial + 1;
        let mut grid = DMatrix::zeros(m + 1, total_cols);

        for (j, c) in prob.objective().iter().enumerate() {
            grid[(0, j)] = match prob.direction() {
                Direction::Max => -c,
                Direction::Min => *c,
            };
        }

        let mut slack_surplus_col = n;
        let mut artificial_col = n + num_slack_surplus;

        for i in 0..m {
            for j in 0..n {
                grid[(i + 1, j)] = normal.A[(i, j)];
            }

            grid[(i + 1, total_cols - 1)] = normal.b[i];

            match prob.senses()[i] {
                ConstraintOp::Lte => {
                    grid[(i + 1, slack_surplus_col)] = 1.;
                    slack_surplus_col += 1;
                }

                ConstraintOp::Gte => {
                    grid[(i + 1, artificial_col)] = 1.;
                    artificial_col += 1;
                    grid[(i + 1, slack_surplus_col)] = -1.;
                    slack_surplus_col += 1;
                }

                ConstraintOp::Eq => {
                    grid[(i + 1, artificial_col)] = 1.;
                    artificial_col += 1;
                }
            }
        }

        Self {
            grid,
            num_vars: n,
            num_slack_surplus,
            num_artificial,
        }
    }

    pub fn rows(&self) -> usize {
        self.grid.nrows()
    }

    pub fn cols(&self) -> usize {
        self.grid.ncols()
    }

    fn artificial_start(&self) -> usize {
        self.num_vars + self.num_slack_surplus
    }

    fn rhs(&self, row: usize) -> f64 {
        self.grid[(row, self.grid.ncols() - 1)]
    }

    /// The objective row's right-hand side entry.
    pub fn objective_value(&self) -> f64 {
        self.rhs(0)
    }

    pub fn grid(&self) -> &DMatrix<f64> {
        &self.grid
    }

    pub fn snapshot(&self) -> DMatrix<f64> {
        self.grid.clone()
    }

    /// The pre-iteration infeasibility check: a constraint row whose basic
    /// column lies in the artificial block while its right-hand side is
    /// nonzero cannot be driven feasible, since no penalty for artificial
    /// variables is ever added to the objective row.
    pub fn initial_basis_infeasible(&self) -> bool {
        let block = self.artificial_start() + self.num_artificial;

        for i in 1..self.rows() {
            let basic_col = (0..block).find(|&j| (self.grid[(i, j)] - 1.).abs() < EPS);

            if let Some(j) = basic_col {
                if j >= self.artificial_start() && self.rhs(i).abs() > EPS {
                    return true;
                }
            }
        }

        false
    }

    /// Dantzig's rule: the column with the most negative objective-row entry,
    /// lowest index on ties. `None` means no negative entry remains and the
    /// tableau is optimal.
    pub fn entering_column(&self) -> Option<usize> {
        let mut entering = 0;

        for j in 1..self.cols() - 1 {
            if self.grid[(0, j)] < self.grid[(0, entering)] {
                entering = j;
            }
        }

        if self.cols() > 1 && self.grid[(0, entering)] < 0. {
            Some(entering)
        } else {
            None
        }
    }

    /// Per-row ratios for the leaving-variable selection. Rows whose entry in
    /// the entering column is not strictly positive carry no candidate.
    pub fn ratios(&self, entering: usize) -> Vec<Option<f64>> {
        (1..self.rows())
            .map(|i| {
                let a = self.grid[(i, entering)];

                if a > 0. {
                    Some(self.rhs(i) / a)
                } else {
                    None
                }
            })
            .collect()
    }

    /// The minimum-ratio rule, lowest row index on ties. `None` means every
    /// row is ineligible and the problem is unbounded.
    pub fn leaving_row(&self, entering: usize) -> Option<usize> {
        let mut leaving: Option<(usize, f64)> = None;

        for (i, ratio) in self.ratios(entering).iter().enumerate() {
            if let Some(ratio) = ratio {
                match leaving {
                    Some((_, best)) if *ratio >= best => (),
                    _ => leaving = Some((i + 1, *ratio)),
                }
            }
        }

        leaving.map(|(row, _)| row)
    }

    /// The Gauss-Jordan pivot step: normalizes the leaving row by the pivot
    /// element and zeroes the entering column in every other row.
    pub fn pivot(&mut self, leaving: usize, entering: usize) -> Result<(), TabsimError> {
        let pivot_element = self.grid[(leaving, entering)];

        if pivot_element.abs() < EPS {
            return Err(TabsimError::numeric(format!(
                "pivot element {} at row {}, column {} is too close to zero",
                pivot_element, leaving, entering
            )));
        }

        for j in 0..self.cols() {
            self.grid[(leaving, j)] /= pivot_element;
        }

        for i in 0..self.rows() {
            if i == leaving {
                continue;
            }

            let factor = self.grid[(i, entering)];

            if factor == 0. {
                continue;
            }

            for j in 0..self.cols() {
                self.grid[(i, j)] -= factor * self.grid[(leaving, j)];
            }
        }

        Ok(())
    }

    /// Reads the solution off a terminal tableau. An original variable takes
    /// the right-hand side of the row holding its unit entry when its column
    /// is a unit vector over all rows, row 0 included; otherwise it is zero.
    pub fn extract(&self, direction: Direction) -> (DVector<f64>, f64) {
        let mut x = DVector::zeros(self.num_vars);

        for j in 0..self.num_vars {
            if let Some(row) = self.unit_row(j) {
                x[j] = self.rhs(row);
            }
        }

        let mut obj = self.objective_value();

        if let Direction::Min = direction {
            obj = -obj;
        }

        (x, obj)
    }

    /// The first row (ascending) holding the 1 of a unit-vector column.
    fn unit_row(&self, col: usize) -> Option<usize> {
        let mut one_row = None;

        for i in 0..self.rows() {
            let v = self.grid[(i, col)];

            if (v - 1.).abs() < EPS {
                if one_row.is_some() {
                    return None;
                }

                one_row = Some(i);
            } else if v.abs() > EPS {
                return None;
            }
        }

        one_row
    }
}

fn count_op(prob: &Problem, op: ConstraintOp) -> usize {
    prob.senses().iter().filter(|s| **s == op).count()
}
